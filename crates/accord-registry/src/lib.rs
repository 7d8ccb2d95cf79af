//! # accord-registry
//!
//! Account registry and delegated-execution proxies for **Accord**.
//!
//! Every trading account registers exactly one [`AuthenticatedProxy`] and
//! grants its token approvals to that proxy. At settlement the exchange,
//! being a registry-authorized principal, directs both makers' proxies to
//! execute their calls.

pub mod client;
pub mod proxy;
pub mod registry;

pub use proxy::AuthenticatedProxy;
pub use registry::ProxyRegistry;
