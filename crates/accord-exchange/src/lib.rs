//! # accord-exchange
//!
//! The atomic match engine of **Accord**.
//!
//! Given two orders, their authorizations and one settlement call per maker,
//! [`Exchange::atomic_match`] checks both orders, runs both static
//! predicates, has both makers' proxies execute their calls and records the
//! fill. Either every step takes effect or none does.
//!
//! ## Modules
//!
//! - [`eip712`]: domain-separated order digests
//! - [`signature`]: secp256k1 recovery and signing
//! - [`fill_ledger`]: cumulative fills and cancellation
//! - [`request`]: match request and outcome types
//! - [`exchange`]: the engine contract
//! - [`client`]: transaction entry points and bootstrap

pub mod client;
pub mod eip712;
pub mod exchange;
pub mod fill_ledger;
pub mod request;
pub mod signature;

pub use client::Deployment;
pub use eip712::OrderDomain;
pub use exchange::Exchange;
pub use fill_ledger::FillLedger;
pub use request::{MatchOutcome, MatchRequest, MatchSide};
pub use signature::{OrderSigner, recover_signer};
