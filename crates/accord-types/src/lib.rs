//! # accord-types
//!
//! Shared types, errors, and configuration for the **Accord** settlement engine.
//!
//! This crate is the leaf dependency of the workspace. Every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrderHash`], [`TxId`]
//! - **Order model**: [`Order`], [`Call`], [`HowToCall`], [`OrderSignature`]
//! - **Predicate protocol**: [`Predicate`], [`PredicateContext`]
//! - **Events**: [`Event`], [`Log`]
//! - **ABI**: token, receiver and atomicizer interfaces ([`abi`])
//! - **Configuration**: [`ChainConfig`], [`ExchangeConfig`], [`RegistryConfig`], [`AccordConfig`]
//! - **Errors**: [`AccordError`] with `ACC_ERR_` prefix codes and an [`ErrorCategory`]
//! - **Constants**: system-wide limits and defaults

pub mod abi;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod ids;
pub mod order;
pub mod predicate;

// Re-export all primary types at crate root for ergonomic imports:
//   use accord_types::{Order, Call, Event, AccordError, ...};

pub use config::*;
pub use error::*;
pub use events::*;
pub use ids::*;
pub use order::*;
pub use predicate::*;

// Constants and ABI bindings are accessed via their modules
// (not re-exported to avoid name collisions).
