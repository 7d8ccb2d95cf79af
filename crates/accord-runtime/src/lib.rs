//! # accord-runtime
//!
//! Deterministic single-threaded contract runtime for the **Accord**
//! settlement engine.
//!
//! Contracts live at addresses in a [`World`]. Execution is sequential and
//! nested: a contract may call another, which may call a third, each in its
//! own [`CallContext`] frame. Two properties hold for every transaction:
//!
//! 1. **All or nothing.** [`World::transact`] snapshots state and restores it
//!    if anything in the transaction fails.
//! 2. **No re-entry.** A contract executing on the call stack is checked out
//!    of the world; any nested attempt to enter it fails with
//!    `ReentrantCall`.

pub mod context;
pub mod contract;
pub mod world;

pub use context::CallContext;
pub use contract::{Contract, ContractClone};
pub use world::World;
