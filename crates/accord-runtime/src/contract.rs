//! The contract abstraction.
//!
//! Every account with code is a boxed [`Contract`] stored at an address in the
//! [`World`](crate::World). Contracts are dispatched two ways:
//!
//! - **Raw** via [`Contract::call`] / [`Contract::delegate_call`] with an ABI
//!   payload. This is how proxies reach arbitrary targets.
//! - **Typed** via [`CallContext::invoke`](crate::CallContext::invoke), which
//!   downcasts to the concrete type and runs a closure against it.

use std::any::Any;

use accord_types::{AccordError, Predicate, Result};
use alloy_primitives::Bytes;

use crate::CallContext;

/// Code deployed at an address.
pub trait Contract: ContractClone + Any {
    /// Short human-readable kind, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Handle a direct call. `ctx.this()` is this contract's address and
    /// `ctx.sender()` is the immediate caller.
    fn call(&mut self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes> {
        let _ = input;
        Err(AccordError::revert(
            ctx.this(),
            format!("{} does not accept direct calls", self.name()),
        ))
    }

    /// Run this contract's code on behalf of the caller. `ctx.this()` and
    /// `ctx.sender()` are the *caller's* identity, so any outgoing calls are
    /// made as the caller.
    fn delegate_call(&self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes> {
        let _ = input;
        Err(AccordError::revert(
            ctx.this(),
            format!("{} does not support delegate calls", self.name()),
        ))
    }

    /// The predicate surface of this contract, if it exposes one.
    fn predicate(&self) -> Option<&dyn Predicate> {
        None
    }
}

/// Object-safe cloning and downcasting for boxed contracts.
///
/// Implemented automatically for every `Contract + Clone`.
pub trait ContractClone {
    fn clone_box(&self) -> Box<dyn Contract>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Contract + Clone> ContractClone for T {
    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Clone for Box<dyn Contract> {
    fn clone(&self) -> Self {
        self.as_ref().clone_box()
    }
}

impl std::fmt::Debug for dyn Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Contract({})", self.name())
    }
}
