//! The static predicate protocol.
//!
//! Every order nominates its own validation routine by address and selector.
//! At match time the engine resolves the address to a [`Predicate`] and hands
//! it the full cross-order context. The engine never knows which trade shape
//! it is settling; predicates never mutate anything.

use alloy_primitives::{Address, Selector, U256};

use crate::{Call, Order};

/// Everything a predicate may inspect about a proposed match, seen from the
/// side of the order whose predicate is running.
#[derive(Debug, Clone, Copy)]
pub struct PredicateContext<'a> {
    /// The order whose predicate is being evaluated.
    pub order: &'a Order,
    /// The call this order's maker's proxy will execute.
    pub call: &'a Call,
    /// The other side of the match.
    pub counter_order: &'a Order,
    /// The call the counterparty's proxy will execute.
    pub counter_call: &'a Call,
    /// Account that submitted the match.
    pub matcher: Address,
    /// Caller-declared match value (opaque to the engine).
    pub value: U256,
    /// Fill amount proposed for this match.
    pub fill: U256,
    /// This order's cumulative fill before the match.
    pub previous_fill: U256,
}

/// An order-selectable validation capability.
///
/// Implementations assert (by returning `Err(reason)`) that the two calls,
/// in combination, realize the trade the maker intended.
pub trait Predicate {
    /// Run the routine identified by `selector`.
    ///
    /// # Errors
    /// A human-readable rejection reason; the engine propagates it opaquely.
    fn validate(&self, selector: Selector, ctx: &PredicateContext<'_>) -> Result<(), String>;

    /// Whether this predicate exposes a routine for `selector`.
    fn supports(&self, selector: Selector) -> bool;
}
