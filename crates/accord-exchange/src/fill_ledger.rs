//! Per-order cumulative fill counters.
//!
//! A fill entry starts at zero, grows with every match up to the order's
//! `maximum_fill`, jumps straight to `maximum_fill` on cancellation and never
//! decreases. An order whose fill equals its cap can never match again.

use std::collections::HashMap;

use accord_types::{AccordError, OrderHash, Result};
use alloy_primitives::U256;

#[derive(Debug, Clone, Default)]
pub struct FillLedger {
    fills: HashMap<OrderHash, U256>,
}

impl FillLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative fill of `hash` (zero if never touched).
    #[must_use]
    pub fn current_fill(&self, hash: OrderHash) -> U256 {
        self.fills.get(&hash).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn remaining(&self, hash: OrderHash, maximum: U256) -> U256 {
        maximum.saturating_sub(self.current_fill(hash))
    }

    /// Whether a match of `amount` fits in the order's remaining capacity.
    ///
    /// # Errors
    /// - `ZeroFill` if `amount` is zero
    /// - `OrderFilled` if nothing remains (including `maximum == 0`)
    /// - `FillExceeded` if `amount` is larger than what remains
    pub fn check_capacity(&self, hash: OrderHash, maximum: U256, amount: U256) -> Result<()> {
        if amount.is_zero() {
            return Err(AccordError::ZeroFill);
        }
        let remaining = self.remaining(hash, maximum);
        if remaining.is_zero() {
            return Err(AccordError::OrderFilled(hash));
        }
        if amount > remaining {
            return Err(AccordError::FillExceeded {
                hash,
                requested: amount,
                remaining,
            });
        }
        Ok(())
    }

    /// Add `amount` to the fill of `hash`, returning the new total.
    ///
    /// # Errors
    /// `FillInvariantViolation` if the new total would exceed `maximum`.
    pub fn increment(&mut self, hash: OrderHash, amount: U256, maximum: U256) -> Result<U256> {
        let current = self.current_fill(hash);
        let next = current.saturating_add(amount);
        if next > maximum {
            return Err(AccordError::FillInvariantViolation {
                hash,
                attempted: next,
                maximum,
            });
        }
        self.fills.insert(hash, next);
        Ok(next)
    }

    /// Exhaust the order. Returns the fill it had before.
    pub fn cancel(&mut self, hash: OrderHash, maximum: U256) -> U256 {
        let previous = self.current_fill(hash);
        self.fills.insert(hash, previous.max(maximum));
        previous
    }

    /// Number of orders with a recorded fill.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }
}
