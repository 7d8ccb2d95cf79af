//! Match request and outcome types.

use accord_types::{Call, Order, OrderHash, OrderSignature};
use alloy_primitives::{B256, U256};

/// One side of a match: an order, how its maker authorized it, and the call
/// the maker's proxy will execute.
#[derive(Debug, Clone)]
pub struct MatchSide {
    pub order: Order,
    /// `None` relies on the matcher being the maker or on prior approval.
    pub signature: Option<OrderSignature>,
    pub call: Call,
}

impl MatchSide {
    #[must_use]
    pub fn signed(order: Order, signature: OrderSignature, call: Call) -> Self {
        Self {
            order,
            signature: Some(signature),
            call,
        }
    }

    #[must_use]
    pub fn unsigned(order: Order, call: Call) -> Self {
        Self {
            order,
            signature: None,
            call,
        }
    }
}

/// Everything the matcher submits for one atomic match.
#[derive(Debug, Clone)]
pub struct MatchRequest {
    pub first: MatchSide,
    pub second: MatchSide,
    /// Units of fill this match consumes from both orders.
    pub fill: U256,
    /// Opaque value forwarded to the predicates.
    pub value: U256,
    /// Free-form tag echoed in the settlement event.
    pub metadata: B256,
}

impl MatchRequest {
    /// A single-unit match with zero value and empty metadata.
    #[must_use]
    pub fn new(first: MatchSide, second: MatchSide) -> Self {
        Self {
            first,
            second,
            fill: U256::from(1),
            value: U256::ZERO,
            metadata: B256::ZERO,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: U256) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: B256) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Result of a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub first_hash: OrderHash,
    pub second_hash: OrderHash,
    pub fill: U256,
    /// Cumulative fill of the first order after the match.
    pub first_total: U256,
    /// Cumulative fill of the second order after the match.
    pub second_total: U256,
}
