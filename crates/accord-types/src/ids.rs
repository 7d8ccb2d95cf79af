//! Identifiers used throughout Accord.
//!
//! Order identity is content-addressed (the EIP-712 digest of the order);
//! runtime transactions use UUIDv7 for time-ordered sorting in logs.

use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// OrderHash
// ---------------------------------------------------------------------------

/// Domain-separated EIP-712 digest of an order.
///
/// This is both the message a maker signs and the key of the fill ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderHash(pub B256);

impl OrderHash {
    pub const ZERO: Self = Self(B256::ZERO);

    #[must_use]
    pub fn as_b256(&self) -> &B256 {
        &self.0
    }

    /// First four bytes, hex encoded. Handy in log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<B256> for OrderHash {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// TxId
// ---------------------------------------------------------------------------

/// Identifier of one runtime transaction (one top-level, all-or-nothing operation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TxId(pub Uuid);

impl TxId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TxId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx:{}", self.0)
    }
}
