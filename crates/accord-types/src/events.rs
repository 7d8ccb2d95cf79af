//! Event log types.
//!
//! Contracts emit [`Event`]s into the runtime's append-only log. Events carry
//! no on-chain semantics; they exist for off-chain indexing and tests.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{OrderHash, TxId};

/// Everything a contract in this workspace can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Two orders settled atomically.
    OrdersMatched {
        first_hash: OrderHash,
        second_hash: OrderHash,
        first_maker: Address,
        second_maker: Address,
        fill: U256,
        metadata: B256,
    },
    /// A maker cancelled an order (fill forced to its cap).
    OrderCancelled { hash: OrderHash, maker: Address },
    /// A maker approved an order hash on-chain.
    OrderApproved { hash: OrderHash, maker: Address },
    /// A proxy was deployed for `user`.
    ProxyRegistered { user: Address, proxy: Address },
    /// A proxy owner toggled revocation of registry access.
    ProxyRevoked { user: Address, revoked: bool },
    /// A timelocked grant was started.
    GrantStarted { principal: Address, ready_after: u64 },
    /// A principal may now direct proxies.
    AuthenticationGranted { principal: Address, bootstrap: bool },
    /// A principal may no longer direct proxies.
    AuthenticationRevoked { principal: Address },
    /// Fungible transfer.
    Transfer {
        from: Address,
        to: Address,
        amount: U256,
    },
    /// Non-fungible transfer.
    NftTransfer {
        from: Address,
        to: Address,
        token_id: U256,
    },
    /// Fungible allowance set.
    Approval {
        owner: Address,
        spender: Address,
        amount: U256,
    },
    /// Operator approval toggled for all of an owner's tokens.
    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },
    /// An escrow accepted a pledged token.
    PawnOpened {
        borrower: Address,
        lender: Address,
        token: Address,
        token_id: U256,
        debt_token: Address,
        debt_amount: U256,
        deadline: U256,
    },
}

/// One entry in the runtime's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// The transaction that emitted the event.
    pub tx: TxId,
    /// The executing account (the proxy, for delegated code).
    pub emitter: Address,
    /// Block timestamp at emission.
    pub timestamp: u64,
    pub event: Event,
}
