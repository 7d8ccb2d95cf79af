//! Error types for the Accord settlement engine.
//!
//! All errors use the `ACC_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors (signatures, sender checks)
//! - 2xx: Temporal errors (listing / expiration)
//! - 3xx: Capacity errors (fills, cancellation)
//! - 4xx: Predicate errors
//! - 5xx: Proxy errors
//! - 6xx: Registry errors
//! - 7xx: Runtime errors (dispatch, reverts, reentrancy)
//! - 9xx: Invariant / general errors
//!
//! Every variant aborts the whole operation it occurs in; nothing is retried.

use alloy_primitives::{Address, Selector, U256};
use thiserror::Error;

use crate::OrderHash;

/// Coarse error taxonomy, one bucket per failure domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Authorization,
    Temporal,
    Capacity,
    Predicate,
    Proxy,
    Registry,
    Runtime,
    Invariant,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Temporal => write!(f, "TEMPORAL"),
            Self::Capacity => write!(f, "CAPACITY"),
            Self::Predicate => write!(f, "PREDICATE"),
            Self::Proxy => write!(f, "PROXY"),
            Self::Registry => write!(f, "REGISTRY"),
            Self::Runtime => write!(f, "RUNTIME"),
            Self::Invariant => write!(f, "INVARIANT"),
        }
    }
}

/// Central error enum for all Accord operations.
#[derive(Debug, Error)]
pub enum AccordError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The signature recovered to an account other than the maker.
    #[error("ACC_ERR_100: Invalid signature for order {hash}: recovered {recovered}, maker is {maker}")]
    InvalidSignature {
        hash: OrderHash,
        maker: Address,
        recovered: Address,
    },

    /// The signature bytes could not be parsed or recovered.
    #[error("ACC_ERR_101: Malformed signature: {0}")]
    MalformedSignature(String),

    /// No signature was supplied and the sender is not the maker.
    #[error("ACC_ERR_102: Unsigned order requires sender {sender} to be maker {maker}")]
    SenderNotMaker { maker: Address, sender: Address },

    /// An order was matched against itself.
    #[error("ACC_ERR_103: Self-matching orders is prohibited: {0}")]
    SelfMatch(OrderHash),

    /// The maker already approved this order hash on-chain.
    #[error("ACC_ERR_104: Order already approved: {0}")]
    OrderAlreadyApproved(OrderHash),

    // =================================================================
    // Temporal Errors (2xx)
    // =================================================================
    /// The order's listing time is still in the future.
    #[error("ACC_ERR_200: Order not listed yet: listing time {listing_time}, now {now}")]
    NotListedYet { listing_time: U256, now: u64 },

    /// The order's expiration time has passed.
    #[error("ACC_ERR_201: Order expired: expiration time {expiration_time}, now {now}")]
    Expired { expiration_time: U256, now: u64 },

    // =================================================================
    // Capacity Errors (3xx)
    // =================================================================
    /// The order is fully filled or cancelled.
    #[error("ACC_ERR_300: Order {0} is fully filled or cancelled")]
    OrderFilled(OrderHash),

    /// The requested fill exceeds the order's remaining capacity.
    #[error("ACC_ERR_301: Fill {requested} exceeds remaining capacity {remaining} of order {hash}")]
    FillExceeded {
        hash: OrderHash,
        requested: U256,
        remaining: U256,
    },

    /// A match must move a non-zero fill.
    #[error("ACC_ERR_302: Fill amount must be non-zero")]
    ZeroFill,

    // =================================================================
    // Predicate Errors (4xx)
    // =================================================================
    /// The order's static predicate rejected the match.
    #[error("ACC_ERR_400: Predicate rejected order {hash}: {reason}")]
    PredicateFailed { hash: OrderHash, reason: String },

    /// The static target does not expose a predicate.
    #[error("ACC_ERR_401: No predicate at static target {0}")]
    PredicateNotFound(Address),

    /// The static target has no routine for the selector.
    #[error("ACC_ERR_402: Unknown predicate selector {selector} at {target}")]
    UnknownSelector { target: Address, selector: Selector },

    // =================================================================
    // Proxy Errors (5xx)
    // =================================================================
    /// The maker has not registered a proxy.
    #[error("ACC_ERR_500: No proxy registered for {0}")]
    ProxyNotFound(Address),

    /// The caller may not direct this proxy.
    #[error("ACC_ERR_501: Caller {caller} is not authorized to direct proxy {proxy}")]
    ProxyUnauthorized { proxy: Address, caller: Address },

    /// The proxied call failed.
    #[error("ACC_ERR_502: Proxy {proxy} execution failed: {reason}")]
    ExecutionFailed { proxy: Address, reason: String },

    /// The account already owns a proxy.
    #[error("ACC_ERR_503: Account {0} already has a proxy")]
    AlreadyRegistered(Address),

    /// Only the proxy's owner may perform this operation.
    #[error("ACC_ERR_504: Caller {caller} does not own proxy {proxy}")]
    NotProxyOwner { proxy: Address, caller: Address },

    // =================================================================
    // Registry Errors (6xx)
    // =================================================================
    /// Only the registry owner may perform this operation.
    #[error("ACC_ERR_600: Caller {0} is not the registry owner")]
    NotRegistryOwner(Address),

    /// The bootstrap grant was already used (or a timelocked grant completed).
    #[error("ACC_ERR_601: Initial authentication already granted")]
    AlreadyBootstrapped,

    /// The principal is already authorized.
    #[error("ACC_ERR_602: Principal {0} is already authorized")]
    AlreadyAuthorized(Address),

    /// A grant for the principal is already pending.
    #[error("ACC_ERR_603: Grant for {0} is already pending")]
    GrantAlreadyPending(Address),

    /// No grant was started for the principal.
    #[error("ACC_ERR_604: No pending grant for {0}")]
    GrantNotPending(Address),

    /// The grant timelock has not elapsed yet.
    #[error("ACC_ERR_605: Grant for {principal} not ready until after {ready_after}, now {now}")]
    GrantDelayNotElapsed {
        principal: Address,
        ready_after: u64,
        now: u64,
    },

    /// The order references a registry the exchange does not trust.
    #[error("ACC_ERR_606: Unknown registry {0}")]
    UnknownRegistry(Address),

    /// The two orders reference different registries.
    #[error("ACC_ERR_607: Orders reference different registries: {first} vs {second}")]
    RegistryMismatch { first: Address, second: Address },

    // =================================================================
    // Runtime Errors (7xx)
    // =================================================================
    /// No contract is deployed at the address.
    #[error("ACC_ERR_700: No contract at {0}")]
    NoContract(Address),

    /// The contract is already executing further up the call stack.
    #[error("ACC_ERR_701: Reentrant call into {0}")]
    ReentrantCall(Address),

    /// The contract at the address is not of the expected kind.
    #[error("ACC_ERR_702: Contract at {address} is {actual}, expected {expected}")]
    ContractMismatch {
        address: Address,
        expected: &'static str,
        actual: &'static str,
    },

    /// The nested call stack grew too deep.
    #[error("ACC_ERR_703: Call depth limit {0} exceeded")]
    CallDepthExceeded(usize),

    /// A contract rejected the call.
    #[error("ACC_ERR_704: Contract {contract} reverted: {reason}")]
    Reverted { contract: Address, reason: String },

    /// ABI payload could not be decoded.
    #[error("ACC_ERR_705: ABI decoding failed: {0}")]
    Abi(String),

    // =================================================================
    // Invariant / General (9xx)
    // =================================================================
    /// A fill increment would exceed the order's cap. Indicates a logic bug.
    #[error("ACC_ERR_900: Fill invariant violated for {hash}: {attempted} > cap {maximum}")]
    FillInvariantViolation {
        hash: OrderHash,
        attempted: U256,
        maximum: U256,
    },

    /// Unrecoverable internal error.
    #[error("ACC_ERR_901: Internal error: {0}")]
    Internal(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("ACC_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("ACC_ERR_903: Serialization error: {0}")]
    Serialization(String),
}

impl AccordError {
    /// The taxonomy bucket this error belongs to.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSignature { .. }
            | Self::MalformedSignature(_)
            | Self::SenderNotMaker { .. }
            | Self::SelfMatch(_)
            | Self::OrderAlreadyApproved(_) => ErrorCategory::Authorization,
            Self::NotListedYet { .. } | Self::Expired { .. } => ErrorCategory::Temporal,
            Self::OrderFilled(_) | Self::FillExceeded { .. } | Self::ZeroFill => {
                ErrorCategory::Capacity
            }
            Self::PredicateFailed { .. }
            | Self::PredicateNotFound(_)
            | Self::UnknownSelector { .. } => ErrorCategory::Predicate,
            Self::ProxyNotFound(_)
            | Self::ProxyUnauthorized { .. }
            | Self::ExecutionFailed { .. }
            | Self::AlreadyRegistered(_)
            | Self::NotProxyOwner { .. } => ErrorCategory::Proxy,
            Self::NotRegistryOwner(_)
            | Self::AlreadyBootstrapped
            | Self::AlreadyAuthorized(_)
            | Self::GrantAlreadyPending(_)
            | Self::GrantNotPending(_)
            | Self::GrantDelayNotElapsed { .. }
            | Self::UnknownRegistry(_)
            | Self::RegistryMismatch { .. } => ErrorCategory::Registry,
            Self::NoContract(_)
            | Self::ReentrantCall(_)
            | Self::ContractMismatch { .. }
            | Self::CallDepthExceeded(_)
            | Self::Reverted { .. }
            | Self::Abi(_) => ErrorCategory::Runtime,
            Self::FillInvariantViolation { .. }
            | Self::Internal(_)
            | Self::Configuration(_)
            | Self::Serialization(_) => ErrorCategory::Invariant,
        }
    }

    /// Shorthand for a contract revert with a reason.
    #[must_use]
    pub fn revert(contract: Address, reason: impl Into<String>) -> Self {
        Self::Reverted {
            contract,
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, AccordError>;

impl From<serde_json::Error> for AccordError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<alloy_sol_types::Error> for AccordError {
    fn from(err: alloy_sol_types::Error) -> Self {
        Self::Abi(err.to_string())
    }
}
