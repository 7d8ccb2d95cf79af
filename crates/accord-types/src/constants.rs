//! System-wide constants for the Accord settlement engine.

/// Default EIP-712 domain name. Matches the deployed exchange so digests of
/// externally signed orders line up.
pub const DEFAULT_EXCHANGE_NAME: &str = "Wyvern Exchange";

/// Default EIP-712 domain version.
pub const DEFAULT_EXCHANGE_VERSION: &str = "3.1";

/// Default chain identifier (local development chain).
pub const DEFAULT_CHAIN_ID: u64 = 31337;

/// Default delay between starting and finishing a registry grant (two weeks).
pub const DEFAULT_GRANT_DELAY_SECS: u64 = 14 * 24 * 60 * 60;

/// Maximum nested call depth in the runtime. Every level is a native stack
/// frame, so this stays well below what a default thread stack can hold.
pub const MAX_CALL_DEPTH: usize = 256;

/// EIP-712 type string of an order. Field order is part of the wire contract.
pub const ORDER_TYPE: &str = "Order(address registry,address maker,address staticTarget,bytes4 staticSelector,bytes staticExtradata,uint256 maximumFill,uint256 listingTime,uint256 expirationTime,uint256 salt)";

/// Argument list appended to predicate routine names when deriving selectors.
pub const PREDICATE_ARGUMENTS: &str = "(bytes,address[7],uint8[2],uint256[6],bytes,bytes)";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Accord";
