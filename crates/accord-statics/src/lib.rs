//! # accord-statics
//!
//! Static predicate libraries and helper contracts for **Accord** orders.
//!
//! An order names a predicate by `(static_target, static_selector)`. The
//! contracts here register routines under
//! `selector(name ++ "(bytes,address[7],uint8[2],uint256[6],bytes,bytes)")`,
//! so a maker picks one with [`accord_types::abi::predicate_selector`].
//!
//! - [`StaticMarket`]: plain swaps between ERC-20 and ERC-721 tokens
//! - [`StaticPawnBroker`]: NFT-collateralized loans through an escrow broker
//! - [`Atomicizer`]: delegate-call library for multi-call settlement

pub mod atomicizer;
pub(crate) mod checks;
pub mod market;
pub mod pawn;

pub use atomicizer::Atomicizer;
pub use market::StaticMarket;
pub use pawn::StaticPawnBroker;
