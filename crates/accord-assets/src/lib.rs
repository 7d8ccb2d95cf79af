//! # accord-assets
//!
//! Asset contracts that settlement calls move: a fungible token, a
//! non-fungible token with the safe-transfer hook, and an escrow receiver
//! for pawn trades. They are collaborators of the exchange, not part of it;
//! the exchange never decodes their calldata.

pub mod erc20;
pub mod erc721;
pub mod escrow;

pub use erc20::MockErc20;
pub use erc721::MockErc721;
pub use escrow::{MockPawnBroker, Pawn};
