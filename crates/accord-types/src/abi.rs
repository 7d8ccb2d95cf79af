//! ABI definitions shared by the asset collaborators and the predicates.
//!
//! Call payloads are opaque to the engine; mock assets decode them and
//! predicates compare them byte-for-byte against the payloads they expect.

use alloy_primitives::{Selector, keccak256};

use crate::constants::PREDICATE_ARGUMENTS;

alloy_sol_types::sol! {
    /// Fungible token surface used by settlement calls.
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function mint(address to, uint256 amount) external;
    }

    /// Non-fungible token surface used by settlement calls.
    interface IERC721 {
        function transferFrom(address from, address to, uint256 tokenId) external;
        function safeTransferFrom(address from, address to, uint256 tokenId, bytes data) external;
        function setApprovalForAll(address operator, bool approved) external;
        function approve(address to, uint256 tokenId) external;
        function mint(address to, uint256 tokenId) external;
    }

    /// Receiver hook invoked by safe transfers.
    interface IERC721Receiver {
        function onERC721Received(address operator, address from, uint256 tokenId, bytes data) external returns (bytes4);
    }

    /// Bundled execution through a delegate call.
    interface IAtomicizer {
        function atomicize(address[] targets, bytes[] calldatas) external;
    }

    /// Loan terms a pledged token carries in its safe-transfer payload.
    struct PawnTerms {
        address lender;
        address debtToken;
        uint256 debtAmount;
        uint256 deadline;
    }

    /// Pledge side of a pawn trade.
    struct Erc721PawnParams {
        address pawnbroker;
        address pawnToken;
        uint256 pawnTokenId;
        address debtToken;
        uint256 debtAmount;
        uint256 deadline;
    }

    /// Fungible side of a trade.
    struct Erc20Params {
        address token;
        uint256 amount;
    }
}

/// Selector a predicate routine is registered under.
///
/// Routines keep the legacy static-call argument list in their signature so
/// selectors line up with orders signed for existing deployments.
#[must_use]
pub fn predicate_selector(name: &str) -> Selector {
    let signature = format!("{name}{PREDICATE_ARGUMENTS}");
    Selector::from_slice(&keccak256(signature.as_bytes())[..4])
}
