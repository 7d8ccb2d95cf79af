//! Escrow receiver that accepts pledged tokens carrying loan terms.

use accord_runtime::{CallContext, Contract};
use accord_types::abi::{IERC721Receiver, PawnTerms};
use accord_types::{AccordError, Event, Result};
use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use alloy_sol_types::{SolCall, SolValue};

/// A token held in escrow against a loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pawn {
    pub borrower: Address,
    pub lender: Address,
    pub token: Address,
    pub token_id: U256,
    pub debt_token: Address,
    pub debt_amount: U256,
    pub deadline: U256,
}

/// Records every safe-transferred token together with the loan terms
/// encoded in the transfer payload.
#[derive(Debug, Clone, Default)]
pub struct MockPawnBroker {
    pawns: Vec<Pawn>,
}

impl MockPawnBroker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pawns(&self) -> &[Pawn] {
        &self.pawns
    }

    /// The open pawn for a token, if any.
    #[must_use]
    pub fn pawn_of(&self, token: Address, token_id: U256) -> Option<&Pawn> {
        self.pawns
            .iter()
            .find(|p| p.token == token && p.token_id == token_id)
    }
}

impl Contract for MockPawnBroker {
    fn name(&self) -> &'static str {
        "MockPawnBroker"
    }

    fn call(&mut self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes> {
        let hook = IERC721Receiver::onERC721ReceivedCall::abi_decode(input, true)?;
        let terms = PawnTerms::abi_decode(&hook.data, true)
            .map_err(|err| AccordError::revert(ctx.this(), format!("bad pawn terms: {err}")))?;
        if terms.debtAmount.is_zero() {
            return Err(AccordError::revert(ctx.this(), "pawn without debt"));
        }

        let pawn = Pawn {
            borrower: hook.from,
            lender: terms.lender,
            token: ctx.sender(),
            token_id: hook.tokenId,
            debt_token: terms.debtToken,
            debt_amount: terms.debtAmount,
            deadline: terms.deadline,
        };
        ctx.emit(Event::PawnOpened {
            borrower: pawn.borrower,
            lender: pawn.lender,
            token: pawn.token,
            token_id: pawn.token_id,
            debt_token: pawn.debt_token,
            debt_amount: pawn.debt_amount,
            deadline: pawn.deadline,
        });
        tracing::debug!(
            borrower = %pawn.borrower,
            lender = %pawn.lender,
            token = %pawn.token,
            token_id = %pawn.token_id,
            "Pawn opened"
        );
        self.pawns.push(pawn);

        let ack = FixedBytes::<4>::from(IERC721Receiver::onERC721ReceivedCall::SELECTOR);
        Ok(ack.abi_encode().into())
    }
}

/// ABI payload describing loan terms, attached to a safe transfer into the
/// broker.
#[must_use]
pub fn pawn_terms(lender: Address, debt_token: Address, debt_amount: U256, deadline: U256) -> Bytes {
    PawnTerms {
        lender,
        debtToken: debt_token,
        debtAmount: debt_amount,
        deadline,
    }
    .abi_encode()
    .into()
}
