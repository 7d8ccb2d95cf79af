//! Predicate pair for pawn trades: a borrower pledges an NFT into an escrow
//! broker, and a lender pays out the loan in an ERC-20.
//!
//! The pledge call must be a `safeTransferFrom` into the broker whose
//! payload carries the loan terms `(lender, debtToken, debtAmount, deadline)`
//! naming the counterparty as lender. Both sides trade exactly one unit.

use accord_runtime::Contract;
use accord_types::abi::{Erc20Params, Erc721PawnParams, PawnTerms};
use accord_types::{Predicate, PredicateContext};
use alloy_primitives::{Address, Selector};
use alloy_sol_types::SolValue;

use crate::checks::{
    Check, Routine, RoutineTable, erc20_transfer_from, erc721_pledge, expect_call, malformed,
    require_unit_fill, require_zero_value,
};

pub const ERC721_PAWN_FOR_ERC20: &str = "ERC721PawnForERC20";
pub const ERC20_FOR_ERC721_PAWN: &str = "ERC20ForERC721Pawn";

const ROUTINES: &[(&str, Routine)] = &[
    (ERC721_PAWN_FOR_ERC20, erc721_pawn_for_erc20),
    (ERC20_FOR_ERC721_PAWN, erc20_for_erc721_pawn),
];

#[derive(Clone)]
pub struct StaticPawnBroker {
    table: RoutineTable,
}

impl StaticPawnBroker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RoutineTable::new(ROUTINES),
        }
    }
}

impl Default for StaticPawnBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl Predicate for StaticPawnBroker {
    fn validate(&self, selector: Selector, ctx: &PredicateContext<'_>) -> Check {
        self.table.dispatch(selector, ctx)
    }

    fn supports(&self, selector: Selector) -> bool {
        self.table.contains(selector)
    }
}

impl Contract for StaticPawnBroker {
    fn name(&self) -> &'static str {
        "StaticPawnBroker"
    }

    fn predicate(&self) -> Option<&dyn Predicate> {
        Some(self)
    }
}

fn terms_for(lender: Address, pawn: &Erc721PawnParams) -> PawnTerms {
    PawnTerms {
        lender,
        debtToken: pawn.debtToken,
        debtAmount: pawn.debtAmount,
        deadline: pawn.deadline,
    }
}

/// Borrower side: my call pledges the NFT, the counter call pays me.
fn erc721_pawn_for_erc20(ctx: &PredicateContext<'_>) -> Check {
    let (pawn, loan) =
        <(Erc721PawnParams, Erc20Params)>::abi_decode_params(&ctx.order.static_extradata, true)
            .map_err(malformed)?;
    require_zero_value(ctx)?;
    require_unit_fill(ctx)?;

    let (borrower, lender) = (ctx.order.maker, ctx.counter_order.maker);
    let pledge = erc721_pledge(
        borrower,
        pawn.pawnbroker,
        pawn.pawnTokenId,
        &terms_for(lender, &pawn),
    );
    expect_call(ctx.call, "pledge call", pawn.pawnToken, &pledge)?;
    expect_call(
        ctx.counter_call,
        "loan call",
        loan.token,
        &erc20_transfer_from(lender, borrower, loan.amount),
    )
}

/// Lender side: my call pays the borrower, the counter call pledges to me.
fn erc20_for_erc721_pawn(ctx: &PredicateContext<'_>) -> Check {
    let (loan, pawn) =
        <(Erc20Params, Erc721PawnParams)>::abi_decode_params(&ctx.order.static_extradata, true)
            .map_err(malformed)?;
    require_zero_value(ctx)?;
    require_unit_fill(ctx)?;

    let (lender, borrower) = (ctx.order.maker, ctx.counter_order.maker);
    expect_call(
        ctx.call,
        "loan call",
        loan.token,
        &erc20_transfer_from(lender, borrower, loan.amount),
    )?;
    let pledge = erc721_pledge(
        borrower,
        pawn.pawnbroker,
        pawn.pawnTokenId,
        &terms_for(lender, &pawn),
    );
    expect_call(ctx.counter_call, "pledge call", pawn.pawnToken, &pledge)
}
