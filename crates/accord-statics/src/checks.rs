//! Calldata assertions shared by the predicate routines.
//!
//! Predicates never decode a call to see what it *does*; they rebuild the
//! exact payload the maker expects and compare byte-for-byte.

use std::collections::HashMap;

use accord_types::abi::{IERC20, IERC721, PawnTerms, predicate_selector};
use accord_types::{Call, HowToCall, PredicateContext};
use alloy_primitives::{Address, Selector, U256};
use alloy_sol_types::{SolCall, SolValue};

/// Outcome of a single routine.
pub type Check = Result<(), String>;

/// A predicate routine.
pub type Routine = fn(&PredicateContext<'_>) -> Check;

/// Selector-indexed routine table.
#[derive(Clone)]
pub(crate) struct RoutineTable {
    routines: HashMap<Selector, (&'static str, Routine)>,
}

impl RoutineTable {
    pub(crate) fn new(entries: &[(&'static str, Routine)]) -> Self {
        let routines = entries
            .iter()
            .map(|&(name, routine)| (predicate_selector(name), (name, routine)))
            .collect();
        Self { routines }
    }

    pub(crate) fn contains(&self, selector: Selector) -> bool {
        self.routines.contains_key(&selector)
    }

    pub(crate) fn dispatch(&self, selector: Selector, ctx: &PredicateContext<'_>) -> Check {
        let (name, routine) = self
            .routines
            .get(&selector)
            .ok_or_else(|| format!("no routine for selector {selector}"))?;
        routine(ctx).map_err(|reason| format!("{name}: {reason}"))
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routines.values().map(|(name, _)| *name)
    }
}

/// Rejection reason for extradata that does not decode as the routine's
/// parameter layout.
pub(crate) fn malformed(err: alloy_sol_types::Error) -> String {
    format!("malformed extradata: {err}")
}

pub(crate) fn require(condition: bool, reason: &str) -> Check {
    if condition { Ok(()) } else { Err(reason.to_string()) }
}

pub(crate) fn require_zero_value(ctx: &PredicateContext<'_>) -> Check {
    require(ctx.value.is_zero(), "zero value required")
}

/// Routines that trade a single indivisible unit.
pub(crate) fn require_unit_fill(ctx: &PredicateContext<'_>) -> Check {
    require(ctx.fill == U256::from(1), "fill must be exactly one")
}

/// `call` must be a direct call to `target` with exactly `expected` as payload.
pub(crate) fn expect_call(call: &Call, side: &str, target: Address, expected: &[u8]) -> Check {
    require(
        call.how_to_call == HowToCall::Call,
        &format!("{side} must be a direct call"),
    )?;
    require(
        call.target == target,
        &format!("{side} target {} is not {target}", call.target),
    )?;
    require(
        call.data.as_ref() == expected,
        &format!("{side} calldata does not match the expected transfer"),
    )
}

pub(crate) fn erc20_transfer_from(from: Address, to: Address, amount: U256) -> Vec<u8> {
    IERC20::transferFromCall { from, to, amount }.abi_encode()
}

pub(crate) fn erc721_transfer_from(from: Address, to: Address, token_id: U256) -> Vec<u8> {
    IERC721::transferFromCall {
        from,
        to,
        tokenId: token_id,
    }
    .abi_encode()
}

pub(crate) fn erc721_pledge(
    from: Address,
    broker: Address,
    token_id: U256,
    terms: &PawnTerms,
) -> Vec<u8> {
    IERC721::safeTransferFromCall {
        from,
        to: broker,
        tokenId: token_id,
        data: terms.abi_encode().into(),
    }
    .abi_encode()
}
