//! General-purpose trade predicates.
//!
//! | routine               | extradata                                   | fill      |
//! |-----------------------|---------------------------------------------|-----------|
//! | `any`                 | ignored                                     | any       |
//! | `swapOneForOneERC721` | `(address[2] tokenGiveGet, uint256[2] ids)` | 1         |
//! | `ERC721ForERC20`      | `(address[2] tokenGiveGet, uint256[2] [id, price])` | 1 |
//! | `ERC20ForERC721`      | `(address[2] tokenGiveGet, uint256[2] [id, price])` | 1 |
//! | `ERC20ForERC20`       | `(address[2] tokenGiveGet, uint256[2] perUnitGiveGet)` | units |
//!
//! In `ERC20ForERC20` one unit of fill moves `perUnitGiveGet[0]` of the give
//! token out and `perUnitGiveGet[1]` of the get token in, so an order with
//! `maximumFill = n` can be settled in several partial matches.

use accord_runtime::Contract;
use accord_types::{Predicate, PredicateContext};
use alloy_primitives::{Address, Selector, U256};
use alloy_sol_types::SolValue;

use crate::checks::{
    Check, Routine, RoutineTable, erc20_transfer_from, erc721_transfer_from, expect_call,
    malformed, require, require_unit_fill, require_zero_value,
};

pub const ANY: &str = "any";
pub const SWAP_ONE_FOR_ONE_ERC721: &str = "swapOneForOneERC721";
pub const ERC721_FOR_ERC20: &str = "ERC721ForERC20";
pub const ERC20_FOR_ERC721: &str = "ERC20ForERC721";
pub const ERC20_FOR_ERC20: &str = "ERC20ForERC20";

const ROUTINES: &[(&str, Routine)] = &[
    (ANY, any),
    (SWAP_ONE_FOR_ONE_ERC721, swap_one_for_one_erc721),
    (ERC721_FOR_ERC20, erc721_for_erc20),
    (ERC20_FOR_ERC721, erc20_for_erc721),
    (ERC20_FOR_ERC20, erc20_for_erc20),
];

/// Stateless predicate library for plain token swaps.
#[derive(Clone)]
pub struct StaticMarket {
    table: RoutineTable,
}

impl StaticMarket {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RoutineTable::new(ROUTINES),
        }
    }

    /// Names of the routines this library exposes.
    pub fn routines(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.names()
    }
}

impl Default for StaticMarket {
    fn default() -> Self {
        Self::new()
    }
}

impl Predicate for StaticMarket {
    fn validate(&self, selector: Selector, ctx: &PredicateContext<'_>) -> Check {
        self.table.dispatch(selector, ctx)
    }

    fn supports(&self, selector: Selector) -> bool {
        self.table.contains(selector)
    }
}

impl Contract for StaticMarket {
    fn name(&self) -> &'static str {
        "StaticMarket"
    }

    fn predicate(&self) -> Option<&dyn Predicate> {
        Some(self)
    }
}

/// Pair layout shared by every routine but `any`.
fn decode_pair(ctx: &PredicateContext<'_>) -> Result<([Address; 2], [U256; 2]), String> {
    <([Address; 2], [U256; 2])>::abi_decode_params(&ctx.order.static_extradata, true)
        .map_err(malformed)
}

fn any(_ctx: &PredicateContext<'_>) -> Check {
    Ok(())
}

fn swap_one_for_one_erc721(ctx: &PredicateContext<'_>) -> Check {
    let ([give_token, get_token], [give_id, get_id]) = decode_pair(ctx)?;
    require_zero_value(ctx)?;
    require_unit_fill(ctx)?;

    let (maker, taker) = (ctx.order.maker, ctx.counter_order.maker);
    expect_call(
        ctx.call,
        "call",
        give_token,
        &erc721_transfer_from(maker, taker, give_id),
    )?;
    expect_call(
        ctx.counter_call,
        "counter call",
        get_token,
        &erc721_transfer_from(taker, maker, get_id),
    )
}

fn erc721_for_erc20(ctx: &PredicateContext<'_>) -> Check {
    let ([nft, erc20], [token_id, price]) = decode_pair(ctx)?;
    require_zero_value(ctx)?;
    require_unit_fill(ctx)?;

    let (maker, taker) = (ctx.order.maker, ctx.counter_order.maker);
    expect_call(
        ctx.call,
        "call",
        nft,
        &erc721_transfer_from(maker, taker, token_id),
    )?;
    expect_call(
        ctx.counter_call,
        "counter call",
        erc20,
        &erc20_transfer_from(taker, maker, price),
    )
}

fn erc20_for_erc721(ctx: &PredicateContext<'_>) -> Check {
    let ([erc20, nft], [token_id, price]) = decode_pair(ctx)?;
    require_zero_value(ctx)?;
    require_unit_fill(ctx)?;

    let (maker, taker) = (ctx.order.maker, ctx.counter_order.maker);
    expect_call(
        ctx.call,
        "call",
        erc20,
        &erc20_transfer_from(maker, taker, price),
    )?;
    expect_call(
        ctx.counter_call,
        "counter call",
        nft,
        &erc721_transfer_from(taker, maker, token_id),
    )
}

fn erc20_for_erc20(ctx: &PredicateContext<'_>) -> Check {
    let ([give_token, get_token], [give_per_unit, get_per_unit]) = decode_pair(ctx)?;
    require_zero_value(ctx)?;
    require(
        !give_per_unit.is_zero() && !get_per_unit.is_zero(),
        "per-unit amounts must be non-zero",
    )?;
    let give = give_per_unit
        .checked_mul(ctx.fill)
        .ok_or("give amount overflows")?;
    let get = get_per_unit
        .checked_mul(ctx.fill)
        .ok_or("get amount overflows")?;

    let (maker, taker) = (ctx.order.maker, ctx.counter_order.maker);
    expect_call(
        ctx.call,
        "call",
        give_token,
        &erc20_transfer_from(maker, taker, give),
    )?;
    expect_call(
        ctx.counter_call,
        "counter call",
        get_token,
        &erc20_transfer_from(taker, maker, get),
    )
}
