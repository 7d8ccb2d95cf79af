//! End-to-end settlement scenarios.
//!
//! Each test deploys the full stack (registry, exchange, predicate
//! libraries, token contracts), registers proxies for the makers and settles
//! real trades through `atomic_match`, then checks balances, fills and the
//! event log.

mod common;

use accord_assets::{MockErc20, erc20, erc721, escrow};
use accord_exchange::{MatchRequest, MatchSide};
use accord_statics::atomicizer::atomicize_calldata;
use accord_statics::{market, pawn};
use accord_types::abi::{Erc20Params, Erc721PawnParams};
use accord_types::{AccordError, Call, Event};
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolValue;
use common::{Fixture, GENESIS};

fn pair(tokens: [Address; 2], amounts: [u64; 2]) -> Vec<u8> {
    (tokens, amounts.map(U256::from)).abi_encode_params()
}

#[test]
fn pawn_trade_settles_nft_into_escrow_and_pays_borrower() {
    let mut fx = Fixture::new();
    let (alice, bob) = (fx.alice.address(), fx.bob.address());
    let token_id = U256::from(100);
    let amount = U256::from(10_000);
    let debt = U256::from(11_000);
    let deadline = U256::from(GENESIS + 30 * 24 * 60 * 60);

    fx.mint_nft(alice, 100);
    fx.mint_erc20(bob, 10_000);

    let pawn = Erc721PawnParams {
        pawnbroker: fx.broker,
        pawnToken: fx.erc721,
        pawnTokenId: token_id,
        debtToken: fx.erc20,
        debtAmount: debt,
        deadline,
    };
    let loan = Erc20Params {
        token: fx.erc20,
        amount,
    };

    let borrow = fx.order(
        alice,
        fx.pawn_statics,
        pawn::ERC721_PAWN_FOR_ERC20,
        (pawn.clone(), loan.clone()).abi_encode_params(),
    );
    let lend = fx.order(
        bob,
        fx.pawn_statics,
        pawn::ERC20_FOR_ERC721_PAWN,
        (loan, pawn).abi_encode_params(),
    );

    let pledge = Call::new(
        fx.erc721,
        erc721::safe_transfer_from_calldata(
            alice,
            fx.broker,
            token_id,
            escrow::pawn_terms(bob, fx.erc20, debt, deadline),
        ),
    );
    let payout = Call::new(fx.erc20, erc20::transfer_from_calldata(bob, alice, amount));

    let request = MatchRequest::new(
        MatchSide::signed(borrow.clone(), fx.sign(&fx.alice, &borrow), pledge),
        MatchSide::signed(lend.clone(), fx.sign(&fx.bob, &lend), payout),
    );
    let carol = fx.carol.address();
    let outcome = fx.atomic_match(carol, &request).expect("pawn match should settle");

    assert_eq!(outcome.first_total, U256::from(1));
    assert_eq!(outcome.second_total, U256::from(1));
    assert_eq!(fx.nft_owner(100), Some(fx.broker));
    assert_eq!(fx.erc20_balance(alice), amount);
    assert_eq!(fx.erc20_balance(bob), U256::ZERO);

    let recorded = fx
        .pawn_broker()
        .pawn_of(fx.erc721, token_id)
        .expect("pawn recorded");
    assert_eq!(recorded.borrower, alice);
    assert_eq!(recorded.lender, bob);
    assert_eq!(recorded.debt_token, fx.erc20);
    assert_eq!(recorded.debt_amount, debt);
    assert_eq!(recorded.deadline, deadline);

    assert_eq!(fx.fill_of(&borrow), U256::from(1));
    assert_eq!(fx.fill_of(&lend), U256::from(1));

    // Both orders are exhausted.
    let err = fx.atomic_match(carol, &request).unwrap_err();
    assert!(matches!(err, AccordError::OrderFilled(_)), "got {err}");
}

#[test]
fn erc721_swap_exchanges_tokens() {
    let mut fx = Fixture::new();
    let (alice, bob) = (fx.alice.address(), fx.bob.address());
    fx.mint_nft(alice, 1);
    fx.mint_nft(bob, 2);

    let nft = fx.erc721;
    let first = fx.order(alice, fx.market, market::SWAP_ONE_FOR_ONE_ERC721, pair([nft, nft], [1, 2]));
    let second = fx.order(bob, fx.market, market::SWAP_ONE_FOR_ONE_ERC721, pair([nft, nft], [2, 1]));

    let request = MatchRequest::new(
        MatchSide::signed(
            first.clone(),
            fx.sign(&fx.alice, &first),
            Call::new(nft, erc721::transfer_from_calldata(alice, bob, U256::from(1))),
        ),
        MatchSide::signed(
            second.clone(),
            fx.sign(&fx.bob, &second),
            Call::new(nft, erc721::transfer_from_calldata(bob, alice, U256::from(2))),
        ),
    )
    .with_metadata(B256::repeat_byte(0x42));

    let carol = fx.carol.address();
    let outcome = fx.atomic_match(carol, &request).expect("swap should settle");

    assert_eq!(fx.nft_owner(1), Some(bob));
    assert_eq!(fx.nft_owner(2), Some(alice));

    let matched = fx
        .world
        .logs()
        .iter()
        .rev()
        .find_map(|log| match &log.event {
            Event::OrdersMatched {
                first_hash,
                second_hash,
                metadata,
                fill,
                ..
            } => Some((*first_hash, *second_hash, *metadata, *fill)),
            _ => None,
        })
        .expect("OrdersMatched emitted");
    assert_eq!(matched.0, outcome.first_hash);
    assert_eq!(matched.1, outcome.second_hash);
    assert_eq!(matched.2, B256::repeat_byte(0x42));
    assert_eq!(matched.3, U256::from(1));
}

#[test]
fn erc721_sells_for_erc20() {
    let mut fx = Fixture::new();
    let (alice, bob) = (fx.alice.address(), fx.bob.address());
    fx.mint_nft(alice, 7);
    fx.mint_erc20(bob, 500);

    let (nft, token) = (fx.erc721, fx.erc20);
    let sell = fx.order(alice, fx.market, market::ERC721_FOR_ERC20, pair([nft, token], [7, 300]));
    let buy = fx.order(bob, fx.market, market::ERC20_FOR_ERC721, pair([token, nft], [7, 300]));

    let request = MatchRequest::new(
        MatchSide::signed(
            sell.clone(),
            fx.sign(&fx.alice, &sell),
            Call::new(nft, erc721::transfer_from_calldata(alice, bob, U256::from(7))),
        ),
        MatchSide::signed(
            buy.clone(),
            fx.sign(&fx.bob, &buy),
            Call::new(token, erc20::transfer_from_calldata(bob, alice, U256::from(300))),
        ),
    );
    let carol = fx.carol.address();
    fx.atomic_match(carol, &request).expect("sale should settle");

    assert_eq!(fx.nft_owner(7), Some(bob));
    assert_eq!(fx.erc20_balance(alice), U256::from(300));
    assert_eq!(fx.erc20_balance(bob), U256::from(200));
}

#[test]
fn erc20_for_erc20_fills_partially_up_to_cap() {
    let mut fx = Fixture::new();
    let (alice, bob) = (fx.alice.address(), fx.bob.address());
    let carol = fx.carol.address();

    // A second fungible token for the other leg.
    let owner = fx.owner;
    let other = fx.world.deploy(owner, MockErc20::new());
    let (alice_proxy, bob_proxy) = (fx.alice.proxy, fx.bob.proxy);
    for (who, proxy) in [(alice, alice_proxy), (bob, bob_proxy)] {
        fx.world
            .transact(who, |ctx| ctx.call(other, &erc20::approve_calldata(proxy, U256::MAX)))
            .expect("approve");
    }
    fx.world
        .transact(owner, |ctx| ctx.call(other, &erc20::mint_calldata(bob, U256::from(1_000))))
        .expect("mint");
    fx.mint_erc20(alice, 1_000);

    let token = fx.erc20;
    // Alice gives 10 `token` per unit for 3 `other`; Bob the mirror image.
    let mut ask = fx.order(alice, fx.market, market::ERC20_FOR_ERC20, pair([token, other], [10, 3]));
    ask.maximum_fill = U256::from(5);
    let mut bid = fx.order(bob, fx.market, market::ERC20_FOR_ERC20, pair([other, token], [3, 10]));
    bid.maximum_fill = U256::from(5);
    let (ask_sig, bid_sig) = (fx.sign(&fx.alice, &ask), fx.sign(&fx.bob, &bid));

    let request = |fill: u64| {
        MatchRequest::new(
            MatchSide::signed(
                ask.clone(),
                ask_sig,
                Call::new(token, erc20::transfer_from_calldata(alice, bob, U256::from(10 * fill))),
            ),
            MatchSide::signed(
                bid.clone(),
                bid_sig,
                Call::new(other, erc20::transfer_from_calldata(bob, alice, U256::from(3 * fill))),
            ),
        )
        .with_fill(U256::from(fill))
    };

    let err = fx.atomic_match(carol, &request(6)).unwrap_err();
    assert!(matches!(err, AccordError::FillExceeded { .. }), "got {err}");

    let outcome = fx.atomic_match(carol, &request(2)).expect("first partial fill");
    assert_eq!(outcome.first_total, U256::from(2));
    assert_eq!(fx.exchange_ref().remaining_fill(&ask), U256::from(3));

    let outcome = fx.atomic_match(carol, &request(3)).expect("second partial fill");
    assert_eq!(outcome.first_total, U256::from(5));
    assert_eq!(outcome.second_total, U256::from(5));

    assert_eq!(fx.erc20_balance(alice), U256::from(1_000 - 50));
    assert_eq!(fx.erc20_balance(bob), U256::from(50));
    let other_balance = |who| {
        fx.world
            .contract::<MockErc20>(other)
            .expect("deployed")
            .balance_of(who)
    };
    assert_eq!(other_balance(alice), U256::from(15));
    assert_eq!(other_balance(bob), U256::from(1_000 - 15));

    let err = fx.atomic_match(carol, &request(1)).unwrap_err();
    assert!(matches!(err, AccordError::OrderFilled(_)), "got {err}");
}

#[test]
fn atomicizer_bundle_moves_several_assets_in_one_order() {
    let mut fx = Fixture::new();
    let (alice, bob) = (fx.alice.address(), fx.bob.address());
    fx.mint_nft(alice, 3);
    fx.mint_nft(alice, 4);
    fx.mint_erc20(bob, 100);

    let nft = fx.erc721;
    let bundle = atomicize_calldata(&[
        (nft, erc721::transfer_from_calldata(alice, bob, U256::from(3))),
        (nft, erc721::transfer_from_calldata(alice, bob, U256::from(4))),
    ]);
    let sell = fx.order(alice, fx.market, market::ANY, Vec::new());
    let buy = fx.order(bob, fx.market, market::ANY, Vec::new());

    let request = MatchRequest::new(
        MatchSide::signed(sell.clone(), fx.sign(&fx.alice, &sell), Call::delegate(fx.atomicizer, bundle)),
        MatchSide::signed(
            buy.clone(),
            fx.sign(&fx.bob, &buy),
            Call::new(fx.erc20, erc20::transfer_from_calldata(bob, alice, U256::from(100))),
        ),
    );
    let carol = fx.carol.address();
    fx.atomic_match(carol, &request).expect("bundle should settle");

    assert_eq!(fx.nft_owner(3), Some(bob));
    assert_eq!(fx.nft_owner(4), Some(bob));
    assert_eq!(fx.erc20_balance(alice), U256::from(100));
}

#[test]
fn failing_bundle_member_reverts_the_whole_match() {
    let mut fx = Fixture::new();
    let (alice, bob) = (fx.alice.address(), fx.bob.address());
    fx.mint_nft(alice, 3);
    fx.mint_nft(bob, 5);
    fx.mint_erc20(bob, 100);

    let nft = fx.erc721;
    // Token 5 belongs to Bob, so the second transfer fails.
    let bundle = atomicize_calldata(&[
        (nft, erc721::transfer_from_calldata(alice, bob, U256::from(3))),
        (nft, erc721::transfer_from_calldata(alice, bob, U256::from(5))),
    ]);
    let sell = fx.order(alice, fx.market, market::ANY, Vec::new());
    let buy = fx.order(bob, fx.market, market::ANY, Vec::new());
    let request = MatchRequest::new(
        MatchSide::signed(sell.clone(), fx.sign(&fx.alice, &sell), Call::delegate(fx.atomicizer, bundle)),
        MatchSide::signed(
            buy.clone(),
            fx.sign(&fx.bob, &buy),
            Call::new(fx.erc20, erc20::transfer_from_calldata(bob, alice, U256::from(100))),
        ),
    );

    let logs_before = fx.world.logs().len();
    let carol = fx.carol.address();
    let err = fx.atomic_match(carol, &request).unwrap_err();
    assert!(matches!(err, AccordError::ExecutionFailed { .. }), "got {err}");

    assert_eq!(fx.nft_owner(3), Some(alice));
    assert_eq!(fx.erc20_balance(bob), U256::from(100));
    assert_eq!(fx.fill_of(&sell), U256::ZERO);
    assert_eq!(fx.fill_of(&buy), U256::ZERO);
    assert_eq!(fx.world.logs().len(), logs_before);
}

#[test]
fn pawn_pledge_must_carry_the_agreed_debt() {
    let mut fx = Fixture::new();
    let (alice, bob) = (fx.alice.address(), fx.bob.address());
    let token_id = U256::from(100);
    let amount = U256::from(10_000);
    let debt = U256::from(11_000);
    let deadline = U256::from(GENESIS + 30 * 24 * 60 * 60);

    fx.mint_nft(alice, 100);
    fx.mint_erc20(bob, 10_000);

    let pawn = Erc721PawnParams {
        pawnbroker: fx.broker,
        pawnToken: fx.erc721,
        pawnTokenId: token_id,
        debtToken: fx.erc20,
        debtAmount: debt,
        deadline,
    };
    let loan = Erc20Params {
        token: fx.erc20,
        amount,
    };
    let borrow = fx.order(
        alice,
        fx.pawn_statics,
        pawn::ERC721_PAWN_FOR_ERC20,
        (pawn.clone(), loan.clone()).abi_encode_params(),
    );
    let lend = fx.order(
        bob,
        fx.pawn_statics,
        pawn::ERC20_FOR_ERC721_PAWN,
        (loan, pawn).abi_encode_params(),
    );

    // The pledge records the loan principal as the debt instead of the repayment.
    let pledge = Call::new(
        fx.erc721,
        erc721::safe_transfer_from_calldata(
            alice,
            fx.broker,
            token_id,
            escrow::pawn_terms(bob, fx.erc20, amount, deadline),
        ),
    );
    let payout = Call::new(fx.erc20, erc20::transfer_from_calldata(bob, alice, amount));
    let request = MatchRequest::new(
        MatchSide::signed(borrow.clone(), fx.sign(&fx.alice, &borrow), pledge),
        MatchSide::signed(lend.clone(), fx.sign(&fx.bob, &lend), payout),
    );

    let carol = fx.carol.address();
    let err = fx.atomic_match(carol, &request).unwrap_err();
    assert!(matches!(err, AccordError::PredicateFailed { .. }), "got {err}");
    assert_eq!(fx.nft_owner(100), Some(alice));
    assert_eq!(fx.erc20_balance(bob), amount);
    assert!(fx.pawn_broker().pawns().is_empty());
}
