//! The atomic match engine.
//!
//! `atomic_match` settles two orders as one indivisible unit:
//! 1. Hash both orders; they must differ (no self-matching)
//! 2. Check each order's listing window and authorization
//! 3. Both orders name the same trusted registry; resolve both proxies
//! 4. Check the fill against both orders' remaining capacity
//! 5. Run order A's predicate, then order B's
//! 6. Direct A's proxy to execute call A, then B's proxy to execute call B
//! 7. Commit both fill increments (re-checked against the cap)
//! 8. Emit `OrdersMatched`
//!
//! Any error aborts the surrounding transaction, which rolls back every
//! effect of every step. While a match runs the exchange is checked out of
//! the runtime, so a settlement call that tries to re-enter it fails.

use std::collections::HashSet;

use accord_registry::{AuthenticatedProxy, ProxyRegistry};
use accord_runtime::{CallContext, Contract};
use accord_types::{
    AccordError, Call, Event, ExchangeConfig, Order, OrderHash, OrderSignature, PredicateContext,
    Result,
};
use alloy_primitives::{Address, U256};

use crate::fill_ledger::FillLedger;
use crate::request::{MatchOutcome, MatchRequest, MatchSide};
use crate::signature::recover_signer;
use crate::OrderDomain;

#[derive(Debug, Clone)]
pub struct Exchange {
    domain: OrderDomain,
    registries: HashSet<Address>,
    fills: FillLedger,
    approved: HashSet<OrderHash>,
}

impl Exchange {
    /// An exchange deployed at `address` that trusts proxies of `registries`.
    pub fn new(
        config: &ExchangeConfig,
        address: Address,
        registries: impl IntoIterator<Item = Address>,
    ) -> Self {
        Self {
            domain: OrderDomain::new(config, address),
            registries: registries.into_iter().collect(),
            fills: FillLedger::new(),
            approved: HashSet::new(),
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    #[must_use]
    pub fn domain(&self) -> &OrderDomain {
        &self.domain
    }

    #[must_use]
    pub fn hash_order(&self, order: &Order) -> OrderHash {
        self.domain.hash_order(order)
    }

    #[must_use]
    pub fn fill_of(&self, hash: OrderHash) -> U256 {
        self.fills.current_fill(hash)
    }

    #[must_use]
    pub fn remaining_fill(&self, order: &Order) -> U256 {
        self.fills
            .remaining(self.hash_order(order), order.maximum_fill)
    }

    #[must_use]
    pub fn is_approved(&self, hash: OrderHash) -> bool {
        self.approved.contains(&hash)
    }

    #[must_use]
    pub fn trusts_registry(&self, registry: Address) -> bool {
        self.registries.contains(&registry)
    }

    // ── Maker operations ───────────────────────────────────────────────

    /// Record `order` as approved by its maker, who must be the sender.
    /// Approved orders can be matched without a signature.
    ///
    /// # Errors
    /// `SenderNotMaker` or `OrderAlreadyApproved`.
    pub fn approve_order(&mut self, ctx: &mut CallContext<'_>, order: &Order) -> Result<OrderHash> {
        let sender = ctx.sender();
        if sender != order.maker {
            return Err(AccordError::SenderNotMaker {
                maker: order.maker,
                sender,
            });
        }
        let hash = self.hash_order(order);
        if !self.approved.insert(hash) {
            return Err(AccordError::OrderAlreadyApproved(hash));
        }
        ctx.emit(Event::OrderApproved {
            hash,
            maker: order.maker,
        });
        tracing::info!(order = %hash, maker = %order.maker, "Order approved");
        Ok(hash)
    }

    /// Cancel `order` by forcing its fill to `maximum_fill`. Irreversible.
    ///
    /// The maker authorizes either by signature or by sending directly;
    /// on-chain approval does not authorize cancellation. The order
    /// signature is the authorization, so anyone holding it, including any
    /// prospective taker, can cancel the order.
    ///
    /// # Errors
    /// `InvalidSignature`, `MalformedSignature` or `SenderNotMaker`.
    pub fn cancel(
        &mut self,
        ctx: &mut CallContext<'_>,
        order: &Order,
        signature: Option<&OrderSignature>,
    ) -> Result<OrderHash> {
        let hash = self.hash_order(order);
        let sender = ctx.sender();
        self.authorize(hash, order, signature, sender, false)?;
        if signature.is_some() && sender != order.maker {
            tracing::warn!(
                order = %hash,
                maker = %order.maker,
                %sender,
                "Order cancelled by signature holder other than the maker"
            );
        }
        let previous = self.fills.cancel(hash, order.maximum_fill);
        ctx.emit(Event::OrderCancelled {
            hash,
            maker: order.maker,
        });
        tracing::info!(
            order = %hash,
            maker = %order.maker,
            previous_fill = %previous,
            "Order cancelled"
        );
        Ok(hash)
    }

    // ── Matching ───────────────────────────────────────────────────────

    /// Settle two orders atomically.
    ///
    /// # Errors
    /// Authorization, temporal, registry, proxy, capacity, predicate and
    /// execution failures, each aborting the whole match.
    pub fn atomic_match(
        &mut self,
        ctx: &mut CallContext<'_>,
        request: &MatchRequest,
    ) -> Result<MatchOutcome> {
        let matcher = ctx.sender();
        let (first, second) = (&request.first, &request.second);

        // 1. Hashes
        let first_hash = self.hash_order(&first.order);
        let second_hash = self.hash_order(&second.order);
        if first_hash == second_hash {
            return Err(AccordError::SelfMatch(first_hash));
        }

        // 2. Liveness and authorization
        let now = ctx.timestamp();
        for (side, hash) in [(first, first_hash), (second, second_hash)] {
            side.order.check_live(now)?;
            self.authorize(hash, &side.order, side.signature.as_ref(), matcher, true)?;
        }

        // 3. Registry and proxies
        let (first_proxy, second_proxy) = self.resolve_proxies(ctx, &first.order, &second.order)?;

        // 4. Capacity
        self.fills
            .check_capacity(first_hash, first.order.maximum_fill, request.fill)?;
        self.fills
            .check_capacity(second_hash, second.order.maximum_fill, request.fill)?;

        tracing::debug!(
            first = %first_hash,
            second = %second_hash,
            %matcher,
            fill = %request.fill,
            "Orders authorized, validating predicates"
        );

        // 5. Predicates
        self.validate_side(ctx, first_hash, first, second, matcher, request)?;
        self.validate_side(ctx, second_hash, second, first, matcher, request)?;

        // 6. Execution
        Self::execute(ctx, first_proxy, &first.call)?;
        Self::execute(ctx, second_proxy, &second.call)?;

        // 7. Commit
        let first_total =
            self.fills
                .increment(first_hash, request.fill, first.order.maximum_fill)?;
        let second_total =
            self.fills
                .increment(second_hash, request.fill, second.order.maximum_fill)?;

        // 8. Event
        ctx.emit(Event::OrdersMatched {
            first_hash,
            second_hash,
            first_maker: first.order.maker,
            second_maker: second.order.maker,
            fill: request.fill,
            metadata: request.metadata,
        });
        tracing::info!(
            first = %first_hash,
            second = %second_hash,
            first_maker = %first.order.maker,
            second_maker = %second.order.maker,
            fill = %request.fill,
            %matcher,
            "Orders matched"
        );

        Ok(MatchOutcome {
            first_hash,
            second_hash,
            fill: request.fill,
            first_total,
            second_total,
        })
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// A present signature must recover to the maker and is never rescued
    /// by the unsigned paths.
    fn authorize(
        &self,
        hash: OrderHash,
        order: &Order,
        signature: Option<&OrderSignature>,
        sender: Address,
        allow_approved: bool,
    ) -> Result<()> {
        if let Some(signature) = signature {
            let recovered = recover_signer(hash.0, signature)?;
            if recovered != order.maker {
                return Err(AccordError::InvalidSignature {
                    hash,
                    maker: order.maker,
                    recovered,
                });
            }
            return Ok(());
        }
        if sender == order.maker {
            tracing::warn!(
                order = %hash,
                maker = %order.maker,
                "Unsigned order authorized by sender == maker"
            );
            return Ok(());
        }
        if allow_approved && self.approved.contains(&hash) {
            return Ok(());
        }
        Err(AccordError::SenderNotMaker {
            maker: order.maker,
            sender,
        })
    }

    fn resolve_proxies(
        &self,
        ctx: &CallContext<'_>,
        first: &Order,
        second: &Order,
    ) -> Result<(Address, Address)> {
        if first.registry != second.registry {
            return Err(AccordError::RegistryMismatch {
                first: first.registry,
                second: second.registry,
            });
        }
        if !self.trusts_registry(first.registry) {
            return Err(AccordError::UnknownRegistry(first.registry));
        }
        let registry = ctx.view::<ProxyRegistry>(first.registry)?;
        let proxy_of = |maker: Address| {
            registry
                .proxy_of(maker)
                .ok_or(AccordError::ProxyNotFound(maker))
        };
        Ok((proxy_of(first.maker)?, proxy_of(second.maker)?))
    }

    fn validate_side(
        &self,
        ctx: &CallContext<'_>,
        hash: OrderHash,
        side: &MatchSide,
        counter: &MatchSide,
        matcher: Address,
        request: &MatchRequest,
    ) -> Result<()> {
        let target = side.order.static_target;
        let selector = side.order.static_selector;
        let predicate = ctx.predicate(target)?;
        if !predicate.supports(selector) {
            return Err(AccordError::UnknownSelector { target, selector });
        }
        let context = PredicateContext {
            order: &side.order,
            call: &side.call,
            counter_order: &counter.order,
            counter_call: &counter.call,
            matcher,
            value: request.value,
            fill: request.fill,
            previous_fill: self.fills.current_fill(hash),
        };
        predicate
            .validate(selector, &context)
            .map_err(|reason| AccordError::PredicateFailed { hash, reason })
    }

    fn execute(ctx: &mut CallContext<'_>, proxy: Address, call: &Call) -> Result<()> {
        ctx.invoke::<AuthenticatedProxy, _, _>(proxy, |p, ctx| p.proxy(ctx, call))?;
        Ok(())
    }
}

impl Contract for Exchange {
    fn name(&self) -> &'static str {
        "Exchange"
    }
}
