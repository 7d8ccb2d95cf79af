//! Transaction entry points for the exchange, plus a one-shot bootstrap of
//! a registry/exchange pair.

use accord_registry::ProxyRegistry;
use accord_runtime::World;
use accord_types::{AccordConfig, ExchangeConfig, Order, OrderHash, OrderSignature, Result};
use alloy_primitives::Address;

use crate::{Exchange, MatchOutcome, MatchRequest};

/// Addresses of a bootstrapped deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub registry: Address,
    pub exchange: Address,
}

/// Deploy an exchange trusting `registries`.
pub fn deploy_exchange(
    world: &mut World,
    deployer: Address,
    config: &ExchangeConfig,
    registries: &[Address],
) -> Address {
    let registries = registries.to_vec();
    world.deploy_with(deployer, |address| Exchange::new(config, address, registries))
}

/// Deploy a registry and an exchange owned by `owner`, and authorize the
/// exchange on the registry through the bootstrap grant.
///
/// # Errors
/// `Configuration` if `config` is inconsistent, or whatever the bootstrap
/// grant returns.
pub fn bootstrap(world: &mut World, owner: Address, config: &AccordConfig) -> Result<Deployment> {
    config.validate()?;
    let registry = world.deploy(owner, ProxyRegistry::new(owner, &config.registry));
    let exchange = deploy_exchange(world, owner, &config.exchange, &[registry]);
    accord_registry::client::grant_initial(world, registry, owner, exchange)?;
    tracing::info!(%registry, %exchange, %owner, "Deployment bootstrapped");
    Ok(Deployment { registry, exchange })
}

/// `matcher` submits a match.
pub fn atomic_match(
    world: &mut World,
    exchange: Address,
    matcher: Address,
    request: &MatchRequest,
) -> Result<MatchOutcome> {
    world.transact(matcher, |ctx| {
        ctx.invoke::<Exchange, _, _>(exchange, |ex, ctx| ex.atomic_match(ctx, request))
    })
}

/// `sender` cancels `order`, authorized by `signature` or by being its maker.
pub fn cancel(
    world: &mut World,
    exchange: Address,
    sender: Address,
    order: &Order,
    signature: Option<&OrderSignature>,
) -> Result<OrderHash> {
    world.transact(sender, |ctx| {
        ctx.invoke::<Exchange, _, _>(exchange, |ex, ctx| ex.cancel(ctx, order, signature))
    })
}

/// `maker` approves `order` on-chain.
pub fn approve_order(
    world: &mut World,
    exchange: Address,
    maker: Address,
    order: &Order,
) -> Result<OrderHash> {
    world.transact(maker, |ctx| {
        ctx.invoke::<Exchange, _, _>(exchange, |ex, ctx| ex.approve_order(ctx, order))
    })
}

/// Read-only access to a deployed exchange.
#[must_use]
pub fn exchange(world: &World, address: Address) -> Option<&Exchange> {
    world.contract::<Exchange>(address)
}
