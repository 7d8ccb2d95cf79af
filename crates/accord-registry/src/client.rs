//! Transaction entry points.
//!
//! Each function runs one top-level transaction sent by an externally owned
//! account and rolls back on failure.

use accord_runtime::World;
use accord_types::{Call, RegistryConfig, Result};
use alloy_primitives::{Address, Bytes};

use crate::{AuthenticatedProxy, ProxyRegistry};

/// Deploy a registry owned by `owner`.
pub fn deploy_registry(world: &mut World, owner: Address, config: &RegistryConfig) -> Address {
    world.deploy(owner, ProxyRegistry::new(owner, config))
}

/// `user` registers its proxy.
pub fn register_proxy(world: &mut World, registry: Address, user: Address) -> Result<Address> {
    world.transact(user, |ctx| {
        ctx.invoke::<ProxyRegistry, _, _>(registry, |r, ctx| r.register(ctx))
    })
}

/// Read-only proxy lookup.
#[must_use]
pub fn proxy_of(world: &World, registry: Address, user: Address) -> Option<Address> {
    world
        .contract::<ProxyRegistry>(registry)
        .and_then(|r| r.proxy_of(user))
}

pub fn grant_initial(
    world: &mut World,
    registry: Address,
    owner: Address,
    principal: Address,
) -> Result<()> {
    world.transact(owner, |ctx| {
        ctx.invoke::<ProxyRegistry, _, _>(registry, |r, ctx| r.grant_initial(ctx, principal))
    })
}

pub fn start_grant(
    world: &mut World,
    registry: Address,
    owner: Address,
    principal: Address,
) -> Result<()> {
    world.transact(owner, |ctx| {
        ctx.invoke::<ProxyRegistry, _, _>(registry, |r, ctx| r.start_grant(ctx, principal))
    })
}

pub fn finish_grant(
    world: &mut World,
    registry: Address,
    owner: Address,
    principal: Address,
) -> Result<()> {
    world.transact(owner, |ctx| {
        ctx.invoke::<ProxyRegistry, _, _>(registry, |r, ctx| r.finish_grant(ctx, principal))
    })
}

pub fn revoke(world: &mut World, registry: Address, owner: Address, principal: Address) -> Result<()> {
    world.transact(owner, |ctx| {
        ctx.invoke::<ProxyRegistry, _, _>(registry, |r, ctx| r.revoke(ctx, principal))
    })
}

/// `user` toggles revocation on its own proxy.
pub fn set_revoke(world: &mut World, proxy: Address, user: Address, revoke: bool) -> Result<()> {
    world.transact(user, |ctx| {
        ctx.invoke::<AuthenticatedProxy, _, _>(proxy, |p, ctx| p.set_revoke(ctx, revoke))
    })
}

/// `caller` directs `proxy` to execute `call`.
pub fn proxy_call(world: &mut World, proxy: Address, caller: Address, call: &Call) -> Result<Bytes> {
    world.transact(caller, |ctx| {
        ctx.invoke::<AuthenticatedProxy, _, _>(proxy, |p, ctx| p.proxy(ctx, call))
    })
}
