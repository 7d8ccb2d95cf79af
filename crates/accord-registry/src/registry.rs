//! Account → proxy registry with a timelocked authorization list.
//!
//! Principals in the authorized set (in practice: exchange deployments) may
//! direct any user's proxy. Adding one is deliberately slow: after the single
//! bootstrap grant, every new principal has to sit through `grant_delay`
//! seconds between `start_grant` and `finish_grant`, giving users time to
//! revoke their proxies if they distrust it.

use std::collections::{HashMap, HashSet};

use accord_runtime::{CallContext, Contract};
use accord_types::{AccordError, Event, RegistryConfig, Result};
use alloy_primitives::Address;

use crate::AuthenticatedProxy;

#[derive(Debug, Clone)]
pub struct ProxyRegistry {
    owner: Address,
    grant_delay: u64,
    /// user → proxy
    proxies: HashMap<Address, Address>,
    authorized: HashSet<Address>,
    /// principal → timestamp the grant was started
    pending: HashMap<Address, u64>,
    initial_grant_done: bool,
    timelocked_grant_done: bool,
}

impl ProxyRegistry {
    #[must_use]
    pub fn new(owner: Address, config: &RegistryConfig) -> Self {
        Self {
            owner,
            grant_delay: config.grant_delay_secs,
            proxies: HashMap::new(),
            authorized: HashSet::new(),
            pending: HashMap::new(),
            initial_grant_done: false,
            timelocked_grant_done: false,
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    #[must_use]
    pub fn grant_delay(&self) -> u64 {
        self.grant_delay
    }

    #[must_use]
    pub fn proxy_of(&self, user: Address) -> Option<Address> {
        self.proxies.get(&user).copied()
    }

    #[must_use]
    pub fn is_authorized(&self, principal: Address) -> bool {
        self.authorized.contains(&principal)
    }

    /// Timestamp after which `finish_grant` will succeed, if a grant is pending.
    #[must_use]
    pub fn pending_ready_after(&self, principal: Address) -> Option<u64> {
        self.pending
            .get(&principal)
            .map(|started| started.saturating_add(self.grant_delay))
    }

    // ── Registration ───────────────────────────────────────────────────

    /// Deploy a proxy owned by the caller.
    ///
    /// # Errors
    /// `AlreadyRegistered` if the caller already owns one.
    pub fn register(&mut self, ctx: &mut CallContext<'_>) -> Result<Address> {
        let user = ctx.sender();
        if self.proxies.contains_key(&user) {
            return Err(AccordError::AlreadyRegistered(user));
        }
        let registry = ctx.this();
        let proxy = ctx.deploy(AuthenticatedProxy::new(user, registry));
        self.proxies.insert(user, proxy);
        ctx.emit(Event::ProxyRegistered { user, proxy });
        tracing::info!(%user, %proxy, "Proxy registered");
        Ok(proxy)
    }

    // ── Authorization ──────────────────────────────────────────────────

    /// One-shot bootstrap grant that skips the timelock.
    ///
    /// # Errors
    /// `NotRegistryOwner`, or `AlreadyBootstrapped` once used or once any
    /// timelocked grant has completed.
    pub fn grant_initial(&mut self, ctx: &mut CallContext<'_>, principal: Address) -> Result<()> {
        self.only_owner(ctx)?;
        if self.initial_grant_done || self.timelocked_grant_done {
            return Err(AccordError::AlreadyBootstrapped);
        }
        self.initial_grant_done = true;
        self.authorized.insert(principal);
        ctx.emit(Event::AuthenticationGranted {
            principal,
            bootstrap: true,
        });
        tracing::info!(%principal, "Initial authentication granted");
        Ok(())
    }

    /// Begin the timelocked grant of `principal`.
    ///
    /// # Errors
    /// `NotRegistryOwner`, `AlreadyAuthorized` or `GrantAlreadyPending`.
    pub fn start_grant(&mut self, ctx: &mut CallContext<'_>, principal: Address) -> Result<()> {
        self.only_owner(ctx)?;
        if self.authorized.contains(&principal) {
            return Err(AccordError::AlreadyAuthorized(principal));
        }
        if self.pending.contains_key(&principal) {
            return Err(AccordError::GrantAlreadyPending(principal));
        }
        let now = ctx.timestamp();
        self.pending.insert(principal, now);
        let ready_after = now.saturating_add(self.grant_delay);
        ctx.emit(Event::GrantStarted {
            principal,
            ready_after,
        });
        tracing::info!(%principal, started = now, ready_after, "Authentication grant started");
        Ok(())
    }

    /// Complete a pending grant once the delay has strictly elapsed.
    ///
    /// # Errors
    /// `NotRegistryOwner`, `GrantNotPending` or `GrantDelayNotElapsed`.
    pub fn finish_grant(&mut self, ctx: &mut CallContext<'_>, principal: Address) -> Result<()> {
        self.only_owner(ctx)?;
        let ready_after = self
            .pending_ready_after(principal)
            .ok_or(AccordError::GrantNotPending(principal))?;
        let now = ctx.timestamp();
        if now <= ready_after {
            return Err(AccordError::GrantDelayNotElapsed {
                principal,
                ready_after,
                now,
            });
        }
        self.pending.remove(&principal);
        self.authorized.insert(principal);
        self.timelocked_grant_done = true;
        ctx.emit(Event::AuthenticationGranted {
            principal,
            bootstrap: false,
        });
        tracing::info!(%principal, "Authentication granted");
        Ok(())
    }

    /// Remove `principal` from the authorized set immediately. Any pending
    /// grant for it is dropped as well.
    ///
    /// # Errors
    /// `NotRegistryOwner`.
    pub fn revoke(&mut self, ctx: &mut CallContext<'_>, principal: Address) -> Result<()> {
        self.only_owner(ctx)?;
        self.authorized.remove(&principal);
        self.pending.remove(&principal);
        ctx.emit(Event::AuthenticationRevoked { principal });
        tracing::warn!(%principal, "Authentication revoked");
        Ok(())
    }

    fn only_owner(&self, ctx: &CallContext<'_>) -> Result<()> {
        if ctx.sender() != self.owner {
            return Err(AccordError::NotRegistryOwner(ctx.sender()));
        }
        Ok(())
    }
}

impl Contract for ProxyRegistry {
    fn name(&self) -> &'static str {
        "ProxyRegistry"
    }
}
