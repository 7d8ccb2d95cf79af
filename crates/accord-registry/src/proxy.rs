//! Per-account delegated-execution proxy.

use accord_runtime::{CallContext, Contract};
use accord_types::{AccordError, Call, Event, HowToCall, Result};
use alloy_primitives::{Address, Bytes};

use crate::ProxyRegistry;

/// Executes calls on behalf of `user`.
///
/// Token approvals are granted to the proxy, never to the exchange, so the
/// set of principals able to move a user's assets is exactly the registry's
/// authorized set plus the user.
#[derive(Debug, Clone)]
pub struct AuthenticatedProxy {
    user: Address,
    registry: Address,
    revoked: bool,
}

impl AuthenticatedProxy {
    #[must_use]
    pub fn new(user: Address, registry: Address) -> Self {
        Self {
            user,
            registry,
            revoked: false,
        }
    }

    #[must_use]
    pub fn user(&self) -> Address {
        self.user
    }

    #[must_use]
    pub fn registry(&self) -> Address {
        self.registry
    }

    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    /// Execute `call` as this proxy.
    ///
    /// The immediate caller must be the owning user, or a registry-authorized
    /// principal while the proxy is not revoked.
    ///
    /// # Errors
    /// `ProxyUnauthorized`, or `ExecutionFailed` wrapping the inner failure.
    pub fn proxy(&mut self, ctx: &mut CallContext<'_>, call: &Call) -> Result<Bytes> {
        let caller = ctx.sender();
        let me = ctx.this();
        if !self.may_direct(ctx, caller)? {
            return Err(AccordError::ProxyUnauthorized { proxy: me, caller });
        }

        tracing::debug!(
            proxy = %me,
            user = %self.user,
            %caller,
            target = %call.target,
            mode = %call.how_to_call,
            "Proxy executing call"
        );

        let result = match call.how_to_call {
            HowToCall::Call => ctx.call(call.target, &call.data),
            HowToCall::DelegateCall => ctx.delegate_call(call.target, &call.data),
        };
        result.map_err(|err| AccordError::ExecutionFailed {
            proxy: me,
            reason: err.to_string(),
        })
    }

    /// Refuse (or re-admit) registry-authorized callers. Owner only.
    ///
    /// # Errors
    /// `NotProxyOwner` if the caller is not the owning user.
    pub fn set_revoke(&mut self, ctx: &mut CallContext<'_>, revoke: bool) -> Result<()> {
        if ctx.sender() != self.user {
            return Err(AccordError::NotProxyOwner {
                proxy: ctx.this(),
                caller: ctx.sender(),
            });
        }
        self.revoked = revoke;
        ctx.emit(Event::ProxyRevoked {
            user: self.user,
            revoked: revoke,
        });
        tracing::info!(proxy = %ctx.this(), user = %self.user, revoke, "Proxy revocation updated");
        Ok(())
    }

    fn may_direct(&self, ctx: &CallContext<'_>, caller: Address) -> Result<bool> {
        if caller == self.user {
            return Ok(true);
        }
        if self.revoked {
            return Ok(false);
        }
        Ok(ctx
            .view::<ProxyRegistry>(self.registry)?
            .is_authorized(caller))
    }
}

impl Contract for AuthenticatedProxy {
    fn name(&self) -> &'static str {
        "AuthenticatedProxy"
    }
}
