//! Per-frame execution context.

use accord_types::{AccordError, Event, Log, Predicate, Result, TxId, constants::MAX_CALL_DEPTH};
use alloy_primitives::{Address, Bytes};

use crate::{Contract, World};

/// The execution frame a contract runs in.
///
/// Holds the world mutably for the duration of the frame. Nested calls
/// borrow it into a child frame and hand it back when they return.
pub struct CallContext<'w> {
    world: &'w mut World,
    this: Address,
    sender: Address,
    origin: Address,
    depth: usize,
    tx: TxId,
}

impl<'w> CallContext<'w> {
    pub(crate) fn root(world: &'w mut World, origin: Address, tx: TxId) -> Self {
        Self {
            world,
            this: origin,
            sender: origin,
            origin,
            depth: 0,
            tx,
        }
    }

    // ── Frame identity ─────────────────────────────────────────────────

    /// The immediate caller.
    #[must_use]
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// The account whose code or identity is executing.
    #[must_use]
    pub fn this(&self) -> Address {
        self.this
    }

    /// The externally owned account that started the transaction.
    #[must_use]
    pub fn origin(&self) -> Address {
        self.origin
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn tx(&self) -> TxId {
        self.tx
    }

    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.world.timestamp()
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.world.chain_id()
    }

    #[must_use]
    pub fn is_contract(&self, address: Address) -> bool {
        self.world.is_contract(address)
    }

    // ── Calls ──────────────────────────────────────────────────────────

    /// Call `target` with a raw ABI payload. The callee sees this frame's
    /// `this` as its sender.
    ///
    /// # Errors
    /// `NoContract` for accounts without code, `ReentrantCall` if `target` is
    /// already executing, `CallDepthExceeded`, or the callee's own error.
    pub fn call(&mut self, target: Address, input: &[u8]) -> Result<Bytes> {
        self.check_depth()?;
        let mut contract = self.checkout(target)?;
        tracing::trace!(
            from = %self.this,
            to = %target,
            kind = contract.name(),
            depth = self.depth + 1,
            "call"
        );
        let sender = self.this;
        let result = contract.call(&mut self.nested(target, sender), input);
        self.checkin(target, contract);
        result
    }

    /// Run `target`'s code with this frame's identity: the library sees the
    /// same `this` and `sender` as the caller.
    ///
    /// # Errors
    /// As for [`Self::call`].
    pub fn delegate_call(&mut self, target: Address, input: &[u8]) -> Result<Bytes> {
        self.check_depth()?;
        let library = self.checkout(target)?;
        tracing::trace!(
            on_behalf_of = %self.this,
            library = %target,
            kind = library.name(),
            depth = self.depth + 1,
            "delegatecall"
        );
        let (this, sender) = (self.this, self.sender);
        let result = library.delegate_call(&mut self.nested(this, sender), input);
        self.checkin(target, library);
        result
    }

    /// Typed call: check out the contract at `target`, downcast it to `C`,
    /// and run `f` against it in a child frame.
    ///
    /// # Errors
    /// `ContractMismatch` if the contract is not a `C`, plus the errors of
    /// [`Self::call`].
    pub fn invoke<C, R, F>(&mut self, target: Address, f: F) -> Result<R>
    where
        C: Contract,
        F: FnOnce(&mut C, &mut CallContext<'_>) -> Result<R>,
    {
        self.check_depth()?;
        let mut contract = self.checkout(target)?;
        let actual = contract.name();
        let sender = self.this;
        let result = match contract.as_any_mut().downcast_mut::<C>() {
            Some(typed) => f(typed, &mut self.nested(target, sender)),
            None => Err(AccordError::ContractMismatch {
                address: target,
                expected: short_type_name::<C>(),
                actual,
            }),
        };
        self.checkin(target, contract);
        result
    }

    /// Read-only typed access to a contract that is not currently executing.
    ///
    /// # Errors
    /// `NoContract`, `ReentrantCall` or `ContractMismatch`.
    pub fn view<C: Contract>(&self, address: Address) -> Result<&C> {
        let contract = self.world.slot(address)?;
        contract
            .as_any()
            .downcast_ref::<C>()
            .ok_or_else(|| AccordError::ContractMismatch {
                address,
                expected: short_type_name::<C>(),
                actual: contract.name(),
            })
    }

    /// Resolve a predicate by address.
    ///
    /// # Errors
    /// `PredicateNotFound` if there is no contract at `address` or it exposes
    /// no predicate surface.
    pub fn predicate(&self, address: Address) -> Result<&dyn Predicate> {
        match self.world.slot(address) {
            Ok(contract) => contract
                .predicate()
                .ok_or(AccordError::PredicateNotFound(address)),
            Err(AccordError::NoContract(_)) => Err(AccordError::PredicateNotFound(address)),
            Err(err) => Err(err),
        }
    }

    // ── State ──────────────────────────────────────────────────────────

    /// Deploy a contract with this frame's account as deployer.
    pub fn deploy<C: Contract>(&mut self, contract: C) -> Address {
        self.world.deploy(self.this, contract)
    }

    /// Append an event to the log, attributed to this frame's account.
    pub fn emit(&mut self, event: Event) {
        let log = Log {
            tx: self.tx,
            emitter: self.this,
            timestamp: self.world.timestamp(),
            event,
        };
        self.world.logs.push(log);
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn check_depth(&self) -> Result<()> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(AccordError::CallDepthExceeded(MAX_CALL_DEPTH));
        }
        Ok(())
    }

    fn checkout(&mut self, address: Address) -> Result<Box<dyn Contract>> {
        match self.world.contracts.get_mut(&address) {
            None => Err(AccordError::NoContract(address)),
            Some(slot) => slot.take().ok_or(AccordError::ReentrantCall(address)),
        }
    }

    fn checkin(&mut self, address: Address, contract: Box<dyn Contract>) {
        self.world.contracts.insert(address, Some(contract));
    }

    fn nested(&mut self, this: Address, sender: Address) -> CallContext<'_> {
        CallContext {
            world: &mut *self.world,
            this,
            sender,
            origin: self.origin,
            depth: self.depth + 1,
            tx: self.tx,
        }
    }
}

fn short_type_name<C>() -> &'static str {
    let full = std::any::type_name::<C>();
    full.rsplit("::").next().unwrap_or(full)
}
