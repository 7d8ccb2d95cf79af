//! Chain state: deployed contracts, the block clock and the event log.
//!
//! All state changes happen inside [`World::transact`]. A transaction either
//! commits every change made by every contract it touched, or none of them.

use std::collections::HashMap;

use accord_types::{AccordError, ChainConfig, Log, Result, TxId};
use alloy_primitives::{Address, keccak256};

use crate::{CallContext, Contract};

/// A slot is `None` while its contract is executing somewhere on the call
/// stack. Any attempt to enter it again fails with `ReentrantCall`.
pub(crate) type Slot = Option<Box<dyn Contract>>;

/// Contract state, nonces and log length captured before a transaction.
struct Snapshot {
    contracts: HashMap<Address, Slot>,
    nonces: HashMap<Address, u64>,
    log_len: usize,
}

/// The simulated chain every contract in this workspace runs on.
pub struct World {
    config: ChainConfig,
    timestamp: u64,
    pub(crate) contracts: HashMap<Address, Slot>,
    nonces: HashMap<Address, u64>,
    pub(crate) logs: Vec<Log>,
}

impl World {
    #[must_use]
    pub fn new(config: ChainConfig) -> Self {
        let timestamp = config.genesis_timestamp;
        Self {
            config,
            timestamp,
            contracts: HashMap::new(),
            nonces: HashMap::new(),
            logs: Vec::new(),
        }
    }

    // ── Clock ──────────────────────────────────────────────────────────

    /// Current block timestamp.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Move the clock to an absolute time. Time may not run backwards.
    ///
    /// # Errors
    /// `Configuration` if `timestamp` is earlier than the current time.
    pub fn set_timestamp(&mut self, timestamp: u64) -> Result<()> {
        if timestamp < self.timestamp {
            return Err(AccordError::Configuration(format!(
                "block time cannot move backwards: {} -> {timestamp}",
                self.timestamp
            )));
        }
        self.timestamp = timestamp;
        Ok(())
    }

    /// Advance the clock by `seconds`.
    pub fn advance_time(&mut self, seconds: u64) {
        self.timestamp = self.timestamp.saturating_add(seconds);
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    // ── Deployment ─────────────────────────────────────────────────────

    /// Deploy `contract` from `deployer`, returning its address.
    pub fn deploy<C: Contract>(&mut self, deployer: Address, contract: C) -> Address {
        self.deploy_with(deployer, |_| contract)
    }

    /// Deploy a contract that needs to know its own address at construction.
    pub fn deploy_with<C, F>(&mut self, deployer: Address, build: F) -> Address
    where
        C: Contract,
        F: FnOnce(Address) -> C,
    {
        let address = self.next_address(deployer);
        let contract = build(address);
        tracing::debug!(
            %deployer,
            %address,
            kind = contract.name(),
            "Contract deployed"
        );
        self.contracts.insert(address, Some(Box::new(contract)));
        address
    }

    /// Deterministic address: `keccak256(deployer || nonce)[12..]`.
    fn next_address(&mut self, deployer: Address) -> Address {
        let nonce = self.nonces.entry(deployer).or_insert(0);
        let mut preimage = [0u8; 28];
        preimage[..20].copy_from_slice(deployer.as_slice());
        preimage[20..].copy_from_slice(&nonce.to_be_bytes());
        *nonce += 1;
        Address::from_slice(&keccak256(preimage)[12..])
    }

    // ── Inspection ─────────────────────────────────────────────────────

    /// Whether an account has code.
    #[must_use]
    pub fn is_contract(&self, address: Address) -> bool {
        self.contracts.contains_key(&address)
    }

    /// Typed read-only access to a deployed contract.
    #[must_use]
    pub fn contract<C: Contract>(&self, address: Address) -> Option<&C> {
        self.contracts
            .get(&address)?
            .as_deref()?
            .as_any()
            .downcast_ref::<C>()
    }

    pub(crate) fn slot(&self, address: Address) -> Result<&dyn Contract> {
        match self.contracts.get(&address) {
            None => Err(AccordError::NoContract(address)),
            Some(None) => Err(AccordError::ReentrantCall(address)),
            Some(Some(contract)) => Ok(contract.as_ref()),
        }
    }

    /// The full event log, oldest first.
    #[must_use]
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Events emitted by one transaction.
    pub fn logs_for(&self, tx: TxId) -> impl Iterator<Item = &Log> {
        self.logs.iter().filter(move |log| log.tx == tx)
    }

    // ── Transactions ───────────────────────────────────────────────────

    /// Run `f` as one atomic transaction sent by the externally owned
    /// account `origin`.
    ///
    /// On `Err` every contract, nonce and log entry is restored to its state
    /// before the transaction began.
    ///
    /// # Errors
    /// Whatever `f` returns.
    pub fn transact<R, F>(&mut self, origin: Address, f: F) -> Result<R>
    where
        F: FnOnce(&mut CallContext<'_>) -> Result<R>,
    {
        let tx = TxId::new();
        let span = tracing::debug_span!("tx", %tx, %origin, at = self.timestamp);
        let _enter = span.enter();

        let snapshot = self.snapshot();
        let result = f(&mut CallContext::root(self, origin, tx));

        if let Err(err) = &result {
            tracing::warn!(
                error = %err,
                category = %err.category(),
                "Transaction reverted, state rolled back"
            );
            self.restore(snapshot);
        }
        result
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            contracts: self.contracts.clone(),
            nonces: self.nonces.clone(),
            log_len: self.logs.len(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.contracts = snapshot.contracts;
        self.nonces = snapshot.nonces;
        self.logs.truncate(snapshot.log_len);
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("chain_id", &self.config.chain_id)
            .field("timestamp", &self.timestamp)
            .field("contracts", &self.contracts.len())
            .field("logs", &self.logs.len())
            .finish_non_exhaustive()
    }
}
