//! Fungible token with balances and allowances.

use std::collections::HashMap;

use accord_runtime::{CallContext, Contract};
use accord_types::abi::IERC20::{self, IERC20Calls};
use accord_types::{AccordError, Event, Result};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolInterface, SolValue};

/// Minimal ERC-20. Minting is unrestricted.
#[derive(Debug, Clone, Default)]
pub struct MockErc20 {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    total_supply: U256,
}

impl MockErc20 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    fn move_balance(
        &mut self,
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(AccordError::revert(
                ctx.this(),
                format!("insufficient balance: {from} has {balance}, needs {amount}"),
            ));
        }
        self.balances.insert(from, balance - amount);
        *self.balances.entry(to).or_default() += amount;
        ctx.emit(Event::Transfer { from, to, amount });
        Ok(())
    }

    fn spend_allowance(
        &mut self,
        ctx: &CallContext<'_>,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<()> {
        if owner == spender {
            return Ok(());
        }
        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return Err(AccordError::revert(
                ctx.this(),
                format!("insufficient allowance: {spender} may spend {allowed} of {owner}, needs {amount}"),
            ));
        }
        if allowed != U256::MAX {
            self.allowances.insert((owner, spender), allowed - amount);
        }
        Ok(())
    }
}

impl Contract for MockErc20 {
    fn name(&self) -> &'static str {
        "MockErc20"
    }

    fn call(&mut self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes> {
        let sender = ctx.sender();
        match IERC20Calls::abi_decode(input, true)? {
            IERC20Calls::transfer(IERC20::transferCall { to, amount }) => {
                self.move_balance(ctx, sender, to, amount)?;
                Ok(true.abi_encode().into())
            }
            IERC20Calls::transferFrom(IERC20::transferFromCall { from, to, amount }) => {
                self.spend_allowance(ctx, from, sender, amount)?;
                self.move_balance(ctx, from, to, amount)?;
                Ok(true.abi_encode().into())
            }
            IERC20Calls::approve(IERC20::approveCall { spender, amount }) => {
                self.allowances.insert((sender, spender), amount);
                ctx.emit(Event::Approval {
                    owner: sender,
                    spender,
                    amount,
                });
                Ok(true.abi_encode().into())
            }
            IERC20Calls::mint(IERC20::mintCall { to, amount }) => {
                self.total_supply += amount;
                *self.balances.entry(to).or_default() += amount;
                ctx.emit(Event::Transfer {
                    from: Address::ZERO,
                    to,
                    amount,
                });
                Ok(Bytes::new())
            }
        }
    }
}

/// Calldata for `transferFrom(from, to, amount)`.
#[must_use]
pub fn transfer_from_calldata(from: Address, to: Address, amount: U256) -> Bytes {
    IERC20::transferFromCall { from, to, amount }.abi_encode().into()
}

/// Calldata for `approve(spender, amount)`.
#[must_use]
pub fn approve_calldata(spender: Address, amount: U256) -> Bytes {
    IERC20::approveCall { spender, amount }.abi_encode().into()
}

/// Calldata for `mint(to, amount)`.
#[must_use]
pub fn mint_calldata(to: Address, amount: U256) -> Bytes {
    IERC20::mintCall { to, amount }.abi_encode().into()
}
