//! Non-fungible token with per-token and operator approvals and the
//! safe-transfer receiver hook.

use std::collections::{HashMap, HashSet};

use accord_runtime::{CallContext, Contract};
use accord_types::abi::IERC721::{self, IERC721Calls};
use accord_types::abi::IERC721Receiver;
use accord_types::{AccordError, Event, Result};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolInterface};

/// Minimal ERC-721. Minting is unrestricted.
#[derive(Debug, Clone, Default)]
pub struct MockErc721 {
    owners: HashMap<U256, Address>,
    token_approvals: HashMap<U256, Address>,
    /// (owner, operator)
    operators: HashSet<(Address, Address)>,
}

impl MockErc721 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn owner_of(&self, token_id: U256) -> Option<Address> {
        self.owners.get(&token_id).copied()
    }

    #[must_use]
    pub fn balance_of(&self, owner: Address) -> usize {
        self.owners.values().filter(|o| **o == owner).count()
    }

    #[must_use]
    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operators.contains(&(owner, operator))
    }

    fn transfer(
        &mut self,
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<()> {
        let spender = ctx.sender();
        let owner = self.owner_of(token_id).ok_or_else(|| {
            AccordError::revert(ctx.this(), format!("token {token_id} does not exist"))
        })?;
        if owner != from {
            return Err(AccordError::revert(
                ctx.this(),
                format!("token {token_id} is owned by {owner}, not {from}"),
            ));
        }
        let approved = spender == owner
            || self.token_approvals.get(&token_id) == Some(&spender)
            || self.is_approved_for_all(owner, spender);
        if !approved {
            return Err(AccordError::revert(
                ctx.this(),
                format!("{spender} is not approved to move token {token_id}"),
            ));
        }
        if to == Address::ZERO {
            return Err(AccordError::revert(ctx.this(), "transfer to the zero address"));
        }

        self.token_approvals.remove(&token_id);
        self.owners.insert(token_id, to);
        ctx.emit(Event::NftTransfer { from, to, token_id });
        Ok(())
    }

    /// Notify a contract recipient and require the standard acknowledgement.
    fn check_receiver(
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<()> {
        if !ctx.is_contract(to) {
            return Ok(());
        }
        let hook = IERC721Receiver::onERC721ReceivedCall {
            operator: ctx.sender(),
            from,
            tokenId: token_id,
            data,
        };
        let ret = ctx.call(to, &hook.abi_encode())?;
        let ack = IERC721Receiver::onERC721ReceivedCall::abi_decode_returns(&ret, true)?._0;
        if ack.0 != IERC721Receiver::onERC721ReceivedCall::SELECTOR {
            return Err(AccordError::revert(
                ctx.this(),
                format!("receiver {to} did not acknowledge token {token_id}"),
            ));
        }
        Ok(())
    }
}

impl Contract for MockErc721 {
    fn name(&self) -> &'static str {
        "MockErc721"
    }

    fn call(&mut self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes> {
        let sender = ctx.sender();
        match IERC721Calls::abi_decode(input, true)? {
            IERC721Calls::transferFrom(IERC721::transferFromCall {
                from,
                to,
                tokenId: token_id,
            }) => {
                self.transfer(ctx, from, to, token_id)?;
            }
            IERC721Calls::safeTransferFrom(IERC721::safeTransferFromCall {
                from,
                to,
                tokenId: token_id,
                data,
            }) => {
                self.transfer(ctx, from, to, token_id)?;
                Self::check_receiver(ctx, from, to, token_id, data)?;
            }
            IERC721Calls::setApprovalForAll(IERC721::setApprovalForAllCall { operator, approved }) => {
                if approved {
                    self.operators.insert((sender, operator));
                } else {
                    self.operators.remove(&(sender, operator));
                }
                ctx.emit(Event::ApprovalForAll {
                    owner: sender,
                    operator,
                    approved,
                });
            }
            IERC721Calls::approve(IERC721::approveCall {
                to,
                tokenId: token_id,
            }) => {
                let owner = self.owner_of(token_id);
                let allowed = owner
                    .is_some_and(|owner| owner == sender || self.is_approved_for_all(owner, sender));
                if !allowed {
                    return Err(AccordError::revert(
                        ctx.this(),
                        format!("{sender} may not approve token {token_id}"),
                    ));
                }
                self.token_approvals.insert(token_id, to);
            }
            IERC721Calls::mint(IERC721::mintCall {
                to,
                tokenId: token_id,
            }) => {
                if self.owners.contains_key(&token_id) {
                    return Err(AccordError::revert(
                        ctx.this(),
                        format!("token {token_id} already minted"),
                    ));
                }
                self.owners.insert(token_id, to);
                ctx.emit(Event::NftTransfer {
                    from: Address::ZERO,
                    to,
                    token_id,
                });
            }
        }
        Ok(Bytes::new())
    }
}

/// Calldata for `transferFrom(from, to, tokenId)`.
#[must_use]
pub fn transfer_from_calldata(from: Address, to: Address, token_id: U256) -> Bytes {
    IERC721::transferFromCall {
        from,
        to,
        tokenId: token_id,
    }
    .abi_encode()
    .into()
}

/// Calldata for `safeTransferFrom(from, to, tokenId, data)`.
#[must_use]
pub fn safe_transfer_from_calldata(
    from: Address,
    to: Address,
    token_id: U256,
    data: impl Into<Bytes>,
) -> Bytes {
    IERC721::safeTransferFromCall {
        from,
        to,
        tokenId: token_id,
        data: data.into(),
    }
    .abi_encode()
    .into()
}

/// Calldata for `setApprovalForAll(operator, approved)`.
#[must_use]
pub fn set_approval_for_all_calldata(operator: Address, approved: bool) -> Bytes {
    IERC721::setApprovalForAllCall { operator, approved }
        .abi_encode()
        .into()
}

/// Calldata for `mint(to, tokenId)`.
#[must_use]
pub fn mint_calldata(to: Address, token_id: U256) -> Bytes {
    IERC721::mintCall {
        to,
        tokenId: token_id,
    }
    .abi_encode()
    .into()
}
