//! EIP-712 structured hashing of orders.
//!
//! The order digest is `keccak256(0x19 0x01 ‖ domainSeparator ‖ structHash)`.
//! It is both the message makers sign and the key of the fill ledger, so it
//! has to be byte-identical to what typed-data wallets produce.

use accord_types::{ExchangeConfig, Order, OrderHash};
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct};

mod typed {
    alloy_sol_types::sol! {
        struct Order {
            address registry;
            address maker;
            address staticTarget;
            bytes4 staticSelector;
            bytes staticExtradata;
            uint256 maximumFill;
            uint256 listingTime;
            uint256 expirationTime;
            uint256 salt;
        }
    }
}

impl From<&Order> for typed::Order {
    fn from(order: &Order) -> Self {
        Self {
            registry: order.registry,
            maker: order.maker,
            staticTarget: order.static_target,
            staticSelector: order.static_selector,
            staticExtradata: order.static_extradata.clone(),
            maximumFill: order.maximum_fill,
            listingTime: order.listing_time,
            expirationTime: order.expiration_time,
            salt: order.salt,
        }
    }
}

/// The signing domain of one exchange deployment.
#[derive(Debug, Clone)]
pub struct OrderDomain {
    domain: Eip712Domain,
    separator: B256,
}

impl OrderDomain {
    #[must_use]
    pub fn new(config: &ExchangeConfig, verifying_contract: Address) -> Self {
        let domain = Eip712Domain::new(
            Some(config.name.clone().into()),
            Some(config.version.clone().into()),
            Some(U256::from(config.chain_id)),
            Some(verifying_contract),
            None,
        );
        let separator = domain.separator();
        Self { domain, separator }
    }

    #[must_use]
    pub fn separator(&self) -> B256 {
        self.separator
    }

    #[must_use]
    pub fn eip712(&self) -> &Eip712Domain {
        &self.domain
    }

    #[must_use]
    pub fn verifying_contract(&self) -> Option<Address> {
        self.domain.verifying_contract
    }

    /// `hashStruct(order)`, independent of the domain.
    #[must_use]
    pub fn struct_hash(order: &Order) -> B256 {
        typed::Order::from(order).eip712_hash_struct()
    }

    /// The domain-separated digest of `order`.
    #[must_use]
    pub fn hash_order(&self, order: &Order) -> OrderHash {
        OrderHash(typed::Order::from(order).eip712_signing_hash(&self.domain))
    }
}
