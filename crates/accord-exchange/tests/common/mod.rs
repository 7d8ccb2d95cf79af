//! Shared fixture: a bootstrapped deployment, token contracts, predicate
//! libraries and three funded accounts with registered proxies.

#![allow(dead_code)]

use accord_assets::{MockErc20, MockErc721, MockPawnBroker, erc20, erc721};
use accord_exchange::client::{self, Deployment};
use accord_exchange::{Exchange, MatchOutcome, MatchRequest, OrderSigner};
use accord_registry::client as registry_client;
use accord_runtime::World;
use accord_statics::{Atomicizer, StaticMarket, StaticPawnBroker};
use accord_types::abi::predicate_selector;
use accord_types::{AccordConfig, ChainConfig, Order, OrderSignature, Result};
use alloy_primitives::{Address, Bytes, U256};

pub const GENESIS: u64 = 1_700_000_000;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A trading account: signing key plus registered proxy.
pub struct Account {
    pub signer: OrderSigner,
    pub proxy: Address,
}

impl Account {
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

pub struct Fixture {
    pub world: World,
    pub owner: Address,
    pub registry: Address,
    pub exchange: Address,
    pub market: Address,
    pub pawn_statics: Address,
    pub atomicizer: Address,
    pub erc20: Address,
    pub erc721: Address,
    pub broker: Address,
    pub alice: Account,
    pub bob: Account,
    pub carol: Account,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        let config = AccordConfig {
            chain: ChainConfig::at(GENESIS),
            ..AccordConfig::default()
        };
        let mut world = World::new(config.chain.clone());
        let owner = Address::repeat_byte(0x0F);

        let Deployment { registry, exchange } =
            client::bootstrap(&mut world, owner, &config).expect("bootstrap should succeed");

        let market = world.deploy(owner, StaticMarket::new());
        let pawn_statics = world.deploy(owner, StaticPawnBroker::new());
        let atomicizer = world.deploy(owner, Atomicizer);
        let erc20 = world.deploy(owner, MockErc20::new());
        let erc721 = world.deploy(owner, MockErc721::new());
        let broker = world.deploy(owner, MockPawnBroker::new());

        let mut account = |seed: &[u8]| {
            let signer = OrderSigner::from_seed(seed).expect("seeded key");
            let proxy = registry_client::register_proxy(&mut world, registry, signer.address())
                .expect("proxy registration should succeed");
            Account { signer, proxy }
        };
        let alice = account(b"alice");
        let bob = account(b"bob");
        let carol = account(b"carol");

        let mut fixture = Self {
            world,
            owner,
            registry,
            exchange,
            market,
            pawn_statics,
            atomicizer,
            erc20,
            erc721,
            broker,
            alice,
            bob,
            carol,
        };
        for who in [
            fixture.alice.address(),
            fixture.bob.address(),
            fixture.carol.address(),
        ] {
            fixture.approve_all(who);
        }
        fixture
    }

    /// Grant the account's proxy unlimited ERC-20 allowance and ERC-721
    /// operator rights.
    pub fn approve_all(&mut self, who: Address) {
        let proxy = self.proxy_of(who);
        let (erc20, erc721) = (self.erc20, self.erc721);
        self.world
            .transact(who, |ctx| {
                ctx.call(erc20, &erc20::approve_calldata(proxy, U256::MAX))?;
                ctx.call(erc721, &erc721::set_approval_for_all_calldata(proxy, true))
            })
            .expect("approvals should succeed");
    }

    pub fn proxy_of(&self, who: Address) -> Address {
        registry_client::proxy_of(&self.world, self.registry, who).expect("registered proxy")
    }

    pub fn mint_erc20(&mut self, to: Address, amount: u64) {
        let erc20 = self.erc20;
        self.world
            .transact(self.owner, |ctx| {
                ctx.call(erc20, &erc20::mint_calldata(to, U256::from(amount)))
            })
            .expect("mint should succeed");
    }

    pub fn mint_nft(&mut self, to: Address, token_id: u64) {
        let erc721 = self.erc721;
        self.world
            .transact(self.owner, |ctx| {
                ctx.call(erc721, &erc721::mint_calldata(to, U256::from(token_id)))
            })
            .expect("mint should succeed");
    }

    /// An always-live, single-unit order on the fixture registry.
    pub fn order(
        &self,
        maker: Address,
        static_target: Address,
        routine: &str,
        extradata: impl Into<Bytes>,
    ) -> Order {
        let mut order = Order::dummy(self.registry, maker, static_target);
        order.static_selector = predicate_selector(routine);
        order.static_extradata = extradata.into();
        order
    }

    pub fn exchange_ref(&self) -> &Exchange {
        client::exchange(&self.world, self.exchange).expect("exchange deployed")
    }

    pub fn sign(&self, account: &Account, order: &Order) -> OrderSignature {
        account
            .signer
            .sign_order(self.exchange_ref().domain(), order)
            .expect("signing should succeed")
    }

    pub fn fill_of(&self, order: &Order) -> U256 {
        let exchange = self.exchange_ref();
        exchange.fill_of(exchange.hash_order(order))
    }

    pub fn atomic_match(&mut self, matcher: Address, request: &MatchRequest) -> Result<MatchOutcome> {
        client::atomic_match(&mut self.world, self.exchange, matcher, request)
    }

    pub fn erc20_balance(&self, who: Address) -> U256 {
        self.world
            .contract::<MockErc20>(self.erc20)
            .expect("erc20 deployed")
            .balance_of(who)
    }

    pub fn nft_owner(&self, token_id: u64) -> Option<Address> {
        self.world
            .contract::<MockErc721>(self.erc721)
            .expect("erc721 deployed")
            .owner_of(U256::from(token_id))
    }

    pub fn pawn_broker(&self) -> &MockPawnBroker {
        self.world
            .contract::<MockPawnBroker>(self.broker)
            .expect("broker deployed")
    }
}
