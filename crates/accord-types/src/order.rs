//! Order, call and signature types.
//!
//! An [`Order`] is an immutable intent record. It carries no trade semantics
//! of its own: the static predicate it nominates (`static_target` +
//! `static_selector`) interprets `static_extradata` at match time.
//!
//! Field order and widths are part of the wire contract: they mirror the
//! EIP-712 `Order` type so digests match externally signed orders.

use alloy_primitives::{Address, B256, Bytes, Selector, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};

use crate::{AccordError, Result};

/// How a proxy dispatches a [`Call`].
///
/// The discriminants are the on-wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum HowToCall {
    /// The proxy calls the target as a normal external caller.
    Call = 0,
    /// The target's code runs with the proxy's identity.
    DelegateCall = 1,
}

impl std::fmt::Display for HowToCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::DelegateCall => write!(f, "DELEGATECALL"),
        }
    }
}

/// A call a maker's proxy performs when the match settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub target: Address,
    pub how_to_call: HowToCall,
    pub data: Bytes,
}

impl Call {
    #[must_use]
    pub fn new(target: Address, data: impl Into<Bytes>) -> Self {
        Self {
            target,
            how_to_call: HowToCall::Call,
            data: data.into(),
        }
    }

    #[must_use]
    pub fn delegate(target: Address, data: impl Into<Bytes>) -> Self {
        Self {
            target,
            how_to_call: HowToCall::DelegateCall,
            data: data.into(),
        }
    }
}

/// Signed intent to trade, independent of any specific counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Registry whose proxies may settle this order.
    pub registry: Address,
    /// Account whose authorization the order carries.
    pub maker: Address,
    /// Address of the predicate contract.
    pub static_target: Address,
    /// Which routine on `static_target` validates the match.
    pub static_selector: Selector,
    /// Opaque parameters interpreted only by the predicate.
    pub static_extradata: Bytes,
    /// Upper bound on cumulative fill, in predicate-defined units.
    pub maximum_fill: U256,
    pub listing_time: U256,
    /// Zero means the order never expires.
    pub expiration_time: U256,
    /// Disambiguates otherwise identical orders.
    pub salt: U256,
}

impl Order {
    /// Check the order's listing window against the current block time.
    ///
    /// The listing boundary is inclusive: an order is live exactly at
    /// `listing_time`, and still live exactly at `expiration_time`.
    ///
    /// # Errors
    /// `NotListedYet` before `listing_time`, `Expired` after a non-zero
    /// `expiration_time`.
    pub fn check_live(&self, now: u64) -> Result<()> {
        let current = U256::from(now);
        if current < self.listing_time {
            return Err(AccordError::NotListedYet {
                listing_time: self.listing_time,
                now,
            });
        }
        if !self.expiration_time.is_zero() && current > self.expiration_time {
            return Err(AccordError::Expired {
                expiration_time: self.expiration_time,
                now,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn never_expires(&self) -> bool {
        self.expiration_time.is_zero()
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// An always-live order with a random salt and a fill cap of one.
    pub fn dummy(registry: Address, maker: Address, static_target: Address) -> Self {
        Self {
            registry,
            maker,
            static_target,
            static_selector: Selector::ZERO,
            static_extradata: Bytes::new(),
            maximum_fill: U256::from(1),
            listing_time: U256::ZERO,
            expiration_time: U256::ZERO,
            salt: U256::from(rand::random::<u64>()),
        }
    }
}

/// A secp256k1 ECDSA signature in Ethereum `(v, r, s)` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderSignature {
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl OrderSignature {
    /// Parse the 65-byte `r || s || v` layout produced by typed-data signers.
    ///
    /// # Errors
    /// `MalformedSignature` if the length is wrong or `v` is out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 65 {
            return Err(AccordError::MalformedSignature(format!(
                "expected 65 bytes, got {}",
                bytes.len()
            )));
        }
        let sig = Self {
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
            v: bytes[64],
        };
        sig.recovery_id()?;
        Ok(sig)
    }

    /// Serialize as `r || s || v`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }

    /// Normalized recovery id (0 or 1). Accepts both `{0, 1}` and `{27, 28}`.
    ///
    /// # Errors
    /// `MalformedSignature` for any other `v`.
    pub fn recovery_id(&self) -> Result<u8> {
        match self.v {
            0 | 1 => Ok(self.v),
            27 | 28 => Ok(self.v - 27),
            other => Err(AccordError::MalformedSignature(format!(
                "invalid recovery byte {other}"
            ))),
        }
    }

    /// ABI encoding `(uint8 v, bytes32 r, bytes32 s)`.
    #[must_use]
    pub fn abi_encode(&self) -> Vec<u8> {
        (U256::from(self.v), self.r, self.s).abi_encode_params()
    }

    /// Inverse of [`Self::abi_encode`].
    ///
    /// # Errors
    /// `Abi` on a malformed payload, `MalformedSignature` on a bad `v`.
    pub fn abi_decode(data: &[u8]) -> Result<Self> {
        let (v, r, s) = <(U256, B256, B256)>::abi_decode_params(data, true)?;
        let v = u8::try_from(v)
            .map_err(|_| AccordError::MalformedSignature(format!("recovery word {v} out of range")))?;
        let sig = Self { v, r, s };
        sig.recovery_id()?;
        Ok(sig)
    }
}
