//! secp256k1 ECDSA recovery and signing over order digests.

use accord_types::{AccordError, OrderSignature, Result};
use alloy_primitives::{Address, B256, keccak256};
use k256::PublicKey;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::OrderDomain;

/// Ethereum address of a public key: last 20 bytes of
/// `keccak256(uncompressed_point[1..])`.
#[must_use]
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = PublicKey::from(key).to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Recover the account that produced `signature` over `digest`.
///
/// # Errors
/// `MalformedSignature` if `v` is out of range, `(r, s)` is not a valid
/// low-s scalar pair, or recovery fails.
pub fn recover_signer(digest: B256, signature: &OrderSignature) -> Result<Address> {
    let recid = RecoveryId::from_byte(signature.recovery_id()?)
        .ok_or_else(|| AccordError::MalformedSignature(format!("bad v {}", signature.v)))?;
    let mut rs = [0u8; 64];
    rs[..32].copy_from_slice(signature.r.as_slice());
    rs[32..].copy_from_slice(signature.s.as_slice());
    let sig = Signature::from_slice(&rs).map_err(|e| AccordError::MalformedSignature(e.to_string()))?;
    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recid)
        .map_err(|e| AccordError::MalformedSignature(e.to_string()))?;
    Ok(address_of(&key))
}

/// A maker's signing key.
#[derive(Clone)]
pub struct OrderSigner {
    key: SigningKey,
    address: Address,
}

impl OrderSigner {
    #[must_use]
    pub fn new(key: SigningKey) -> Self {
        let address = address_of(key.verifying_key());
        Self { key, address }
    }

    /// A fresh key from the thread-local CSPRNG.
    #[must_use]
    pub fn random() -> Self {
        Self::new(SigningKey::random(&mut rand::thread_rng()))
    }

    /// Parse a 32-byte hex secret, with or without `0x`.
    ///
    /// # Errors
    /// `Configuration` if the hex is malformed or not a valid scalar.
    pub fn from_hex(secret: &str) -> Result<Self> {
        let bytes = hex::decode(secret.trim_start_matches("0x"))
            .map_err(|e| AccordError::Configuration(format!("signing key hex: {e}")))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|e| AccordError::Configuration(format!("signing key: {e}")))?;
        Ok(Self::new(key))
    }

    /// Deterministic key derived as `keccak256(seed)`; for fixtures.
    ///
    /// # Errors
    /// `Configuration` in the negligible case the hash is not a valid scalar.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let key = SigningKey::from_slice(keccak256(seed).as_slice())
            .map_err(|e| AccordError::Configuration(format!("seed key: {e}")))?;
        Ok(Self::new(key))
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte digest, producing `v` in `{27, 28}`.
    ///
    /// # Errors
    /// `Internal` if the signing primitive fails.
    pub fn sign_digest(&self, digest: B256) -> Result<OrderSignature> {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|e| AccordError::Internal(format!("signing failed: {e}")))?;
        let (r, s) = sig.split_bytes();
        Ok(OrderSignature {
            v: 27 + recid.to_byte(),
            r: B256::from_slice(&r),
            s: B256::from_slice(&s),
        })
    }

    /// Sign `order` under `domain`.
    ///
    /// # Errors
    /// As for [`Self::sign_digest`].
    pub fn sign_order(&self, domain: &OrderDomain, order: &accord_types::Order) -> Result<OrderSignature> {
        self.sign_digest(domain.hash_order(order).0)
    }
}

impl std::fmt::Debug for OrderSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// `0x`-prefixed hex of the 65-byte `r ‖ s ‖ v` form.
#[must_use]
pub fn signature_hex(signature: &OrderSignature) -> String {
    format!("0x{}", hex::encode(signature.to_bytes()))
}
