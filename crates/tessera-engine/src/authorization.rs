use std::collections::HashMap;

use chrono::{DateTime, Utc};

use tessera_core::{Address, ClassId};
use tessera_crypto::{hash, sign, verify, Hash, KeyPair, PublicKey, Signature};

use crate::error::EngineError;

/// A signed grant authorizing one mint of one class to one recipient.
///
/// Produced off-line by the trusted signer; consumed exactly once by the
/// engine. The signed message binds the recipient, class, price,
/// deadline, deployment domain, and the recipient's current nonce, so a
/// grant can be neither replayed nor redirected.
#[derive(Debug, Clone)]
pub struct MintAuthorization {
    pub recipient: Address,
    pub class_id: ClassId,
    pub price: u128,
    pub deadline: DateTime<Utc>,
    pub domain: [u8; 32],
    pub nonce: u64,
    pub signature: Signature,
}

impl MintAuthorization {
    /// Canonical signing digest: BLAKE3 over the fixed-width big-endian
    /// encoding of `(recipient, class_id, price, deadline, domain, nonce)`.
    pub fn signing_digest(
        recipient: Address,
        class_id: ClassId,
        price: u128,
        deadline: DateTime<Utc>,
        domain: [u8; 32],
        nonce: u64,
    ) -> Hash {
        let mut buf = Vec::with_capacity(32 + 8 + 16 + 8 + 32 + 8);
        buf.extend_from_slice(recipient.as_bytes());
        buf.extend_from_slice(&class_id.0.to_be_bytes());
        buf.extend_from_slice(&price.to_be_bytes());
        buf.extend_from_slice(&deadline.timestamp().to_be_bytes());
        buf.extend_from_slice(&domain);
        buf.extend_from_slice(&nonce.to_be_bytes());
        hash(&buf)
    }

    /// Signer-side half of the protocol: produce a signed grant.
    pub fn issue(
        signer: &KeyPair,
        recipient: Address,
        class_id: ClassId,
        price: u128,
        deadline: DateTime<Utc>,
        domain: [u8; 32],
        nonce: u64,
    ) -> Self {
        let digest = Self::signing_digest(recipient, class_id, price, deadline, domain, nonce);
        let signature = sign(&digest, signer);
        tracing::debug!(
            recipient = %recipient,
            class_id = %class_id,
            nonce,
            "mint authorization issued"
        );
        Self {
            recipient,
            class_id,
            price,
            deadline,
            domain,
            nonce,
            signature,
        }
    }

    /// Verify the signature over a digest reconstructed from the
    /// verifier's own authoritative view of the parameters.
    ///
    /// Reconstructing (rather than trusting the grant's fields) is what
    /// makes cross-identity and cross-nonce replay fail: a grant signed
    /// for a different recipient or an already-consumed nonce never
    /// matches the reconstructed message.
    pub fn verify_against(
        &self,
        signer: &PublicKey,
        recipient: Address,
        class_id: ClassId,
        price: u128,
        domain: [u8; 32],
        nonce: u64,
    ) -> Result<(), EngineError> {
        let digest =
            Self::signing_digest(recipient, class_id, price, self.deadline, domain, nonce);
        verify(&digest, &self.signature, signer).map_err(|_| EngineError::InvalidSignature)
    }
}

/// Per-holder monotonic nonce counters.
///
/// A counter starts at 0 and is incremented exactly once per successfully
/// consumed grant; failed verifications leave it unchanged.
#[derive(Debug, Default)]
pub struct NonceRegistry {
    nonces: HashMap<Address, u64>,
}

impl NonceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The holder's current (next-expected) nonce.
    pub fn nonce_of(&self, holder: Address) -> u64 {
        self.nonces.get(&holder).copied().unwrap_or(0)
    }

    /// Consume the holder's current nonce, returning the consumed value.
    pub fn consume(&mut self, holder: Address) -> u64 {
        let counter = self.nonces.entry(holder).or_insert(0);
        let consumed = *counter;
        *counter += 1;
        tracing::debug!(holder = %holder, nonce = consumed, "nonce consumed");
        consumed
    }
}
