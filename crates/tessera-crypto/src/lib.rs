//! Tessera Crypto — Ed25519 keys and signatures, BLAKE3 hashing, and
//! address derivation.

pub mod error;
pub mod hashing;
pub mod keys;
pub mod signing;

pub use error::CryptoError;
pub use hashing::{hash, Hash};
pub use keys::{KeyPair, PublicKey};
pub use signing::{sign, verify, Signature};
