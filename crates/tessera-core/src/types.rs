use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// A 32-byte identity in the Tessera protocol.
///
/// Addresses are opaque to the engine: they are either derived from an
/// Ed25519 public key (see `tessera-crypto`) or assigned by the hosting
/// ledger. Displayed as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Create an address from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse an address from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s)
            .map_err(|e| CoreError::InvalidAddress(format!("invalid hex: {}", e)))?;
        let arr: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            CoreError::InvalidAddress(format!("address must be 32 bytes, got {}", b.len()))
        })?;
        Ok(Self(arr))
    }

    /// Encode as a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw byte view.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Identifier for a registered credential class.
///
/// Ids are dense and monotonically assigned starting at 0, in creation
/// order; an id is never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ClassId(pub u64);

impl ClassId {
    /// The raw numeric id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Explicit call context passed to every engine operation.
///
/// The engine never inspects ambient state: the caller identity, any
/// attached value, and the current time all arrive through this struct,
/// which keeps the engine pure and testable.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    /// Identity performing the call.
    pub caller: Address,
    /// Value attached to the call, forwarded to the treasury.
    pub value: u128,
    /// Current time as observed by the hosting ledger.
    pub now: DateTime<Utc>,
}

impl CallContext {
    /// Context for `caller` with no attached value, timestamped now.
    pub fn new(caller: Address) -> Self {
        Self {
            caller,
            value: 0,
            now: Utc::now(),
        }
    }

    /// Attach value to the call.
    pub fn with_value(mut self, value: u128) -> Self {
        self.value = value;
        self
    }

    /// Pin the call to an explicit timestamp.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}
