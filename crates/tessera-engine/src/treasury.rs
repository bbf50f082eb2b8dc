use std::collections::HashMap;

use tessera_core::Address;

/// Sink for value forwarded out of the engine.
///
/// The engine calls `forward` only after every state mutation of the
/// surrounding operation has been applied, so a misbehaving sink can
/// never observe (or interleave with) a half-applied operation.
pub trait ValueSink {
    /// Forward `amount` from `from` to the treasury identity `to`.
    fn forward(&mut self, from: Address, to: Address, amount: u128);

    /// Cumulative value received by `to`.
    fn received_by(&self, to: Address) -> u128;
}

/// In-memory value sink recording cumulative receipts per treasury.
#[derive(Debug, Default)]
pub struct TreasuryVault {
    received: HashMap<Address, u128>,
}

impl TreasuryVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValueSink for TreasuryVault {
    fn forward(&mut self, from: Address, to: Address, amount: u128) {
        if amount == 0 {
            return;
        }
        *self.received.entry(to).or_insert(0) += amount;
        tracing::debug!(from = %from, to = %to, amount, "value forwarded to treasury");
    }

    fn received_by(&self, to: Address) -> u128 {
        self.received.get(&to).copied().unwrap_or(0)
    }
}
