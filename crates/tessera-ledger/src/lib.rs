//! Tessera Ledger — Multi-asset balance bookkeeping.
//!
//! The ledger is a policy-free mechanism: per-(holder, class) balances,
//! per-class supply counters, operator approvals, and atomic single/batch
//! move primitives. The soulbound transfer restriction is enforced by the
//! engine, which is the ledger's sole mutator.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::AssetLedger;
