//! Tessera Engine — Soulbound credential issuance and authorization.
//!
//! The engine ties together the class registry, the access-control layer,
//! the signed-claim protocol, and the balance ledger. Credentials never
//! move between identities except through the two sanctioned paths: mint
//! and recovery.

pub mod access;
pub mod authorization;
pub mod engine;
pub mod error;
pub mod events;
pub mod registry;
pub mod treasury;

pub use access::AccessControl;
pub use authorization::{MintAuthorization, NonceRegistry};
pub use engine::SoulboundEngine;
pub use error::EngineError;
pub use events::{ClassCreated, IssuanceReceipt, RecoveryReceipt};
pub use registry::{ClassRegistry, CredentialClass};
pub use treasury::{TreasuryVault, ValueSink};
