//! Tessera Core — Protocol types, call context, and engine configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::{EngineConfig, MintPolicy};
pub use error::CoreError;
pub use types::{Address, CallContext, ClassId};
