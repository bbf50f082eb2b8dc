use serde::{Deserialize, Serialize};

/// Which authorization path is active for minting.
///
/// Exactly one path is active per deployment; the two are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintPolicy {
    /// Minting requires the caller to be a member of the minter set.
    MinterRole,
    /// Minting requires a signed authorization from the trusted signer.
    SignedClaim,
}

/// Deployment parameters for a soulbound credential engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Domain separator binding signed authorizations to this deployment.
    pub domain: [u8; 32],
    /// Base URI prepended to the decimal class id for metadata display.
    pub base_uri: String,
    /// Active mint authorization path.
    pub mint_policy: MintPolicy,
}

impl EngineConfig {
    /// Derive a domain separator from a human-readable deployment label.
    pub fn domain_from_label(label: &str) -> [u8; 32] {
        *blake3::hash(label.as_bytes()).as_bytes()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            domain: Self::domain_from_label("tessera:main"),
            base_uri: String::new(),
            mint_policy: MintPolicy::MinterRole,
        }
    }
}
