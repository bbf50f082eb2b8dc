use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tessera_core::{Address, ClassId};

use crate::error::EngineError;

/// Metadata for a registered credential class.
///
/// Immutable once created; there is no update-in-place operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialClass {
    /// Display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Identity that registered the class.
    pub creator: Address,
    /// When the class was registered.
    pub registered_at: DateTime<Utc>,
    /// Start of the mint window.
    pub start: DateTime<Utc>,
    /// End of the mint window; `None` = unbounded.
    pub end: Option<DateTime<Utc>>,
    /// Required price on the signed-claim path; 0 = free.
    pub price: u128,
}

/// Registry of credential classes, ids assigned by a single counter.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: Vec<CredentialClass>,
}

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class and return its id. Ids are dense, sequential,
    /// and never reused.
    pub fn create(&mut self, class: CredentialClass) -> ClassId {
        let id = ClassId(self.classes.len() as u64);
        tracing::info!(
            class_id = %id,
            name = %class.name,
            creator = %class.creator,
            "credential class registered"
        );
        self.classes.push(class);
        id
    }

    /// True iff `id` has been assigned.
    pub fn is_created(&self, id: ClassId) -> bool {
        (id.0 as usize) < self.classes.len()
    }

    /// Look up a class by id.
    pub fn get(&self, id: ClassId) -> Result<&CredentialClass, EngineError> {
        self.classes
            .get(id.0 as usize)
            .ok_or(EngineError::ClassNotFound(id))
    }

    /// The next id the registry will assign.
    pub fn next_id(&self) -> u64 {
        self.classes.len() as u64
    }

    /// Iterate over all assigned ids, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len() as u64).map(ClassId)
    }
}
