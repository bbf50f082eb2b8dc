use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tessera_core::{Address, ClassId};

/// Record of a registered credential class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCreated {
    /// Record identifier.
    pub id: Uuid,
    /// The assigned class id.
    pub class_id: ClassId,
    /// Identity that registered the class.
    pub creator: Address,
}

impl ClassCreated {
    pub(crate) fn new(class_id: ClassId, creator: Address) -> Self {
        Self {
            id: Uuid::now_v7(),
            class_id,
            creator,
        }
    }
}

/// Record of a successful issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuanceReceipt {
    /// Record identifier.
    pub id: Uuid,
    /// Credential recipient.
    pub holder: Address,
    /// Issued class.
    pub class_id: ClassId,
    /// Value attached to the mint call, forwarded to the treasury.
    pub value: u128,
}

impl IssuanceReceipt {
    pub(crate) fn new(holder: Address, class_id: ClassId, value: u128) -> Self {
        Self {
            id: Uuid::now_v7(),
            holder,
            class_id,
            value,
        }
    }
}

/// Record of a recovery: every non-zero balance of the old holder moved
/// to the new holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryReceipt {
    /// Record identifier.
    pub id: Uuid,
    /// Holder the credentials were moved away from.
    pub old_holder: Address,
    /// Holder the credentials were moved to.
    pub new_holder: Address,
    /// Exactly the (class, quantity) pairs that were moved.
    pub moved: Vec<(ClassId, u64)>,
}

impl RecoveryReceipt {
    pub(crate) fn new(
        old_holder: Address,
        new_holder: Address,
        moved: Vec<(ClassId, u64)>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            old_holder,
            new_holder,
            moved,
        }
    }
}
