use tessera_core::{Address, ClassId};

/// Balance ledger errors.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("insufficient balance of class {class_id} for {holder}: have {have}, need {need}")]
    InsufficientBalance {
        holder: Address,
        class_id: ClassId,
        have: u64,
        need: u64,
    },

    #[error("amount must be positive")]
    ZeroAmount,

    #[error("batch must not be empty")]
    EmptyBatch,

    #[error("balance overflow for {holder} on class {class_id}")]
    BalanceOverflow { holder: Address, class_id: ClassId },
}
