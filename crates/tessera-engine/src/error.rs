use tessera_core::{Address, ClassId};

/// Engine errors.
///
/// Every rejected precondition aborts the whole operation with no partial
/// state change; none of these are retryable by the engine itself.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("caller {0} is not the owner")]
    NotOwner(Address),

    #[error("caller {0} is not a minter")]
    NotMinter(Address),

    #[error("invalid mint authorization signature")]
    InvalidSignature,

    #[error("mint authorization expired at {0}")]
    AuthorizationExpired(chrono::DateTime<chrono::Utc>),

    #[error("engine is paused")]
    Paused,

    #[error("engine is not paused")]
    NotPaused,

    #[error("credential class {0} is not created")]
    ClassNotFound(ClassId),

    #[error("minting of class {0} has not started")]
    MintNotStarted(ClassId),

    #[error("minting of class {0} has ended")]
    MintEnded(ClassId),

    #[error("attached value {attached} below required price {required}")]
    InsufficientValue { attached: u128, required: u128 },

    #[error("credentials are non-transferable")]
    NonTransferable,

    #[error("{0} is already a minter")]
    MinterAlreadyPresent(Address),

    #[error("{0} is not a minter")]
    MinterNotPresent(Address),

    #[error("holder {holder} already claimed class {class_id}")]
    AlreadyClaimed { holder: Address, class_id: ClassId },

    #[error("nothing to recover for {0}")]
    NothingToRecover(Address),

    #[error("recovery of {old_holder} to {new_holder} is not approved")]
    RecoveryNotApproved {
        old_holder: Address,
        new_holder: Address,
    },

    #[error("caller {caller} may not act for holder {holder}")]
    NotApprovedOperator { caller: Address, holder: Address },

    #[error("ledger error: {0}")]
    Ledger(#[from] tessera_ledger::LedgerError),

    #[error("crypto error: {0}")]
    Crypto(#[from] tessera_crypto::CryptoError),
}
