use fishpedia_shared::{FishId, ValidationError};
use fishpedia_store::StoreError;
use thiserror::Error;

/// Why a command was refused.  State is unchanged in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Login required")]
    LoginRequired,

    #[error("Fish not found: {0}")]
    NotFound(FishId),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Store(StoreError),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<StoreError> for CommandError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(v) => Self::Validation(v),
            other => Self::Store(other),
        }
    }
}
