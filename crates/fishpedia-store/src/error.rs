use fishpedia_shared::ValidationError;
use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Input rejected before any state change.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An authored file exceeds the per-file limit.
    #[error("Media too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
