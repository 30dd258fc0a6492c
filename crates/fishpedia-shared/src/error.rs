use thiserror::Error;

/// Input rejected before any state changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("At least one photo or video is required")]
    NoMedia,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Comment text is empty")]
    EmptyComment,

    #[error("Duplicate media id: {0}")]
    DuplicateMediaId(String),

    #[error("Duplicate comment id: {0}")]
    DuplicateCommentId(String),
}
