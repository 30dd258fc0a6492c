//! # fishpedia-shared
//!
//! Types shared by every FishPedia crate: catalog models, identifier
//! generation, session rules and the validation error taxonomy.

pub mod constants;
pub mod error;
pub mod models;
pub mod session;
pub mod types;

pub use error::ValidationError;
pub use models::{Comment, Fish, FishDraft, Media, MediaLocator, NewMedia, User};
pub use types::{CommentId, FishId, IdClock, LocalHandle, MediaId, MediaKind};
