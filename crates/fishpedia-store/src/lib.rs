//! # fishpedia-store
//!
//! In-memory catalog for FishPedia.
//!
//! The [`Catalog`] owns the ordered fish collection, the favorites set and
//! the registry of locally authored media payloads.  Nothing is written to
//! disk: a restart brings back the seed entries and nothing else.

pub mod catalog;
pub mod favorites;
pub mod fish;
pub mod media;
pub mod seed;

mod error;

pub use catalog::Catalog;
pub use error::{Result, StoreError};
pub use media::MediaRegistry;
