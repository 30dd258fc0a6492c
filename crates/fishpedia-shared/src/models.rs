//! Catalog models.
//!
//! Every struct derives `Serialize` and `Deserialize` so a view layer can
//! receive it as JSON without an intermediate DTO.

use std::collections::HashSet;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{CommentId, FishId, LocalHandle, MediaId, MediaKind};

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// Where a photo or video can be displayed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MediaLocator {
    /// Stable remote URL (seed data).
    Remote(String),
    /// Authored payload still owned by the process-local media registry.
    Local(LocalHandle),
}

impl MediaLocator {
    pub fn url(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::Local(handle) => handle.to_locator(),
        }
    }

    pub fn local_handle(&self) -> Option<LocalHandle> {
        match self {
            Self::Local(handle) => Some(*handle),
            Self::Remote(_) => None,
        }
    }
}

/// One photo or video attached to a fish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: MediaId,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub locator: MediaLocator,
}

impl Media {
    pub fn remote(id: &str, kind: MediaKind, url: &str) -> Self {
        Self {
            id: MediaId::from(id),
            kind,
            locator: MediaLocator::Remote(url.to_string()),
        }
    }

    pub fn url(&self) -> String {
        self.locator.url()
    }
}

/// A raw file picked by the user, not yet attached to any fish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl NewMedia {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_content_type(&self.content_type)
    }
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    /// Display name of the author when the comment was posted.
    pub author_name: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Fish
// ---------------------------------------------------------------------------

/// A catalog entry describing one species.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Fish {
    pub id: FishId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub scientific_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    pub habitat: String,
    /// Display order.
    pub media: Vec<Media>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Fish {
    /// Fields an edit may not leave blank.
    pub fn check_required(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("scientificName", &self.scientific_name)
    }

    /// Media and comment ids must be unique within the fish.
    pub fn check_ids(&self) -> Result<(), ValidationError> {
        let mut media_ids = HashSet::new();
        for m in &self.media {
            if !media_ids.insert(&m.id) {
                return Err(ValidationError::DuplicateMediaId(m.id.to_string()));
            }
        }
        let mut comment_ids = HashSet::new();
        for c in &self.comments {
            if !comment_ids.insert(&c.id) {
                return Err(ValidationError::DuplicateCommentId(c.id.to_string()));
            }
        }
        Ok(())
    }

    pub fn local_handles(&self) -> impl Iterator<Item = LocalHandle> + '_ {
        self.media.iter().filter_map(|m| m.locator.local_handle())
    }

    /// Case-insensitive substring match on the display names.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self
                .name_en
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&term))
    }
}

/// Input of the add flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FishDraft {
    pub name: String,
    pub name_en: Option<String>,
    pub scientific_name: String,
    pub description: String,
    pub description_en: Option<String>,
    pub habitat: String,
    pub media: Vec<NewMedia>,
}

impl FishDraft {
    /// All text fields are required, and so is at least one file.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("scientificName", &self.scientific_name)?;
        require("description", &self.description)?;
        require("habitat", &self.habitat)?;
        if self.media.is_empty() {
            return Err(ValidationError::NoMedia);
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The logged-in user. Lives only as long as the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}
