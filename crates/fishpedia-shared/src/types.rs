use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::LOCAL_LOCATOR_PREFIX;

/// Catalog entry identifier. Assigned once at creation, never changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FishId(pub String);

impl FishId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FishId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FishId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a photo or video, unique within its owning fish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MediaId(pub String);

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a comment, unique within its owning fish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Photo or video. Decided once when the file is attached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// `Video` when the declared content type starts with "video",
    /// `Image` for everything else.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("video") {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// Handle to a media payload held in the process-local registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LocalHandle(pub Uuid);

impl LocalHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Displayable locator, in the spirit of a browser object URL.
    pub fn to_locator(&self) -> String {
        format!("{LOCAL_LOCATOR_PREFIX}{}", self.0)
    }
}

impl Default for LocalHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Issues time-derived identifiers.
///
/// Stamps are wall-clock milliseconds, bumped past the previous stamp when
/// two ids are requested within the same millisecond, so every id handed
/// out by one clock is distinct.
#[derive(Debug, Default, Clone)]
pub struct IdClock {
    last: i64,
}

impl IdClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_stamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let stamp = now.max(self.last + 1);
        self.last = stamp;
        stamp
    }

    pub fn fish_id(stamp: i64) -> FishId {
        FishId(stamp.to_string())
    }

    /// `m-<stamp>-<index>`, used by the add flow.
    pub fn media_id(stamp: i64, index: usize) -> MediaId {
        MediaId(format!("m-{stamp}-{index}"))
    }

    /// `new-<stamp>-<file name>`, used for media attached while editing.
    pub fn edit_media_id(stamp: i64, file_name: &str) -> MediaId {
        MediaId(format!("new-{stamp}-{file_name}"))
    }

    pub fn comment_id(stamp: i64) -> CommentId {
        CommentId(format!("c-{stamp}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_content_type() {
        assert_eq!(MediaKind::from_content_type("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_content_type("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_content_type(""), MediaKind::Image);
        assert_eq!(
            MediaKind::from_content_type("application/octet-stream"),
            MediaKind::Image
        );
    }

    #[test]
    fn test_id_clock_is_strictly_increasing() {
        let mut clock = IdClock::new();
        let stamps: Vec<i64> = (0..100).map(|_| clock.next_stamp()).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_id_formats() {
        assert_eq!(IdClock::fish_id(17).as_str(), "17");
        assert_eq!(IdClock::media_id(17, 2).0, "m-17-2");
        assert_eq!(IdClock::edit_media_id(17, "a.png").0, "new-17-a.png");
        assert_eq!(IdClock::comment_id(17).0, "c-17");
    }

    #[test]
    fn test_local_handle_locator() {
        let handle = LocalHandle::new();
        let locator = handle.to_locator();
        assert!(locator.starts_with(LOCAL_LOCATOR_PREFIX));
        assert!(locator.ends_with(&handle.0.to_string()));
    }
}
