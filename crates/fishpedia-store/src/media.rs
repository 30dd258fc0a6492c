//! Registry of locally authored media payloads.
//!
//! An authored photo or video lives here from the moment it is attached
//! until it is explicitly released.  Fish records only hold a
//! [`LocalHandle`]; the bytes stay in the registry.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::debug;

use fishpedia_shared::constants::MAX_MEDIA_SIZE;
use fishpedia_shared::{LocalHandle, Media, MediaId, MediaKind, MediaLocator, NewMedia};

use crate::error::{Result, StoreError};

/// Payload behind a [`LocalHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPayload {
    pub file_name: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct MediaRegistry {
    payloads: HashMap<LocalHandle, LocalPayload>,
    max_size: usize,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self::with_max_size(MAX_MEDIA_SIZE)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            payloads: HashMap::new(),
            max_size,
        }
    }

    pub fn check_size(&self, media: &NewMedia) -> Result<()> {
        if media.bytes.len() > self.max_size {
            return Err(StoreError::PayloadTooLarge {
                size: media.bytes.len(),
                max: self.max_size,
            });
        }
        Ok(())
    }

    /// Take ownership of an authored file and hand back its handle.
    pub fn register(&mut self, media: NewMedia) -> Result<LocalHandle> {
        self.check_size(&media)?;

        let handle = LocalHandle::new();
        let kind = media.kind();
        debug!(
            handle = %handle.0,
            file_name = %media.file_name,
            size = media.bytes.len(),
            "Registered local media"
        );
        self.payloads.insert(
            handle,
            LocalPayload {
                file_name: media.file_name,
                content_type: media.content_type,
                kind,
                bytes: media.bytes,
            },
        );
        Ok(handle)
    }

    /// Register a file and build the [`Media`] entry that points at it.
    pub fn attach(&mut self, id: MediaId, media: NewMedia) -> Result<Media> {
        let kind = media.kind();
        let handle = self.register(media)?;
        Ok(Media {
            id,
            kind,
            locator: MediaLocator::Local(handle),
        })
    }

    pub fn payload(&self, handle: &LocalHandle) -> Option<&LocalPayload> {
        self.payloads.get(handle)
    }

    /// Drop a payload. Returns `false` if the handle was unknown.
    pub fn release(&mut self, handle: &LocalHandle) -> bool {
        let released = self.payloads.remove(handle).is_some();
        if released {
            debug!(handle = %handle.0, "Released local media");
        }
        released
    }

    /// Release every handle yielded by `handles`; returns how many existed.
    pub fn release_all(&mut self, handles: impl IntoIterator<Item = LocalHandle>) -> usize {
        handles
            .into_iter()
            .filter(|handle| self.release(handle))
            .count()
    }

    pub fn contains(&self, handle: &LocalHandle) -> bool {
        self.payloads.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl Default for MediaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
