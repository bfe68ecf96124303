//! Resource-handle allocation for playable audio data
//!
//! Handles are a finite, externally limited namespace (object URLs in the
//! original environment): one owner per handle, revoked exactly once, revoked
//! before the track is dropped.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::upload::AudioPayload;

/// Ownership-bound reference to playable binary audio data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceHandle(String);

impl ResourceHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mints and revokes resource handles. Injected into the deck so tests can
/// observe allocation and revocation counts.
pub trait ResourceAllocator {
    fn allocate(&mut self, payload: &AudioPayload) -> ResourceHandle;
    fn revoke(&mut self, handle: &ResourceHandle);
}

/// Default allocator producing blob-style URLs from a sequence number and a
/// content hash.
#[derive(Debug, Default)]
pub struct UrlAllocator {
    seq: u64,
    live: HashSet<ResourceHandle>,
}

impl UrlAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles minted and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl ResourceAllocator for UrlAllocator {
    fn allocate(&mut self, payload: &AudioPayload) -> ResourceHandle {
        self.seq += 1;
        let digest = blake3::hash(&payload.bytes);
        let handle = ResourceHandle(format!(
            "blob:pitchdeck/{:08x}-{}",
            self.seq,
            &digest.to_hex()[..16]
        ));
        self.live.insert(handle.clone());
        handle
    }

    fn revoke(&mut self, handle: &ResourceHandle) {
        if !self.live.remove(handle) {
            // double revoke or a placeholder from a previous session
            log::debug!("revoke of handle not minted here: {}", handle.as_str());
        }
    }
}
