use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{deck::alloc::ResourceHandle, domain::note::Note, upload::AudioPayload};

/// Opaque track identifier, minted at upload time.
///
/// Built from a per-deck sequence number and the file name so that duplicate
/// uploads of the same payload still get distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn mint(seq: u64, name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&seq.to_le_bytes());
        hasher.update(name.as_bytes());
        Self(hasher.finalize().to_hex()[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One track in the deck.
#[derive(Debug)]
pub struct Track {
    pub id: TrackId,
    /// Original file name, immutable for the track lifetime.
    pub display_name: String,
    /// User-declared original key.
    pub base_key: Note,
    pub source: TrackSource,
}

/// Where a track's playable data comes from.
///
/// Tracks restored from persisted metadata carry a placeholder handle that
/// cannot actually play until the file is re-uploaded, so the two cases are
/// kept apart and callers must check before starting playback.
#[derive(Debug)]
pub enum TrackSource {
    Playable {
        handle: ResourceHandle,
        /// Raw bytes, retained only so the handle can be rebuilt. Not persisted.
        payload: AudioPayload,
    },
    Restored {
        handle: ResourceHandle,
    },
}

impl Track {
    pub fn handle(&self) -> &ResourceHandle {
        match &self.source {
            TrackSource::Playable { handle, .. } => handle,
            TrackSource::Restored { handle } => handle,
        }
    }

    pub fn is_playable(&self) -> bool {
        matches!(self.source, TrackSource::Playable { .. })
    }
}
