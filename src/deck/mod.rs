//! The bounded track collection
//!
//! Owns up to [`MAX_TRACKS`] tracks, mints and revokes their resource handles
//! through an injected allocator, and keeps the lightweight metadata subset
//! persisted through an injected store. Constructed once per session; there
//! are no ambient singletons.

use crate::{
    deck::alloc::ResourceAllocator,
    domain::{
        note::Note,
        track::{Track, TrackId, TrackSource},
    },
    storage::{MetadataStore, PersistedTrack, error::StorageError},
    upload::AudioPayload,
};

pub mod alloc;

/// Hard ceiling on the collection size. Uploads beyond it are dropped
/// silently, never reported as an error.
pub const MAX_TRACKS: usize = 8;

/// Main structure implementing the collection logic.
pub struct Deck<S, A> {
    tracks: Vec<Track>,
    store: S,
    alloc: A,
    next_seq: u64,
}

impl<S: MetadataStore, A: ResourceAllocator> Deck<S, A> {
    /// Fresh empty deck.
    pub fn new(store: S, alloc: A) -> Self {
        Self {
            tracks: Vec::new(),
            store,
            alloc,
            next_seq: 0,
        }
    }

    /// Rebuilds a deck from persisted metadata.
    ///
    /// Restored tracks carry placeholder handles and cannot play until their
    /// files are uploaded again; see [`TrackSource::Restored`]. Malformed
    /// stored metadata propagates as [`StorageError::Corrupt`].
    pub fn restore(store: S, alloc: A) -> Result<Self, StorageError> {
        let records = store.load()?;
        let tracks = records
            .into_iter()
            .take(MAX_TRACKS)
            .map(|record| Track {
                id: record.id,
                display_name: record.name,
                base_key: record.key,
                source: TrackSource::Restored { handle: record.url },
            })
            .collect();
        Ok(Self {
            tracks,
            store,
            alloc,
            next_seq: 0,
        })
    }

    /// Adds one track per payload, in input order, while capacity remains.
    /// Payloads beyond the cap are dropped without error. Returns the ids of
    /// the tracks actually added.
    pub fn add_tracks(
        &mut self,
        payloads: impl IntoIterator<Item = AudioPayload>,
    ) -> Result<Vec<TrackId>, StorageError> {
        let mut accepted = Vec::new();
        for payload in payloads {
            if self.tracks.len() >= MAX_TRACKS {
                log::debug!("deck full, dropping upload '{}'", payload.name);
                continue;
            }
            let id = self.mint_id(&payload.name);
            let handle = self.alloc.allocate(&payload);
            self.tracks.push(Track {
                id: id.clone(),
                display_name: payload.name.clone(),
                base_key: Note::C,
                source: TrackSource::Playable { handle, payload },
            });
            accepted.push(id);
        }
        if !accepted.is_empty() {
            self.persist()?;
        }
        Ok(accepted)
    }

    /// Revokes the track's handle and removes it. Unknown ids are a silent
    /// no-op.
    pub fn delete_track(&mut self, id: &TrackId) -> Result<(), StorageError> {
        let Some(pos) = self.tracks.iter().position(|t| &t.id == id) else {
            log::debug!("delete of unknown track {id}, ignoring");
            return Ok(());
        };
        self.alloc.revoke(self.tracks[pos].handle());
        self.tracks.remove(pos);
        self.persist()
    }

    /// Updates only the stored base key; unknown ids are a silent no-op.
    /// Resetting any applied pitch shift is the track controller's job.
    pub fn update_base_key(&mut self, id: &TrackId, key: Note) -> Result<(), StorageError> {
        match self.tracks.iter_mut().find(|t| &t.id == id) {
            Some(track) => {
                track.base_key = key;
                self.persist()
            }
            None => {
                log::debug!("key update for unknown track {id}, ignoring");
                Ok(())
            }
        }
    }

    /// Revokes every handle, empties the collection and erases the persisted
    /// metadata.
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        for track in &self.tracks {
            self.alloc.revoke(track.handle());
        }
        self.tracks.clear();
        self.store.erase()
    }

    /// Writes the current metadata subset to the store. Mutating operations
    /// call this themselves; it stays public for explicit saves.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let records: Vec<PersistedTrack> = self
            .tracks
            .iter()
            .map(|track| PersistedTrack {
                id: track.id.clone(),
                name: track.display_name.clone(),
                key: track.base_key,
                url: track.handle().clone(),
            })
            .collect();
        self.store.save(&records)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    // Ids must stay unique for the whole collection lifetime, including
    // against restored tracks minted in an earlier session.
    fn mint_id(&mut self, name: &str) -> TrackId {
        loop {
            self.next_seq += 1;
            let id = TrackId::mint(self.next_seq, name);
            if !self.tracks.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }
}
