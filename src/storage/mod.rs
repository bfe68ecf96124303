//! Persisted track metadata
//!
//! Only the lightweight subset survives a session: id, display name, base key
//! and the resource URL. Payload bytes are never persisted, so a restored
//! record's URL is a placeholder until the file is uploaded again.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::{
    config,
    deck::alloc::ResourceHandle,
    domain::{note::Note, track::TrackId},
    storage::error::StorageError,
};

pub mod error;
pub mod json;
pub mod memory;

/// One persisted track record, in collection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedTrack {
    pub id: TrackId,
    pub name: String,
    pub key: Note,
    pub url: ResourceHandle,
}

/// Storage collaborator injected into the deck.
pub trait MetadataStore {
    fn save(&mut self, records: &[PersistedTrack]) -> Result<(), StorageError>;

    /// An absent record on first run is an empty list, not an error.
    /// Malformed content surfaces as [`StorageError::Corrupt`].
    fn load(&self) -> Result<Vec<PersistedTrack>, StorageError>;

    fn erase(&mut self) -> Result<(), StorageError>;
}

impl<T: MetadataStore + ?Sized> MetadataStore for Box<T> {
    fn save(&mut self, records: &[PersistedTrack]) -> Result<(), StorageError> {
        (**self).save(records)
    }

    fn load(&self) -> Result<Vec<PersistedTrack>, StorageError> {
        (**self).load()
    }

    fn erase(&mut self) -> Result<(), StorageError> {
        (**self).erase()
    }
}

/// Opens the store selected by the config.
pub fn open(config: &config::Storage) -> Result<Box<dyn MetadataStore>, StorageError> {
    if config.in_memory {
        return Ok(Box::new(memory::MemoryStore::new()));
    }
    let path = config
        .path
        .as_ref()
        .ok_or_else(|| anyhow!("storage.path is required unless in_memory is set"))?;
    Ok(Box::new(json::JsonStore::new(path.clone())))
}
