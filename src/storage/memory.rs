use crate::storage::{MetadataStore, PersistedTrack, error::StorageError};

/// In-memory metadata store. Nothing survives the process; useful for tests
/// and for hosts that opt out of persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<PersistedTrack>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for MemoryStore {
    fn save(&mut self, records: &[PersistedTrack]) -> Result<(), StorageError> {
        self.records = records.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<PersistedTrack>, StorageError> {
        Ok(self.records.clone())
    }

    fn erase(&mut self) -> Result<(), StorageError> {
        self.records.clear();
        Ok(())
    }
}
