//! Append-only storage for committed movement records.

use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use pantry_core::MovementId;
use pantry_movements::MovementRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordStoreError {
    #[error("record already exists: {0}")]
    Duplicate(MovementId),

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Audit-record persistence. Append-only: records are never updated or
/// deleted through this interface.
#[async_trait]
pub trait MovementRecordStore: Send + Sync {
    async fn append(&self, record: MovementRecord) -> Result<(), RecordStoreError>;

    async fn get(&self, id: &MovementId) -> Result<Option<MovementRecord>, RecordStoreError>;

    /// All records, in commit order.
    async fn list(&self) -> Result<Vec<MovementRecord>, RecordStoreError>;
}

/// In-memory record store (dev/test backend).
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<MovementRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovementRecordStore for InMemoryRecordStore {
    async fn append(&self, record: MovementRecord) -> Result<(), RecordStoreError> {
        let mut records = self.records.write().expect("record store lock poisoned");
        if records.iter().any(|r| r.id == record.id) {
            return Err(RecordStoreError::Duplicate(record.id));
        }
        records.push(record);
        Ok(())
    }

    async fn get(&self, id: &MovementId) -> Result<Option<MovementRecord>, RecordStoreError> {
        let records = self.records.read().expect("record store lock poisoned");
        Ok(records.iter().find(|r| r.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<MovementRecord>, RecordStoreError> {
        let records = self.records.read().expect("record store lock poisoned");
        Ok(records.clone())
    }
}
