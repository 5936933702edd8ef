//! # In-Memory Document Store
//!
//! `DocumentStore` backed by a `Vec` in insertion order plus a hash index.
//! Used by tests and by the operator harness, which persists the records
//! between invocations.

use crate::domain::{DocumentRecord, Hash, StoreError};
use crate::ports::outbound::DocumentStore;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// In-memory, append-only document store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentStore {
    /// Records in insertion order.
    records: Vec<DocumentRecord>,
    /// Hash → position in `records`.
    index: HashMap<Hash, usize>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from records in insertion order.
    ///
    /// Fails on the first repeated hash.
    pub fn from_records(records: Vec<DocumentRecord>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn exists(&self, hash: &Hash) -> bool {
        self.index.contains_key(hash)
    }

    fn get(&self, hash: &Hash) -> DocumentRecord {
        self.index
            .get(hash)
            .and_then(|&position| self.records.get(position))
            .cloned()
            .unwrap_or_default()
    }

    fn insert(&mut self, record: DocumentRecord) -> Result<(), StoreError> {
        match self.index.entry(record.hash) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(record.hash)),
            Entry::Vacant(slot) => {
                slot.insert(self.records.len());
                self.records.push(record);
                Ok(())
            }
        }
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn records(&self) -> Vec<DocumentRecord> {
        self.records.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
