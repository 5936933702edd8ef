//! # Driven Ports (SPI - Outbound)
//!
//! Storage the registry requires from its host.
//!
//! Testing and the operator harness: `InMemoryDocumentStore`
//! (`adapters/memory_store.rs`).

use crate::domain::{DocumentRecord, Hash, StoreError};

/// Append-only, hash-keyed document storage.
///
/// There is no update or delete: a registered document is a
/// permanent provenance entry.
pub trait DocumentStore: Send + Sync {
    /// Returns true if a record is stored under `hash`.
    fn exists(&self, hash: &Hash) -> bool;

    /// Returns the record stored under `hash`, or `DocumentRecord::empty()`.
    ///
    /// Never fails: a miss is a soft, empty result.
    fn get(&self, hash: &Hash) -> DocumentRecord;

    /// Stores `record` under `record.hash`.
    ///
    /// Fails with `StoreError::AlreadyExists` if the key is taken; the
    /// existing record is left unchanged.
    fn insert(&mut self, record: DocumentRecord) -> Result<(), StoreError>;

    /// Number of stored records.
    fn len(&self) -> usize;

    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every record, in insertion order.
    fn records(&self) -> Vec<DocumentRecord>;
}
