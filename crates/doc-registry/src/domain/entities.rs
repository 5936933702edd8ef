//! # Domain Entities
//!
//! Document submissions, stored records and service statistics.

use super::value_objects::{Address, DocumentLink, Hash};
use serde::{Deserialize, Serialize};

// =============================================================================
// DOCUMENT SUBMISSION
// =============================================================================

/// The caller-supplied body of a registration request.
///
/// The content hash travels separately and becomes the record key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSubmission {
    /// Human-readable document name. Must be non-empty.
    pub name: String,
    /// Free-form description. Must be non-empty.
    pub description: String,
    /// Co-owners of the document, in caller order.
    pub signatories: Vec<Address>,
    /// Optional provenance link to an earlier document.
    pub main_document: DocumentLink,
}

impl DocumentSubmission {
    /// Builds the stored record for this submission under `hash`.
    #[must_use]
    pub fn into_record(self, hash: Hash) -> DocumentRecord {
        DocumentRecord {
            hash,
            name: self.name,
            description: self.description,
            signatories: self.signatories,
            main_document: self.main_document,
        }
    }
}

// =============================================================================
// DOCUMENT RECORD
// =============================================================================

/// A registered document.
///
/// A lookup miss yields `DocumentRecord::default()`: every field empty and
/// `hash == Hash::ZERO`. Stored records never carry the zero hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Content hash; the store key.
    pub hash: Hash,
    /// Human-readable document name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Co-owners, unique, in registration order.
    pub signatories: Vec<Address>,
    /// Provenance link, or the empty link.
    pub main_document: DocumentLink,
}

impl DocumentRecord {
    /// The all-empty record returned for unknown hashes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if this is the all-empty "not found" record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if `account` is one of this document's signatories.
    #[must_use]
    pub fn has_signatory(&self, account: &Address) -> bool {
        self.signatories.contains(account)
    }

    /// The submission body this record was registered from.
    #[must_use]
    pub fn submission(&self) -> DocumentSubmission {
        DocumentSubmission {
            name: self.name.clone(),
            description: self.description.clone(),
            signatories: self.signatories.clone(),
            main_document: self.main_document.clone(),
        }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters maintained by the registry facade.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Documents committed to the store.
    pub documents_registered: u64,
    /// Calls denied by the access-control layer.
    pub rejected_requests: u64,
    /// Registrations rejected by validation or conflict checks.
    pub rejected_submissions: u64,
    /// Successful ownership proofs.
    pub proofs_succeeded: u64,
    /// Failed ownership proofs (invalid signatory or no match).
    pub proofs_failed: u64,
    /// Successful grant/revoke calls.
    pub role_changes: u64,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_submission() -> DocumentSubmission {
        DocumentSubmission {
            name: "Test document".to_string(),
            description: "Test document description".to_string(),
            signatories: vec![Address::new([1u8; 20]), Address::new([2u8; 20])],
            main_document: DocumentLink::none(),
        }
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let hash = Hash::new([9u8; 32]);
        let record = sample_submission().into_record(hash);
        assert_eq!(record.hash, hash);
        assert_eq!(record.name, "Test document");
        assert_eq!(record.signatories.len(), 2);
        assert_eq!(record.submission(), sample_submission());
    }

    #[test]
    fn test_empty_record() {
        let record = DocumentRecord::empty();
        assert!(record.is_empty());
        assert!(record.hash.is_zero());
        assert!(record.signatories.is_empty());
        assert!(!record.main_document.is_linked());
        assert!(record.main_document.transaction_id.is_empty());
    }

    #[test]
    fn test_has_signatory() {
        let record = sample_submission().into_record(Hash::new([9u8; 32]));
        assert!(record.has_signatory(&Address::new([1u8; 20])));
        assert!(!record.has_signatory(&Address::new([3u8; 20])));
        assert!(!record.is_empty());
    }
}
