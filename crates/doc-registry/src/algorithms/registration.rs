//! # Registration Engine
//!
//! Validates a submission and commits it to the store.
//!
//! ## Check Order (first failure wins)
//!
//! | Step | Check | Error |
//! |------|-------|-------|
//! | 1 | Caller holds `Admin` | `Unauthorized` |
//! | 2a | Hash non-zero, name and description non-empty | `InvalidSubmission` |
//! | 2b | At least one signatory | `NoSignatories` |
//! | 2c | No repeated signatory | `RepeatSignatories` |
//! | 2c' | Signatory count within `max_signatories` | `TooManySignatories` |
//! | 2d | Every signatory is a valid identity | `InvalidSignatory` |
//! | 2e | Linked main document exists | `MainDocumentNotFound` |
//! | 3 | Hash not already stored | `DuplicateDocument` |
//!
//! Nothing is written until every check has passed. Existence of the target
//! hash is checked again at commit, immediately before the insert.

use crate::config::RegistryConfig;
use crate::domain::{
    all_valid, has_unique_signatories, AccessControlRegistry, Address, DocumentRecord,
    DocumentSubmission, Hash, RegistrationError, Role,
};
use crate::ports::outbound::DocumentStore;

/// Steps 2a–2e: validates `document` against the current store contents.
pub fn validate_submission<S: DocumentStore + ?Sized>(
    hash: &Hash,
    document: &DocumentSubmission,
    store: &S,
    config: &RegistryConfig,
) -> Result<(), RegistrationError> {
    if hash.is_zero() || document.name.is_empty() || document.description.is_empty() {
        return Err(RegistrationError::InvalidSubmission);
    }

    let signatories = &document.signatories;
    if signatories.is_empty() {
        return Err(RegistrationError::NoSignatories);
    }
    if !has_unique_signatories(signatories) {
        return Err(RegistrationError::RepeatSignatories);
    }
    if let Some(max) = config.max_signatories {
        if signatories.len() > max {
            return Err(RegistrationError::TooManySignatories {
                count: signatories.len(),
                max,
            });
        }
    }
    if !all_valid(signatories) {
        return Err(RegistrationError::InvalidSignatory);
    }

    let main = &document.main_document;
    if main.is_linked() && !store.exists(&main.document_hash) {
        return Err(RegistrationError::MainDocumentNotFound);
    }

    Ok(())
}

/// Authorizes, validates and commits a registration.
///
/// Returns the stored record on success. On any error the store is unchanged.
pub fn register_document<S: DocumentStore + ?Sized>(
    store: &mut S,
    access: &AccessControlRegistry,
    config: &RegistryConfig,
    hash: Hash,
    document: DocumentSubmission,
    caller: &Address,
) -> Result<DocumentRecord, RegistrationError> {
    access.require_role(Role::Admin, caller)?;
    validate_submission(&hash, &document, store, config)?;

    // Re-check at commit time rather than trusting any earlier observation.
    if store.exists(&hash) {
        return Err(RegistrationError::DuplicateDocument);
    }
    let record = document.into_record(hash);
    store.insert(record.clone())?;
    Ok(record)
}

// =============================================================================
// TESTS
// =============================================================================
