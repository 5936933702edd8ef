//! # Driving Ports (API - Inbound)
//!
//! The externally callable surface of the registry.
//!
//! | Operation | Auth required |
//! |-----------|---------------|
//! | `initialize` | none (once only) |
//! | `register_document` | `Admin` |
//! | `find_document_by_hash` | `Admin` |
//! | `prove_ownership` | `Admin` |
//! | `grant_role_to_address` | `Admin` |
//! | `revoke_role_to_address` | `Admin` |
//!
//! Every operation either completes and commits, or fails and leaves the
//! registry unchanged.

use crate::domain::{
    AccessError, Address, DocumentRecord, DocumentSubmission, Hash, ProofError,
    RegistrationError, RoleId,
};

/// Primary API for the document registry.
///
/// ## Usage
///
/// ```ignore
/// registry.initialize(owner)?;
/// registry.register_document(hash, submission, owner)?;
/// let record = registry.prove_ownership(hash, signatory, owner)?;
/// ```
pub trait DocumentRegistryApi {
    /// Seeds `caller` with the administrative roles. Fails after the first call.
    fn initialize(&mut self, caller: Address) -> Result<(), AccessError>;

    /// Validates `document` and stores it under `hash`.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// authorization, data present, signatories present, signatories
    /// unique, signatory limit, signatories valid, main document exists,
    /// hash not taken.
    fn register_document(
        &mut self,
        hash: Hash,
        document: DocumentSubmission,
        caller: Address,
    ) -> Result<(), RegistrationError>;

    /// Returns the record under `hash`, or the empty record if unknown.
    fn find_document_by_hash(
        &self,
        hash: Hash,
        caller: Address,
    ) -> Result<DocumentRecord, AccessError>;

    /// Returns the record under `hash` if `signatory` is one of its signatories.
    ///
    /// An unknown hash and a non-member signatory produce the same
    /// `ProofFailed` error.
    fn prove_ownership(
        &self,
        hash: Hash,
        signatory: Address,
        caller: Address,
    ) -> Result<DocumentRecord, ProofError>;

    /// Adds `account` to `role`.
    fn grant_role_to_address(
        &mut self,
        role: RoleId,
        account: Address,
        caller: Address,
    ) -> Result<(), AccessError>;

    /// Removes `account` from `role`.
    fn revoke_role_to_address(
        &mut self,
        role: RoleId,
        account: Address,
        caller: Address,
    ) -> Result<(), AccessError>;
}
