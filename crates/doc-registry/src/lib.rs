//! # Document Registry
//!
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! A permissioned, content-addressed document registry. Each document is
//! keyed by the hash of its content, carries a name, a description and a
//! set of co-signatories, and may link to a previously registered "main"
//! document for provenance. A role table decides who may register, look
//! up, prove ownership and manage roles.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | No record under the empty hash | `algorithms/registration.rs` - `validate_submission()` |
//! | INVARIANT-2 | Records are immutable once stored | `adapters/memory_store.rs` - `insert()` |
//! | INVARIANT-3 | Signatories non-empty, unique, valid | `algorithms/registration.rs` - `validate_submission()` |
//! | INVARIANT-4 | Main-document links resolve | `algorithms/registration.rs` - `validate_submission()` |
//! | INVARIANT-5 | Upgrades preserve both tables | `application/migration.rs` - `migrate()` |
//!
//! ## Authorization
//!
//! | Operation | Required Role |
//! |-----------|---------------|
//! | `initialize` | none, once |
//! | `register_document` | `Admin` |
//! | `find_document_by_hash` | `Admin` |
//! | `prove_ownership` | `Admin` |
//! | `grant_role_to_address` / `revoke_role_to_address` | `Admin` |
//! | `migrate` | `Upgrader` |
//!
//! Authorization is always evaluated first. A denied caller learns nothing
//! about the document table or the role table.
//!
//! ## Usage Example
//!
//! ```
//! use doc_registry::prelude::*;
//!
//! let owner: Address = "0xb579Ab9803064fF7eFF7819B0cB4911F843f5361".parse().unwrap();
//! let mut registry = create_test_service();
//! registry.initialize(owner).unwrap();
//!
//! let hash = keccak256(b"document contents");
//! let submission = DocumentSubmission {
//!     name: "Contract".to_string(),
//!     description: "Signed agreement".to_string(),
//!     signatories: vec![owner],
//!     main_document: DocumentLink::none(),
//! };
//! registry.register_document(hash, submission, owner).unwrap();
//!
//! assert!(registry.prove_ownership(hash, owner, owner).is_ok());
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{
        keccak256, Address, DocumentLink, Hash, ParseError, Role, RoleId,
    };

    // Entities
    pub use crate::domain::entities::{DocumentRecord, DocumentSubmission, RegistryStats};

    // Access control
    pub use crate::domain::access_control::AccessControlRegistry;

    // Errors
    pub use crate::domain::errors::{
        AccessError, ErrorKind, MigrationError, ProofError, RegistrationError, StoreError,
    };

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::DocumentRegistryApi;
    pub use crate::ports::outbound::DocumentStore;

    // Adapters
    pub use crate::adapters::InMemoryDocumentStore;

    // Service
    pub use crate::application::{
        create_test_service, migrate, DocumentRegistryService, RegistryState, StateVersion,
    };
    pub use crate::config::RegistryConfig;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_prelude_exports() {
        use prelude::*;
        let _ = RegistryConfig::default();
        let _ = Address::ZERO;
        assert_eq!(Role::Admin.id(), RoleId::from_name("ADMIN_ROLE"));
    }
}
