//! # Domain Errors
//!
//! Error types for every registry component.
//!
//! ## Taxonomy
//!
//! | Kind | Variants | Reported as |
//! |------|----------|-------------|
//! | Validation | `InvalidSubmission`, `NoSignatories`, `RepeatSignatories`, `TooManySignatories`, `InvalidSignatory`, `MainDocumentNotFound`, `InvalidAccount` | specific reason |
//! | Conflict | `DuplicateDocument`, `AlreadyInitialized` | specific reason |
//! | Lookup | `RoleNotFound`, `RoleNotSubmitted` | specific reason |
//! | Authorization | `Unauthorized` | opaque "access denied" |
//! | Proof | `ProofFailed` | one message for unknown hash and non-member |
//!
//! Every error aborts the whole operation; no variant implies partial state.

use super::value_objects::Hash;
use thiserror::Error;

/// Coarse classification shared by all registry errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// Conflicts with existing state.
    Conflict,
    /// Referenced role does not exist or was not supplied.
    Lookup,
    /// Caller lacks the required role.
    Authorization,
    /// Ownership could not be proven.
    Proof,
}

// =============================================================================
// ACCESS CONTROL ERRORS
// =============================================================================

/// Errors from the access-control registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Caller lacks the required role. Carries no detail.
    #[error("access denied")]
    Unauthorized,

    /// The empty role tag was supplied.
    #[error("the role was not submitted")]
    RoleNotSubmitted,

    /// The role tag does not name a defined role.
    #[error("the role was not found")]
    RoleNotFound,

    /// The account to grant or revoke is the null identity.
    #[error("invalid account")]
    InvalidAccount,

    /// Initialization was attempted on an initialized registry.
    #[error("registry already initialized")]
    AlreadyInitialized,
}

impl AccessError {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Authorization,
            Self::RoleNotSubmitted | Self::RoleNotFound => ErrorKind::Lookup,
            Self::InvalidAccount => ErrorKind::Validation,
            Self::AlreadyInitialized => ErrorKind::Conflict,
        }
    }
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from the document store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record already exists under this hash. The store is append-only.
    #[error("document already exists: {0}")]
    AlreadyExists(Hash),
}

// =============================================================================
// REGISTRATION ERRORS
// =============================================================================

/// Errors from document registration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Caller lacks the administrative role.
    #[error("access denied")]
    Unauthorized,

    /// Zero hash, empty name or empty description.
    #[error("the document data was not submitted")]
    InvalidSubmission,

    /// Signatory list is empty.
    #[error("no signatories were provided")]
    NoSignatories,

    /// Signatory list contains the same identity twice.
    #[error("there are repeat signatories to this document")]
    RepeatSignatories,

    /// Signatory list exceeds the configured limit.
    #[error("too many signatories: {count} > {max}")]
    TooManySignatories {
        /// Signatories submitted.
        count: usize,
        /// Configured limit.
        max: usize,
    },

    /// A signatory failed identity validation.
    #[error("invalid signatory")]
    InvalidSignatory,

    /// The linked main document is not registered.
    #[error("main document not found")]
    MainDocumentNotFound,

    /// A record already exists under this hash.
    #[error("unable to save this document")]
    DuplicateDocument,
}

impl RegistrationError {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Authorization,
            Self::DuplicateDocument => ErrorKind::Conflict,
            _ => ErrorKind::Validation,
        }
    }
}

impl From<AccessError> for RegistrationError {
    fn from(_: AccessError) -> Self {
        // Gate failures surface opaquely regardless of cause.
        Self::Unauthorized
    }
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(_) => Self::DuplicateDocument,
        }
    }
}

// =============================================================================
// PROOF ERRORS
// =============================================================================

/// Errors from ownership proofs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// Caller lacks the administrative role.
    #[error("access denied")]
    Unauthorized,

    /// The claimed signatory failed identity validation.
    #[error("invalid signatory")]
    InvalidSignatory,

    /// Unknown hash or signatory not on the document. Indistinguishable.
    #[error("it was not possible to prove ownership of the document")]
    ProofFailed,
}

impl ProofError {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Authorization,
            Self::InvalidSignatory => ErrorKind::Validation,
            Self::ProofFailed => ErrorKind::Proof,
        }
    }
}

impl From<AccessError> for ProofError {
    fn from(_: AccessError) -> Self {
        Self::Unauthorized
    }
}

// =============================================================================
// MIGRATION ERRORS
// =============================================================================

/// Errors from the upgrade / migration path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// Caller lacks the upgrade role.
    #[error("access denied")]
    Unauthorized,

    /// Persisted state was written by a newer build.
    #[error("unsupported schema version: found {found}, supported {supported}")]
    UnsupportedSchemaVersion {
        /// Schema version stored in the snapshot.
        found: u16,
        /// Newest schema version this build reads.
        supported: u16,
    },

    /// Requested logic version is older than the deployed one.
    #[error("logic downgrade rejected: deployed {deployed}, requested {requested}")]
    LogicDowngrade {
        /// Logic version currently deployed.
        deployed: u32,
        /// Logic version the caller asked for.
        requested: u32,
    },

    /// Persisted state fails the registry invariants.
    #[error("state invariant violated: {0}")]
    InvariantViolation(String),
}

impl MigrationError {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Authorization,
            Self::UnsupportedSchemaVersion { .. } | Self::InvariantViolation(_) => {
                ErrorKind::Validation
            }
            Self::LogicDowngrade { .. } => ErrorKind::Conflict,
        }
    }
}

impl From<AccessError> for MigrationError {
    fn from(_: AccessError) -> Self {
        Self::Unauthorized
    }
}

// =============================================================================
// TESTS
// =============================================================================
