//! # Domain Invariants
//!
//! Invariants that MUST hold for every stored document record.
//!
//! - INVARIANT-1: Stored hash is never the empty sentinel
//! - INVARIANT-2: Stored hashes are unique
//! - INVARIANT-3: Name and description are non-empty
//! - INVARIANT-4: Signatories are non-empty, unique and valid identities
//! - INVARIANT-5: A main-document link resolves to an earlier record
//!
//! The registration path enforces these before commit. The checks here are
//! re-run over persisted state when it is loaded or migrated.

use super::entities::DocumentRecord;
use super::identity::is_valid_identity;
use super::value_objects::{Address, Hash};
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Returns true if no identity appears twice in `signatories`.
#[must_use]
pub fn has_unique_signatories(signatories: &[Address]) -> bool {
    let mut seen = HashSet::with_capacity(signatories.len());
    signatories.iter().all(|signatory| seen.insert(*signatory))
}

/// INVARIANT-1, 3, 4 for a single record.
#[must_use]
pub fn check_record_invariants(record: &DocumentRecord) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let hash = record.hash;

    if hash.is_zero() {
        violations.push(InvariantViolation::ZeroHashKey);
    }
    if record.name.is_empty() || record.description.is_empty() {
        violations.push(InvariantViolation::EmptyField { hash });
    }
    if record.signatories.is_empty() {
        violations.push(InvariantViolation::NoSignatories { hash });
    } else if !has_unique_signatories(&record.signatories) {
        violations.push(InvariantViolation::RepeatSignatories { hash });
    }
    if !record.signatories.iter().all(is_valid_identity) {
        violations.push(InvariantViolation::InvalidSignatory { hash });
    }

    violations
}

/// Checks every invariant over records in insertion order.
#[must_use]
pub fn check_all_invariants(records: &[DocumentRecord]) -> InvariantCheckResult {
    let mut violations = Vec::new();
    let mut seen: HashSet<Hash> = HashSet::with_capacity(records.len());

    for record in records {
        violations.extend(check_record_invariants(record));

        let main = record.main_document.document_hash;
        if !main.is_zero() && !seen.contains(&main) {
            violations.push(InvariantViolation::DanglingMainDocument {
                hash: record.hash,
                main,
            });
        }

        if !seen.insert(record.hash) {
            violations.push(InvariantViolation::DuplicateKey { hash: record.hash });
        }
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The violations found, empty if valid.
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        match self {
            Self::Valid => &[],
            Self::Invalid(violations) => violations,
        }
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A record is stored under the empty hash.
    ZeroHashKey,
    /// Two records share a hash.
    DuplicateKey {
        /// Offending record.
        hash: Hash,
    },
    /// Name or description is empty.
    EmptyField {
        /// Offending record.
        hash: Hash,
    },
    /// Signatory list is empty.
    NoSignatories {
        /// Offending record.
        hash: Hash,
    },
    /// Signatory list has duplicates.
    RepeatSignatories {
        /// Offending record.
        hash: Hash,
    },
    /// A signatory is the null identity.
    InvalidSignatory {
        /// Offending record.
        hash: Hash,
    },
    /// Main-document link does not resolve to an earlier record.
    DanglingMainDocument {
        /// Offending record.
        hash: Hash,
        /// Unresolved link target.
        main: Hash,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroHashKey => write!(f, "record stored under the empty hash"),
            Self::DuplicateKey { hash } => write!(f, "duplicate record key {hash}"),
            Self::EmptyField { hash } => {
                write!(f, "record {hash} has an empty name or description")
            }
            Self::NoSignatories { hash } => write!(f, "record {hash} has no signatories"),
            Self::RepeatSignatories { hash } => {
                write!(f, "record {hash} has repeat signatories")
            }
            Self::InvalidSignatory { hash } => {
                write!(f, "record {hash} has an invalid signatory")
            }
            Self::DanglingMainDocument { hash, main } => {
                write!(f, "record {hash} links to unknown main document {main}")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
