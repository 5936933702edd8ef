//! # Value Objects
//!
//! Immutable domain primitives for the document registry.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use shared_types::{keccak256, Address, Hash, ParseError};

// =============================================================================
// DOCUMENT LINK
// =============================================================================

/// A reference to a previously registered document plus an opaque
/// provenance tag (e.g. the transaction that recorded the original).
///
/// `document_hash == Hash::ZERO` means "no link".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    /// Hash of the linked main document, or the empty sentinel.
    pub document_hash: Hash,
    /// Opaque provenance tag. Never interpreted.
    pub transaction_id: String,
}

impl DocumentLink {
    /// The empty link.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a link to `document_hash` tagged with `transaction_id`.
    #[must_use]
    pub fn to(document_hash: Hash, transaction_id: impl Into<String>) -> Self {
        Self {
            document_hash,
            transaction_id: transaction_id.into(),
        }
    }

    /// Returns true if this link points at a main document.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        !self.document_hash.is_zero()
    }
}

// =============================================================================
// ROLE IDENTIFIERS
// =============================================================================

/// An opaque 32-byte role tag, `keccak256(role_name)` for defined roles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub Hash);

impl RoleId {
    /// The empty role tag. Never a valid role to grant or revoke.
    pub const EMPTY: Self = Self(Hash::ZERO);

    /// Derives the role tag for a role name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(keccak256(name.as_bytes()))
    }

    /// Returns true if this is the empty role tag.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Debug for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Role::from_id(*self) {
            Some(role) => write!(f, "RoleId({})", role.name()),
            None => write!(f, "RoleId({:?})", self.0),
        }
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Role> for RoleId {
    fn from(role: Role) -> Self {
        role.id()
    }
}

/// The closed set of application-defined roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// May grant/revoke any role, register, find and prove documents.
    Admin,
    /// May authorize swapping the executing logic.
    Upgrader,
}

impl Role {
    /// Every defined role, in declaration order.
    pub const ALL: [Role; 2] = [Role::Admin, Role::Upgrader];

    /// Canonical role name; the role tag is its Keccak-256.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN_ROLE",
            Role::Upgrader => "UPGRADER_ROLE",
        }
    }

    /// The 32-byte tag for this role.
    #[must_use]
    pub fn id(self) -> RoleId {
        RoleId::from_name(self.name())
    }

    /// Resolves a role tag to a defined role, if any.
    #[must_use]
    pub fn from_id(id: RoleId) -> Option<Role> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses either a role name (`ADMIN_ROLE`) or a hex role tag into a `RoleId`.
///
/// Unknown names are hashed like any other name, so an undefined role parses
/// to a tag that the access-control layer then rejects as not found.
impl FromStr for RoleId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") {
            s.parse::<Hash>().map(Self)
        } else {
            Ok(Self::from_name(s))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
