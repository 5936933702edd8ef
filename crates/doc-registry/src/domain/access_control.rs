//! # Access Control Registry
//!
//! Role → member-set table plus the rules deciding who may change it.
//!
//! ## Lifecycle
//!
//! 1. Created empty and uninitialized. Every role check fails.
//! 2. `initialize` runs exactly once and seeds the initializing identity
//!    with `Admin` and `Upgrader`. A second call fails with
//!    `AlreadyInitialized` and leaves the table untouched.
//! 3. Thereafter the table changes only through `grant_role` /
//!    `revoke_role`, both gated by `Admin`.
//!
//! ## Check Order
//!
//! Authorization is evaluated before the role argument, so a caller without
//! `Admin` receives `Unauthorized` whatever role tag it supplied.

use super::errors::AccessError;
use super::identity::is_valid_identity;
use super::value_objects::{Address, Role, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Role membership table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlRegistry {
    /// Set once by `initialize`; never cleared.
    initialized: bool,
    /// Members per role. Roles with no members have no entry.
    members: BTreeMap<RoleId, BTreeSet<Address>>,
}

impl AccessControlRegistry {
    /// Creates an empty, uninitialized registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once `initialize` has succeeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Seeds `caller` with every administrative role. Runs once.
    pub fn initialize(&mut self, caller: Address) -> Result<(), AccessError> {
        if self.initialized {
            return Err(AccessError::AlreadyInitialized);
        }
        if !is_valid_identity(&caller) {
            return Err(AccessError::InvalidAccount);
        }
        for role in [Role::Admin, Role::Upgrader] {
            self.members.entry(role.id()).or_default().insert(caller);
        }
        self.initialized = true;
        Ok(())
    }

    /// Returns true if `account` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: impl Into<RoleId>, account: &Address) -> bool {
        self.members
            .get(&role.into())
            .is_some_and(|members| members.contains(account))
    }

    /// Fails with `Unauthorized` unless `caller` holds `role`.
    pub fn require_role(&self, role: Role, caller: &Address) -> Result<(), AccessError> {
        if self.has_role(role, caller) {
            Ok(())
        } else {
            Err(AccessError::Unauthorized)
        }
    }

    /// Resolves a raw role tag to a defined role.
    pub fn validate_role(role: RoleId) -> Result<Role, AccessError> {
        if role.is_empty() {
            return Err(AccessError::RoleNotSubmitted);
        }
        Role::from_id(role).ok_or(AccessError::RoleNotFound)
    }

    /// Adds `account` to `role`. Idempotent.
    pub fn grant_role(
        &mut self,
        role: RoleId,
        account: Address,
        caller: &Address,
    ) -> Result<(), AccessError> {
        let role = self.check_role_change(role, &account, caller)?;
        self.members.entry(role.id()).or_default().insert(account);
        Ok(())
    }

    /// Removes `account` from `role`. Idempotent.
    pub fn revoke_role(
        &mut self,
        role: RoleId,
        account: Address,
        caller: &Address,
    ) -> Result<(), AccessError> {
        let role = self.check_role_change(role, &account, caller)?;
        if let Some(members) = self.members.get_mut(&role.id()) {
            members.remove(&account);
            if members.is_empty() {
                self.members.remove(&role.id());
            }
        }
        Ok(())
    }

    /// Members of `role`, sorted.
    #[must_use]
    pub fn members(&self, role: Role) -> Vec<Address> {
        self.members
            .get(&role.id())
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Iterates over every (role tag, members) entry.
    pub fn entries(&self) -> impl Iterator<Item = (&RoleId, &BTreeSet<Address>)> {
        self.members.iter()
    }

    /// Shared pre-checks for grant and revoke.
    fn check_role_change(
        &self,
        role: RoleId,
        account: &Address,
        caller: &Address,
    ) -> Result<Role, AccessError> {
        self.require_role(Role::Admin, caller)?;
        let role = Self::validate_role(role)?;
        if !is_valid_identity(account) {
            return Err(AccessError::InvalidAccount);
        }
        Ok(role)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = Address::new([0xAA; 20]);
    const OTHER: Address = Address::new([0xBB; 20]);

    fn initialized() -> AccessControlRegistry {
        let mut registry = AccessControlRegistry::new();
        registry.initialize(OWNER).unwrap();
        registry
    }

    #[test]
    fn test_uninitialized_denies_everything() {
        let registry = AccessControlRegistry::new();
        assert!(!registry.is_initialized());
        assert_eq!(
            registry.require_role(Role::Admin, &OWNER),
            Err(AccessError::Unauthorized)
        );
    }

    #[test]
    fn test_initialize_seeds_admin_and_upgrader() {
        let registry = initialized();
        assert!(registry.is_initialized());
        assert!(registry.has_role(Role::Admin, &OWNER));
        assert!(registry.has_role(Role::Upgrader, &OWNER));
        assert!(!registry.has_role(Role::Admin, &OTHER));
    }

    #[test]
    fn test_initialize_twice_fails_and_preserves_state() {
        let mut registry = initialized();
        let before = registry.clone();
        assert_eq!(
            registry.initialize(OTHER),
            Err(AccessError::AlreadyInitialized)
        );
        assert_eq!(registry, before);
    }

    #[test]
    fn test_initialize_rejects_zero_caller() {
        let mut registry = AccessControlRegistry::new();
        assert_eq!(
            registry.initialize(Address::ZERO),
            Err(AccessError::InvalidAccount)
        );
        assert!(!registry.is_initialized());
    }

    #[test]
    fn test_grant_and_revoke() {
        let mut registry = initialized();
        registry
            .grant_role(Role::Upgrader.id(), OTHER, &OWNER)
            .unwrap();
        assert!(registry.has_role(Role::Upgrader, &OTHER));

        // Idempotent grant
        registry
            .grant_role(Role::Upgrader.id(), OTHER, &OWNER)
            .unwrap();
        assert_eq!(registry.members(Role::Upgrader).len(), 2);

        registry
            .revoke_role(Role::Upgrader.id(), OTHER, &OWNER)
            .unwrap();
        assert!(!registry.has_role(Role::Upgrader, &OTHER));

        // Idempotent revoke
        registry
            .revoke_role(Role::Upgrader.id(), OTHER, &OWNER)
            .unwrap();
    }

    #[test]
    fn test_revoke_last_member_drops_entry() {
        let mut registry = initialized();
        registry
            .revoke_role(Role::Upgrader.id(), OWNER, &OWNER)
            .unwrap();
        assert!(registry.members(Role::Upgrader).is_empty());
        assert_eq!(registry.entries().count(), 1);
    }

    #[test]
    fn test_empty_and_unknown_roles() {
        let mut registry = initialized();
        assert_eq!(
            registry.grant_role(RoleId::EMPTY, OTHER, &OWNER),
            Err(AccessError::RoleNotSubmitted)
        );
        assert_eq!(
            registry.grant_role(RoleId::from_name("NON_EXISTING_ROLE"), OTHER, &OWNER),
            Err(AccessError::RoleNotFound)
        );
        assert_eq!(
            registry.revoke_role(RoleId::EMPTY, OTHER, &OWNER),
            Err(AccessError::RoleNotSubmitted)
        );
        assert_eq!(
            registry.revoke_role(RoleId::from_name("NON_EXISTING_ROLE"), OTHER, &OWNER),
            Err(AccessError::RoleNotFound)
        );
    }

    #[test]
    fn test_non_admin_is_denied_before_role_checks() {
        let mut registry = initialized();
        for role in [
            Role::Admin.id(),
            RoleId::EMPTY,
            RoleId::from_name("NON_EXISTING_ROLE"),
        ] {
            assert_eq!(
                registry.grant_role(role, OTHER, &OTHER),
                Err(AccessError::Unauthorized)
            );
            assert_eq!(
                registry.revoke_role(role, OWNER, &OTHER),
                Err(AccessError::Unauthorized)
            );
        }
        assert!(registry.has_role(Role::Admin, &OWNER));
    }

    #[test]
    fn test_upgrader_cannot_manage_roles() {
        let mut registry = initialized();
        registry
            .grant_role(Role::Upgrader.id(), OTHER, &OWNER)
            .unwrap();
        assert_eq!(
            registry.grant_role(Role::Admin.id(), OTHER, &OTHER),
            Err(AccessError::Unauthorized)
        );
    }

    #[test]
    fn test_zero_account_rejected() {
        let mut registry = initialized();
        assert_eq!(
            registry.grant_role(Role::Admin.id(), Address::ZERO, &OWNER),
            Err(AccessError::InvalidAccount)
        );
    }

    #[test]
    fn test_serde_roundtrip_preserves_table() {
        let mut registry = initialized();
        registry.grant_role(Role::Admin.id(), OTHER, &OWNER).unwrap();
        let json = serde_json::to_string(&registry).unwrap();
        let back: AccessControlRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, registry);
    }
}
