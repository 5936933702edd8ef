//! # State Versioning and Upgrades
//!
//! The registry's persisted state is a versioned snapshot of both tables.
//! Replacing the operational logic is an upgrade: it must be authorized by
//! an `Upgrader` and it must leave the role table and the document table
//! exactly as they were.
//!
//! ## Versions
//!
//! - `schema_version`: layout of the snapshot. Older layouts are migrated
//!   forward on upgrade; newer ones are refused.
//! - `logic_version`: monotonically increasing tag of the deployed logic.

use crate::adapters::InMemoryDocumentStore;
use crate::application::service::DocumentRegistryService;
use crate::config::RegistryConfig;
use crate::domain::{
    check_all_invariants, AccessControlRegistry, Address, DocumentRecord, MigrationError, Role,
};
use crate::ports::outbound::DocumentStore;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Snapshot layout written by this build.
pub const CURRENT_SCHEMA_VERSION: u16 = 1;

/// Oldest snapshot layout this build can read.
pub const MIN_SCHEMA_VERSION: u16 = 1;

/// Logic version stamped on freshly created state.
pub const INITIAL_LOGIC_VERSION: u32 = 1;

/// Version tags carried by every snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateVersion {
    /// Snapshot layout.
    pub schema_version: u16,
    /// Deployed logic.
    pub logic_version: u32,
}

impl Default for StateVersion {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            logic_version: INITIAL_LOGIC_VERSION,
        }
    }
}

/// Complete persisted registry state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    /// Version tags, flattened into the top-level object.
    #[serde(flatten)]
    pub version: StateVersion,
    /// Role membership table.
    pub roles: AccessControlRegistry,
    /// Records in insertion order.
    pub documents: Vec<DocumentRecord>,
}

impl RegistryState {
    /// Fails if the snapshot cannot be served by this build.
    pub fn verify(&self) -> Result<(), MigrationError> {
        check_schema(self.version.schema_version)?;
        check_state_invariants(self)
    }

    /// Verifies the snapshot and opens a service over it.
    pub fn open(
        self,
        config: RegistryConfig,
    ) -> Result<(StateVersion, DocumentRegistryService<InMemoryDocumentStore>), MigrationError>
    {
        self.verify()?;
        let store = InMemoryDocumentStore::from_records(self.documents)
            .map_err(|e| MigrationError::InvariantViolation(e.to_string()))?;
        Ok((
            self.version,
            DocumentRegistryService::from_parts(store, self.roles, config),
        ))
    }

    /// Captures the current tables of `service` under `version`.
    pub fn capture<S: DocumentStore>(
        version: StateVersion,
        service: DocumentRegistryService<S>,
    ) -> Self {
        let (store, roles) = service.into_parts();
        Self {
            version,
            roles,
            documents: store.records(),
        }
    }
}

/// Fails with `Unauthorized` unless `caller` holds `Upgrader`.
pub fn authorize_upgrade(
    roles: &AccessControlRegistry,
    caller: &Address,
) -> Result<(), MigrationError> {
    roles.require_role(Role::Upgrader, caller).map_err(|e| {
        warn!(caller = %caller, "Upgrade denied by access control");
        MigrationError::from(e)
    })
}

/// Checks every document-table invariant over `state`.
///
/// The error lists every violation found, separated by `; `.
pub fn check_state_invariants(state: &RegistryState) -> Result<(), MigrationError> {
    let result = check_all_invariants(&state.documents);
    if result.is_valid() {
        return Ok(());
    }
    let report = result
        .violations()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(MigrationError::InvariantViolation(report))
}

fn check_schema(found: u16) -> Result<(), MigrationError> {
    if (MIN_SCHEMA_VERSION..=CURRENT_SCHEMA_VERSION).contains(&found) {
        Ok(())
    } else {
        Err(MigrationError::UnsupportedSchemaVersion {
            found,
            supported: CURRENT_SCHEMA_VERSION,
        })
    }
}

/// Upgrades `state` to `target_logic_version`.
///
/// The role and document tables come out unchanged. Nothing is applied
/// unless every check passes.
#[instrument(skip(state), fields(caller = %caller))]
pub fn migrate(
    mut state: RegistryState,
    caller: &Address,
    target_logic_version: u32,
) -> Result<RegistryState, MigrationError> {
    authorize_upgrade(&state.roles, caller)?;
    check_schema(state.version.schema_version)?;

    let deployed = state.version.logic_version;
    if target_logic_version < deployed {
        return Err(MigrationError::LogicDowngrade {
            deployed,
            requested: target_logic_version,
        });
    }

    // Only one layout exists so far, so moving forward is a restamp.
    let from_schema = state.version.schema_version;
    state.version.schema_version = CURRENT_SCHEMA_VERSION;

    check_state_invariants(&state)?;
    state.version.logic_version = target_logic_version;

    info!(
        from_schema,
        to_schema = CURRENT_SCHEMA_VERSION,
        from_logic = deployed,
        to_logic = target_logic_version,
        "Registry state migrated"
    );
    Ok(state)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentLink, DocumentSubmission, Hash};
    use crate::ports::inbound::DocumentRegistryApi;

    const OWNER: Address = Address::new([0xAA; 20]);
    const OTHER: Address = Address::new([0xBB; 20]);

    fn populated_state() -> RegistryState {
        let (version, mut service) = RegistryState::default()
            .open(RegistryConfig::default())
            .unwrap();
        service.initialize(OWNER).unwrap();
        service
            .register_document(
                Hash::new([1u8; 32]),
                DocumentSubmission {
                    name: "doc".to_string(),
                    description: "desc".to_string(),
                    signatories: vec![Address::new([1u8; 20])],
                    main_document: DocumentLink::none(),
                },
                OWNER,
            )
            .unwrap();
        RegistryState::capture(version, service)
    }

    #[test]
    fn test_default_state_is_current() {
        let state = RegistryState::default();
        assert_eq!(state.version.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(state.version.logic_version, INITIAL_LOGIC_VERSION);
        assert!(state.verify().is_ok());
    }

    #[test]
    fn test_migrate_preserves_tables() {
        let state = populated_state();
        let migrated = migrate(state.clone(), &OWNER, 2).unwrap();
        assert_eq!(migrated.version.logic_version, 2);
        assert_eq!(migrated.roles, state.roles);
        assert_eq!(migrated.documents, state.documents);
    }

    #[test]
    fn test_migrate_requires_upgrader() {
        let state = populated_state();
        assert_eq!(
            migrate(state, &OTHER, 2),
            Err(MigrationError::Unauthorized)
        );
    }

    #[test]
    fn test_migrate_same_version_is_allowed() {
        let state = populated_state();
        assert!(migrate(state, &OWNER, INITIAL_LOGIC_VERSION).is_ok());
    }

    #[test]
    fn test_migrate_rejects_downgrade() {
        let mut state = populated_state();
        state.version.logic_version = 5;
        assert_eq!(
            migrate(state, &OWNER, 4),
            Err(MigrationError::LogicDowngrade {
                deployed: 5,
                requested: 4
            })
        );
    }

    #[test]
    fn test_newer_schema_refused() {
        let mut state = populated_state();
        state.version.schema_version = CURRENT_SCHEMA_VERSION + 1;
        let expected = MigrationError::UnsupportedSchemaVersion {
            found: CURRENT_SCHEMA_VERSION + 1,
            supported: CURRENT_SCHEMA_VERSION,
        };
        assert_eq!(state.verify(), Err(expected.clone()));
        assert_eq!(migrate(state, &OWNER, 2), Err(expected));
    }

    #[test]
    fn test_corrupted_state_refused() {
        let mut state = populated_state();
        state.documents[0].signatories.clear();
        assert!(matches!(
            state.clone().open(RegistryConfig::default()),
            Err(MigrationError::InvariantViolation(_))
        ));
        assert!(matches!(
            migrate(state, &OWNER, 2),
            Err(MigrationError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_invariant_report_lists_every_violation() {
        let mut state = populated_state();
        state.documents[0].name.clear();
        state.documents[0].signatories.clear();
        match check_state_invariants(&state) {
            Err(MigrationError::InvariantViolation(report)) => {
                assert!(report.contains("empty name"));
                assert!(report.contains("no signatories"));
            }
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn test_state_json_layout() {
        let state = populated_state();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["schema_version"], 1);
        assert_eq!(json["logic_version"], 1);
        let back: RegistryState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
