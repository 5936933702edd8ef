//! # Document Registry Service
//!
//! The facade every external call enters. Each operation performs its
//! access-control check, delegates to the registration engine, the store or
//! the ownership prover, and records the outcome.
//!
//! ## Ownership
//!
//! The service holds the injected `DocumentStore` and the
//! `AccessControlRegistry` it is handed; it never duplicates their state.
//! Statistics are the only data the service itself maintains.

use crate::adapters::InMemoryDocumentStore;
use crate::algorithms::{self, registration};
use crate::config::RegistryConfig;
use crate::domain::{
    AccessControlRegistry, AccessError, Address, DocumentRecord, DocumentSubmission, Hash,
    MigrationError, ProofError, RegistrationError, RegistryStats, Role, RoleId,
};
use crate::ports::inbound::DocumentRegistryApi;
use crate::ports::outbound::DocumentStore;

use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

/// The main Document Registry Service.
pub struct DocumentRegistryService<S: DocumentStore> {
    /// Registry configuration.
    config: RegistryConfig,
    /// Document storage adapter.
    store: S,
    /// Role membership table.
    access: AccessControlRegistry,
    /// Service statistics.
    stats: RwLock<RegistryStats>,
}

impl<S: DocumentStore> DocumentRegistryService<S> {
    /// Creates an uninitialized service over `store`.
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self::from_parts(store, AccessControlRegistry::new(), config)
    }

    /// Creates a service over existing store and role state.
    pub fn from_parts(store: S, access: AccessControlRegistry, config: RegistryConfig) -> Self {
        Self {
            config,
            store,
            access,
            stats: RwLock::new(RegistryStats::default()),
        }
    }

    /// Releases the store and role table, e.g. for persistence.
    pub fn into_parts(self) -> (S, AccessControlRegistry) {
        (self.store, self.access)
    }

    /// Read access to the document store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read access to the role table.
    pub fn access(&self) -> &AccessControlRegistry {
        &self.access
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get current service statistics.
    pub fn stats(&self) -> RegistryStats {
        self.stats.read().clone()
    }

    /// Returns true if `account` holds `role`. Unauthenticated.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.access.has_role(role, account)
    }

    /// Fails unless `caller` may authorize a logic upgrade.
    #[instrument(skip(self), fields(caller = %caller))]
    pub fn authorize_upgrade(&self, caller: Address) -> Result<(), MigrationError> {
        if let Err(e) = self.access.require_role(Role::Upgrader, &caller) {
            self.deny("upgrade");
            return Err(e.into());
        }
        info!("Upgrade authorized");
        Ok(())
    }

    /// Counts and logs an access-control denial.
    fn deny(&self, operation: &'static str) {
        self.stats.write().rejected_requests += 1;
        warn!(operation, "Request denied by access control");
    }
}

/// Create a service with an in-memory store (for testing).
#[must_use]
pub fn create_test_service() -> DocumentRegistryService<InMemoryDocumentStore> {
    DocumentRegistryService::new(InMemoryDocumentStore::new(), RegistryConfig::default())
}

// =============================================================================
// DocumentRegistryApi Implementation
// =============================================================================

impl<S: DocumentStore> DocumentRegistryApi for DocumentRegistryService<S> {
    #[instrument(skip(self), fields(caller = %caller))]
    fn initialize(&mut self, caller: Address) -> Result<(), AccessError> {
        match self.access.initialize(caller) {
            Ok(()) => {
                info!("Registry initialized");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Initialization rejected");
                Err(e)
            }
        }
    }

    #[instrument(skip(self, document), fields(hash = %hash, caller = %caller))]
    fn register_document(
        &mut self,
        hash: Hash,
        document: DocumentSubmission,
        caller: Address,
    ) -> Result<(), RegistrationError> {
        let result = registration::register_document(
            &mut self.store,
            &self.access,
            &self.config,
            hash,
            document,
            &caller,
        );

        match result {
            Ok(record) => {
                self.stats.write().documents_registered += 1;
                info!(
                    signatories = record.signatories.len(),
                    main_document = %record.main_document.document_hash,
                    "Document registered"
                );
                Ok(())
            }
            Err(RegistrationError::Unauthorized) => {
                self.deny("register_document");
                Err(RegistrationError::Unauthorized)
            }
            Err(e) => {
                self.stats.write().rejected_submissions += 1;
                debug!(error = %e, "Registration rejected");
                Err(e)
            }
        }
    }

    #[instrument(skip(self), fields(hash = %hash, caller = %caller))]
    fn find_document_by_hash(
        &self,
        hash: Hash,
        caller: Address,
    ) -> Result<DocumentRecord, AccessError> {
        if let Err(e) = self.access.require_role(Role::Admin, &caller) {
            self.deny("find_document_by_hash");
            return Err(e);
        }
        let record = self.store.get(&hash);
        debug!(found = !record.is_empty(), "Document lookup");
        Ok(record)
    }

    #[instrument(skip(self), fields(hash = %hash, caller = %caller))]
    fn prove_ownership(
        &self,
        hash: Hash,
        signatory: Address,
        caller: Address,
    ) -> Result<DocumentRecord, ProofError> {
        let result =
            algorithms::prove_ownership(&self.store, &self.access, &hash, &signatory, &caller);

        match &result {
            Ok(_) => {
                self.stats.write().proofs_succeeded += 1;
                info!(signatory = %signatory, "Ownership proven");
            }
            Err(ProofError::Unauthorized) => self.deny("prove_ownership"),
            Err(e) => {
                self.stats.write().proofs_failed += 1;
                debug!(error = %e, "Ownership proof failed");
            }
        }
        result
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn grant_role_to_address(
        &mut self,
        role: RoleId,
        account: Address,
        caller: Address,
    ) -> Result<(), AccessError> {
        let result = self.access.grant_role(role, account, &caller);
        self.record_role_change("grant_role_to_address", &result, role, account);
        result
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn revoke_role_to_address(
        &mut self,
        role: RoleId,
        account: Address,
        caller: Address,
    ) -> Result<(), AccessError> {
        let result = self.access.revoke_role(role, account, &caller);
        self.record_role_change("revoke_role_to_address", &result, role, account);
        result
    }
}

impl<S: DocumentStore> DocumentRegistryService<S> {
    fn record_role_change(
        &self,
        operation: &'static str,
        result: &Result<(), AccessError>,
        role: RoleId,
        account: Address,
    ) {
        match result {
            Ok(()) => {
                self.stats.write().role_changes += 1;
                info!(operation, role = ?role, account = %account, "Role table updated");
            }
            Err(AccessError::Unauthorized) => self.deny(operation),
            Err(e) => debug!(operation, error = %e, "Role change rejected"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
