//! # Application Module
//!
//! The registry facade and the versioned-state upgrade path.

pub mod migration;
pub mod service;

pub use migration::{
    authorize_upgrade, check_state_invariants, migrate, RegistryState, StateVersion,
    CURRENT_SCHEMA_VERSION, INITIAL_LOGIC_VERSION, MIN_SCHEMA_VERSION,
};
pub use service::{create_test_service, DocumentRegistryService};
