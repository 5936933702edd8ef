//! Subcommand dispatch.
//!
//! Each command maps to exactly one registry operation and returns the text
//! to print on stdout. Records are printed as pretty JSON.

use anyhow::{Context, Result};
use doc_registry::application::{migrate, RegistryState};
use doc_registry::domain::{DocumentLink, DocumentSubmission, Role, RoleId};
use doc_registry::ports::DocumentRegistryApi;
use serde::Serialize;
use tracing::info;

use crate::cli::Command;
use crate::config::AdminConfig;
use crate::state_file;

/// Summary printed by `verify`.
#[derive(Debug, Serialize)]
struct StateSummary {
    schema_version: u16,
    logic_version: u32,
    initialized: bool,
    documents: usize,
    admins: usize,
    upgraders: usize,
}

/// Executes `command` against the configured state file.
pub fn run(command: Command, config: &AdminConfig) -> Result<String> {
    let path = config.state_path.as_path();
    let registry_config = config.registry_config();

    match command {
        Command::Init { caller } => {
            state_file::transact(path, registry_config, true, |registry| {
                registry.initialize(caller)?;
                Ok(format!("registry initialized; {caller} holds every role"))
            })
        }

        Command::Register {
            caller,
            hash,
            name,
            description,
            signatories,
            main_hash,
            main_tx,
        } => {
            let main_document = match main_hash {
                Some(main_hash) => DocumentLink::to(main_hash, main_tx),
                None => DocumentLink::none(),
            };
            let submission = DocumentSubmission {
                name,
                description,
                signatories,
                main_document,
            };
            state_file::transact(path, registry_config, false, |registry| {
                registry.register_document(hash, submission, caller)?;
                Ok(format!("document {hash} registered"))
            })
        }

        Command::Find { caller, hash } => state_file::inspect(path, registry_config, |registry| {
            let record = registry.find_document_by_hash(hash, caller)?;
            to_json(&record)
        }),

        Command::Prove {
            caller,
            hash,
            signatory,
        } => state_file::inspect(path, registry_config, |registry| {
            let record = registry.prove_ownership(hash, signatory, caller)?;
            to_json(&record)
        }),

        Command::Grant {
            caller,
            role,
            account,
        } => state_file::transact(path, registry_config, false, |registry| {
            registry.grant_role_to_address(role, account, caller)?;
            Ok(format!("granted {} to {account}", role_label(role)))
        }),

        Command::Revoke {
            caller,
            role,
            account,
        } => state_file::transact(path, registry_config, false, |registry| {
            registry.revoke_role_to_address(role, account, caller)?;
            Ok(format!("revoked {} from {account}", role_label(role)))
        }),

        Command::Upgrade {
            caller,
            logic_version,
        } => state_file::rewrite(path, |state| {
            let version = state.version;
            let (_, registry) = state.open(registry_config)?;
            registry.authorize_upgrade(caller)?;

            let upgraded = migrate(
                RegistryState::capture(version, registry),
                &caller,
                logic_version,
            )?;
            let from = version.logic_version;
            info!(from, to = logic_version, "Logic upgraded");
            Ok((
                upgraded,
                format!("logic upgraded from v{from} to v{logic_version}"),
            ))
        }),

        Command::Verify => state_file::read(path, |state| {
            state.verify().context("registry state failed verification")?;
            let summary = StateSummary {
                schema_version: state.version.schema_version,
                logic_version: state.version.logic_version,
                initialized: state.roles.is_initialized(),
                documents: state.documents.len(),
                admins: state.roles.members(Role::Admin).len(),
                upgraders: state.roles.members(Role::Upgrader).len(),
            };
            to_json(&summary)
        }),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serializing output")
}

fn role_label(role: RoleId) -> String {
    Role::from_id(role).map_or_else(|| role.to_string(), |role| role.name().to_string())
}
