//! Command-line surface.
//!
//! Each subcommand is one top-level registry operation submitted by
//! `--caller`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use doc_registry::domain::{Address, Hash, RoleId};

/// Registry Admin: drive a document registry state file
#[derive(Parser, Debug)]
#[command(name = "registry-admin", version)]
#[command(about = "Deploy, drive and upgrade a permissioned document registry")]
pub struct Cli {
    /// Path of the registry state file [env: REGISTRY_STATE_PATH]
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` [env: REGISTRY_LOG]
    #[arg(long, global = true)]
    pub log: Option<String>,

    /// Maximum signatories per document [env: REGISTRY_MAX_SIGNATORIES]
    #[arg(long, global = true)]
    pub max_signatories: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Registry operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Deploy the registry, seeding the caller with every role
    Init {
        #[arg(long)]
        caller: Address,
    },

    /// Register a document under its content hash
    Register {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        hash: Hash,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Co-signatory identity; repeat for each signatory
        #[arg(long = "signatory")]
        signatories: Vec<Address>,
        /// Hash of the main document this one amends
        #[arg(long)]
        main_hash: Option<Hash>,
        /// Transaction id of the main document's registration
        #[arg(long, default_value = "")]
        main_tx: String,
    },

    /// Print the record stored under a hash
    Find {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        hash: Hash,
    },

    /// Prove an identity co-signed a document
    Prove {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        hash: Hash,
        #[arg(long)]
        signatory: Address,
    },

    /// Grant a role (`ADMIN_ROLE`, `UPGRADER_ROLE` or a 0x role id)
    Grant {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        role: RoleId,
        #[arg(long)]
        account: Address,
    },

    /// Revoke a role (`ADMIN_ROLE`, `UPGRADER_ROLE` or a 0x role id)
    Revoke {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        role: RoleId,
        #[arg(long)]
        account: Address,
    },

    /// Upgrade the deployed logic, preserving all registry state
    Upgrade {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        logic_version: u32,
    },

    /// Check the stored state against every registry invariant
    Verify,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALLER: &str = "0xb579Ab9803064fF7eFF7819B0cB4911F843f5361";

    #[test]
    fn test_parse_register() {
        let cli = Cli::try_parse_from([
            "registry-admin",
            "register",
            "--caller",
            CALLER,
            "--hash",
            "0x0101010101010101010101010101010101010101010101010101010101010101",
            "--name",
            "Deed",
            "--description",
            "Property deed",
            "--signatory",
            "0x1234567890abcdef1234567890abcdef12345678",
            "--signatory",
            "0x0badcafe0badcafe0badcafe0badcafe0badcafe",
        ])
        .unwrap();

        match cli.command {
            Command::Register {
                signatories,
                main_hash,
                main_tx,
                ..
            } => {
                assert_eq!(signatories.len(), 2);
                assert_eq!(main_hash, None);
                assert_eq!(main_tx, "");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_role_by_name() {
        let cli = Cli::try_parse_from([
            "registry-admin",
            "grant",
            "--caller",
            CALLER,
            "--role",
            "UPGRADER_ROLE",
            "--account",
            CALLER,
        ])
        .unwrap();
        match cli.command {
            Command::Grant { role, .. } => {
                assert_eq!(role, RoleId::from_name("UPGRADER_ROLE"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_malformed_address_rejected() {
        let result = Cli::try_parse_from(["registry-admin", "init", "--caller", "0x1234"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["registry-admin", "verify", "--state", "s.json"]).unwrap();
        assert_eq!(cli.state, Some(PathBuf::from("s.json")));
        assert_eq!(cli.command, Command::Verify);
    }
}
