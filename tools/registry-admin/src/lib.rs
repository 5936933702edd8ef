//! Registry Admin: operator harness for the document registry
//!
//! Plays the role of the deployment and transaction-submission environment:
//! it deploys a registry into a JSON state file, submits one operation per
//! invocation on behalf of `--caller`, and upgrades the deployed logic.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌──────────────────────────┐
//! │ cli.rs   │───▶│ commands.rs  │───▶│ DocumentRegistryService  │
//! │ (clap)   │    │ (dispatch)   │    │ (doc-registry)           │
//! └──────────┘    └──────┬───────┘    └──────────────────────────┘
//!                        │
//!                 ┌──────▼───────┐
//!                 │ state_file.rs│  lock → load → run → save on success
//!                 └──────┬───────┘
//!                 ┌──────▼───────┐
//!                 │ lock.rs      │  fs2 lock on <state>.lock
//!                 └──────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod lock;
pub mod state_file;

pub use cli::{Cli, Command};
pub use commands::run;
pub use config::{AdminConfig, ConfigError};
