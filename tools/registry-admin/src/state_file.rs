//! Persisted registry state.
//!
//! The state file is the registry's durable storage. Every mutating command
//! runs against a freshly loaded copy, and the file is replaced only after
//! the command succeeds. Replacement goes through a temporary file in the
//! same directory followed by a rename, so readers see either the old or the
//! new state and never a partial write.
//!
//! Writers hold an exclusive [`StateLock`] from load to save and readers
//! hold a shared one, so concurrent invocations commit one after another.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use doc_registry::adapters::InMemoryDocumentStore;
use doc_registry::application::{DocumentRegistryService, RegistryState};
use doc_registry::config::RegistryConfig;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::lock::StateLock;

/// The registry facade as opened by the harness.
pub type Registry = DocumentRegistryService<InMemoryDocumentStore>;

fn ensure_deployed(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!(
            "no registry state at {}; run `init` first",
            path.display()
        );
    }
    Ok(())
}

/// Reads the state at `path`. Fails if the file does not exist.
///
/// Takes no lock; callers that act on the result go through [`transact`],
/// [`rewrite`], [`inspect`] or [`read`].
pub fn load(path: &Path) -> Result<RegistryState> {
    ensure_deployed(path)?;
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let state = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing registry state {}", path.display()))?;
    debug!(path = %path.display(), "State loaded");
    Ok(state)
}

/// Reads the state at `path`, or returns a fresh undeployed state.
pub fn load_or_default(path: &Path) -> Result<RegistryState> {
    if path.exists() {
        load(path)
    } else {
        Ok(RegistryState::default())
    }
}

/// Atomically replaces the state at `path`.
pub fn save(path: &Path, state: &RegistryState) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, state).context("serializing registry state")?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;

    info!(
        path = %path.display(),
        documents = state.documents.len(),
        logic_version = state.version.logic_version,
        "State saved"
    );
    Ok(())
}

/// Runs `op` against the stored registry and persists the result if it succeeds.
///
/// When `create` is set a missing state file is treated as a fresh,
/// undeployed registry.
pub fn transact<T>(
    path: &Path,
    config: RegistryConfig,
    create: bool,
    op: impl FnOnce(&mut Registry) -> Result<T>,
) -> Result<T> {
    if !create {
        ensure_deployed(path)?;
    }
    let _lock = StateLock::exclusive(path)?;
    let state = if create {
        load_or_default(path)?
    } else {
        load(path)?
    };
    let (version, mut registry) = state.open(config)?;
    let output = op(&mut registry)?;
    save(path, &RegistryState::capture(version, registry))?;
    Ok(output)
}

/// Replaces the stored state with the one `op` derives from it.
///
/// Nothing is written if `op` fails.
pub fn rewrite<T>(
    path: &Path,
    op: impl FnOnce(RegistryState) -> Result<(RegistryState, T)>,
) -> Result<T> {
    ensure_deployed(path)?;
    let _lock = StateLock::exclusive(path)?;
    let (state, output) = op(load(path)?)?;
    save(path, &state)?;
    Ok(output)
}

/// Runs a read-only `op` against the stored registry.
pub fn inspect<T>(
    path: &Path,
    config: RegistryConfig,
    op: impl FnOnce(&Registry) -> Result<T>,
) -> Result<T> {
    ensure_deployed(path)?;
    let _lock = StateLock::shared(path)?;
    let (_, registry) = load(path)?.open(config)?;
    op(&registry)
}

/// Runs `op` over the raw stored state without opening a registry.
pub fn read<T>(path: &Path, op: impl FnOnce(&RegistryState) -> Result<T>) -> Result<T> {
    ensure_deployed(path)?;
    let _lock = StateLock::shared(path)?;
    op(&load(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_registry::domain::Address;
    use doc_registry::ports::DocumentRegistryApi;

    const OWNER: Address = Address::new([0xAA; 20]);

    #[test]
    fn test_missing_state_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("run `init` first"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut state = RegistryState::default();
        state.roles.initialize(OWNER).unwrap();
        save(&path, &state).unwrap();

        assert_eq!(load(&path).unwrap(), state);
    }

    #[test]
    fn test_failed_transaction_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        transact(&path, RegistryConfig::default(), true, |registry| {
            registry.initialize(OWNER)?;
            Ok(())
        })
        .unwrap();
        let before = fs::read(&path).unwrap();

        let result = transact(&path, RegistryConfig::default(), false, |registry| {
            registry.initialize(OWNER)?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_failed_create_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let result = transact(&path, RegistryConfig::default(), true, |registry| {
            registry.initialize(Address::ZERO)?;
            Ok(())
        });
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_rewrite_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        save(&path, &RegistryState::default()).unwrap();
        let before = fs::read(&path).unwrap();

        let result: Result<()> = rewrite(&path, |mut state| {
            state.version.logic_version += 1;
            bail!("rejected after edit")
        });
        assert!(result.is_err());
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_corrupt_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, b"{ not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing registry state"));
    }
}
