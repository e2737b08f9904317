//! Registry state persisted between CLI invocations.
//!
//! ```json
//! {
//!   "owner": "0x…",
//!   "events": [
//!     { "previous_owner": "0x…", "new_owner": "0x…" }
//!   ]
//! }
//! ```
//!
//! A state file is only ever replaced whole via [`ownable_utils::atomic_write`],
//! so a reader sees either the state before a call or the state after it.
//!
//! Mutating calls also hold [`Store::lock`], an exclusive advisory lock on the
//! sidecar `<state>.lock`, from their first read to their last write. Two
//! processes can therefore never both act on the same owner.
//!
//! `events` must chain: each `previous_owner` is the `new_owner` before it, and
//! the last `new_owner` is `owner`.

use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ownable_core::{EventLog, EventSink, OwnerRegistry, OwnerSnapshot};
use ownable_types::{Identity, OwnershipError, OwnershipTransferred};

/// Used when neither `--state` nor `[state] path` is given.
pub const DEFAULT_STATE_FILE: &str = "ownable-state.json";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("no registry deployed at {} (run `ownable deploy` first)", path.display())]
    Missing { path: PathBuf },
    #[error("a registry is already deployed at {} (pass --force to replace it)", path.display())]
    AlreadyDeployed { path: PathBuf },
    #[error("failed to read state at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse state at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("state at {} holds an invalid owner: {source}", path.display())]
    InvalidOwner {
        path: PathBuf,
        source: OwnershipError,
    },
    #[error("ownership history in {} breaks at event {index}", path.display())]
    BrokenHistory { path: PathBuf, index: usize },
    #[error("failed to lock state at {}: {source}", path.display())]
    Lock { path: PathBuf, source: io::Error },
    #[error("failed to write state at {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    owner: Identity,
    #[serde(default)]
    events: Vec<OwnershipTransferred>,
}

/// A deployed registry together with its ownership history.
#[derive(Debug)]
pub struct Deployment {
    pub registry: OwnerRegistry,
    pub history: EventLog,
}

impl Deployment {
    #[must_use]
    pub fn new(registry: OwnerRegistry) -> Self {
        Self {
            registry,
            history: EventLog::new(),
        }
    }
}

/// Holds the exclusive lock on a state file. Dropping it closes the lock file,
/// which releases the lock.
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
}

/// Index of the first event that does not continue the chain ending at `owner`.
fn history_break(owner: Identity, events: &[OwnershipTransferred]) -> Option<usize> {
    let linked = events
        .windows(2)
        .position(|pair| pair[0].new_owner() != pair[1].previous_owner());
    if let Some(index) = linked {
        return Some(index + 1);
    }
    match events.last() {
        Some(last) if last.new_owner() != owner => Some(events.len() - 1),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut path = OsString::from(self.path.as_os_str());
        path.push(".lock");
        PathBuf::from(path)
    }

    fn create_parent(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    /// Blocks until this process holds the state file exclusively.
    pub fn lock(&self) -> Result<StoreLock, StateError> {
        let path = self.lock_path();
        let lock_err = |source: io::Error| StateError::Lock {
            path: path.clone(),
            source,
        };

        self.create_parent().map_err(lock_err)?;
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;

        tracing::debug!(path = %path.display(), "Acquired state lock");
        Ok(StoreLock { _file: file })
    }

    /// Restores a backup left by an interrupted write before checking.
    #[must_use]
    pub fn exists(&self) -> bool {
        ownable_utils::recover_bak_file(&self.path);
        self.path.exists()
    }

    pub fn load(&self) -> Result<Deployment, StateError> {
        if !self.exists() {
            return Err(StateError::Missing {
                path: self.path.clone(),
            });
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StateError::Read {
            path: self.path.clone(),
            source,
        })?;
        let file: StateFile =
            serde_json::from_str(&content).map_err(|source| StateError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let registry = OwnerRegistry::restore(OwnerSnapshot { owner: file.owner }).map_err(
            |source| StateError::InvalidOwner {
                path: self.path.clone(),
                source,
            },
        )?;

        if let Some(index) = history_break(file.owner, &file.events) {
            return Err(StateError::BrokenHistory {
                path: self.path.clone(),
                index,
            });
        }

        let mut history = EventLog::new();
        for event in file.events {
            history.record(event);
        }

        tracing::debug!(
            path = %self.path.display(),
            owner = %registry.owner(),
            events = history.len(),
            "Loaded registry state"
        );
        Ok(Deployment { registry, history })
    }

    pub fn save(&self, deployment: &Deployment) -> Result<(), StateError> {
        let file = StateFile {
            owner: deployment.registry.snapshot().owner,
            events: deployment.history.events().to_vec(),
        };
        let write_err = |source: io::Error| StateError::Write {
            path: self.path.clone(),
            source,
        };

        let mut bytes = serde_json::to_vec_pretty(&file).map_err(|e| write_err(e.into()))?;
        bytes.push(b'\n');

        self.create_parent().map_err(write_err)?;
        ownable_utils::atomic_write(&self.path, &bytes).map_err(write_err)
    }
}
