//! Atomic file write helpers.
//!
//! A registry state file must never be observed half-written: each CLI call is
//! one atomic unit, so the file either holds the state before the call or the
//! state after it. Writes go to a temp file in the same directory and are then
//! renamed over the target. On Windows, rename-over-existing fails, so we fall
//! back to backup-and-restore.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

/// Owner-only read/write on Unix.
#[cfg(unix)]
const STATE_FILE_MODE: u32 = 0o600;

/// Recover from an interrupted write by restoring `path.bak`.
///
/// If `path` is missing but its backup exists, a crash happened inside the
/// Windows backup-rename window of [`atomic_write`].
pub fn recover_bak_file(path: &Path) {
    let backup = path.with_extension("bak");
    if !path.exists() && backup.exists() {
        match fs::rename(&backup, path) {
            Ok(()) => {
                tracing::warn!(
                    path = %path.display(),
                    "Recovered .bak file from interrupted atomic write"
                );
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    "Failed to recover .bak file: {e}"
                );
            }
        }
    }
}

/// Replace `path` with `bytes`, synced to disk before the rename.
pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(STATE_FILE_MODE))?;
    }

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }

        let backup_path = path.with_extension("bak");
        let _ = fs::remove_file(&backup_path);
        fs::rename(path, &backup_path)?;

        if let Err(rename_err) = err.file.persist(path) {
            let _ = fs::rename(&backup_path, path);
            return Err(rename_err.error);
        }
        if let Err(e) = fs::remove_file(&backup_path) {
            tracing::warn!(
                path = %backup_path.display(),
                "Failed to remove .bak after atomic write: {e}"
            );
        }
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Atomic write persisted");
    Ok(())
}
