//! Atomic I/O operations with file locking
//!
//! Every write goes to a hidden temporary file next to the destination and
//! is then renamed over it, so readers only ever observe the complete old
//! content or the complete new content.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;
use tracing::{debug, warn};

use crate::{Error, NormalizedPath, Result};

/// Tuning knobs for atomic writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to wait for the advisory lock (and for transient rename
    /// failures) before giving up.
    pub lock_timeout: Duration,
    /// Flush file contents and the directory entry to stable storage.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// Serializes writers and replaces files atomically.
///
/// Each writer owns its own mutex; the lock is held only across the
/// "write temp file + rename" critical section. An advisory `fs2` lock on a
/// `<file>.lock` sidecar additionally serializes writers in other processes.
#[derive(Debug, Default)]
pub struct AtomicWriter {
    lock: Mutex<()>,
    robustness: RobustnessConfig,
}

impl AtomicWriter {
    /// Create a writer with default robustness settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom robustness settings.
    pub fn with_robustness(robustness: RobustnessConfig) -> Self {
        Self {
            lock: Mutex::new(()),
            robustness,
        }
    }

    /// The robustness settings this writer was built with.
    pub fn robustness(&self) -> RobustnessConfig {
        self.robustness
    }

    /// Atomically replace `path` with `content`.
    pub fn write(&self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        self.write_with(path, |out| out.write_all(content))
    }

    /// Atomically replace `path` with whatever `fill` writes.
    ///
    /// `fill` streams into the temporary file. If it fails, or anything else
    /// fails before the rename, the destination is left untouched and the
    /// temporary file is removed.
    pub fn write_with<F>(&self, path: &NormalizedPath, fill: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
    {
        let native_path = path.to_native();

        if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        // Guard protects no data, so a poisoned lock is still usable.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let _file_lock = FileLock::acquire(path, self.robustness.lock_timeout)?;

        let temp_path = path.temp_sibling().to_native();

        if let Err(err) = write_temp(&temp_path, fill, self.robustness.enable_fsync) {
            discard_temp(&temp_path);
            return Err(err);
        }

        if let Err(err) = rename_with_retry(&temp_path, &native_path, self.robustness.lock_timeout)
        {
            discard_temp(&temp_path);
            return Err(Error::io(&native_path, err));
        }

        if self.robustness.enable_fsync {
            sync_parent_dir(&native_path);
        }

        debug!(path = %path, "Atomically replaced file");
        Ok(())
    }
}

/// Exclusive advisory lock on a sidecar file, released on drop.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &NormalizedPath, timeout: Duration) -> Result<Self> {
        let lock_path = path.lock_sibling().to_native();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| Error::io(&lock_path, e))?;

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(5))
            .with_max_interval(Duration::from_millis(100))
            .with_max_elapsed_time(Some(timeout))
            .build();

        backoff::retry(policy, || {
            file.try_lock_exclusive()
                .map_err(backoff::Error::transient)
        })
        .map_err(|_| Error::LockFailed {
            path: path.to_native(),
        })?;

        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!(error = %e, "Failed to release advisory lock");
        }
    }
}

fn write_temp<F>(temp_path: &Path, fill: F, fsync: bool) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    let mut writer = BufWriter::new(file);
    fill(&mut writer).map_err(|e| {
        if e.kind() == ErrorKind::InvalidData {
            Error::Serialize {
                path: temp_path.to_path_buf(),
                message: e.to_string(),
            }
        } else {
            Error::io(temp_path, e)
        }
    })?;

    let file = writer
        .into_inner()
        .map_err(|e| Error::io(temp_path, e.into_error()))?;

    if fsync {
        file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    }

    Ok(())
}

/// Rename, retrying transient sharing violations (virus scanners and
/// indexers briefly hold files open on Windows).
fn rename_with_retry(from: &Path, to: &Path, timeout: Duration) -> std::io::Result<()> {
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(10))
        .with_max_elapsed_time(Some(timeout))
        .build();

    backoff::retry(policy, || {
        fs::rename(from, to).map_err(|e| {
            if cfg!(windows) && e.kind() == ErrorKind::PermissionDenied {
                backoff::Error::transient(e)
            } else {
                backoff::Error::permanent(e)
            }
        })
    })
    .map_err(|e| match e {
        backoff::Error::Permanent(err) => err,
        backoff::Error::Transient { err, .. } => err,
    })
}

fn discard_temp(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %temp_path.display(), error = %e, "Could not remove temporary file"),
    }
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return;
    };
    if let Err(e) = File::open(parent).and_then(|dir| dir.sync_all()) {
        debug!(path = %parent.display(), error = %e, "Directory fsync failed");
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

/// Write content atomically to a file using the given robustness settings.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    AtomicWriter::with_robustness(config).write(path, content)
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically with default settings.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes(), RobustnessConfig::default())
}
