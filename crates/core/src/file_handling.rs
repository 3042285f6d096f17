//! Reading and writing the commands file.
//!
//! The commands file is YAML: a mapping of tag to a list of
//! `{command, description}` records. [`StoreFile`] bootstraps a missing file,
//! refuses to touch a corrupt one, and writes through a temporary file in the
//! same directory that is renamed over the original.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::store::Store;

const FILE_DESCRIPTION: &str = "commands";
const LOCK_FILE_DESCRIPTION: &str = "commands lock";

/// How the commands file is locked for the duration of one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockMode {
    /// Read-only verbs; several readers may hold it at once.
    Shared,
    /// Verbs that save the store.
    Exclusive,
}

/// Advisory lock on the sidecar `<commands file>.lock`. Released on drop.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// The persistence gateway for a single commands file.
#[derive(Clone, Debug)]
pub struct StoreFile {
    path: PathBuf,
}

fn io_error(file_description: &str, path: &Path, original: std::io::Error) -> Error {
    Error::io_error(
        file_description.to_string(),
        path.display().to_string(),
        original,
    )
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| io_error("commands directory", parent, e)),
        _ => Ok(()),
    }
}

impl StoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut lock_path: OsString = self.path.clone().into_os_string();
        lock_path.push(".lock");
        PathBuf::from(lock_path)
    }

    /// Takes the advisory lock without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreLocked`] if another process holds a conflicting
    /// lock, or an IO error if the lock file cannot be opened.
    pub fn lock(&self, mode: LockMode) -> Result<StoreLock> {
        ensure_parent_dir(&self.path)?;

        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| io_error(LOCK_FILE_DESCRIPTION, &lock_path, e))?;

        let locked = match mode {
            LockMode::Shared => FileExt::try_lock_shared(&file),
            LockMode::Exclusive => FileExt::try_lock_exclusive(&file),
        };

        match locked {
            Ok(()) => {
                debug!("Acquired {mode:?} lock on `{}`", lock_path.display());
                Ok(StoreLock { file })
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(Error::StoreLocked(self.path.display().to_string()))
            }
            Err(e) => Err(io_error(LOCK_FILE_DESCRIPTION, &lock_path, e)),
        }
    }

    /// Loads the store, creating an empty commands file on first run.
    ///
    /// A file containing only whitespace is treated as an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the file is not a valid tag mapping,
    /// or an IO error if it cannot be read or created.
    pub fn load(&self) -> Result<Store> {
        if !self.path.exists() {
            info!(
                "No commands file at `{}`, creating an empty one",
                self.path.display()
            );
            let store = Store::new();
            self.save(&store)?;
            return Ok(store);
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| io_error(FILE_DESCRIPTION, &self.path, e))?;

        if contents.trim().is_empty() {
            warn!("Commands file `{}` is empty", self.path.display());
            return Ok(Store::new());
        }

        let mut store: Store = serde_yaml::from_str(&contents)
            .map_err(|e| Error::corrupt_store(self.path.display().to_string(), e))?;

        let pruned = store.prune_empty_tags();
        if pruned > 0 {
            warn!("Ignoring {pruned} tag(s) without commands");
        }

        debug!(
            "Loaded {} command(s) under {} tag(s)",
            store.command_count(),
            store.len()
        );

        Ok(store)
    }

    /// Writes the whole store through a temporary file that replaces the
    /// commands file only once it is fully written and synced.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written;
    /// the previous file is left as it was.
    pub fn save(&self, store: &Store) -> Result<()> {
        ensure_parent_dir(&self.path)?;

        let serialized = serde_yaml::to_string(store).map_err(|e| Error::Serialize {
            path: self.path.display().to_string(),
            original: e,
        })?;

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut temp_file = NamedTempFile::new_in(&directory)
            .map_err(|e| io_error("temporary commands", &directory, e))?;

        temp_file
            .write_all(serialized.as_bytes())
            .and_then(|()| temp_file.as_file().sync_all())
            .map_err(|e| io_error("temporary commands", temp_file.path(), e))?;

        temp_file
            .persist(&self.path)
            .map_err(|e| io_error(FILE_DESCRIPTION, &self.path, e.error))?;

        debug!("Saved commands file `{}`", self.path.display());
        Ok(())
    }
}
