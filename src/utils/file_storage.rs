//! Directory-backed key-value backend

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::traits::*;
use crate::types::*;

/// Stores each key as `<root>/<key>.json`
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a crash mid-write leaves the previous payload intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open a storage directory, creating it if needed
    pub fn open(root: impl Into<PathBuf>) -> LoanResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            LoanError::Storage(format!("cannot create {}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> LoanResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(LoanError::Storage(format!(
                "key '{}' is not a valid storage key",
                key
            )));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> LoanResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LoanError::Storage(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> LoanResult<()> {
        let path = self.path_for(key)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).map_err(|e| {
            LoanError::Storage(format!("cannot write {}: {}", staging.display(), e))
        })?;
        fs::rename(&staging, &path).map_err(|e| {
            LoanError::Storage(format!("cannot replace {}: {}", path.display(), e))
        })?;
        debug!(key, bytes = value.len(), "persisted collection");
        Ok(())
    }

    fn remove(&self, key: &str) -> LoanResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(LoanError::Storage(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
