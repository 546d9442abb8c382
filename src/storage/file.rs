//! FileBackend - File-Per-Key Storage
//!
//! TigerStyle: Plain files, synchronous writes, no surprises.
//!
//! Each storage key maps to one file under a data directory. Values are
//! written whole; a failed write reports an error and leaves whatever
//! was on disk before (rename-free single write, so a torn write is
//! possible on power loss — accepted for a personal tracker).

use std::fs;
use std::path::{Path, PathBuf};

use super::backend::StorageBackend;
use super::error::StorageResult;

/// File extension for stored values.
const VALUE_FILE_EXT: &str = "json";

/// File-per-key storage backend rooted at a data directory.
#[derive(Debug)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `data_dir`, creating the directory if
    /// it does not exist.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn new(data_dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(data_dir)?;
        tracing::debug!(data_dir = %data_dir.display(), "opened file backend");
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Directory this backend stores files under.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Map a storage key to its file path.
    ///
    /// Characters outside `[A-Za-z0-9._-]` become `-`, so keys like
    /// `fittrack:activities` land in `fittrack-activities.json`.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.data_dir.join(format!("{name}.{VALUE_FILE_EXT}"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn erase(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
