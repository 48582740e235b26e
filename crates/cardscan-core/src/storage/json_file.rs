//! Contact store backed by a JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info};

use super::{newest_first, CardRepository};
use crate::error::StorageError;
use crate::models::contact::{ContactId, ContactRecord, StoredContact};

/// Contact store persisted as a JSON array.
///
/// The file is re-read on every call and every record is revalidated on
/// load, so a hand-edited file cannot smuggle untrusted values back in.
/// Writes go to a temporary file that is then renamed over the store.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    /// Open a store. A missing file is an empty store; a corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let records = load(&path)?;

        info!("Opened contact store {} ({} records)", path.display(), records.len());

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &[StoredContact]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        // Write to temp file, then rename for atomicity
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| io_error(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| io_error(&self.path, e))?;

        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

impl CardRepository for JsonFileRepository {
    fn add(&self, contact: ContactRecord) -> Result<StoredContact, StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut records = load(&self.path)?;

        let next_id = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
        let stored = StoredContact {
            id: ContactId(next_id),
            created_at: Utc::now(),
            contact,
        };

        records.push(stored.clone());
        self.persist(&records)?;

        Ok(stored)
    }

    fn list_all(&self) -> Result<Vec<StoredContact>, StorageError> {
        let mut records = load(&self.path)?;
        newest_first(&mut records);
        Ok(records)
    }
}

fn load(path: &Path) -> Result<Vec<StoredContact>, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content)
        .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)))
}

fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}
