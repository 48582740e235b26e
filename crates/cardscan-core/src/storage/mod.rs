//! Persistence for sanitized contact records.

mod json_file;
mod memory;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

use std::cmp::Reverse;

use crate::error::StorageError;
use crate::models::contact::{ContactRecord, StoredContact};

/// Abstract interface for contact storage.
///
/// Only trusted [`ContactRecord`]s can be added; the store assigns identity
/// and creation time.
pub trait CardRepository: Send + Sync {
    /// Persist a record and return it with its assigned id.
    fn add(&self, contact: ContactRecord) -> Result<StoredContact, StorageError>;

    /// All stored records, newest first.
    fn list_all(&self) -> Result<Vec<StoredContact>, StorageError>;
}

impl<T: CardRepository + ?Sized> CardRepository for Box<T> {
    fn add(&self, contact: ContactRecord) -> Result<StoredContact, StorageError> {
        (**self).add(contact)
    }

    fn list_all(&self) -> Result<Vec<StoredContact>, StorageError> {
        (**self).list_all()
    }
}

/// Sort by creation time descending, newest id first on ties.
fn newest_first(records: &mut [StoredContact]) {
    records.sort_by_key(|r| Reverse((r.created_at, r.id)));
}
