//! In-memory contact store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::{newest_first, CardRepository};
use crate::error::StorageError;
use crate::models::contact::{ContactId, ContactRecord, StoredContact};

/// Contact store kept in process memory. Ids start at 1.
///
/// Records are pushed whole, and a poisoned lock is recovered instead of
/// reported.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<StoredContact>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn records(&self) -> MutexGuard<'_, Vec<StoredContact>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CardRepository for MemoryRepository {
    fn add(&self, contact: ContactRecord) -> Result<StoredContact, StorageError> {
        let mut records = self.records();

        let stored = StoredContact {
            id: ContactId(records.len() as u64 + 1),
            created_at: Utc::now(),
            contact,
        };
        records.push(stored.clone());

        Ok(stored)
    }

    fn list_all(&self) -> Result<Vec<StoredContact>, StorageError> {
        let mut records = self.records().clone();
        newest_first(&mut records);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::contact::SafeText;

    fn named(name: &str) -> ContactRecord {
        ContactRecord {
            name: SafeText::sanitize(name),
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let repo = MemoryRepository::new();
        assert!(repo.is_empty());

        let first = repo.add(named("Jane Doe")).unwrap();
        let second = repo.add(ContactRecord::default()).unwrap();

        assert_eq!(first.id, ContactId(1));
        assert_eq!(second.id, ContactId(2));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_list_newest_first() {
        let repo = MemoryRepository::new();
        repo.add(named("First Person")).unwrap();
        repo.add(named("Second Person")).unwrap();
        repo.add(named("Third Person")).unwrap();

        let listed = repo.list_all().unwrap();
        let ids: Vec<u64> = listed.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(listed[0].contact.name(), Some("Third Person"));
    }

    #[test]
    fn test_poisoned_lock_keeps_records() {
        let repo = Arc::new(MemoryRepository::new());
        repo.add(named("Jane Doe")).unwrap();

        let writer = Arc::clone(&repo);
        let result = std::thread::spawn(move || {
            let guard = writer.records.lock().unwrap();
            if !guard.is_empty() {
                panic!("writer crashed while holding the lock");
            }
        })
        .join();
        assert!(result.is_err());
        assert!(repo.records.is_poisoned());

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list_all().unwrap().len(), 1);
        assert_eq!(repo.add(named("John Smith")).unwrap().id, ContactId(2));
    }
}
