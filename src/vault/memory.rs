//! In-memory reference vault.
//!
//! A single mutex over a `HashMap` keyed by `(user, category)`. Coarser
//! locking than the SQLite backend needs, but the map is the reference
//! semantics for the `KeyVault` contract and what the service tests run
//! against.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::errors::{KeyfobError, Result};
use crate::vault::{KeyVault, RootKeyRecord};

/// Composite map key: one slot per (user, category) pair.
#[derive(PartialEq, Eq, Hash, Clone)]
struct RowKey {
    user: Uuid,
    category: String,
}

struct StoredRoot {
    root_key: Vec<u8>,
    created_at: DateTime<Utc>,
}

/// Mutex-guarded map vault. Suitable for tests and single-process
/// embedding; nothing survives a restart.
#[derive(Default)]
pub struct MemoryVault {
    keys: Mutex<HashMap<RowKey, StoredRoot>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored, across all users.
    pub fn record_count(&self) -> usize {
        self.keys.lock().map(|m| m.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<RowKey, StoredRoot>>> {
        self.keys
            .lock()
            .map_err(|_| KeyfobError::Storage("vault mutex poisoned".into()))
    }
}

impl KeyVault for MemoryVault {
    fn get(&self, user: Uuid, category: &str) -> Result<Zeroizing<Vec<u8>>> {
        let map = self.lock()?;
        let row = RowKey {
            user,
            category: category.to_string(),
        };
        match map.get(&row) {
            Some(stored) => Ok(Zeroizing::new(stored.root_key.clone())),
            None => Err(KeyfobError::RootKeyNotFound {
                user,
                category: category.to_string(),
            }),
        }
    }

    fn insert_if_absent(
        &self,
        user: Uuid,
        category: &str,
        root_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        let mut map = self.lock()?;
        let row = RowKey {
            user,
            category: category.to_string(),
        };
        let stored = map.entry(row).or_insert_with(|| StoredRoot {
            root_key: root_key.to_vec(),
            created_at: Utc::now(),
        });
        Ok(Zeroizing::new(stored.root_key.clone()))
    }

    fn delete(&self, user: Uuid, category: &str) -> Result<()> {
        let mut map = self.lock()?;
        let row = RowKey {
            user,
            category: category.to_string(),
        };
        map.remove(&row);
        Ok(())
    }

    fn list(&self, user: Uuid) -> Result<Vec<RootKeyRecord>> {
        let map = self.lock()?;
        let mut records: Vec<RootKeyRecord> = map
            .iter()
            .filter(|(row, _)| row.user == user)
            .map(|(row, stored)| RootKeyRecord {
                category: row.category.clone(),
                root_key: Zeroizing::new(stored.root_key.clone()),
                created_at: stored.created_at,
            })
            .collect();
        records.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_reflects_insert() {
        let vault = MemoryVault::new();
        let user = Uuid::new_v4();

        vault.insert_if_absent(user, "contact", &[0xAA; 32]).unwrap();

        let root = vault.get(user, "contact").unwrap();
        assert_eq!(*root, vec![0xAA; 32]);
    }

    #[test]
    fn first_write_wins() {
        let vault = MemoryVault::new();
        let user = Uuid::new_v4();

        let first = vault.insert_if_absent(user, "contact", &[0xAA; 32]).unwrap();
        let second = vault.insert_if_absent(user, "contact", &[0xBB; 32]).unwrap();

        assert_eq!(*first, vec![0xAA; 32]);
        assert_eq!(*second, vec![0xAA; 32], "later insert must not overwrite");
        assert_eq!(*vault.get(user, "contact").unwrap(), vec![0xAA; 32]);
    }

    #[test]
    fn missing_record_is_not_found() {
        let vault = MemoryVault::new();
        let result = vault.get(Uuid::new_v4(), "contact");
        assert!(matches!(result, Err(KeyfobError::RootKeyNotFound { .. })));
    }

    #[test]
    fn delete_is_idempotent() {
        let vault = MemoryVault::new();
        let user = Uuid::new_v4();

        vault.insert_if_absent(user, "contact", &[0xAA; 32]).unwrap();
        vault.delete(user, "contact").unwrap();
        // Second delete of the same (now absent) record also succeeds.
        vault.delete(user, "contact").unwrap();

        assert!(vault.get(user, "contact").is_err());
    }

    #[test]
    fn list_is_scoped_to_user_and_sorted() {
        let vault = MemoryVault::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        vault.insert_if_absent(user, "contact", &[0x01; 32]).unwrap();
        vault.insert_if_absent(user, "billing", &[0x02; 32]).unwrap();
        vault.insert_if_absent(other, "contact", &[0x03; 32]).unwrap();

        let records = vault.list(user).unwrap();
        let categories: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["billing", "contact"]);
    }

    #[test]
    fn list_unknown_user_is_empty() {
        let vault = MemoryVault::new();
        assert!(vault.list(Uuid::new_v4()).unwrap().is_empty());
    }
}
