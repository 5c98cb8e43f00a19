//! High-level key operations used by CLI commands and embedders.
//!
//! `KeyService` composes a `KeyVault` with the derivation engine so that
//! callers work with four simple operations: `get`, `get_or_create`,
//! `delete`, and `list`. The service itself is stateless — every call is
//! independent, all shared state lives in the vault — so one instance can
//! be shared freely across threads.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::crypto::{derive_key, generate_root_key, validate_service_key, DerivedKey};
use crate::errors::{KeyfobError, Result};
use crate::vault::KeyVault;

/// One entry in a `list` result: a category and the key derived for the
/// calling service within it.
pub struct DerivedKeyEntry {
    pub category: String,
    pub key: DerivedKey,
    /// When the underlying root key was first committed.
    pub created_at: DateTime<Utc>,
}

/// The key service. Wraps a vault and exposes the caller-facing
/// operations.
pub struct KeyService<V: KeyVault> {
    vault: V,
}

impl<V: KeyVault> KeyService<V> {
    pub fn new(vault: V) -> Self {
        Self { vault }
    }

    /// Access the underlying vault.
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Derive the calling service's key for an existing root key.
    ///
    /// Fails with `RootKeyNotFound` if no root key has been created for
    /// `(user, category)` — use `get_or_create` to provision one.
    pub fn get(&self, user: Uuid, category: &str, service_key: &[u8]) -> Result<DerivedKey> {
        Self::validate(category, service_key)?;

        let root = self.vault.get(user, category)?;
        derive_key(&root, service_key, category)
    }

    /// Derive the calling service's key, creating the root key first if
    /// none exists.
    ///
    /// On a miss, a fresh 32-byte root key is offered to the vault with
    /// `insert_if_absent`; the bytes the vault reports as committed are
    /// authoritative, so concurrent callers racing on a fresh pair all
    /// derive from the same root key — whichever writer won.
    pub fn get_or_create(
        &self,
        user: Uuid,
        category: &str,
        service_key: &[u8],
    ) -> Result<DerivedKey> {
        Self::validate(category, service_key)?;

        let root = match self.vault.get(user, category) {
            Ok(root) => root,
            Err(KeyfobError::RootKeyNotFound { .. }) => {
                let fresh = generate_root_key()?;
                self.vault.insert_if_absent(user, category, &fresh)?
            }
            Err(e) => return Err(e),
        };

        derive_key(&root, service_key, category)
    }

    /// Permanently delete the root key for `(user, category)`.
    ///
    /// Always succeeds, present or not. Every key previously derived from
    /// the deleted root becomes underivable; a later `get_or_create`
    /// commits an unrelated root key.
    pub fn delete(&self, user: Uuid, category: &str) -> Result<()> {
        if category.is_empty() {
            return Err(KeyfobError::EmptyCategory);
        }
        self.vault.delete(user, category)
    }

    /// Derive the calling service's key for every category the user has.
    ///
    /// A user with no root keys yields an empty list, not an error —
    /// listing is enumeration, not a lookup.
    pub fn list(&self, user: Uuid, service_key: &[u8]) -> Result<Vec<DerivedKeyEntry>> {
        validate_service_key(service_key)?;

        let records = self.vault.list(user)?;
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let key = derive_key(&record.root_key, service_key, &record.category)?;
            entries.push(DerivedKeyEntry {
                category: record.category,
                key,
                created_at: record.created_at,
            });
        }
        Ok(entries)
    }

    /// Input checks shared by the derivation paths.
    ///
    /// The service key floor is enforced here, before any vault access,
    /// so an underlong key can never cause a storage read or a root key
    /// creation.
    fn validate(category: &str, service_key: &[u8]) -> Result<()> {
        validate_service_key(service_key)?;
        if category.is_empty() {
            return Err(KeyfobError::EmptyCategory);
        }
        Ok(())
    }
}
