//! Vault module — durable root key storage.
//!
//! This module provides:
//! - The `KeyVault` storage contract (`KeyVault`, `RootKeyRecord`)
//! - An in-memory reference vault for tests and embedding (`memory`)
//! - The durable SQLite-backed vault used by the CLI (`sqlite`)

pub mod memory;
pub mod sqlite;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::errors::Result;

// Re-export the most commonly used items.
pub use memory::MemoryVault;
pub use sqlite::SqliteVault;

/// One stored root key, as returned by `KeyVault::list`.
pub struct RootKeyRecord {
    /// The category this root key belongs to.
    pub category: String,
    /// The stored root key bytes (zeroed on drop).
    pub root_key: Zeroizing<Vec<u8>>,
    /// When the root key was first committed.
    pub created_at: DateTime<Utc>,
}

/// Storage contract for root keys.
///
/// A vault maps `(user, category)` to exactly one root key. Records are
/// immutable once committed: `insert_if_absent` never overwrites, and the
/// only way to change a pair's key material is to delete the record and
/// let a later insert commit a fresh, unrelated key.
///
/// Implementations must make each operation atomic per record. Nothing
/// here requires serializing across different users or categories.
pub trait KeyVault: Send + Sync {
    /// Fetch the root key for `(user, category)`.
    ///
    /// Returns `RootKeyNotFound` if no record exists. Reflects the most
    /// recently committed insert for the pair.
    fn get(&self, user: Uuid, category: &str) -> Result<Zeroizing<Vec<u8>>>;

    /// Commit `root_key` for `(user, category)` unless a record already
    /// exists, and return the bytes now on record either way.
    ///
    /// First write wins: under concurrent calls for the same fresh pair,
    /// exactly one caller's bytes become durable and every caller gets
    /// those committed bytes back. Losing the race is not an error.
    fn insert_if_absent(
        &self,
        user: Uuid,
        category: &str,
        root_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>>;

    /// Remove the record for `(user, category)`, permanently.
    ///
    /// Deleting an absent record is a successful no-op.
    fn delete(&self, user: Uuid, category: &str) -> Result<()>;

    /// Return every record owned by `user`, sorted by category.
    ///
    /// A user with no records yields an empty vec, not an error.
    fn list(&self, user: Uuid) -> Result<Vec<RootKeyRecord>>;
}
