//! SQLite-backed durable vault.
//!
//! One `root_keys` table, primary-keyed on `(user_id, category)`, holds
//! every record. `INSERT OR IGNORE` inside an IMMEDIATE transaction gives
//! the first-write-wins guarantee the `KeyVault` contract requires:
//! competing writers serialize on the write lock, exactly one row is
//! committed, and every caller reads that row back before returning.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, TransactionBehavior};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::errors::{KeyfobError, Result};
use crate::vault::{KeyVault, RootKeyRecord};

/// Durable vault stored in a single SQLite file.
pub struct SqliteVault {
    conn: Mutex<Connection>,
}

impl SqliteVault {
    /// Open (or create) the vault database at `path`.
    ///
    /// Applies restrictive file permissions, configures the connection,
    /// and creates the schema if missing. A backend that cannot be opened
    /// or locked is fatal here, at process start, not per call.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Owner-only permissions on the database file.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(path, perms);
        }

        Self::configure_connection(&conn)?;
        Self::create_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory vault database (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure_connection(&conn)?;
        Self::create_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Configure SQLite pragmas.
    ///
    /// `synchronous = FULL` because a lost root key cannot be regenerated;
    /// `busy_timeout` bounds how long a write waits on a competing locker.
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = FULL;
             PRAGMA busy_timeout = 1000;",
        )?;
        Ok(())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS root_keys (
                user_id    BLOB NOT NULL,
                category   TEXT NOT NULL,
                root_key   BLOB NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, category)
            );",
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| KeyfobError::Storage("vault connection mutex poisoned".into()))
    }
}

impl KeyVault for SqliteVault {
    fn get(&self, user: Uuid, category: &str) -> Result<Zeroizing<Vec<u8>>> {
        let conn = self.lock()?;
        let result = conn.query_row(
            "SELECT root_key FROM root_keys WHERE user_id = ?1 AND category = ?2",
            params![user.as_bytes().as_slice(), category],
            |row| row.get::<_, Vec<u8>>(0),
        );

        match result {
            Ok(bytes) => Ok(Zeroizing::new(bytes)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(KeyfobError::RootKeyNotFound {
                user,
                category: category.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn insert_if_absent(
        &self,
        user: Uuid,
        category: &str,
        root_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        let mut conn = self.lock()?;

        // IMMEDIATE takes the write lock up front, so the insert and the
        // read-back observe the same committed state.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT OR IGNORE INTO root_keys (user_id, category, root_key, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.as_bytes().as_slice(),
                category,
                root_key,
                Utc::now().to_rfc3339()
            ],
        )?;

        let bytes: Vec<u8> = tx.query_row(
            "SELECT root_key FROM root_keys WHERE user_id = ?1 AND category = ?2",
            params![user.as_bytes().as_slice(), category],
            |row| row.get(0),
        )?;

        tx.commit()?;
        Ok(Zeroizing::new(bytes))
    }

    fn delete(&self, user: Uuid, category: &str) -> Result<()> {
        let conn = self.lock()?;
        // Zero rows affected means the record was already absent — fine.
        conn.execute(
            "DELETE FROM root_keys WHERE user_id = ?1 AND category = ?2",
            params![user.as_bytes().as_slice(), category],
        )?;
        Ok(())
    }

    fn list(&self, user: Uuid) -> Result<Vec<RootKeyRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT category, root_key, created_at FROM root_keys
             WHERE user_id = ?1
             ORDER BY category",
        )?;

        let rows = stmt.query_map(params![user.as_bytes().as_slice()], |row| {
            let ts_str: String = row.get(2)?;
            let created_at = DateTime::parse_from_rfc3339(&ts_str)
                .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

            Ok(RootKeyRecord {
                category: row.get(0)?,
                root_key: Zeroizing::new(row.get::<_, Vec<u8>>(1)?),
                created_at,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
