use thiserror::Error;
use uuid::Uuid;

/// All errors that can occur in Keyfob.
#[derive(Debug, Error)]
pub enum KeyfobError {
    // --- Derivation errors ---
    #[error("service key must be at least 128 bits (16 bytes)")]
    InvalidServiceKey,

    #[error("stored root key is shorter than 128 bits — vault record is corrupt")]
    CorruptRootKey,

    #[error("key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("root key generation failed: {0}")]
    KeyGenerationFailed(String),

    // --- Vault errors ---
    #[error("no root key for user {user} in category '{category}'")]
    RootKeyNotFound { user: Uuid, category: String },

    #[error("category cannot be empty")]
    EmptyCategory,

    #[error("storage error: {0}")]
    Storage(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("invalid user id '{0}' — expected a UUID")]
    InvalidUserId(String),

    #[error("invalid service key encoding: {0}")]
    InvalidServiceKeyEncoding(String),
}

impl From<rusqlite::Error> for KeyfobError {
    fn from(e: rusqlite::Error) -> Self {
        KeyfobError::Storage(e.to_string())
    }
}

/// Convenience type alias for Keyfob results.
pub type Result<T> = std::result::Result<T, KeyfobError>;
