//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{KeyfobError, Result};

/// Keyfob CLI: derive per-service encryption keys from a local vault.
#[derive(Parser)]
#[command(
    name = "keyfob",
    about = "Per-service encryption key vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault database file (default: from .keyfob.toml, else keyfob.db)
    #[arg(long, global = true)]
    pub vault: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Derive a key, creating the user's root key if none exists
    Create {
        /// User UUID
        user: String,
        /// Category the key belongs to (e.g. contact, billing)
        category: String,
        /// Hex-encoded service key (min 16 bytes)
        #[arg(long, env = "KEYFOB_SERVICE_KEY", hide_env_values = true)]
        service_key: String,
    },

    /// Derive a key from an existing root key
    Get {
        /// User UUID
        user: String,
        /// Category the key belongs to
        category: String,
        /// Hex-encoded service key (min 16 bytes)
        #[arg(long, env = "KEYFOB_SERVICE_KEY", hide_env_values = true)]
        service_key: String,
    },

    /// Derive keys for every category a user has
    List {
        /// User UUID
        user: String,
        /// Hex-encoded service key (min 16 bytes)
        #[arg(long, env = "KEYFOB_SERVICE_KEY", hide_env_values = true)]
        service_key: String,
        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Permanently delete a user's root key for a category
    Delete {
        /// User UUID
        user: String,
        /// Category to delete
        category: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show version
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault database path: `--vault` flag first, then
/// `.keyfob.toml`, then the built-in default.
pub fn vault_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(ref path) = cli.vault {
        return Ok(PathBuf::from(path));
    }
    let settings = Settings::load_from_cwd()?;
    Ok(PathBuf::from(settings.vault_path))
}

/// Parse a user id argument into a `Uuid`.
pub fn parse_user(user: &str) -> Result<Uuid> {
    Uuid::parse_str(user).map_err(|_| KeyfobError::InvalidUserId(user.to_string()))
}

/// Decode a hex service key argument.
///
/// Returns `Zeroizing<Vec<u8>>` so the key is wiped from memory on drop.
/// Only the encoding is checked here — the length floor is enforced by
/// the service before any vault access.
pub fn decode_service_key(service_key: &str) -> Result<Zeroizing<Vec<u8>>> {
    let bytes =
        hex::decode(service_key).map_err(|e| KeyfobError::InvalidServiceKeyEncoding(e.to_string()))?;
    Ok(Zeroizing::new(bytes))
}
