use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{KeyfobError, Result};

/// Project-level configuration, loaded from `.keyfob.toml`.
///
/// Every field has a sensible default so Keyfob works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the vault database file (relative paths resolve against
    /// the working directory).
    #[serde(default = "default_vault_path")]
    pub vault_path: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_path() -> String {
    "keyfob.db".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: default_vault_path(),
        }
    }
}

impl Settings {
    /// Load settings from the given config file.
    ///
    /// A missing file yields defaults; a malformed file is an error so a
    /// typo never silently points commands at the wrong vault.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| KeyfobError::ConfigError(format!("failed to parse {}: {e}", path.display())))
    }

    /// Load settings from `.keyfob.toml` in the current directory.
    pub fn load_from_cwd() -> Result<Self> {
        Self::load_or_default(Path::new(".keyfob.toml"))
    }
}
