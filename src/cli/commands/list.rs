//! `keyfob list` — derive keys for every category a user has.

use serde_json::json;

use crate::cli::output;
use crate::cli::{decode_service_key, parse_user, vault_path, Cli};
use crate::errors::{KeyfobError, Result};
use crate::service::KeyService;
use crate::vault::SqliteVault;

/// Execute the `list` command.
pub fn execute(cli: &Cli, user: &str, service_key: &str, format: &str) -> Result<()> {
    let user = parse_user(user)?;
    let service_key = decode_service_key(service_key)?;

    let vault = SqliteVault::open(&vault_path(cli)?)?;
    let service = KeyService::new(vault);

    let entries = service.list(user, &service_key)?;

    match format {
        "table" => output::print_keys_table(&entries),
        "json" => {
            let items: Vec<_> = entries
                .iter()
                .map(|e| {
                    json!({
                        "category": e.category,
                        "key": e.key.to_hex(),
                        "created_at": e.created_at.to_rfc3339(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items).unwrap_or_default());
        }
        other => {
            return Err(KeyfobError::CommandFailed(format!(
                "unknown format '{other}' — supported: table, json"
            )));
        }
    }

    Ok(())
}
