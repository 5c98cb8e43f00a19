//! `keyfob create` — derive a key, creating the root key if none exists.

use crate::cli::{decode_service_key, parse_user, vault_path, Cli};
use crate::errors::Result;
use crate::service::KeyService;
use crate::vault::SqliteVault;

/// Execute the `create` command.
///
/// Creating is idempotent: if a root key already exists for the pair,
/// the derived key is identical to what `get` would return.
pub fn execute(cli: &Cli, user: &str, category: &str, service_key: &str) -> Result<()> {
    let user = parse_user(user)?;
    let service_key = decode_service_key(service_key)?;

    let vault = SqliteVault::open(&vault_path(cli)?)?;
    let service = KeyService::new(vault);

    let key = service.get_or_create(user, category, &service_key)?;
    println!("{}", key.to_hex());

    Ok(())
}
