//! `keyfob get` — derive and print a key from an existing root key.

use crate::cli::{decode_service_key, parse_user, vault_path, Cli};
use crate::errors::Result;
use crate::service::KeyService;
use crate::vault::SqliteVault;

/// Execute the `get` command.
pub fn execute(cli: &Cli, user: &str, category: &str, service_key: &str) -> Result<()> {
    let user = parse_user(user)?;
    let service_key = decode_service_key(service_key)?;

    let vault = SqliteVault::open(&vault_path(cli)?)?;
    let service = KeyService::new(vault);

    // Print the derived key hex to stdout so it can be piped.
    let key = service.get(user, category, &service_key)?;
    println!("{}", key.to_hex());

    Ok(())
}
