//! `keyfob delete` — permanently remove a user's root key for a category.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{parse_user, vault_path, Cli};
use crate::errors::{KeyfobError, Result};
use crate::service::KeyService;
use crate::vault::SqliteVault;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, user: &str, category: &str, force: bool) -> Result<()> {
    let user = parse_user(user)?;

    // Unless --force is set, ask for confirmation before deleting.
    // Deletion is irreversible and orphans every key derived so far.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete the root key for user {user} in category '{category}'?"
            ))
            .default(false)
            .interact()
            .map_err(|e| KeyfobError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let vault = SqliteVault::open(&vault_path(cli)?)?;
    let service = KeyService::new(vault);

    service.delete(user, category)?;
    output::success(&format!("Deleted root key for category '{category}'"));

    Ok(())
}
