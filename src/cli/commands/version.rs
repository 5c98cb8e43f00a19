//! `keyfob version` — display the version.

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    println!("keyfob {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
