//! Drop the saved session.

use anyhow::Result;
use std::path::Path;

use crate::config::SessionFile;

/// Run the logout command. Purely local: the backend keeps no session
/// state, dropping the token is the whole logout.
pub async fn run(data_dir: &Path) -> Result<()> {
    if !SessionFile::exists(data_dir).await {
        println!("Not logged in.");
        return Ok(());
    }

    SessionFile::clear(data_dir).await?;
    println!("Logged out.");
    Ok(())
}
