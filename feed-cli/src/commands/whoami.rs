//! Show the saved session.

use anyhow::Result;
use std::path::Path;

use crate::config::SessionFile;

/// Run the whoami command. Local only, never talks to the backend.
pub async fn run(data_dir: &Path) -> Result<()> {
    match SessionFile::load(data_dir).await {
        Ok(session) => println!("Logged in as {}.", session.username),
        Err(_) => println!("Not logged in."),
    }
    Ok(())
}
