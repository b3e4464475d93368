//! Fetch and print the 24h leaderboard.

use anyhow::Result;
use std::path::Path;

use crate::commands::{connect, surface};
use crate::render::render_leaderboard;

/// Run the leaderboard command. Works anonymously.
pub async fn run(server: &str, data_dir: &Path) -> Result<()> {
    let controller = connect(server, data_dir).await?;

    if let Err(e) = controller.refresh_leaderboard().await {
        return Err(surface(e, data_dir).await);
    }

    println!("{}", render_leaderboard(&controller.leaderboard().await));
    Ok(())
}
