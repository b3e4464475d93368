//! Fetch and print the feed.

use anyhow::Result;
use std::path::Path;

use crate::commands::{connect, surface};
use crate::render::render_feed;

/// Run the feed command.
///
/// Works anonymously; a saved session is attached when present so
/// the listing reflects the caller's own votes.
pub async fn run(server: &str, data_dir: &Path) -> Result<()> {
    let controller = connect(server, data_dir).await?;

    if let Err(e) = controller.refresh_feed().await {
        return Err(surface(e, data_dir).await);
    }

    println!("{}", render_feed(&controller.posts().await));
    Ok(())
}
