//! Create a post.

use anyhow::Result;
use std::path::Path;

use crate::commands::{connect_authed, surface};
use crate::render::render_feed;

/// Run the post command. Requires a saved session.
pub async fn run(server: &str, data_dir: &Path, content: &str) -> Result<()> {
    let controller = connect_authed(server, data_dir).await?;

    let post = match controller.create_post(content).await {
        Ok(post) => post,
        Err(e) => return Err(surface(e, data_dir).await),
    };

    println!("Posted #{}.", post.id);
    println!();
    println!("{}", render_feed(&controller.posts().await));
    Ok(())
}
