//! Show a post's comment thread.

use anyhow::Result;
use std::path::Path;

use echo_feed_types::PostId;

use crate::commands::{connect, surface};
use crate::render::render_comments;

/// Run the comments command.
pub async fn run(server: &str, data_dir: &Path, post_id: i64) -> Result<()> {
    let controller = connect(server, data_dir).await?;
    let post = PostId::new(post_id);

    let forest = match controller.load_comments(post).await {
        Ok(forest) => forest,
        Err(e) => return Err(surface(e, data_dir).await),
    };

    let count = echo_feed_core::tree::total(&forest);
    println!("Comments for post #{} ({} total):", post_id, count);
    println!();
    println!("{}", render_comments(&forest));
    Ok(())
}
