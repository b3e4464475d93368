//! Comment on a post, optionally nested under another comment.

use anyhow::Result;
use std::path::Path;

use echo_feed_types::{CommentId, PostId};

use crate::commands::{connect_authed, surface};
use crate::render::render_comments;

/// Run the reply command. Requires a saved session.
pub async fn run(
    server: &str,
    data_dir: &Path,
    post_id: i64,
    to: Option<i64>,
    content: &str,
) -> Result<()> {
    let controller = connect_authed(server, data_dir).await?;
    let post = PostId::new(post_id);

    if let Err(e) = controller
        .add_reply(post, to.map(CommentId::new), content)
        .await
    {
        return Err(surface(e, data_dir).await);
    }

    // add_reply refetched the thread, so this is a cache hit.
    let forest = match controller.load_comments(post).await {
        Ok(forest) => forest,
        Err(e) => return Err(surface(e, data_dir).await),
    };

    println!("Comment posted.");
    println!();
    println!("{}", render_comments(&forest));
    Ok(())
}
