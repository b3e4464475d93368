//! Toggle a like on a post or comment.

use anyhow::Result;
use clap::ValueEnum;
use std::path::Path;

use echo_feed_client::ToggleOutcome;
use echo_feed_types::{CommentId, PostId, VoteTarget};

use crate::commands::{connect_authed, surface};

/// What kind of entity the vote lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VoteKind {
    /// A top-level post.
    Post,
    /// A comment; needs `--post` for its thread.
    Comment,
}

/// Run the vote command. Requires a saved session.
///
/// The store has to hold the target before the toggle, so the command
/// first refreshes the feed (for posts) or loads the thread (for
/// comments) and then flips the vote.
pub async fn run(
    server: &str,
    data_dir: &Path,
    kind: VoteKind,
    id: i64,
    post: Option<i64>,
) -> Result<()> {
    if kind == VoteKind::Comment && post.is_none() {
        anyhow::bail!("Voting on a comment needs --post <id> for its thread");
    }

    let controller = connect_authed(server, data_dir).await?;

    let target = match kind {
        VoteKind::Post => {
            if let Err(e) = controller.refresh_feed().await {
                return Err(surface(e, data_dir).await);
            }
            VoteTarget::Post(PostId::new(id))
        }
        VoteKind::Comment => {
            let thread = PostId::new(post.unwrap_or_default());
            if let Err(e) = controller.load_comments(thread).await {
                return Err(surface(e, data_dir).await);
            }
            VoteTarget::Comment(CommentId::new(id))
        }
    };

    let outcome = match controller.toggle_vote(target).await {
        Ok(outcome) => outcome,
        Err(e) => return Err(surface(e, data_dir).await),
    };

    match outcome {
        ToggleOutcome::Confirmed { liked } => {
            let count = controller
                .vote_state(target)
                .await
                .map(|(_, count)| count)
                .unwrap_or_default();
            if liked {
                println!("Liked. Now {} like(s).", count);
            } else {
                println!("Unliked. Now {} like(s).", count);
            }
        }
        ToggleOutcome::RolledBack => {
            println!("Vote did not go through; nothing changed.");
        }
        ToggleOutcome::AlreadyPending => {
            println!("A vote for this target is already in flight.");
        }
    }
    Ok(())
}
