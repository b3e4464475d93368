//! Plain-text rendering of feed state.
//!
//! Pure string builders, so output is testable without capturing stdout.
//! Empty-state wording matches the web frontend.

use chrono::{DateTime, Utc};
use echo_feed_core::tree;
use echo_feed_types::{Comment, LeaderboardEntry, Post};

/// Render the feed in server order.
pub fn render_feed(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "No posts yet. Be the first to create one!".to_string();
    }
    let mut lines = Vec::new();
    for post in posts {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!(
            "#{}  {}  ({})",
            post.id.value(),
            post.author,
            relative_time(post.created_at)
        ));
        for line in post.content.lines() {
            lines.push(format!("    {line}"));
        }
        lines.push(format!(
            "    {}",
            like_line(post.likes_count, post.user_has_liked)
        ));
    }
    lines.join("\n")
}

/// Render a comment forest as an indented thread, pre-order.
pub fn render_comments(forest: &[Comment]) -> String {
    if forest.is_empty() {
        return "No comments yet.".to_string();
    }
    let mut lines = Vec::new();
    tree::walk(forest, &mut |comment, depth| {
        let pad = "    ".repeat(depth);
        lines.push(format!(
            "{}#{}  {}  ({})",
            pad,
            comment.id.value(),
            comment.author,
            relative_time(comment.created_at)
        ));
        for line in comment.content.lines() {
            lines.push(format!("{pad}    {line}"));
        }
        lines.push(format!(
            "{}    {}",
            pad,
            like_line(comment.likes_count, comment.user_has_liked)
        ));
    });
    lines.join("\n")
}

/// Render the 24h voter leaderboard in server order.
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No activity in the last 24h".to_string();
    }
    let mut lines = vec!["Top voters (last 24h):".to_string()];
    for (rank, entry) in entries.iter().enumerate() {
        lines.push(format!("  {}. {}  {} point(s)", rank + 1, entry.voter, entry.score));
    }
    lines.join("\n")
}

fn like_line(likes: u32, liked: bool) -> String {
    if liked {
        format!("{} like(s) [liked]", likes)
    } else {
        format!("{} like(s)", likes)
    }
}

/// Format a timestamp relative to now, coarsely.
fn relative_time(created_at: DateTime<Utc>) -> String {
    let diff = Utc::now()
        .signed_duration_since(created_at)
        .num_seconds()
        .max(0) as u64;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        format!("{} minutes ago", diff / 60)
    } else if diff < 86400 {
        format!("{} hours ago", diff / 3600)
    } else {
        format!("{} days ago", diff / 86400)
    }
}
