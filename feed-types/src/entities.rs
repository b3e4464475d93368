//! Feed entities as the backend serializes them.
//!
//! Field names follow the wire format exactly (via serde renames where
//! the Rust name differs), so these types double as the JSON schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CommentId, PostId};

/// A top-level post in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier.
    pub id: PostId,
    /// Author's username (wire name `author_username`).
    #[serde(rename = "author_username")]
    pub author: String,
    /// Body text.
    pub content: String,
    /// Creation timestamp, server clock.
    pub created_at: DateTime<Utc>,
    /// Current like tally. Non-negative by construction.
    pub likes_count: u32,
    /// Whether the requesting user has an active like on this post.
    pub user_has_liked: bool,
}

/// A comment, possibly nested under another comment.
///
/// The backend delivers each post's comments as a pre-nested forest:
/// top-level comments carry their descendants in `replies`. The client
/// only traverses the forest, never rebuilds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Server-assigned identifier.
    pub id: CommentId,
    /// Author's username (wire name `author_username`).
    #[serde(rename = "author_username")]
    pub author: String,
    /// Body text.
    pub content: String,
    /// Creation timestamp, server clock.
    pub created_at: DateTime<Utc>,
    /// Current like tally. Non-negative by construction.
    pub likes_count: u32,
    /// Whether the requesting user has an active like on this comment.
    pub user_has_liked: bool,
    /// Parent comment, `None` for a direct reply to the post.
    pub parent: Option<CommentId>,
    /// Nested replies. Create responses omit the field.
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// One row of the trailing-24h voter leaderboard.
///
/// The wire name `voter__username` is the backend's ORM projection,
/// preserved as-is. Scores are weighted vote counts; weighting and
/// ordering are entirely server-side and the client treats both as
/// opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Username of the voter (wire name `voter__username`).
    #[serde(rename = "voter__username")]
    pub voter: String,
    /// Weighted vote count for the window.
    pub score: u32,
}
