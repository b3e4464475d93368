//! Canonical local state for the feed.
//!
//! One store holds everything the client knows: the post feed, each
//! post's lazily cached comment forest, and the leaderboard snapshot.
//! Refreshes are full replacements; the only incremental mutation is
//! the vote delta. Views render from this store and never keep
//! independent copies.

use std::collections::HashMap;

use echo_feed_types::{Comment, LeaderboardEntry, Post, PostId, VoteTarget};
use thiserror::Error;

use crate::tree;

/// Errors from store mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed post or comment is not in the store.
    #[error("unknown vote target: {0}")]
    UnknownTarget(VoteTarget),
}

/// Canonical client-side state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    posts: Vec<Post>,
    comments: HashMap<PostId, Vec<Comment>>,
    leaderboard: Vec<LeaderboardEntry>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the feed with a fresh server snapshot.
    pub fn set_feed(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    /// Replace one post's cached comment forest.
    pub fn set_comments(&mut self, post: PostId, forest: Vec<Comment>) {
        self.comments.insert(post, forest);
    }

    /// Replace the leaderboard snapshot. Server order is kept as-is;
    /// the client never re-sorts.
    pub fn set_leaderboard(&mut self, entries: Vec<LeaderboardEntry>) {
        self.leaderboard = entries;
    }

    /// Drop everything. Used on logout and session expiry.
    pub fn clear(&mut self) {
        self.posts.clear();
        self.comments.clear();
        self.leaderboard.clear();
    }

    /// The current feed, server order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Look up one post by id.
    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// A post's cached comment forest.
    ///
    /// `None` means never fetched (drives lazy loading); `Some` with an
    /// empty slice means fetched and the post has no comments.
    pub fn comments(&self, post: PostId) -> Option<&[Comment]> {
        self.comments.get(&post).map(Vec::as_slice)
    }

    /// The current leaderboard snapshot, server order.
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// Current vote fields of a target: `(user_has_liked, likes_count)`.
    pub fn vote_state(&self, target: VoteTarget) -> Option<(bool, u32)> {
        match target {
            VoteTarget::Post(id) => self.post(id).map(|p| (p.user_has_liked, p.likes_count)),
            VoteTarget::Comment(id) => self
                .comments
                .values()
                .find_map(|forest| tree::find(forest, id))
                .map(|c| (c.user_has_liked, c.likes_count)),
        }
    }

    /// Set a target's like flag and move its tally by one.
    ///
    /// `liked = true` increments, `liked = false` decrements. The
    /// decrement saturates at zero so the tally stays non-negative even
    /// against a confused caller. Comment targets are found at any
    /// nesting depth.
    pub fn apply_vote_delta(&mut self, target: VoteTarget, liked: bool) -> Result<(), StoreError> {
        match target {
            VoteTarget::Post(id) => {
                let post = self
                    .posts
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(StoreError::UnknownTarget(target))?;
                post.user_has_liked = liked;
                post.likes_count = adjust(post.likes_count, liked);
            }
            VoteTarget::Comment(id) => {
                let comment = self
                    .comments
                    .values_mut()
                    .find_map(|forest| tree::find_mut(forest, id))
                    .ok_or(StoreError::UnknownTarget(target))?;
                comment.user_has_liked = liked;
                comment.likes_count = adjust(comment.likes_count, liked);
            }
        }
        Ok(())
    }
}

fn adjust(count: u32, up: bool) -> u32 {
    if up {
        count.saturating_add(1)
    } else {
        count.saturating_sub(1)
    }
}
