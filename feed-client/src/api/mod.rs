//! Backend abstraction for the Echo feed.
//!
//! This module provides a pluggable API layer with one method per REST
//! operation, so the controller can run against the real HTTP backend
//! or an in-memory mock.
//!
//! # Design
//!
//! The trait is stateless: the caller passes the bearer token (or
//! `None` for anonymous requests) on every call. Session bookkeeping
//! lives in the controller, not here.
//!
//! # Example
//!
//! ```ignore
//! let api = MockApi::new();
//! api.queue_posts(Ok(vec![]));
//! let posts = api.list_posts(None).await?;
//! ```

mod http;
mod mock;

pub use http::HttpApi;
pub use mock::{MockApi, RecordedCall};

use async_trait::async_trait;
use thiserror::Error;

use echo_feed_types::{
    AuthToken, Comment, CommentId, Credentials, LeaderboardEntry, Post, PostId, TokenGrant,
    VoteReceipt, VoteTarget,
};

/// API errors.
///
/// `Clone` so the mock can queue errors by value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401: missing, invalid or expired credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Non-2xx status with a server-supplied message.
    #[error("{0}")]
    Rejected(String),

    /// Non-2xx status without a usable message.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the wire format.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The configured base URL cannot address the endpoint.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// The REST operations the feed client performs.
///
/// `auth` is `None` for requests made without a session; the backend
/// serves anonymous reads with `user_has_liked` always false.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// POST `token/` - exchange credentials for a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<TokenGrant, ApiError>;

    /// POST `register/` - create an account. Does not log in.
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError>;

    /// GET `posts/` - the current feed page, server order.
    async fn list_posts(&self, auth: Option<&AuthToken>) -> Result<Vec<Post>, ApiError>;

    /// POST `posts/` - create a post.
    async fn create_post(&self, auth: &AuthToken, content: &str) -> Result<Post, ApiError>;

    /// GET `posts/{id}/comments/` - a post's comment forest, pre-nested.
    async fn list_comments(
        &self,
        auth: Option<&AuthToken>,
        post: PostId,
    ) -> Result<Vec<Comment>, ApiError>;

    /// POST `posts/{id}/comments/` - create a comment, nested when
    /// `parent` is set.
    async fn create_comment(
        &self,
        auth: &AuthToken,
        post: PostId,
        parent: Option<CommentId>,
        content: &str,
    ) -> Result<Comment, ApiError>;

    /// POST `vote/{id}/` - toggle a vote on a post or comment.
    async fn toggle_vote(
        &self,
        auth: &AuthToken,
        target: VoteTarget,
    ) -> Result<VoteReceipt, ApiError>;

    /// GET `leaderboard/` - top voters of the trailing 24h window.
    async fn leaderboard(
        &self,
        auth: Option<&AuthToken>,
    ) -> Result<Vec<LeaderboardEntry>, ApiError>;
}
