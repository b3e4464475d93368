//! Mock API for testing.
//!
//! Allows queueing per-endpoint responses and capturing calls for
//! verification. A vote gate can hold toggle requests open so tests
//! can observe optimistic state while a request is in flight; a
//! comment gate holds forest fetches open the same way.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use echo_feed_types::{
    AuthToken, Comment, CommentId, Credentials, LeaderboardEntry, Post, PostId, TokenGrant,
    VoteReceipt, VoteTarget,
};

use super::{ApiError, FeedApi};

/// A call recorded by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `login` with this username.
    Login {
        /// Username from the credentials.
        username: String,
    },
    /// `register` with this username.
    Register {
        /// Username from the credentials.
        username: String,
    },
    /// `list_posts`, with or without a token.
    ListPosts {
        /// Whether a token was attached.
        authed: bool,
    },
    /// `create_post` with this content.
    CreatePost {
        /// Post body text.
        content: String,
    },
    /// `list_comments` for this post.
    ListComments {
        /// The post whose forest was requested.
        post: PostId,
    },
    /// `create_comment` with these arguments.
    CreateComment {
        /// The post commented on.
        post: PostId,
        /// Parent comment for nested replies.
        parent: Option<CommentId>,
        /// Comment body text.
        content: String,
    },
    /// `toggle_vote` on this target.
    ToggleVote {
        /// The addressed target.
        target: VoteTarget,
    },
    /// `leaderboard`.
    Leaderboard,
}

/// Mock API for testing.
///
/// Responses are queued per endpoint and consumed in order; an empty
/// queue yields a network error naming the endpoint. `Clone` shares
/// state, so a test can keep one handle while the controller owns the
/// other.
#[derive(Debug, Default)]
pub struct MockApi {
    inner: Arc<Mutex<MockApiInner>>,
}

#[derive(Debug, Default)]
struct MockApiInner {
    calls: Vec<RecordedCall>,
    login_queue: VecDeque<Result<TokenGrant, ApiError>>,
    register_queue: VecDeque<Result<(), ApiError>>,
    posts_queue: VecDeque<Result<Vec<Post>, ApiError>>,
    create_post_queue: VecDeque<Result<Post, ApiError>>,
    comments_queue: VecDeque<Result<Vec<Comment>, ApiError>>,
    create_comment_queue: VecDeque<Result<Comment, ApiError>>,
    vote_queue: VecDeque<Result<VoteReceipt, ApiError>>,
    leaderboard_queue: VecDeque<Result<Vec<LeaderboardEntry>, ApiError>>,
    vote_gate: Option<Arc<Semaphore>>,
    comment_gate: Option<Arc<Semaphore>>,
}

fn take<T>(queue: &mut VecDeque<Result<T, ApiError>>, endpoint: &str) -> Result<T, ApiError> {
    queue.pop_front().unwrap_or_else(|| {
        Err(ApiError::Network(format!(
            "no mock response queued for {endpoint}"
        )))
    })
}

impl MockApi {
    /// Create a new mock API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next `login` result.
    pub fn queue_login(&self, result: Result<TokenGrant, ApiError>) {
        self.inner.lock().unwrap().login_queue.push_back(result);
    }

    /// Queue the next `register` result.
    pub fn queue_register(&self, result: Result<(), ApiError>) {
        self.inner.lock().unwrap().register_queue.push_back(result);
    }

    /// Queue the next `list_posts` result.
    pub fn queue_posts(&self, result: Result<Vec<Post>, ApiError>) {
        self.inner.lock().unwrap().posts_queue.push_back(result);
    }

    /// Queue the next `create_post` result.
    pub fn queue_create_post(&self, result: Result<Post, ApiError>) {
        self.inner
            .lock()
            .unwrap()
            .create_post_queue
            .push_back(result);
    }

    /// Queue the next `list_comments` result.
    pub fn queue_comments(&self, result: Result<Vec<Comment>, ApiError>) {
        self.inner.lock().unwrap().comments_queue.push_back(result);
    }

    /// Queue the next `create_comment` result.
    pub fn queue_create_comment(&self, result: Result<Comment, ApiError>) {
        self.inner
            .lock()
            .unwrap()
            .create_comment_queue
            .push_back(result);
    }

    /// Queue the next `toggle_vote` result.
    pub fn queue_vote(&self, result: Result<VoteReceipt, ApiError>) {
        self.inner.lock().unwrap().vote_queue.push_back(result);
    }

    /// Queue the next `leaderboard` result.
    pub fn queue_leaderboard(&self, result: Result<Vec<LeaderboardEntry>, ApiError>) {
        self.inner
            .lock()
            .unwrap()
            .leaderboard_queue
            .push_back(result);
    }

    /// Get all recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Get the most recent recorded call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.inner.lock().unwrap().calls.last().cloned()
    }

    /// Hold every subsequent `toggle_vote` open until released.
    ///
    /// The call is recorded immediately; only its completion waits.
    pub fn hold_votes(&self) {
        self.inner.lock().unwrap().vote_gate = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let one held `toggle_vote` proceed.
    pub fn release_vote(&self) {
        if let Some(gate) = &self.inner.lock().unwrap().vote_gate {
            gate.add_permits(1);
        }
    }

    /// Hold every subsequent `list_comments` open until released.
    ///
    /// The call is recorded immediately; only its completion waits.
    pub fn hold_comment_loads(&self) {
        self.inner.lock().unwrap().comment_gate = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let one held `list_comments` proceed.
    pub fn release_comment_load(&self) {
        if let Some(gate) = &self.inner.lock().unwrap().comment_gate {
            gate.add_permits(1);
        }
    }

    /// Clear all state (queues, recorded calls, gates).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockApiInner::default();
    }
}

impl Clone for MockApi {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl FeedApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> Result<TokenGrant, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall::Login {
            username: credentials.username.clone(),
        });
        take(&mut inner.login_queue, "login")
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall::Register {
            username: credentials.username.clone(),
        });
        take(&mut inner.register_queue, "register")
    }

    async fn list_posts(&self, auth: Option<&AuthToken>) -> Result<Vec<Post>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall::ListPosts {
            authed: auth.is_some(),
        });
        take(&mut inner.posts_queue, "list_posts")
    }

    async fn create_post(&self, _auth: &AuthToken, content: &str) -> Result<Post, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall::CreatePost {
            content: content.to_string(),
        });
        take(&mut inner.create_post_queue, "create_post")
    }

    async fn list_comments(
        &self,
        _auth: Option<&AuthToken>,
        post: PostId,
    ) -> Result<Vec<Comment>, ApiError> {
        // Record before waiting so tests can see the request in flight.
        let gate = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(RecordedCall::ListComments { post });
            inner.comment_gate.clone()
        };
        if let Some(gate) = gate {
            let permit = gate.acquire().await.expect("comment gate closed");
            permit.forget();
        }
        let mut inner = self.inner.lock().unwrap();
        take(&mut inner.comments_queue, "list_comments")
    }

    async fn create_comment(
        &self,
        _auth: &AuthToken,
        post: PostId,
        parent: Option<CommentId>,
        content: &str,
    ) -> Result<Comment, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall::CreateComment {
            post,
            parent,
            content: content.to_string(),
        });
        take(&mut inner.create_comment_queue, "create_comment")
    }

    async fn toggle_vote(
        &self,
        _auth: &AuthToken,
        target: VoteTarget,
    ) -> Result<VoteReceipt, ApiError> {
        // Record before waiting so tests can see the request in flight.
        let gate = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(RecordedCall::ToggleVote { target });
            inner.vote_gate.clone()
        };
        if let Some(gate) = gate {
            let permit = gate.acquire().await.expect("vote gate closed");
            permit.forget();
        }
        let mut inner = self.inner.lock().unwrap();
        take(&mut inner.vote_queue, "toggle_vote")
    }

    async fn leaderboard(
        &self,
        _auth: Option<&AuthToken>,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall::Leaderboard);
        take(&mut inner.leaderboard_queue, "leaderboard")
    }
}
