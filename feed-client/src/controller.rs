//! FeedController - the main interface for the Echo feed engine.
//!
//! # Architecture
//!
//! FeedController drives the pure state in feed-core (entity store,
//! vote deltas, session machine) and performs the actual I/O through
//! the [`FeedApi`] seam:
//!
//! ```text
//! Frontend → FeedController → FeedApi → REST backend
//!                  ↓
//!             feed-core (pure state)
//! ```
//!
//! State lives behind async mutexes and is never locked across an API
//! await, so independent operations may overlap. Two same-target
//! overlaps are reined in: vote toggles are refused while one is in
//! flight (see [`FeedController::toggle_vote`]), and racing first
//! loads of one post's comments coalesce into a single fetch (see
//! [`FeedController::load_comments`]).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use echo_feed_core::{EntityStore, SessionAction, SessionEvent, SessionState, VoteDelta};
use echo_feed_types::{
    AuthToken, Comment, CommentId, Credentials, LeaderboardEntry, Post, PostId, VoteTarget,
};

use crate::api::{ApiError, FeedApi};

/// Controller errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Login rejected: wrong username or password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Login failed for another reason.
    #[error("login failed: {0}")]
    Auth(String),

    /// Registration failed; the message is the server's reason when it
    /// gave one.
    #[error("registration failed: {0}")]
    Registration(String),

    /// The stored token was rejected; session and cache were dropped.
    #[error("session expired, log in again")]
    SessionExpired,

    /// Operation requires a login.
    #[error("not logged in")]
    NotLoggedIn,

    /// The vote target is not in the locally loaded state.
    #[error("unknown vote target: {0}")]
    UnknownTarget(VoteTarget),

    /// API error on a surfaced path.
    #[error("api error: {0}")]
    Api(#[from] ApiError),
}

/// How a vote toggle settled.
///
/// Failures resolve to an outcome rather than an error: a failed like
/// simply snaps back, with nothing surfaced beyond a warn log. Callers
/// that want to react can branch on [`ToggleOutcome::RolledBack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The backend confirmed the toggle.
    Confirmed {
        /// The like flag after the toggle.
        liked: bool,
    },
    /// The request failed; the optimistic write was reverted.
    RolledBack,
    /// A toggle for this target is still in flight; nothing changed.
    AlreadyPending,
}

/// The main feed controller.
///
/// Owns the canonical store and the session, and orchestrates every
/// backend operation.
pub struct FeedController<A: FeedApi> {
    api: A,
    store: Arc<Mutex<EntityStore>>,
    session: Arc<Mutex<SessionState>>,
    votes_in_flight: Arc<Mutex<HashSet<VoteTarget>>>,
    comment_loads: Arc<Mutex<HashMap<PostId, Arc<Mutex<()>>>>>,
}

impl<A: FeedApi> FeedController<A> {
    /// Create a controller with no session.
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: Arc::new(Mutex::new(EntityStore::new())),
            session: Arc::new(Mutex::new(SessionState::new())),
            votes_in_flight: Arc::new(Mutex::new(HashSet::new())),
            comment_loads: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a controller resuming a persisted token.
    ///
    /// The token is presumed valid; the first [`Self::refresh_feed`]
    /// proves or disproves it.
    pub fn restore(api: A, token: AuthToken) -> Self {
        Self {
            api,
            store: Arc::new(Mutex::new(EntityStore::new())),
            session: Arc::new(Mutex::new(SessionState::resume(token))),
            votes_in_flight: Arc::new(Mutex::new(HashSet::new())),
            comment_loads: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if a session token is held.
    pub async fn is_logged_in(&self) -> bool {
        self.session.lock().await.is_logged_in()
    }

    /// The session token, for persistence at the application boundary.
    pub async fn session_token(&self) -> Option<AuthToken> {
        self.session.lock().await.token().cloned()
    }

    async fn require_token(&self) -> Result<AuthToken, FeedError> {
        self.session_token().await.ok_or(FeedError::NotLoggedIn)
    }

    /// Feed an event through the session machine and interpret its
    /// actions. `ClearCachedState` is handled here; `RefreshFeed` is
    /// returned to the caller, because refreshing can itself emit
    /// session events.
    async fn dispatch_session_event(&self, event: SessionEvent) -> Vec<SessionAction> {
        let actions = {
            let mut session = self.session.lock().await;
            let (new_state, actions) = session.clone().on_event(event);
            *session = new_state;
            actions
        };
        for action in &actions {
            if let SessionAction::ClearCachedState = action {
                self.store.lock().await.clear();
            }
        }
        actions
    }

    /// Log in and pull the first feed snapshot.
    ///
    /// A 401 means bad credentials. Refresh failures after a successful
    /// login are logged and swallowed: the session is established
    /// either way, and the next refresh fills the feed in.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), FeedError> {
        let credentials = Credentials::new(username, password);
        let grant = self.api.login(&credentials).await.map_err(|e| match e {
            ApiError::Unauthorized => FeedError::InvalidCredentials,
            ApiError::Rejected(msg) => FeedError::Auth(msg),
            other => FeedError::Auth(other.to_string()),
        })?;

        let actions = self
            .dispatch_session_event(SessionEvent::LoginSucceeded {
                token: grant.access,
            })
            .await;

        if actions.contains(&SessionAction::RefreshFeed) {
            if let Err(e) = self.refresh_feed().await {
                tracing::warn!("Post-login feed refresh failed: {}", e);
            }
        }
        Ok(())
    }

    /// Create an account. Does not log in; call [`Self::login`] after.
    ///
    /// The server's reason (e.g. a taken username) surfaces verbatim;
    /// failures without one get a generic retry message.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), FeedError> {
        let credentials = Credentials::new(username, password);
        self.api.register(&credentials).await.map_err(|e| match e {
            ApiError::Rejected(msg) => FeedError::Registration(msg),
            other => {
                tracing::warn!("Registration failed without a server message: {}", other);
                FeedError::Registration("try a different username".into())
            }
        })
    }

    /// Pull a fresh feed page and leaderboard, replacing local state.
    ///
    /// This is the session's expiry-detection point: a 401 from either
    /// call drops the session and every cached entity and surfaces
    /// [`FeedError::SessionExpired`]. 401s from other operations
    /// propagate as plain API errors.
    ///
    /// Works without a login too; the backend serves anonymous reads.
    pub async fn refresh_feed(&self) -> Result<(), FeedError> {
        let token = self.session_token().await;

        let posts = match self.api.list_posts(token.as_ref()).await {
            Ok(posts) => posts,
            Err(e) => return Err(self.fail_refresh(e).await),
        };
        let entries = match self.api.leaderboard(token.as_ref()).await {
            Ok(entries) => entries,
            Err(e) => return Err(self.fail_refresh(e).await),
        };

        let mut store = self.store.lock().await;
        store.set_feed(posts);
        store.set_leaderboard(entries);
        Ok(())
    }

    async fn fail_refresh(&self, error: ApiError) -> FeedError {
        if let ApiError::Unauthorized = error {
            tracing::info!("Session token rejected, dropping session");
            self.dispatch_session_event(SessionEvent::Unauthorized).await;
            FeedError::SessionExpired
        } else {
            FeedError::Api(error)
        }
    }

    /// Pull a fresh leaderboard snapshot.
    pub async fn refresh_leaderboard(&self) -> Result<(), FeedError> {
        let token = self.session_token().await;
        let entries = self.api.leaderboard(token.as_ref()).await?;
        self.store.lock().await.set_leaderboard(entries);
        Ok(())
    }

    /// Create a post, then pull a fresh feed so ordering stays
    /// authoritative (no local prepend).
    ///
    /// Creation failures surface; refresh failures after a successful
    /// create are logged only, since the post exists server-side and
    /// arrives with the next refresh.
    pub async fn create_post(&self, content: &str) -> Result<Post, FeedError> {
        let token = self.require_token().await?;
        let post = self.api.create_post(&token, content).await?;
        if let Err(e) = self.refresh_feed().await {
            tracing::warn!("Feed refresh after create failed: {}", e);
        }
        Ok(post)
    }

    /// A post's comment forest, fetching it on first access.
    ///
    /// One fetch per post: afterwards the cached forest is returned
    /// until a reply replaces it or the session ends. Racing loads of
    /// the same post coalesce, the loser waiting out the winner's
    /// fetch and reading the cache it filled.
    pub async fn load_comments(&self, post: PostId) -> Result<Vec<Comment>, FeedError> {
        // Loads of one post serialize on a per-post gate; only the
        // first of a racing pair reaches the network.
        let gate = {
            let mut loads = self.comment_loads.lock().await;
            Arc::clone(loads.entry(post).or_default())
        };
        let _held = gate.lock().await;

        {
            let store = self.store.lock().await;
            if let Some(cached) = store.comments(post) {
                return Ok(cached.to_vec());
            }
        }

        let token = self.session_token().await;
        let forest = self.api.list_comments(token.as_ref(), post).await?;
        self.store.lock().await.set_comments(post, forest.clone());
        Ok(forest)
    }

    /// Create a comment under a post, nested under `parent` when given,
    /// then refetch the whole forest so server-side nesting stays
    /// authoritative.
    ///
    /// Any failure surfaces and leaves the cached forest untouched.
    pub async fn add_reply(
        &self,
        post: PostId,
        parent: Option<CommentId>,
        content: &str,
    ) -> Result<(), FeedError> {
        let token = self.require_token().await?;
        self.api
            .create_comment(&token, post, parent, content)
            .await?;

        let forest = self.api.list_comments(Some(&token), post).await?;
        self.store.lock().await.set_comments(post, forest);
        Ok(())
    }

    /// Toggle the current user's vote on a post or comment.
    ///
    /// The store is updated before the request is issued, so the new
    /// state is visible immediately. On failure the write is reverted
    /// and the toggle resolves to [`ToggleOutcome::RolledBack`], with
    /// nothing surfaced beyond a warn log. A toggle for a target whose
    /// request is still outstanding is refused with
    /// [`ToggleOutcome::AlreadyPending`].
    pub async fn toggle_vote(&self, target: VoteTarget) -> Result<ToggleOutcome, FeedError> {
        let token = self.require_token().await?;

        {
            let mut in_flight = self.votes_in_flight.lock().await;
            if !in_flight.insert(target) {
                return Ok(ToggleOutcome::AlreadyPending);
            }
        }

        let outcome = self.toggle_vote_inner(&token, target).await;

        self.votes_in_flight.lock().await.remove(&target);
        outcome
    }

    async fn toggle_vote_inner(
        &self,
        token: &AuthToken,
        target: VoteTarget,
    ) -> Result<ToggleOutcome, FeedError> {
        // Phase one: capture the delta and apply it optimistically.
        let delta = {
            let mut store = self.store.lock().await;
            let delta = VoteDelta::toggle(&store, target)
                .map_err(|_| FeedError::UnknownTarget(target))?;
            delta
                .apply(&mut store)
                .map_err(|_| FeedError::UnknownTarget(target))?;
            delta
        };

        // Phase two: confirm with the backend, or revert.
        match self.api.toggle_vote(token, target).await {
            Ok(receipt) => {
                if receipt.status.is_liked() != delta.liked() {
                    tracing::warn!(
                        "Server vote state for {} disagrees with local toggle",
                        target
                    );
                }
                // Best-effort: the vote changed the 24h tallies.
                if let Err(e) = self.refresh_leaderboard().await {
                    tracing::debug!("Leaderboard refresh after vote failed: {}", e);
                }
                Ok(ToggleOutcome::Confirmed {
                    liked: delta.liked(),
                })
            }
            Err(e) => {
                tracing::warn!("Vote toggle for {} failed, rolling back: {}", target, e);
                let mut store = self.store.lock().await;
                if let Err(revert_err) = delta.revert(&mut store) {
                    tracing::warn!("Rollback for {} found no target: {}", target, revert_err);
                }
                Ok(ToggleOutcome::RolledBack)
            }
        }
    }

    /// Drop the session and all cached state.
    pub async fn logout(&self) {
        self.dispatch_session_event(SessionEvent::LogoutRequested)
            .await;
    }

    /// Snapshot of the current feed, server order.
    pub async fn posts(&self) -> Vec<Post> {
        self.store.lock().await.posts().to_vec()
    }

    /// Snapshot of the current leaderboard, server order.
    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.store.lock().await.leaderboard().to_vec()
    }

    /// Current vote fields of a target: `(user_has_liked, likes_count)`.
    pub async fn vote_state(&self, target: VoteTarget) -> Option<(bool, u32)> {
        self.store.lock().await.vote_state(target)
    }
}
