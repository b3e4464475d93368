//! Session state machine.
//!
//! This module provides a pure, side-effect-free state machine for the
//! login session. Events produce a new state plus a list of actions for
//! the caller (feed-client) to execute.
//!
//! Session death is immediate and non-retried: there is no refresh-token
//! flow, so any credential failure lands back in [`SessionState::LoggedOut`].

use echo_feed_types::AuthToken;

/// Login session state machine - NO I/O, just state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No valid token; only login and register are possible.
    LoggedOut,
    /// Holding a bearer token presumed valid.
    LoggedIn {
        /// The token attached to authenticated requests.
        token: AuthToken,
    },
}

impl SessionState {
    /// Create a new state machine in the LoggedOut state.
    pub fn new() -> Self {
        Self::LoggedOut
    }

    /// Resume a machine from a persisted token.
    ///
    /// The token is presumed valid until the backend says otherwise;
    /// the first 401 on a refresh lands back in LoggedOut.
    pub fn resume(token: AuthToken) -> Self {
        Self::LoggedIn { token }
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller is
    /// responsible for executing the returned actions.
    pub fn on_event(self, event: SessionEvent) -> (Self, Vec<SessionAction>) {
        match (self, event) {
            // From LoggedOut
            (Self::LoggedOut, SessionEvent::LoginSucceeded { token }) => {
                (Self::LoggedIn { token }, vec![SessionAction::RefreshFeed])
            }

            // From LoggedIn
            (Self::LoggedIn { .. }, SessionEvent::LogoutRequested) => {
                (Self::LoggedOut, vec![SessionAction::ClearCachedState])
            }
            (Self::LoggedIn { .. }, SessionEvent::Unauthorized) => {
                (Self::LoggedOut, vec![SessionAction::ClearCachedState])
            }
            // Re-login replaces the token
            (Self::LoggedIn { .. }, SessionEvent::LoginSucceeded { token }) => {
                (Self::LoggedIn { token }, vec![SessionAction::RefreshFeed])
            }

            // Invalid transitions - stay in current state
            (state, _) => (state, vec![]),
        }
    }

    /// The current token, if logged in.
    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            Self::LoggedIn { token } => Some(token),
            Self::LoggedOut => None,
        }
    }

    /// Check if currently logged in.
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events that can occur in the session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend accepted credentials and issued a token.
    LoginSucceeded {
        /// The freshly issued bearer token.
        token: AuthToken,
    },
    /// The user asked to log out.
    LogoutRequested,
    /// The backend rejected the session token on a feed refresh.
    Unauthorized,
}

/// Actions to be executed by the feed client.
///
/// These are instructions, not side effects. The client interprets
/// these and performs the actual I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Pull a fresh feed and leaderboard.
    RefreshFeed,
    /// Drop all cached entities.
    ClearCachedState,
}
