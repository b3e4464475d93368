//! # feed-client
//!
//! Client engine for the Echo feed: optimistic vote toggling with rollback,
//! lazily loaded comment threads, feed and leaderboard refresh, and session
//! handling against a REST backend.
//!
//! ## Features
//!
//! - **Optimistic votes**: toggles apply locally before the request is
//!   issued and revert on failure
//! - **API Abstraction**: pluggable backend seam (HTTP, mock)
//! - **Pure State**: uses feed-core for side-effect-free store and
//!   session logic
//!
//! ## Example
//!
//! ```ignore
//! use echo_feed_client::{FeedController, HttpApi};
//!
//! let api = HttpApi::new("http://127.0.0.1:8000/api/")?;
//! let controller = FeedController::new(api);
//!
//! controller.login("ada", "password").await?;
//! controller.toggle_vote(target).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod controller;

pub use api::{ApiError, FeedApi, HttpApi, MockApi, RecordedCall};
pub use controller::{FeedController, FeedError, ToggleOutcome};
