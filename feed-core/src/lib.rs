//! # feed-core
//!
//! Pure logic for the Echo feed client (no I/O, instant tests).
//!
//! This crate implements the local state and transition rules for the feed
//! without any network or disk I/O:
//! - [`EntityStore`] - canonical posts, comment forests, leaderboard
//! - [`VoteDelta`] - the two-phase optimistic vote toggle
//! - [`SessionState`] - login session state machine
//! - [`tree`] - comment forest traversal
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about state transitions
//!
//! The actual I/O (HTTP) is performed by `feed-client`, which drives these
//! types and interprets the actions produced by the session machine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;
pub mod store;
pub mod tree;
pub mod vote;

pub use session::{SessionAction, SessionEvent, SessionState};
pub use store::{EntityStore, StoreError};
pub use vote::VoteDelta;
