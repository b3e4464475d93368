//! # feed-types
//!
//! Wire format types for the Echo feed client.
//!
//! This crate provides the foundational types used across all echo-feed crates:
//! - [`PostId`], [`CommentId`], [`VoteTarget`] - Identity types
//! - [`Post`], [`Comment`], [`LeaderboardEntry`] - Feed entities
//! - [`AuthToken`], [`Credentials`], [`TokenGrant`] - Session material
//! - Request/response payloads for the REST backend

#![warn(missing_docs)]
#![warn(clippy::all)]

mod entities;
mod ids;
mod protocol;
mod token;

pub use entities::{Comment, LeaderboardEntry, Post};
pub use ids::{CommentId, PostId, VoteTarget};
pub use protocol::{
    ApiErrorBody, Credentials, NewCommentBody, NewPostBody, TargetKind, TokenGrant, VoteBody,
    VoteReceipt, VoteStatus,
};
pub use token::AuthToken;
