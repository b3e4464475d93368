//! Request and response payloads for the REST backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{AuthToken, CommentId, VoteTarget};

/// Login / registration credentials.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Plaintext password, sent over TLS only.
    pub password: String,
}

impl Credentials {
    /// Build credentials from username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Don't leak the password in debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// Bearer token to attach to subsequent requests.
    pub access: AuthToken,
}

/// Body of a create-post request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPostBody {
    /// Post text.
    pub content: String,
}

/// Body of a create-comment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentBody {
    /// Comment text.
    pub content: String,
    /// Parent comment for a nested reply, `null` for top level.
    pub parent: Option<CommentId>,
}

/// Which table a vote toggle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Vote on a post.
    Post,
    /// Vote on a comment.
    Comment,
}

/// Body of a vote-toggle request.
///
/// The target id travels in the URL path; the body only disambiguates
/// which table the id belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteBody {
    /// `"post"` or `"comment"`.
    #[serde(rename = "type")]
    pub kind: TargetKind,
}

impl VoteBody {
    /// Build the body for a vote target.
    pub fn for_target(target: &VoteTarget) -> Self {
        let kind = match target {
            VoteTarget::Post(_) => TargetKind::Post,
            VoteTarget::Comment(_) => TargetKind::Comment,
        };
        Self { kind }
    }
}

/// Whether the backend ended the toggle with a vote present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteStatus {
    /// The toggle created a vote.
    Liked,
    /// The toggle removed an existing vote.
    Unliked,
}

impl VoteStatus {
    /// `true` when the server now holds an active vote.
    pub fn is_liked(&self) -> bool {
        matches!(self, Self::Liked)
    }
}

/// Response body of a vote toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VoteReceipt {
    /// Server-side outcome of the toggle.
    pub status: VoteStatus,
}

/// Error payload shapes the backend emits.
///
/// Registration failures use `{"error": ...}`; everything else follows
/// the framework default `{"detail": ...}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Registration-style message.
    #[serde(default)]
    pub error: Option<String>,
    /// Framework-default message.
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// The server-supplied message, whichever field carried it.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().or(self.detail.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PostId;

    #[test]
    fn vote_body_wire_shape() {
        let body = VoteBody::for_target(&VoteTarget::Post(PostId::new(3)));
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"type":"post"}"#);

        let body = VoteBody::for_target(&VoteTarget::Comment(CommentId::new(4)));
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"type":"comment"}"#
        );
    }

    #[test]
    fn vote_receipt_parses_both_statuses() {
        let liked: VoteReceipt = serde_json::from_str(r#"{"status":"liked"}"#).unwrap();
        assert!(liked.status.is_liked());
        let unliked: VoteReceipt = serde_json::from_str(r#"{"status":"unliked"}"#).unwrap();
        assert!(!unliked.status.is_liked());
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials::new("ada", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ada"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn new_comment_body_serializes_null_parent() {
        let body = NewCommentBody {
            content: "top level".into(),
            parent: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"content":"top level","parent":null}"#
        );
    }

    #[test]
    fn error_body_prefers_error_over_detail() {
        let both: ApiErrorBody =
            serde_json::from_str(r#"{"error":"taken","detail":"other"}"#).unwrap();
        assert_eq!(both.message(), Some("taken"));

        let detail_only: ApiErrorBody =
            serde_json::from_str(r#"{"detail":"not found"}"#).unwrap();
        assert_eq!(detail_only.message(), Some("not found"));

        let neither: ApiErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(neither.message(), None);
    }
}
