//! Bearer token handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An opaque bearer token issued by the backend at login.
///
/// The token authorizes every subsequent request, so it is treated as
/// secret material: zeroed on drop, redacted in debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for building the Authorization header.
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

// Don't leak the token in debug output
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("eyJhbGciOiJIUzI1NiJ9.secret");
        let debug = format!("{:?}", token);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn token_reveal_returns_raw() {
        let token = AuthToken::new("abc123");
        assert_eq!(token.reveal(), "abc123");
    }

    #[test]
    fn token_serializes_as_bare_string() {
        let token = AuthToken::new("tok");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"tok\"");
    }
}
