//! Session persistence for feed-cli.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use echo_feed_types::AuthToken;

/// Saved login session.
///
/// Carries the bearer token, so the file is written with owner-only
/// permissions like any other credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    /// Bearer token from the last login.
    pub token: AuthToken,
    /// Username the token was issued to.
    pub username: String,
}

impl SessionFile {
    /// Create a session record.
    pub fn new(token: AuthToken, username: &str) -> Self {
        Self {
            token,
            username: username.to_string(),
        }
    }

    /// Load the saved session from a directory.
    pub async fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join("session.json");
        let contents = tokio::fs::read_to_string(&path)
            .await
            .context("Not logged in. Run 'feed-cli login <username>' first.")?;
        serde_json::from_str(&contents).context("Invalid session file")
    }

    /// Save the session to a directory.
    pub async fn save(&self, data_dir: &Path) -> Result<()> {
        let path = data_dir.join("session.json");
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&path, contents)
            .await
            .context("Failed to save session")?;
        set_file_permissions_0600(&path).await?;
        Ok(())
    }

    /// Check if a session is saved.
    pub async fn exists(data_dir: &Path) -> bool {
        data_dir.join("session.json").exists()
    }

    /// Remove the saved session. Missing file is fine.
    pub async fn clear(data_dir: &Path) -> Result<()> {
        let path = data_dir.join("session.json");
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove session file"),
        }
    }
}

/// Set file permissions to 0600 (owner read/write only) on Unix.
/// No-op on non-Unix platforms.
async fn set_file_permissions_0600(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .context("Failed to set file permissions")?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

/// Set directory permissions to 0700 (owner only) on Unix.
/// No-op on non-Unix platforms.
pub async fn set_dir_permissions_0700(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
            .await
            .context("Failed to set directory permissions")?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn session_roundtrip() {
        let dir = tempdir().unwrap();
        let session = SessionFile::new(AuthToken::new("tok-abc"), "ada");
        session.save(dir.path()).await.unwrap();

        let loaded = SessionFile::load(dir.path()).await.unwrap();
        assert_eq!(loaded.username, "ada");
        assert_eq!(loaded.token.reveal(), "tok-abc");
    }

    #[tokio::test]
    async fn load_without_session_errors() {
        let dir = tempdir().unwrap();
        let result = SessionFile::load(dir.path()).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Not logged in"));
    }

    #[tokio::test]
    async fn clear_removes_session() {
        let dir = tempdir().unwrap();
        let session = SessionFile::new(AuthToken::new("t"), "bob");
        session.save(dir.path()).await.unwrap();
        assert!(SessionFile::exists(dir.path()).await);

        SessionFile::clear(dir.path()).await.unwrap();
        assert!(!SessionFile::exists(dir.path()).await);
    }

    #[tokio::test]
    async fn clear_without_session_is_fine() {
        let dir = tempdir().unwrap();
        SessionFile::clear(dir.path()).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn session_file_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let session = SessionFile::new(AuthToken::new("secret"), "ada");
        session.save(dir.path()).await.unwrap();

        let path = dir.path().join("session.json");
        let perms = tokio::fs::metadata(&path).await.unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600, "file should be 0600");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn data_dir_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("feed-data");
        tokio::fs::create_dir_all(&data_dir).await.unwrap();
        set_dir_permissions_0700(&data_dir).await.unwrap();

        let perms = tokio::fs::metadata(&data_dir).await.unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o700, "dir should be 0700");
    }
}
