//! CLI command implementations.

pub mod comments;
pub mod feed;
pub mod leaderboard;
pub mod login;
pub mod logout;
pub mod post;
pub mod register;
pub mod reply;
pub mod vote;
pub mod whoami;

use std::path::Path;

use anyhow::{Context, Result};
use echo_feed_client::{ApiError, FeedController, FeedError, HttpApi};

use crate::config::SessionFile;

/// Build a controller, resuming the saved session when one exists.
/// Reads work anonymously, so a missing session is not an error here.
pub(crate) async fn connect(server: &str, data_dir: &Path) -> Result<FeedController<HttpApi>> {
    let api = HttpApi::new(server).context("Invalid server URL")?;
    match SessionFile::load(data_dir).await {
        Ok(session) => Ok(FeedController::restore(api, session.token)),
        Err(_) => Ok(FeedController::new(api)),
    }
}

/// Build a controller for a command that needs a login.
pub(crate) async fn connect_authed(
    server: &str,
    data_dir: &Path,
) -> Result<FeedController<HttpApi>> {
    let api = HttpApi::new(server).context("Invalid server URL")?;
    let session = SessionFile::load(data_dir).await?;
    Ok(FeedController::restore(api, session.token))
}

/// Wrap a controller error for display. A rejected token also drops the
/// saved session, so the next invocation starts logged out.
pub(crate) async fn surface(err: FeedError, data_dir: &Path) -> anyhow::Error {
    let stale = matches!(
        err,
        FeedError::SessionExpired | FeedError::Api(ApiError::Unauthorized)
    );
    if stale && SessionFile::exists(data_dir).await {
        if let Err(e) = SessionFile::clear(data_dir).await {
            tracing::warn!("Failed to remove stale session file: {}", e);
        }
        return anyhow::Error::new(FeedError::SessionExpired);
    }
    anyhow::Error::new(err)
}

/// Prompt for a password with echo suppression.
pub(crate) fn prompt_password(prompt: &str) -> Result<String> {
    let password = rpassword::prompt_password(prompt).context("Failed to read password")?;
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }
    Ok(password)
}
