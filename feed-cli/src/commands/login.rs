//! Log in and save the session.

use anyhow::{Context, Result};
use std::path::Path;

use echo_feed_client::{FeedController, HttpApi};

use crate::commands::prompt_password;
use crate::config::SessionFile;

/// Run the login command.
pub async fn run(
    server: &str,
    data_dir: &Path,
    username: &str,
    password: Option<&str>,
) -> Result<()> {
    let password = match password {
        Some(p) => p.to_string(),
        None => prompt_password("Password: ")?,
    };

    // A fresh login always replaces any saved session.
    let api = HttpApi::new(server).context("Invalid server URL")?;
    let controller = FeedController::new(api);
    controller.login(username, &password).await?;

    let token = controller
        .session_token()
        .await
        .context("Login succeeded but returned no token")?;
    SessionFile::new(token, username).save(data_dir).await?;

    println!("Logged in as {}.", username);
    println!();
    println!("Next steps:");
    println!("  1. See the feed:   feed-cli feed");
    println!("  2. Create a post:  feed-cli post \"Hello!\"");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_refresh(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/posts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/leaderboard/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn login_saves_session() {
        let dir = tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "tok-1"})))
            .mount(&server)
            .await;
        mock_refresh(&server).await;

        run(&server.uri(), dir.path(), "ada", Some("pw"))
            .await
            .unwrap();

        let session = SessionFile::load(dir.path()).await.unwrap();
        assert_eq!(session.username, "ada");
        assert_eq!(session.token.reveal(), "tok-1");
    }

    #[tokio::test]
    async fn bad_credentials_leave_no_session() {
        let dir = tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "No active account found"})),
            )
            .mount(&server)
            .await;

        let err = run(&server.uri(), dir.path(), "ada", Some("wrong"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("invalid username or password"));
        assert!(!SessionFile::exists(dir.path()).await);
    }

    #[tokio::test]
    async fn unreachable_server_fails() {
        let dir = tempdir().unwrap();
        let result = run("http://127.0.0.1:1/api/", dir.path(), "ada", Some("pw")).await;
        assert!(result.is_err());
        assert!(!SessionFile::exists(dir.path()).await);
    }
}
