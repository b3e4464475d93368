//! Create an account.

use anyhow::{Context, Result};

use echo_feed_client::{FeedController, HttpApi};

use crate::commands::prompt_password;

/// Run the register command. Does not log in.
pub async fn run(server: &str, username: &str, password: Option<&str>) -> Result<()> {
    let password = match password {
        Some(p) => p.to_string(),
        None => prompt_password("Choose a password: ")?,
    };

    let api = HttpApi::new(server).context("Invalid server URL")?;
    let controller = FeedController::new(api);
    controller.register(username, &password).await?;

    println!("Account created for {}.", username);
    println!();
    println!("Log in with: feed-cli login {}", username);

    Ok(())
}
