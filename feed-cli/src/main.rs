//! # feed-cli
//!
//! CLI frontend for the Echo feed engine.
//!
//! ## Commands
//!
//! - `register`: Create an account
//! - `login`: Log in and save the session
//! - `logout`: Drop the saved session
//! - `whoami`: Show the saved session
//! - `feed`: List posts
//! - `post`: Create a post
//! - `comments`: Show a post's comment thread
//! - `reply`: Comment on a post
//! - `vote`: Toggle a like on a post or comment
//! - `leaderboard`: Show the top voters of the last 24h
//!
//! ## Example
//!
//! ```bash
//! # Create an account and log in
//! feed-cli register ada
//! feed-cli login ada
//!
//! # Post and browse
//! feed-cli post "Hello, feed!"
//! feed-cli feed
//!
//! # Join a thread
//! feed-cli comments 1
//! feed-cli reply 1 "Nice post" --to 3
//!
//! # Vote
//! feed-cli vote post 1
//! feed-cli vote comment 3 --post 1
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::vote::VoteKind;
use commands::{comments, feed, leaderboard, login, logout, post, register, reply, vote, whoami};

/// CLI frontend for the Echo feed engine.
#[derive(Parser, Debug)]
#[command(name = "feed-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the backend API
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000/api/")]
    server: String,

    /// Data directory for the saved session
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account
    Register {
        /// Username for the new account
        username: String,

        /// Password (will prompt if not provided)
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Log in and save the session
    Login {
        /// Username to log in as
        username: String,

        /// Password (will prompt if not provided)
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Drop the saved session
    Logout,

    /// Show the saved session
    Whoami,

    /// List posts
    Feed,

    /// Create a post
    Post {
        /// Post content
        content: String,
    },

    /// Show a post's comment thread
    Comments {
        /// Id of the post
        post_id: i64,
    },

    /// Comment on a post
    Reply {
        /// Id of the post
        post_id: i64,

        /// Comment content
        content: String,

        /// Id of the comment to nest under (top-level if omitted)
        #[arg(long)]
        to: Option<i64>,
    },

    /// Toggle a like on a post or comment
    Vote {
        /// What kind of entity the vote lands on
        #[arg(value_enum)]
        kind: VoteKind,

        /// Id of the post or comment
        id: i64,

        /// Id of the comment's post (required for comment votes)
        #[arg(long)]
        post: Option<i64>,
    },

    /// Show the top voters of the last 24h
    Leaderboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing()?;

    // Determine data directory
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    // Ensure data directory exists and stays private (it holds the token)
    tokio::fs::create_dir_all(&data_dir)
        .await
        .context("Failed to create data directory")?;
    config::set_dir_permissions_0700(&data_dir).await?;

    match cli.command {
        Commands::Register { username, password } => {
            register::run(&cli.server, &username, password.as_deref()).await?;
        }
        Commands::Login { username, password } => {
            login::run(&cli.server, &data_dir, &username, password.as_deref()).await?;
        }
        Commands::Logout => {
            logout::run(&data_dir).await?;
        }
        Commands::Whoami => {
            whoami::run(&data_dir).await?;
        }
        Commands::Feed => {
            feed::run(&cli.server, &data_dir).await?;
        }
        Commands::Post { content } => {
            post::run(&cli.server, &data_dir, &content).await?;
        }
        Commands::Comments { post_id } => {
            comments::run(&cli.server, &data_dir, post_id).await?;
        }
        Commands::Reply {
            post_id,
            content,
            to,
        } => {
            reply::run(&cli.server, &data_dir, post_id, to, &content).await?;
        }
        Commands::Vote { kind, id, post } => {
            vote::run(&cli.server, &data_dir, kind, id, post).await?;
        }
        Commands::Leaderboard => {
            leaderboard::run(&cli.server, &data_dir).await?;
        }
    }

    Ok(())
}

/// Initialize tracing. Quiet by default; RUST_LOG overrides.
/// Logs go to stderr so they never mix with rendered output.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
}

/// Get the default data directory for feed-cli.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "echofeed", "feed-cli")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
