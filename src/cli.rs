//! Command-line interface definitions for Backloggd Scrape.
//!
//! The two subcommands mirror the chat bot's commands: `user` looks up a
//! profile (joined with its review stats) and `review` renders one or more
//! review pages. Global options can also be set through environment
//! variables.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Backloggd Scrape application.
///
/// # Examples
///
/// ```sh
/// # Show a profile as a chat message
/// backloggd_scrape user bapanadavibes
///
/// # Dump two reviews as JSON
/// backloggd_scrape --json review \
///     https://www.backloggd.com/u/a/review/1/ \
///     https://www.backloggd.com/u/b/review/2/
///
/// # Use a settings file and save the JSON record
/// backloggd_scrape -c settings.yaml -o out.json user bapanadavibes
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long, global = true, env = "BACKLOGGD_CONFIG")]
    pub config: Option<String>,

    /// Site root used to build profile URLs
    #[arg(long, global = true, env = "BACKLOGGD_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "BACKLOGGD_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header for requests
    #[arg(long, global = true, env = "BACKLOGGD_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Print records as JSON instead of chat messages
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write the JSON record(s) to this file
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Display the profile of a Backloggd user
    User {
        /// ID of the user to display
        user_id: String,
    },
    /// Display one or more Backloggd reviews
    Review {
        /// Full URL(s) of the review page(s)
        #[arg(required = true)]
        urls: Vec<String>,

        /// How many reviews to fetch at once
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },
}
