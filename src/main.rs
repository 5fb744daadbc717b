//! # Backloggd Scrape
//!
//! Retrieves public profile and review pages from
//! [Backloggd](https://www.backloggd.com), extracts structured records from
//! their HTML, and renders them the way the chat bot presents them.
//!
//! ## Usage
//!
//! ```sh
//! backloggd_scrape user bapanadavibes
//! backloggd_scrape --json review https://www.backloggd.com/u/someone/review/123/
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: Download page markup through a `DocumentFetcher`
//! 2. **Extraction**: Read each field with a fixed selector table; the first
//!    missing or malformed field fails the page
//! 3. **Join**: For user lookups, the profile and reviews pages run as two
//!    concurrent pipelines and are merged into one record
//! 4. **Output**: Print a chat message or JSON, optionally saving the JSON

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::{Cli, Command};
use config::Settings;
use error::ScrapeError;
use models::Review;
use outputs::{json, message};
use scrapers::fetch::{HttpFetcher, Site};
use scrapers::lookup::lookup_user;
use scrapers::scrape_review;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr; stdout carries the rendered output) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = Settings::load(&args).await?;
    info!(base_url = %settings.base_url, timeout_secs = settings.timeout_secs, "Settings loaded");

    let site = Site::new(&settings.base_url)?;
    let fetcher = HttpFetcher::new(&settings)?;

    let outcome = match &args.command {
        Command::User { user_id } => run_user(&args, &fetcher, &site, user_id).await,
        Command::Review { urls, concurrency } => {
            run_reviews(&args, &fetcher, urls, *concurrency).await
        }
    };

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");

    if let Err(e) = outcome {
        error!(error = %e, "Command failed");
        eprintln!("{}", failure_message(&*e));
        std::process::exit(1);
    }
    Ok(())
}

/// `user <id>`: join the profile and review stats, then print them.
#[instrument(level = "info", skip(args, fetcher, site))]
async fn run_user(
    args: &Cli,
    fetcher: &HttpFetcher,
    site: &Site,
    user_id: &str,
) -> Result<(), Box<dyn Error>> {
    let user = lookup_user(fetcher, site, user_id).await?;

    if args.json {
        println!("{}", json::to_json(&user)?);
    } else {
        print!("{}", message::user_embed(&user, site));
    }
    if let Some(path) = &args.output {
        json::write_record(&user, path).await?;
    }
    Ok(())
}

/// `review <url>...`: scrape every review, at most `concurrency` at a time.
///
/// Reviews are printed in argument order. A failed review is reported and
/// skipped; the command fails only if no review could be scraped.
#[instrument(level = "info", skip(args, fetcher, urls), fields(count = urls.len()))]
async fn run_reviews(
    args: &Cli,
    fetcher: &HttpFetcher,
    urls: &[String],
    concurrency: usize,
) -> Result<(), Box<dyn Error>> {
    let results: Vec<_> = stream::iter(urls)
        .map(|url| async move { (url, scrape_review(fetcher, url).await) })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut reviews: Vec<Review> = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (url, result) in results {
        match result {
            Ok(review) => reviews.push(review),
            Err(e) => {
                error!(%url, error = %e, "Review failed");
                eprintln!("{}", failure_message(&e));
                failures.push(e);
            }
        }
    }
    info!(
        succeeded = reviews.len(),
        failed = failures.len(),
        "Scraped reviews"
    );

    if args.json {
        println!("{}", json::to_json(&reviews)?);
    } else {
        for (i, review) in reviews.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{}", message::review_embed(review));
        }
    }
    if let Some(path) = &args.output {
        json::write_record(&reviews, path).await?;
    }

    match failures.into_iter().next() {
        Some(first) if reviews.is_empty() => Err(first.into()),
        _ => Ok(()),
    }
}

/// One-line failure report for the terminal.
///
/// Parse failures also name the field that could not be read.
fn failure_message(err: &(dyn Error + 'static)) -> String {
    let field = err
        .downcast_ref::<ScrapeError>()
        .and_then(ScrapeError::parse_error)
        .map(error::ParseError::field);
    match field {
        Some(field) => format!("error: {err} (field `{field}`)"),
        None => format!("error: {err}"),
    }
}
