//! User lookup: the profile page joined with the reviews page.
//!
//! A user's profile and their review counters live on two different pages.
//! [`lookup_user`] fetches and parses both at the same time, so the lookup
//! takes as long as the slower page rather than the sum of both.
//!
//! # Join Policy
//!
//! - Each page runs as its own task and reports exactly one outcome.
//! - Both outcomes are awaited before either is inspected. A failed profile
//!   does not cancel the stats task.
//! - The profile outcome is checked first, then the stats outcome, so when
//!   both fail the profile failure is the one reported regardless of which
//!   task finished first.
//! - The caller gets a complete [`UserProfile`] or an error, never a profile
//!   without its stats.

use crate::error::{ParseError, ScrapeError};
use crate::models::UserProfile;
use crate::scrapers::fetch::{DocumentFetcher, Site};
use crate::scrapers::{profile, reviews, scrape};
use std::time::Instant;
use tracing::{Instrument, debug, info, instrument};

/// Look up `user_id`, joining their profile with their review stats.
///
/// # Errors
///
/// - [`ScrapeError::InvalidUserId`] if the id cannot be used in a URL
/// - the profile pipeline's failure, if it failed
/// - otherwise the stats pipeline's failure, if it failed
/// - [`ScrapeError::Task`] if a pipeline task panicked
#[instrument(level = "info", skip(fetcher, site))]
pub async fn lookup_user<F>(
    fetcher: &F,
    site: &Site,
    user_id: &str,
) -> Result<UserProfile, ScrapeError>
where
    F: DocumentFetcher + Clone + Send + Sync + 'static,
{
    let t0 = Instant::now();
    let profile_url = site.user_url(user_id)?;
    let reviews_url = site.user_reviews_url(user_id)?;

    let profile_task = tokio::spawn(
        run_pipeline(fetcher.clone(), profile_url, profile::parse_profile).in_current_span(),
    );
    let stats_task = tokio::spawn(
        run_pipeline(fetcher.clone(), reviews_url, reviews::parse_review_stats)
            .in_current_span(),
    );

    let profile = profile_task.await;
    let stats = stats_task.await;
    debug!(
        profile_ok = matches!(profile, Ok(Ok(_))),
        stats_ok = matches!(stats, Ok(Ok(_))),
        "Both pipelines finished"
    );

    let mut user = profile??;
    user.review_stats = stats??;

    info!(
        name = %user.name,
        favorites = user.favorites.len(),
        reviews = user.review_stats.review_count,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Looked up user"
    );
    Ok(user)
}

/// One fetch+parse pipeline with its own fetcher.
async fn run_pipeline<F, T>(
    fetcher: F,
    url: String,
    parse: fn(&str) -> Result<T, ParseError>,
) -> Result<T, ScrapeError>
where
    F: DocumentFetcher,
{
    scrape(&fetcher, &url, parse).await
}
