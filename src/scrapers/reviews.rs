//! Backloggd user reviews page parser.
//!
//! Only the header counters of `https://www.backloggd.com/u/{user}/reviews/`
//! are read. The heading holds two emphasized numbers; they are told apart by
//! position, not by their labels: the first is the favorite count and the
//! second the review count.

use crate::error::ParseError;
use crate::models::ReviewStats;
use crate::scrapers::extract::{extract_first, parse_count, text_of};
use crate::scrapers::selectors::{REVIEW_STATS_COUNTER_SEL, REVIEW_STATS_HEADING_SEL};
use scraper::Html;
use tracing::debug;

/// Parse a user's reviews page into [`ReviewStats`].
///
/// # Errors
///
/// - [`ParseError::InvalidReviewStats`] when the heading is missing
/// - [`ParseError::InvalidFavCount`] / [`ParseError::InvalidReviewCount`]
///   when the first / second counter is missing or not an integer
pub fn parse_review_stats(html: &str) -> Result<ReviewStats, ParseError> {
    let document = Html::parse_document(html);
    let heading =
        extract_first(&document, &REVIEW_STATS_HEADING_SEL).ok_or(ParseError::InvalidReviewStats)?;

    let mut counters = heading.select(&REVIEW_STATS_COUNTER_SEL).map(text_of);

    let raw_fav = counters.next().unwrap_or_default();
    let fav_count = parse_count(&raw_fav)
        .ok_or_else(|| ParseError::InvalidFavCount(raw_fav.trim().to_string()))?;

    let raw_reviews = counters.next().unwrap_or_default();
    let review_count = parse_count(&raw_reviews)
        .ok_or_else(|| ParseError::InvalidReviewCount(raw_reviews.trim().to_string()))?;

    debug!(fav_count, review_count, "Parsed review stats");
    Ok(ReviewStats {
        review_count,
        fav_count,
    })
}
