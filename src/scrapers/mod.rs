//! Extraction engine for Backloggd pages.
//!
//! Each page kind follows the same pipeline: fetch the markup through a
//! [`DocumentFetcher`](fetch::DocumentFetcher), parse it into a document,
//! and read the record field by field with the selectors in [`selectors`].
//!
//! # Modules
//!
//! | Module | Page | Record |
//! |--------|------|--------|
//! | [`profile`] | `/u/{user}/` | [`UserProfile`](crate::models::UserProfile) |
//! | [`reviews`] | `/u/{user}/reviews/` | [`ReviewStats`](crate::models::ReviewStats) |
//! | [`review`] | `/u/{user}/review/{id}/` | [`Review`](crate::models::Review) |
//! | [`lookup`] | both user pages, concurrently | joined `UserProfile` |
//!
//! [`extract`] holds the stateless field helpers and [`fetch`] the HTTP
//! side and URL building.

pub mod extract;
pub mod fetch;
pub mod lookup;
pub mod profile;
pub mod review;
pub mod reviews;
pub mod selectors;

use crate::error::{ParseError, ScrapeError};
use crate::models::Review;
use crate::utils::truncate_for_log;
use fetch::{DocumentFetcher, validate_review_url};
use tracing::{info, instrument, warn};

/// Fetch `url` and parse it with `parse`.
///
/// Fetch failures and parse failures are both returned with the URL they
/// belong to; nothing is retried.
pub async fn scrape<F, T>(
    fetcher: &F,
    url: &str,
    parse: fn(&str) -> Result<T, ParseError>,
) -> Result<T, ScrapeError>
where
    F: DocumentFetcher,
{
    let body = fetcher.fetch(url).await?;
    parse(&body).map_err(|source| {
        warn!(
            %url,
            field = source.field(),
            error = %source,
            body_preview = %truncate_for_log(&body, 200),
            "Failed to parse page"
        );
        ScrapeError::Parse {
            url: url.to_string(),
            source,
        }
    })
}

/// Fetch and parse a single review page, filling in its URL.
#[instrument(level = "info", skip(fetcher))]
pub async fn scrape_review<F>(fetcher: &F, url: &str) -> Result<Review, ScrapeError>
where
    F: DocumentFetcher,
{
    validate_review_url(url)?;
    let mut review = scrape(fetcher, url, review::parse_review).await?;
    review.url = url.to_string();
    info!(title = %review.title, username = %review.username, "Scraped review");
    Ok(review)
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fetcher for pipeline tests.

    use super::fetch::DocumentFetcher;
    use crate::error::FetchError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Canned response for one URL.
    #[derive(Debug, Clone)]
    pub enum Page {
        Body(String),
        /// Answer with this HTTP status instead of a body.
        Fail(u16),
    }

    /// Serves canned pages, optionally after a delay, and counts completed
    /// fetches.
    #[derive(Debug, Clone, Default)]
    pub struct StaticFetcher {
        pages: Arc<HashMap<String, (Page, Duration)>>,
        completed: Arc<AtomicUsize>,
    }

    impl StaticFetcher {
        pub fn new(pages: Vec<(&str, Page, Duration)>) -> Self {
            let pages = pages
                .into_iter()
                .map(|(url, page, delay)| (url.to_string(), (page, delay)))
                .collect();
            Self {
                pages: Arc::new(pages),
                completed: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn completed(&self) -> usize {
            self.completed.load(Ordering::SeqCst)
        }
    }

    impl DocumentFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            let entry = self.pages.get(url).cloned();
            let result = match entry {
                Some((page, delay)) => {
                    tokio::time::sleep(delay).await;
                    match page {
                        Page::Body(body) => Ok(body),
                        Page::Fail(status) => Err(FetchError::Status {
                            url: url.to_string(),
                            status,
                        }),
                    }
                }
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            };
            self.completed.fetch_add(1, Ordering::SeqCst);
            result
        }
    }
}
