//! Page retrieval and Backloggd URL construction.
//!
//! The extraction engine only needs raw markup for a URL, so fetching sits
//! behind the [`DocumentFetcher`] trait. [`HttpFetcher`] is the `reqwest`
//! implementation used by the binary; tests substitute in-memory fetchers.
//!
//! No caching and no retries happen here. A failed request is reported once
//! and short-circuits the pipeline that issued it.

use crate::config::Settings;
use crate::error::{FetchError, ScrapeError};
use reqwest::Client;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, instrument};
use url::Url;

/// Something that turns a URL into page markup.
pub trait DocumentFetcher {
    /// Fetch `url` and return its body as text.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`DocumentFetcher`] backed by a `reqwest` client.
///
/// Cloning is cheap and every pipeline gets its own clone.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the timeout and user agent from `settings`.
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl DocumentFetcher for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;
        info!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

/// URL builder for one Backloggd site root.
#[derive(Debug, Clone)]
pub struct Site {
    base: Url,
}

impl Site {
    /// Parse `base_url` as the site root.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let mut base = Url::parse(base_url).map_err(|source| FetchError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        debug!(%base, "Site root");
        Ok(Self { base })
    }

    /// Profile page of `user_id`.
    pub fn user_url(&self, user_id: &str) -> Result<String, ScrapeError> {
        self.join(&format!("u/{}/", encode_user_id(user_id)?))
    }

    /// Reviews page of `user_id`.
    pub fn user_reviews_url(&self, user_id: &str) -> Result<String, ScrapeError> {
        self.join(&format!("u/{}/reviews/", encode_user_id(user_id)?))
    }

    /// Resolve a site-relative link such as `/games/hades/`.
    ///
    /// Absolute links are returned unchanged. Links that cannot be resolved
    /// are returned as given.
    pub fn absolute(&self, link: &str) -> String {
        self.base
            .join(link)
            .map(String::from)
            .unwrap_or_else(|_| link.to_string())
    }

    fn join(&self, path: &str) -> Result<String, ScrapeError> {
        self.base
            .join(path)
            .map(String::from)
            .map_err(|source| {
                FetchError::InvalidUrl {
                    url: path.to_string(),
                    source,
                }
                .into()
            })
    }
}

/// Validate a user id and percent-encode it for use as a path segment.
fn encode_user_id(user_id: &str) -> Result<String, ScrapeError> {
    let id = user_id.trim();
    let invalid = id.is_empty()
        || id
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '\\'));
    if invalid {
        return Err(ScrapeError::InvalidUserId(user_id.to_string()));
    }
    Ok(urlencoding::encode(id).into_owned())
}

/// Check that `url` is an absolute http(s) URL before fetching a review.
pub fn validate_review_url(url: &str) -> Result<(), ScrapeError> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::InvalidReviewUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ScrapeError::InvalidReviewUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
