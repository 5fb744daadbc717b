//! Error types for fetching and parsing Backloggd pages.
//!
//! - [`FetchError`]: the page could not be retrieved
//! - [`ParseError`]: a required field was missing or malformed
//! - [`ScrapeError`]: what a pipeline or the user lookup hands back to its caller

use thiserror::Error;

/// Transport failure while retrieving a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The URL could not be built or parsed
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// A required field was absent, empty or not representable as its type.
///
/// Each variant names one field. Variants carrying a `String` hold the raw
/// text that failed to convert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("error parsing username")]
    InvalidUsername,

    #[error("error parsing bio")]
    InvalidBio,

    #[error("profile stats panel not found")]
    InvalidStats,

    #[error("error parsing total games played from {0:?}")]
    InvalidGamesPlayedTotal(String),

    #[error("error parsing games played this year from {0:?}")]
    InvalidGamesPlayedThisYear(String),

    #[error("error parsing games backloggd from {0:?}")]
    InvalidGamesBackloggd(String),

    #[error("favorite #{index} has no link")]
    InvalidFavUrl { index: usize },

    #[error("favorite #{index} has no name")]
    InvalidFavName { index: usize },

    #[error("favorite #{index} has no image")]
    InvalidFavImage { index: usize },

    #[error("review stats heading not found")]
    InvalidReviewStats,

    #[error("error parsing favorite count from {0:?}")]
    InvalidFavCount(String),

    #[error("error parsing review count from {0:?}")]
    InvalidReviewCount(String),

    #[error("review has no game cover image")]
    InvalidGameImage,

    #[error("review has no game title")]
    InvalidTitle,

    #[error("review has no game link")]
    InvalidGameUrl,

    #[error("review has no reviewer name")]
    InvalidReviewer,

    #[error("error parsing rating from {0:?}")]
    InvalidRating(String),

    #[error("review has no play type")]
    InvalidPlayType,

    #[error("review has no text")]
    InvalidReviewText,

    #[error("error parsing likes from {0:?}")]
    InvalidLikes(String),

    #[error("error parsing comments from {0:?}")]
    InvalidComments(String),

    #[error("review has no date")]
    InvalidDate,
}

impl ParseError {
    /// Stable name of the field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidUsername => "name",
            Self::InvalidBio => "bio",
            Self::InvalidStats => "stats",
            Self::InvalidGamesPlayedTotal(_) => "games_played_total",
            Self::InvalidGamesPlayedThisYear(_) => "games_played_this_year",
            Self::InvalidGamesBackloggd(_) => "games_backloggd",
            Self::InvalidFavUrl { .. } => "favorites.url",
            Self::InvalidFavName { .. } => "favorites.name",
            Self::InvalidFavImage { .. } => "favorites.image_url",
            Self::InvalidReviewStats => "review_stats",
            Self::InvalidFavCount(_) => "fav_count",
            Self::InvalidReviewCount(_) => "review_count",
            Self::InvalidGameImage => "game_image_url",
            Self::InvalidTitle => "title",
            Self::InvalidGameUrl => "game_url",
            Self::InvalidReviewer => "username",
            Self::InvalidRating(_) => "rating",
            Self::InvalidPlayType => "play_type",
            Self::InvalidReviewText => "text",
            Self::InvalidLikes(_) => "likes",
            Self::InvalidComments(_) => "comments",
            Self::InvalidDate => "date",
        }
    }
}

/// Failure of a fetch+parse pipeline or of the joined user lookup.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to parse {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },

    /// A pipeline task panicked or was cancelled before reporting
    #[error("pipeline task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("invalid user id {0:?}")]
    InvalidUserId(String),

    #[error("invalid review URL {url}: {reason}")]
    InvalidReviewUrl { url: String, reason: String },
}

impl ScrapeError {
    /// The parse failure behind this error, if it is one.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
