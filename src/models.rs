//! Data models for scraped Backloggd pages.
//!
//! This module defines the records produced by the extraction engine:
//! - [`UserProfile`]: A user's profile page joined with their review statistics
//! - [`FavoriteGame`]: One entry of the profile's favorites block
//! - [`ReviewStats`]: Counters taken from the user's reviews page
//! - [`Review`]: A single review page
//!
//! Every record is produced once by its parser and handed to the caller by
//! value. Nothing here is persisted.

use serde::{Deserialize, Serialize};

/// A Backloggd user profile.
///
/// Built by the profile parser and completed by the join orchestrator,
/// which embeds the [`ReviewStats`] parsed from the user's reviews page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    /// Display name from the profile header. Never empty.
    pub name: String,
    /// Bio text, stored verbatim.
    pub bio: String,
    /// Profile picture. `None` when the page shows no avatar image.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// "Total Games Played" counter.
    pub games_played_total: u32,
    /// "Played in <year>" counter.
    pub games_played_this_year: u32,
    /// "Games Backloggd" counter.
    pub games_backloggd: u32,
    /// Favorites in page order. May be empty.
    pub favorites: Vec<FavoriteGame>,
    /// Counters from the reviews page.
    pub review_stats: ReviewStats,
}

/// A favorite game card on a profile page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FavoriteGame {
    /// Game name, taken from the cover image's `alt`.
    pub name: String,
    /// Link to the game page, usually site-relative (`/games/...`).
    pub url: String,
    /// Cover image URL.
    pub image_url: String,
}

/// Review counters shown on a user's reviews page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewStats {
    pub review_count: u32,
    pub fav_count: u32,
}

/// A single review page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Review {
    /// The review's own URL. Not present in the markup; set by the caller.
    pub url: String,
    /// Title of the reviewed game.
    pub title: String,
    /// Reviewer's username.
    pub username: String,
    pub game_url: String,
    pub game_image_url: String,
    /// Play status label ("Completed", "Played", ...).
    pub play_type: String,
    /// Platform label. Empty when the reviewer did not disclose one.
    pub platform: String,
    /// Rating as a percentage in `0..=100`. `None` when the review is unrated.
    pub rating: Option<u8>,
    /// Review body, verbatim.
    pub text: String,
    pub likes: u32,
    pub comments: u32,
    /// Date as rendered by the site, e.g. "Jan 3, 2024". Not parsed.
    pub date: String,
}

impl Review {
    /// Rating on the site's five-star scale, if the review is rated.
    pub fn stars(&self) -> Option<f32> {
        self.rating.map(|r| f32::from(r) / 20.0)
    }
}
