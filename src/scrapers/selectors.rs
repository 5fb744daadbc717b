//! CSS selectors for Backloggd markup.
//!
//! The selectors are a fixed contract with the site's current HTML. When
//! the markup drifts, this table is the only place that should change.
//! Each string constant has a compiled [`Selector`] next to it.

use once_cell::sync::Lazy;
use scraper::Selector;

fn compile(selector: &str) -> Selector {
    Selector::parse(selector)
        .unwrap_or_else(|e| panic!("invalid built-in selector {selector:?}: {e}"))
}

// Profile page: https://www.backloggd.com/u/{user}/
pub const PROFILE_NAME: &str = "h3.main-header";
pub const PROFILE_BIO: &str = "span#bio-body";
pub const PROFILE_AVATAR: &str = "div.avatar img";
pub const PROFILE_STATS: &str = "div#profile-stats";
pub const FAVORITE_CARD: &str = "div#profile-favorites .game-cover";

// Stats blocks are matched on their direct children by tag name.
pub const STAT_LABEL_TAG: &str = "h4";
pub const STAT_VALUE_TAG: &str = "h1";

// Reviews page: https://www.backloggd.com/u/{user}/reviews/
pub const REVIEW_STATS_HEADING: &str = "div#user-reviews-header h2";
pub const REVIEW_STATS_COUNTER: &str = "b";

// Single review page
pub const REVIEW_COVER: &str = "div#review-sidebar .game-cover img";
pub const REVIEW_GAME_LINK: &str = "div#review-sidebar .game-info a";
pub const REVIEW_TOP_BAR: &str = "div.review-top-bar";
pub const REVIEW_STARS: &str = "div.review-top-bar .stars-top";
pub const REVIEW_PLAY_TYPE: &str = "div.review-top-bar p.play-type";
pub const REVIEW_PLATFORM: &str = "div.review-top-bar p.review-platform";
pub const REVIEW_TEXT: &str = "div.review-body .card-text";
pub const REVIEW_LIKES: &str = "p.like-counter";
pub const REVIEW_COMMENTS: &str = "h2#comments-header";
pub const REVIEW_BOTTOM_BAR: &str = "div.review-bottom-bar";

// Generic descendants
pub const ANCHOR: &str = "a";
pub const IMAGE: &str = "img";
pub const PARAGRAPH: &str = "p";

pub static PROFILE_NAME_SEL: Lazy<Selector> = Lazy::new(|| compile(PROFILE_NAME));
pub static PROFILE_BIO_SEL: Lazy<Selector> = Lazy::new(|| compile(PROFILE_BIO));
pub static PROFILE_AVATAR_SEL: Lazy<Selector> = Lazy::new(|| compile(PROFILE_AVATAR));
pub static PROFILE_STATS_SEL: Lazy<Selector> = Lazy::new(|| compile(PROFILE_STATS));
pub static FAVORITE_CARD_SEL: Lazy<Selector> = Lazy::new(|| compile(FAVORITE_CARD));

pub static REVIEW_STATS_HEADING_SEL: Lazy<Selector> =
    Lazy::new(|| compile(REVIEW_STATS_HEADING));
pub static REVIEW_STATS_COUNTER_SEL: Lazy<Selector> =
    Lazy::new(|| compile(REVIEW_STATS_COUNTER));

pub static REVIEW_COVER_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_COVER));
pub static REVIEW_GAME_LINK_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_GAME_LINK));
pub static REVIEW_TOP_BAR_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_TOP_BAR));
pub static REVIEW_STARS_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_STARS));
pub static REVIEW_PLAY_TYPE_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_PLAY_TYPE));
pub static REVIEW_PLATFORM_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_PLATFORM));
pub static REVIEW_TEXT_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_TEXT));
pub static REVIEW_LIKES_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_LIKES));
pub static REVIEW_COMMENTS_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_COMMENTS));
pub static REVIEW_BOTTOM_BAR_SEL: Lazy<Selector> = Lazy::new(|| compile(REVIEW_BOTTOM_BAR));

pub static ANCHOR_SEL: Lazy<Selector> = Lazy::new(|| compile(ANCHOR));
pub static IMAGE_SEL: Lazy<Selector> = Lazy::new(|| compile(IMAGE));
pub static PARAGRAPH_SEL: Lazy<Selector> = Lazy::new(|| compile(PARAGRAPH));
