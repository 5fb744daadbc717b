//! Backloggd single review page parser.
//!
//! A review page is split into a sidebar (game cover and link), a top bar
//! (reviewer, star rating, play status, platform), the review body, and a
//! bottom bar (likes, date) followed by the comments section.
//!
//! Every field is read independently and each has its own failure. Two
//! fields have a valid "absent" state:
//! - `rating`: no inline width style on the star element means unrated
//! - `platform`: reviewers may leave it undisclosed
//!
//! The review's own URL is not in the markup; callers fill in
//! [`Review::url`] from the request.

use crate::error::ParseError;
use crate::models::Review;
use crate::scrapers::extract::{
    Attribute, attribute, extract_first, extract_first_within, first_child_text, parse_count,
    text_of,
};
use crate::scrapers::selectors::{
    PARAGRAPH_SEL, REVIEW_BOTTOM_BAR_SEL, REVIEW_COMMENTS_SEL, REVIEW_COVER_SEL,
    REVIEW_GAME_LINK_SEL, REVIEW_LIKES_SEL, REVIEW_PLATFORM_SEL, REVIEW_PLAY_TYPE_SEL,
    REVIEW_STARS_SEL, REVIEW_TEXT_SEL, REVIEW_TOP_BAR_SEL,
};
use scraper::Html;
use tracing::debug;

const WIDTH_PREFIX: &str = "width:";
const PERCENT_SUFFIX: &str = "%";
const LIKES_SUFFIXES: [&str; 2] = ["Likes", "Like"];
const COMMENTS_SUFFIXES: [&str; 2] = ["Comments", "Comment"];
const DATE_PREFIX: &str = "Reviewed on ";

/// Parse a review page into a [`Review`] with an empty `url`.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first field that could not be read.
pub fn parse_review(html: &str) -> Result<Review, ParseError> {
    let document = Html::parse_document(html);

    let (title, game_image_url) = parse_cover(&document)?;
    let game_url = parse_game_url(&document)?;
    let username = parse_reviewer(&document)?;
    let rating = parse_rating(&document)?;
    let play_type = parse_play_type(&document)?;
    let platform = parse_platform(&document);
    let text = parse_text(&document)?;
    let likes = parse_likes(&document)?;
    let comments = parse_comments(&document)?;
    let date = parse_date(&document)?;

    debug!(%title, %username, ?rating, likes, comments, "Parsed review");

    Ok(Review {
        url: String::new(),
        title,
        username,
        game_url,
        game_image_url,
        play_type,
        platform,
        rating,
        text,
        likes,
        comments,
        date,
    })
}

/// Game title and cover image from the sidebar's first cover.
fn parse_cover(document: &Html) -> Result<(String, String), ParseError> {
    let cover = extract_first(document, &REVIEW_COVER_SEL).ok_or(ParseError::InvalidGameImage)?;
    let src = attribute(cover, "src")
        .non_empty()
        .ok_or(ParseError::InvalidGameImage)?;
    let alt = attribute(cover, "alt")
        .non_empty()
        .ok_or(ParseError::InvalidTitle)?;
    Ok((alt.trim().to_string(), src.to_string()))
}

fn parse_game_url(document: &Html) -> Result<String, ParseError> {
    extract_first(document, &REVIEW_GAME_LINK_SEL)
        .and_then(|a| attribute(a, "href").non_empty())
        .map(str::to_string)
        .ok_or(ParseError::InvalidGameUrl)
}

fn parse_reviewer(document: &Html) -> Result<String, ParseError> {
    let name = extract_first(document, &REVIEW_TOP_BAR_SEL)
        .and_then(|bar| extract_first_within(bar, &PARAGRAPH_SEL))
        .map(text_of)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if name.is_empty() {
        return Err(ParseError::InvalidReviewer);
    }
    Ok(name)
}

/// Star rating as a percentage.
///
/// The filled part of the star bar is drawn with `style="width:80%"`. No
/// style (or no star bar at all) means the review is unrated.
fn parse_rating(document: &Html) -> Result<Option<u8>, ParseError> {
    let Some(stars) = extract_first(document, &REVIEW_STARS_SEL) else {
        return Ok(None);
    };
    let style = match attribute(stars, "style") {
        Attribute::Absent => return Ok(None),
        Attribute::Empty => return Err(ParseError::InvalidRating(String::new())),
        Attribute::Value(style) => style,
    };
    parse_width_percent(style)
        .map(Some)
        .ok_or_else(|| ParseError::InvalidRating(style.to_string()))
}

/// Parse `width:NN%` into `NN`, which must lie in `0..=100`.
fn parse_width_percent(style: &str) -> Option<u8> {
    let value = style
        .trim()
        .trim_end_matches(';')
        .strip_prefix(WIDTH_PREFIX)?
        .trim()
        .strip_suffix(PERCENT_SUFFIX)?
        .trim();
    value.parse::<u8>().ok().filter(|v| *v <= 100)
}

fn parse_play_type(document: &Html) -> Result<String, ParseError> {
    let play_type = extract_first(document, &REVIEW_PLAY_TYPE_SEL)
        .map(text_of)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if play_type.is_empty() {
        return Err(ParseError::InvalidPlayType);
    }
    Ok(play_type)
}

fn parse_platform(document: &Html) -> String {
    extract_first(document, &REVIEW_PLATFORM_SEL)
        .map(text_of)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn parse_text(document: &Html) -> Result<String, ParseError> {
    extract_first(document, &REVIEW_TEXT_SEL)
        .map(text_of)
        .ok_or(ParseError::InvalidReviewText)
}

fn parse_likes(document: &Html) -> Result<u32, ParseError> {
    let raw = extract_first(document, &REVIEW_LIKES_SEL)
        .and_then(first_child_text)
        .unwrap_or_default();
    let count = strip_label(&raw, &LIKES_SUFFIXES);
    parse_count(count).ok_or_else(|| ParseError::InvalidLikes(raw.trim().to_string()))
}

/// Comment count from the comments header. A header with no number means
/// there are no comments yet.
fn parse_comments(document: &Html) -> Result<u32, ParseError> {
    let header = extract_first(document, &REVIEW_COMMENTS_SEL)
        .ok_or_else(|| ParseError::InvalidComments(String::new()))?;
    let raw = text_of(header);
    let count = strip_label(&raw, &COMMENTS_SUFFIXES);
    if count.is_empty() {
        return Ok(0);
    }
    parse_count(count).ok_or_else(|| ParseError::InvalidComments(raw.trim().to_string()))
}

/// Review date from the last paragraph of the bottom bar.
///
/// That paragraph must read `Reviewed on <date>`. Without the prefix it is
/// some other counter and the date is missing.
fn parse_date(document: &Html) -> Result<String, ParseError> {
    let text = extract_first(document, &REVIEW_BOTTOM_BAR_SEL)
        .and_then(|bar| bar.select(&PARAGRAPH_SEL).last())
        .map(text_of)
        .unwrap_or_default();
    let date = text
        .trim_start()
        .strip_prefix(DATE_PREFIX)
        .map(str::trim)
        .unwrap_or_default();
    if date.is_empty() {
        return Err(ParseError::InvalidDate);
    }
    Ok(date.to_string())
}

/// Trim `raw` and drop the first matching trailing label.
fn strip_label<'a>(raw: &'a str, suffixes: &[&str]) -> &'a str {
    let raw = raw.trim();
    suffixes
        .iter()
        .find_map(|suffix| raw.strip_suffix(suffix))
        .unwrap_or(raw)
        .trim()
}
