//! Backloggd user profile page parser.
//!
//! Reads the display name, bio, avatar, the three game counters of the stats
//! panel and the favorites block from `https://www.backloggd.com/u/{user}/`.
//!
//! # Failure Policy
//!
//! Fields are read in page order (name, bio, stats, favorites) and the first
//! failing field aborts the parse. No partial [`UserProfile`] is returned.
//! The avatar is optional and never fails the parse.
//! The [`ReviewStats`](crate::models::ReviewStats) of the result are left at
//! their default; they come from a different page.

use crate::error::ParseError;
use crate::models::{FavoriteGame, UserProfile};
use crate::scrapers::extract::{
    attribute, child_text, extract, extract_first, extract_first_within, parse_count, text_of,
};
use crate::scrapers::selectors::{
    ANCHOR_SEL, FAVORITE_CARD_SEL, IMAGE_SEL, PROFILE_AVATAR_SEL, PROFILE_BIO_SEL,
    PROFILE_NAME_SEL, PROFILE_STATS_SEL, STAT_LABEL_TAG, STAT_VALUE_TAG,
};
use scraper::{ElementRef, Html};
use tracing::debug;

const TOTAL_PLAYED_LABEL: &str = "Total Games Played";
const PLAYED_THIS_YEAR_LABEL: &str = "Played in";
const BACKLOGGD_LABEL: &str = "Games Backloggd";

/// Game counters read from the stats panel.
#[derive(Debug, Default, PartialEq, Eq)]
struct GameCounters {
    total: u32,
    this_year: u32,
    backloggd: u32,
}

/// Which counter a stats block carries, decided by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatKind {
    Total,
    ThisYear,
    Backloggd,
}

impl StatKind {
    fn classify(label: &str) -> Option<Self> {
        let label = label.trim();
        if label == TOTAL_PLAYED_LABEL {
            Some(Self::Total)
        } else if label.contains(PLAYED_THIS_YEAR_LABEL) {
            Some(Self::ThisYear)
        } else if label == BACKLOGGD_LABEL {
            Some(Self::Backloggd)
        } else {
            None
        }
    }

    fn error(self, raw: String) -> ParseError {
        match self {
            Self::Total => ParseError::InvalidGamesPlayedTotal(raw),
            Self::ThisYear => ParseError::InvalidGamesPlayedThisYear(raw),
            Self::Backloggd => ParseError::InvalidGamesBackloggd(raw),
        }
    }
}

/// Parse a profile page into a [`UserProfile`].
///
/// # Arguments
///
/// * `html` - Raw markup of the profile page
///
/// # Errors
///
/// Returns the [`ParseError`] of the first field that could not be read.
pub fn parse_profile(html: &str) -> Result<UserProfile, ParseError> {
    let document = Html::parse_document(html);

    let name = parse_name(&document)?;
    let bio = parse_bio(&document)?;
    let avatar_url = parse_avatar(&document);
    let counters = parse_stats(&document)?;
    let favorites = parse_favorites(&document)?;

    debug!(
        %name,
        has_avatar = avatar_url.is_some(),
        favorites = favorites.len(),
        total = counters.total,
        "Parsed profile"
    );

    Ok(UserProfile {
        name,
        bio,
        avatar_url,
        games_played_total: counters.total,
        games_played_this_year: counters.this_year,
        games_backloggd: counters.backloggd,
        favorites,
        review_stats: Default::default(),
    })
}

fn parse_name(document: &Html) -> Result<String, ParseError> {
    let name = extract_first(document, &PROFILE_NAME_SEL)
        .map(text_of)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if name.is_empty() {
        return Err(ParseError::InvalidUsername);
    }
    Ok(name)
}

// TODO: convert links and line breaks in the bio to markdown for chat embeds.
fn parse_bio(document: &Html) -> Result<String, ParseError> {
    match extract_first(document, &PROFILE_BIO_SEL).map(text_of) {
        Some(bio) if !bio.trim().is_empty() => Ok(bio),
        _ => Err(ParseError::InvalidBio),
    }
}

fn parse_avatar(document: &Html) -> Option<String> {
    extract_first(document, &PROFILE_AVATAR_SEL)
        .and_then(|img| attribute(img, "src").non_empty())
        .map(str::to_string)
}

/// Read the stats panel.
///
/// Blocks with unknown labels are skipped and a counter whose block is
/// missing stays at zero. A block with a known label and a non-integer value
/// fails the parse.
fn parse_stats(document: &Html) -> Result<GameCounters, ParseError> {
    let panel = extract_first(document, &PROFILE_STATS_SEL).ok_or(ParseError::InvalidStats)?;

    let mut counters = GameCounters::default();
    for block in panel.children().filter_map(ElementRef::wrap) {
        let Some(kind) = StatKind::classify(&child_text(block, STAT_LABEL_TAG)) else {
            continue;
        };
        let raw = child_text(block, STAT_VALUE_TAG);
        let value = parse_count(&raw).ok_or_else(|| kind.error(raw.trim().to_string()))?;
        match kind {
            StatKind::Total => counters.total = value,
            StatKind::ThisYear => counters.this_year = value,
            StatKind::Backloggd => counters.backloggd = value,
        }
    }
    Ok(counters)
}

fn parse_favorites(document: &Html) -> Result<Vec<FavoriteGame>, ParseError> {
    extract(document, &FAVORITE_CARD_SEL)
        .into_iter()
        .enumerate()
        .map(|(index, card)| parse_favorite(index, card))
        .collect()
}

fn parse_favorite(index: usize, card: ElementRef<'_>) -> Result<FavoriteGame, ParseError> {
    let url = extract_first_within(card, &ANCHOR_SEL)
        .and_then(|a| attribute(a, "href").non_empty())
        .ok_or(ParseError::InvalidFavUrl { index })?;

    let image = extract_first_within(card, &IMAGE_SEL);
    let name = image
        .and_then(|img| attribute(img, "alt").non_empty())
        .ok_or(ParseError::InvalidFavName { index })?;
    let image_url = image
        .and_then(|img| attribute(img, "src").non_empty())
        .ok_or(ParseError::InvalidFavImage { index })?;

    Ok(FavoriteGame {
        name: name.to_string(),
        url: url.to_string(),
        image_url: image_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(label: &str, value: &str) -> String {
        format!(r#"<div class="col"><h1>{value}</h1><h4>{label}</h4></div>"#)
    }

    fn favorite(slug: &str, name: &str) -> String {
        format!(
            r#"<div class="col game-cover">
                <a href="/games/{slug}/">
                    <div class="overflow-wrapper">
                        <img class="card-img" src="https://images.igdb.com/{slug}.jpg" alt="{name}">
                    </div>
                </a>
            </div>"#
        )
    }

    fn profile_page(stats: &[String], favorites: &[String]) -> String {
        format!(
            r#"<html><body>
                <div id="profile-header">
                    <div class="avatar"><img src="https://cdn.backloggd.com/avatar.png"></div>
                    <h3 class="main-header">bapanadavibes</h3>
                    <span id="bio-body">Mostly RPGs.
Sometimes roguelikes.</span>
                </div>
                <div id="profile-stats">{}</div>
                <div id="profile-favorites">{}</div>
            </body></html>"#,
            stats.concat(),
            favorites.concat()
        )
    }

    fn standard_stats() -> Vec<String> {
        vec![
            stat("Total Games Played", "120"),
            stat("Played in 2024", "15"),
            stat("Games Backloggd", "340"),
        ]
    }

    #[test]
    fn test_parse_profile_full_page() {
        let html = profile_page(
            &standard_stats(),
            &[
                favorite("hades", "Hades"),
                favorite("celeste", "Celeste"),
                favorite("outer-wilds", "Outer Wilds"),
            ],
        );

        let profile = parse_profile(&html).unwrap();
        assert_eq!(profile.name, "bapanadavibes");
        assert_eq!(profile.bio, "Mostly RPGs.\nSometimes roguelikes.");
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("https://cdn.backloggd.com/avatar.png")
        );
        assert_eq!(profile.games_played_total, 120);
        assert_eq!(profile.games_played_this_year, 15);
        assert_eq!(profile.games_backloggd, 340);

        let names: Vec<&str> = profile.favorites.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Hades", "Celeste", "Outer Wilds"]);
        assert_eq!(profile.favorites[1].url, "/games/celeste/");
        assert_eq!(
            profile.favorites[1].image_url,
            "https://images.igdb.com/celeste.jpg"
        );
        assert_eq!(profile.review_stats, Default::default());
    }

    #[test]
    fn test_parse_profile_without_favorites() {
        let html = profile_page(&standard_stats(), &[]);
        let profile = parse_profile(&html).unwrap();
        assert!(profile.favorites.is_empty());
    }

    #[test]
    fn test_parse_profile_avatar_is_optional() {
        let html = profile_page(&standard_stats(), &[]).replace(
            r#"<div class="avatar"><img src="https://cdn.backloggd.com/avatar.png"></div>"#,
            "",
        );
        let profile = parse_profile(&html).unwrap();
        assert_eq!(profile.avatar_url, None);
        assert_eq!(profile.name, "bapanadavibes");

        let html = profile_page(&standard_stats(), &[])
            .replace("https://cdn.backloggd.com/avatar.png", "");
        assert_eq!(parse_profile(&html).unwrap().avatar_url, None);
    }

    #[test]
    fn test_parse_profile_ignores_unknown_stats_blocks() {
        let mut stats = standard_stats();
        stats.insert(1, stat("Hours Logged", "lots"));
        let html = profile_page(&stats, &[]);

        let profile = parse_profile(&html).unwrap();
        assert_eq!(profile.games_played_total, 120);
        assert_eq!(profile.games_played_this_year, 15);
        assert_eq!(profile.games_backloggd, 340);
    }

    #[test]
    fn test_parse_profile_non_numeric_counter_names_the_counter() {
        let cases = [
            (0, ParseError::InvalidGamesPlayedTotal("many".to_string())),
            (1, ParseError::InvalidGamesPlayedThisYear("many".to_string())),
            (2, ParseError::InvalidGamesBackloggd("many".to_string())),
        ];
        for (i, expected) in cases {
            let mut stats = standard_stats();
            let label = ["Total Games Played", "Played in 2024", "Games Backloggd"][i];
            stats[i] = stat(label, "many");
            let html = profile_page(&stats, &[]);
            assert_eq!(parse_profile(&html), Err(expected));
        }
    }

    #[test]
    fn test_parse_profile_missing_name() {
        let html = profile_page(&standard_stats(), &[])
            .replace(r#"<h3 class="main-header">bapanadavibes</h3>"#, "");
        assert_eq!(parse_profile(&html), Err(ParseError::InvalidUsername));
    }

    #[test]
    fn test_parse_profile_empty_bio() {
        let html = profile_page(&standard_stats(), &[]).replace(
            "Mostly RPGs.\nSometimes roguelikes.",
            "  ",
        );
        assert_eq!(parse_profile(&html), Err(ParseError::InvalidBio));
    }

    #[test]
    fn test_parse_profile_fails_fast_on_first_field() {
        // Both name and a counter are broken; the name is read first.
        let mut stats = standard_stats();
        stats[0] = stat("Total Games Played", "x");
        let html = profile_page(&stats, &[])
            .replace(r#"<h3 class="main-header">bapanadavibes</h3>"#, "");
        assert_eq!(parse_profile(&html), Err(ParseError::InvalidUsername));
    }

    #[test]
    fn test_parse_profile_missing_stats_panel() {
        let html = profile_page(&standard_stats(), &[]).replace("profile-stats", "other");
        assert_eq!(parse_profile(&html), Err(ParseError::InvalidStats));
    }

    #[test]
    fn test_parse_profile_missing_counter_defaults_to_zero() {
        let stats = vec![stat("Total Games Played", "120")];
        let profile = parse_profile(&profile_page(&stats, &[])).unwrap();
        assert_eq!(profile.games_played_total, 120);
        assert_eq!(profile.games_played_this_year, 0);
        assert_eq!(profile.games_backloggd, 0);
    }

    #[test]
    fn test_parse_profile_favorite_missing_link() {
        let broken = favorite("celeste", "Celeste").replace(r#"href="/games/celeste/""#, "");
        let html = profile_page(&standard_stats(), &[favorite("hades", "Hades"), broken]);
        assert_eq!(
            parse_profile(&html),
            Err(ParseError::InvalidFavUrl { index: 1 })
        );
    }

    #[test]
    fn test_parse_profile_favorite_missing_alt_and_src() {
        let no_alt = favorite("hades", "Hades").replace(r#" alt="Hades""#, "");
        let html = profile_page(&standard_stats(), &[no_alt]);
        assert_eq!(
            parse_profile(&html),
            Err(ParseError::InvalidFavName { index: 0 })
        );

        let no_src =
            favorite("hades", "Hades").replace(r#"src="https://images.igdb.com/hades.jpg""#, "");
        let html = profile_page(&standard_stats(), &[no_src]);
        assert_eq!(
            parse_profile(&html),
            Err(ParseError::InvalidFavImage { index: 0 })
        );
    }

    #[test]
    fn test_stat_kind_classify() {
        assert_eq!(StatKind::classify("Total Games Played"), Some(StatKind::Total));
        assert_eq!(StatKind::classify(" Played in 2025 "), Some(StatKind::ThisYear));
        assert_eq!(StatKind::classify("Games Backloggd"), Some(StatKind::Backloggd));
        assert_eq!(StatKind::classify("Reviews"), None);
    }
}
