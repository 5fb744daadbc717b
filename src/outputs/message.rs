//! Chat message rendering.
//!
//! Records are turned into an [`Embed`], the shape chat platforms use for
//! rich messages (title, link, description, thumbnail, fields). Its
//! [`Display`](fmt::Display) impl renders it as plain Markdown-ish text for
//! the terminal.

use crate::models::{Review, UserProfile};
use crate::scrapers::fetch::Site;
use crate::utils::truncate_chars;
use std::fmt;

/// Longest description shown before it is cut with `...`.
pub const DESCRIPTION_LIMIT: usize = 300;

/// A rich chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub url: Option<String>,
    pub author: Option<String>,
    pub description: String,
    pub thumbnail: Option<String>,
    pub fields: Vec<EmbedField>,
}

/// One named block of an [`Embed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline,
        }
    }
}

/// Build the profile message for `user`.
///
/// The description is the bio's first line, or its first
/// [`DESCRIPTION_LIMIT`] characters when it is a single long line. The
/// avatar is the thumbnail, falling back to the first favorite's cover. A
/// user without favorites gets no favorites block.
pub fn user_embed(user: &UserProfile, site: &Site) -> Embed {
    let stats = format!(
        "🎮 {}  📆 {}  📚 {}  📝 {}  🩷 {}",
        user.games_played_total,
        user.games_played_this_year,
        user.games_backloggd,
        user.review_stats.review_count,
        user.review_stats.fav_count
    );

    let mut fields = vec![EmbedField::new("Stats", stats, false)];
    for (i, game) in user.favorites.iter().enumerate() {
        let name = if i == 0 { "Favourites" } else { "" };
        let value = format!("[{}]({})", game.name, site.absolute(&game.url));
        fields.push(EmbedField::new(name, value, false));
    }

    Embed {
        title: user.name.clone(),
        url: site.user_url(&user.name).ok(),
        author: None,
        description: format_bio(&user.bio),
        thumbnail: user
            .avatar_url
            .clone()
            .or_else(|| user.favorites.first().map(|g| g.image_url.clone())),
        fields,
    }
}

/// Build the review message for `review`.
pub fn review_embed(review: &Review) -> Embed {
    let title = match review.stars() {
        Some(stars) => format!("{stars:.1}⭐ review of {}", review.title),
        None => format!("Review of {}", review.title),
    };

    let mut fields = vec![
        EmbedField::new(
            "Stats",
            format!(" 🩷 {}  💬 {}", review.likes, review.comments),
            false,
        ),
        EmbedField::new("Status", review.play_type.clone(), true),
    ];
    if !review.platform.is_empty() {
        fields.push(EmbedField::new("Platform", review.platform.clone(), true));
    }

    Embed {
        title,
        url: Some(review.url.clone()).filter(|u| !u.is_empty()),
        author: Some(review.username.clone()),
        description: truncate_chars(review.text.trim(), DESCRIPTION_LIMIT),
        thumbnail: Some(review.game_image_url.clone()),
        fields,
    }
}

/// Shorten a bio for the profile message.
fn format_bio(bio: &str) -> String {
    let bio = bio.trim_end();
    match bio.find('\n') {
        Some(i) if i != 0 => bio[..i].trim_end().to_string(),
        _ => truncate_chars(bio, DESCRIPTION_LIMIT),
    }
}

impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.url {
            Some(url) => writeln!(f, "**{}** <{}>", self.title, url)?,
            None => writeln!(f, "**{}**", self.title)?,
        }
        if let Some(author) = &self.author {
            writeln!(f, "by {author}")?;
        }
        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        for field in &self.fields {
            if !field.name.is_empty() {
                writeln!(f)?;
                if field.inline {
                    writeln!(f, "{}: {}", field.name, field.value)?;
                    continue;
                }
                writeln!(f, "__{}__", field.name)?;
            }
            writeln!(f, "{}", field.value)?;
        }
        if let Some(thumbnail) = &self.thumbnail {
            writeln!(f)?;
            writeln!(f, "🖼 {thumbnail}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FavoriteGame, ReviewStats};

    fn site() -> Site {
        Site::new("https://www.backloggd.com").unwrap()
    }

    fn user() -> UserProfile {
        UserProfile {
            name: "sorbet".to_string(),
            bio: "Mostly RPGs.\nSometimes roguelikes.".to_string(),
            avatar_url: Some("https://cdn.backloggd.com/sorbet.png".to_string()),
            games_played_total: 120,
            games_played_this_year: 15,
            games_backloggd: 340,
            favorites: vec![
                FavoriteGame {
                    name: "Hades".to_string(),
                    url: "/games/hades/".to_string(),
                    image_url: "https://images.igdb.com/hades.jpg".to_string(),
                },
                FavoriteGame {
                    name: "Celeste".to_string(),
                    url: "/games/celeste/".to_string(),
                    image_url: "https://images.igdb.com/celeste.jpg".to_string(),
                },
            ],
            review_stats: ReviewStats {
                review_count: 21,
                fav_count: 3,
            },
        }
    }

    fn review() -> Review {
        Review {
            url: "https://www.backloggd.com/u/sorbet/review/1/".to_string(),
            title: "Hades".to_string(),
            username: "sorbet".to_string(),
            game_url: "/games/hades/".to_string(),
            game_image_url: "https://images.igdb.com/hades.jpg".to_string(),
            play_type: "Completed".to_string(),
            platform: "Nintendo Switch".to_string(),
            rating: Some(90),
            text: "Great.".to_string(),
            likes: 7,
            comments: 3,
            date: "Jan 3, 2024".to_string(),
        }
    }

    #[test]
    fn test_user_embed() {
        let embed = user_embed(&user(), &site());
        assert_eq!(embed.title, "sorbet");
        assert_eq!(
            embed.url.as_deref(),
            Some("https://www.backloggd.com/u/sorbet/")
        );
        assert_eq!(embed.description, "Mostly RPGs.");
        assert_eq!(
            embed.thumbnail.as_deref(),
            Some("https://cdn.backloggd.com/sorbet.png")
        );
        assert_eq!(embed.fields[0].value, "🎮 120  📆 15  📚 340  📝 21  🩷 3");
        assert_eq!(embed.fields[1].name, "Favourites");
        assert_eq!(
            embed.fields[1].value,
            "[Hades](https://www.backloggd.com/games/hades/)"
        );
        assert_eq!(embed.fields[2].name, "");
        assert_eq!(embed.fields.len(), 3);
    }

    #[test]
    fn test_user_embed_without_avatar_uses_first_favorite() {
        let mut user = user();
        user.avatar_url = None;
        let embed = user_embed(&user, &site());
        assert_eq!(
            embed.thumbnail.as_deref(),
            Some("https://images.igdb.com/hades.jpg")
        );
    }

    #[test]
    fn test_user_embed_without_favorites() {
        let mut user = user();
        user.favorites.clear();
        let embed = user_embed(&user, &site());
        assert_eq!(
            embed.thumbnail.as_deref(),
            Some("https://cdn.backloggd.com/sorbet.png")
        );

        user.avatar_url = None;
        let embed = user_embed(&user, &site());
        assert_eq!(embed.thumbnail, None);
        assert_eq!(embed.fields.len(), 1);
        assert!(!embed.to_string().contains("Favourites"));
    }

    #[test]
    fn test_format_bio() {
        assert_eq!(format_bio("one line"), "one line");
        assert_eq!(format_bio("first\nsecond"), "first");

        let long = "x".repeat(400);
        let formatted = format_bio(&long);
        assert_eq!(formatted, format!("{}...", "x".repeat(300)));
    }

    #[test]
    fn test_review_embed_rated() {
        let embed = review_embed(&review());
        assert_eq!(embed.title, "4.5⭐ review of Hades");
        assert_eq!(embed.author.as_deref(), Some("sorbet"));
        assert_eq!(embed.fields[0].value, " 🩷 7  💬 3");
        assert_eq!(embed.fields[1].value, "Completed");
        assert_eq!(embed.fields[2].name, "Platform");
    }

    #[test]
    fn test_review_embed_unrated_without_platform() {
        let mut review = review();
        review.rating = None;
        review.platform.clear();
        let embed = review_embed(&review);
        assert_eq!(embed.title, "Review of Hades");
        assert_eq!(embed.fields.len(), 2);
    }

    #[test]
    fn test_review_embed_zero_rating_is_rated() {
        let mut review = review();
        review.rating = Some(0);
        assert_eq!(review_embed(&review).title, "0.0⭐ review of Hades");
    }

    #[test]
    fn test_review_embed_truncates_long_text() {
        let mut review = review();
        review.text = "é".repeat(500);
        let embed = review_embed(&review);
        assert_eq!(embed.description.chars().count(), 303);
    }

    #[test]
    fn test_embed_display() {
        let text = review_embed(&review()).to_string();
        assert!(text.starts_with(
            "**4.5⭐ review of Hades** <https://www.backloggd.com/u/sorbet/review/1/>\n"
        ));
        assert!(text.contains("by sorbet\n"));
        assert!(text.contains("Status: Completed\n"));
        assert!(text.contains("Platform: Nintendo Switch\n"));
        assert!(text.contains("__Stats__\n 🩷 7  💬 3\n"));
    }
}
