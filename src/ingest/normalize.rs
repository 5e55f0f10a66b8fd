//! Record normalization for the import jobs.
//!
//! Source exports are messy: counts arrive as "3.4M" or "12,000", taxonomy
//! labels drift ("Music", "Relaxed/Calm"), and whole columns go missing.
//! Everything soft gets a default; only a missing render source for the
//! record's platform makes a row unusable.

use serde::Deserialize;
use serde_json::Value;

use crate::constants::{DEFAULT_RATING, DEFAULT_VIEWS};
use crate::ingest::VideoImport;
use crate::models::{Category, Focus, Mood, Platform, Sponsored};

/// One raw input row, every field as found in the file. CSV headers and
/// JSON keys both use the camelCase names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    pub platform: String,
    pub title: String,
    pub user: String,
    pub views: String,
    pub likes: String,
    pub category: String,
    pub focus: String,
    pub mood: String,
    pub sponsored_content: String,
    pub rating: String,
    pub url: String,
    pub insta_embed: String,
    pub tiktok_embed: String,
}

impl RawRecord {
    /// Build a record from one JSON object, stringifying scalars so the
    /// same normalization path handles both file formats.
    pub fn from_json(value: &Value) -> RawRecord {
        fn text(value: &Value, key: &str) -> String {
            match value.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => String::new(),
            }
        }

        RawRecord {
            platform: text(value, "platform"),
            title: text(value, "title"),
            user: text(value, "user"),
            views: text(value, "views"),
            likes: text(value, "likes"),
            category: text(value, "category"),
            focus: text(value, "focus"),
            mood: text(value, "mood"),
            sponsored_content: text(value, "sponsoredContent"),
            rating: text(value, "rating"),
            url: text(value, "url"),
            insta_embed: text(value, "instaEmbed"),
            tiktok_embed: text(value, "tiktokEmbed"),
        }
    }
}

/// Why a record was dropped from the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingUrl,
    MissingInstaEmbed,
    MissingTiktokEmbed,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingUrl => write!(f, "Youtube record has no url"),
            SkipReason::MissingInstaEmbed => write!(f, "Instagram record has no instaEmbed"),
            SkipReason::MissingTiktokEmbed => write!(f, "TikTok record has no tiktokEmbed"),
        }
    }
}

/// Parse a count that may carry a magnitude suffix ("12K", "3.4M") or
/// thousands separators ("12,000").
pub fn parse_count(raw: &str) -> Option<i64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    let (digits, multiplier) = match cleaned.chars().last() {
        Some('k') | Some('K') => (&cleaned[..cleaned.len() - 1], 1_000.0),
        Some('m') | Some('M') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    let value: f64 = digits.trim().parse().ok()?;
    Some((value * multiplier).round() as i64)
}

fn parse_views(raw: &str) -> i64 {
    parse_count(raw).unwrap_or(DEFAULT_VIEWS)
}

fn parse_rating(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(DEFAULT_RATING)
}

fn normalize_category(raw: &str) -> Category {
    raw.trim().parse().unwrap_or(Category::Lifestyle)
}

fn normalize_focus(raw: &str) -> Focus {
    // "Music" predates the merged "Music + Culture" label
    match raw.trim() {
        "Music" => Focus::MusicCulture,
        other => other.parse().unwrap_or(Focus::TechGaming),
    }
}

fn normalize_mood(raw: &str) -> Mood {
    match raw.trim() {
        "Relaxed/Calm" | "Relaxed" => Mood::Calm,
        other => other.parse().unwrap_or(Mood::Calm),
    }
}

fn normalize_sponsored(raw: &str) -> Option<Sponsored> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return None;
    }
    trimmed.parse().ok()
}

/// Normalize one raw record into an upsertable [`VideoImport`], or report
/// why it must be skipped. Failures never abort the batch; the caller
/// counts them and moves on.
pub fn normalize(record: &RawRecord) -> Result<VideoImport, SkipReason> {
    let platform = record
        .platform
        .trim()
        .parse()
        .unwrap_or(Platform::Youtube);

    let url = record.url.trim().to_owned();
    let insta_embed = record.insta_embed.trim().to_owned();
    let tiktok_embed = record.tiktok_embed.trim().to_owned();

    // Each platform has exactly one render source; without it the record
    // can never produce a working card.
    match platform {
        Platform::Youtube if url.is_empty() => return Err(SkipReason::MissingUrl),
        Platform::Instagram if insta_embed.is_empty() => {
            return Err(SkipReason::MissingInstaEmbed);
        }
        Platform::TikTok if tiktok_embed.is_empty() => {
            return Err(SkipReason::MissingTiktokEmbed);
        }
        _ => {}
    }

    let user = match record.user.trim() {
        "" => "Unknown".to_owned(),
        u => u.to_owned(),
    };
    let title = match record.title.trim() {
        "" => format!("Video by {user}"),
        t => t.to_owned(),
    };

    Ok(VideoImport {
        platform,
        title,
        user,
        views: parse_views(&record.views),
        likes: parse_count(&record.likes),
        category: normalize_category(&record.category),
        focus: normalize_focus(&record.focus),
        mood: normalize_mood(&record.mood),
        sponsored_content: normalize_sponsored(&record.sponsored_content),
        rating: parse_rating(&record.rating),
        url,
        insta_embed,
        tiktok_embed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_count_magnitudes() {
        assert_eq!(parse_count("12K"), Some(12_000));
        assert_eq!(parse_count("3.4M"), Some(3_400_000));
        assert_eq!(parse_count("12,000"), Some(12_000));
        assert_eq!(parse_count("845"), Some(845));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("lots"), None);
    }

    #[test]
    fn test_csv_normalization_scenario() {
        let record = RawRecord {
            platform: "youtube".into(),
            title: "Street performance".into(),
            user: "@busker".into(),
            views: "3.4M".into(),
            focus: "Music".into(),
            mood: "Relaxed/Calm".into(),
            url: "https://youtu.be/dQw4w9WgXcQ".into(),
            ..RawRecord::default()
        };
        let import = normalize(&record).unwrap();
        assert_eq!(import.views, 3_400_000);
        assert_eq!(import.focus, Focus::MusicCulture);
        assert_eq!(import.mood, Mood::Calm);
        assert_eq!(import.platform, Platform::Youtube);
    }

    #[test]
    fn test_soft_fields_get_defaults() {
        let record = RawRecord {
            platform: "Youtube".into(),
            url: "https://youtu.be/dQw4w9WgXcQ".into(),
            ..RawRecord::default()
        };
        let import = normalize(&record).unwrap();
        assert_eq!(import.user, "Unknown");
        assert_eq!(import.title, "Video by Unknown");
        assert_eq!(import.views, 1000);
        assert_eq!(import.likes, None);
        assert_eq!(import.rating, 7.0);
        assert_eq!(import.category, Category::Lifestyle);
        assert_eq!(import.focus, Focus::TechGaming);
        assert_eq!(import.sponsored_content, None);
    }

    #[test]
    fn test_missing_render_source_skips() {
        let record = RawRecord {
            platform: "TikTok".into(),
            title: "no embed".into(),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&record), Err(SkipReason::MissingTiktokEmbed));

        let record = RawRecord {
            platform: "Instagram".into(),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&record), Err(SkipReason::MissingInstaEmbed));

        let record = RawRecord::default(); // platform defaults to Youtube
        assert_eq!(normalize(&record), Err(SkipReason::MissingUrl));
    }

    #[test]
    fn test_sponsored_none_literal_is_absent() {
        assert_eq!(normalize_sponsored("None"), None);
        assert_eq!(normalize_sponsored(""), None);
        assert_eq!(normalize_sponsored("Goods"), Some(Sponsored::Goods));
        assert_eq!(normalize_sponsored("Barter"), None);
    }

    #[test]
    fn test_from_json_stringifies_scalars() {
        let value = json!({
            "platform": "Youtube",
            "title": "clip",
            "views": 845,
            "rating": 8.5,
            "url": "https://youtu.be/dQw4w9WgXcQ"
        });
        let record = RawRecord::from_json(&value);
        assert_eq!(record.views, "845");
        assert_eq!(record.rating, "8.5");
        let import = normalize(&record).unwrap();
        assert_eq!(import.views, 845);
        assert_eq!(import.rating, 8.5);
    }
}
