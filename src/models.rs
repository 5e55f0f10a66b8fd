//! Video Record and the closed taxonomy domains.
//!
//! Each taxonomy is a sum type rather than a free string so that adding a
//! value (the `focus` set has grown twice already) is one edit here instead
//! of a scatter across filtering, validation and scoring.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Youtube,
    TikTok,
    Instagram,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Youtube, Platform::TikTok, Platform::Instagram];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "Youtube",
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
        }
    }
}

impl FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Cinematic/Storytelling")]
    CinematicStorytelling,
    #[serde(rename = "Comedy/Humor")]
    ComedyHumor,
    Educational,
    Lifestyle,
    #[serde(rename = "Trends/Viral")]
    TrendsViral,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::CinematicStorytelling,
        Category::ComedyHumor,
        Category::Educational,
        Category::Lifestyle,
        Category::TrendsViral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CinematicStorytelling => "Cinematic/Storytelling",
            Category::ComedyHumor => "Comedy/Humor",
            Category::Educational => "Educational",
            Category::Lifestyle => "Lifestyle",
            Category::TrendsViral => "Trends/Viral",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
    Sports,
    Fashion,
    Beauty,
    #[serde(rename = "Health + Wellness")]
    HealthWellness,
    #[serde(rename = "Tech + Gaming")]
    TechGaming,
    #[serde(rename = "Travel + Adventure")]
    TravelAdventure,
    #[serde(rename = "Music + Culture")]
    MusicCulture,
    Finance,
}

impl Focus {
    pub const ALL: [Focus; 8] = [
        Focus::Sports,
        Focus::Fashion,
        Focus::Beauty,
        Focus::HealthWellness,
        Focus::TechGaming,
        Focus::TravelAdventure,
        Focus::MusicCulture,
        Focus::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Sports => "Sports",
            Focus::Fashion => "Fashion",
            Focus::Beauty => "Beauty",
            Focus::HealthWellness => "Health + Wellness",
            Focus::TechGaming => "Tech + Gaming",
            Focus::TravelAdventure => "Travel + Adventure",
            Focus::MusicCulture => "Music + Culture",
            Focus::Finance => "Finance",
        }
    }
}

impl FromStr for Focus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        Focus::ALL.into_iter().find(|f| f.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Calm,
    #[serde(rename = "High Energy")]
    HighEnergy,
    Emotional,
    #[serde(rename = "Funny/Lighthearted")]
    FunnyLighthearted,
    #[serde(rename = "Dramatic/Suspenseful")]
    DramaticSuspenseful,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Calm,
        Mood::HighEnergy,
        Mood::Emotional,
        Mood::FunnyLighthearted,
        Mood::DramaticSuspenseful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Calm => "Calm",
            Mood::HighEnergy => "High Energy",
            Mood::Emotional => "Emotional",
            Mood::FunnyLighthearted => "Funny/Lighthearted",
            Mood::DramaticSuspenseful => "Dramatic/Suspenseful",
        }
    }
}

impl FromStr for Mood {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        Mood::ALL.into_iter().find(|m| m.as_str() == s).ok_or(())
    }
}

/// Sponsored-content kind. A video with no sponsorship carries `None` at the
/// `Option<Sponsored>` level; the literal filter value "None" matches that
/// absence and is resolved at the filter layer, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sponsored {
    Goods,
    Services,
    Events,
}

impl Sponsored {
    pub const ALL: [Sponsored; 3] = [Sponsored::Goods, Sponsored::Services, Sponsored::Events];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sponsored::Goods => "Goods",
            Sponsored::Services => "Services",
            Sponsored::Events => "Events",
        }
    }
}

impl FromStr for Sponsored {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        Sponsored::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

/// One catalogued video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i64,
    pub platform: Platform,
    pub title: String,
    /// Creator handle; may or may not carry a leading "@".
    pub user: String,
    pub views: i64,
    pub likes: Option<i64>,
    pub category: Category,
    pub focus: Focus,
    pub mood: Mood,
    pub sponsored_content: Option<Sponsored>,
    pub rating: f64,
    pub url: String,
    pub insta_embed: String,
    pub tiktok_embed: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a card needs to render this video's player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSource<'a> {
    /// YouTube iframe with the extracted 11-character video id.
    YoutubeIframe { video_id: &'a str },
    /// Pre-rendered TikTok embed markup.
    TikTokMarkup(&'a str),
    /// Pre-rendered Instagram embed markup.
    InstagramMarkup(&'a str),
    /// No renderable material; show a "view on platform" card linking `url`.
    Fallback,
}

impl Video {
    /// Resolves the per-platform render invariant: exactly one of `url`,
    /// `insta_embed`, `tiktok_embed` must supply enough to render, else the
    /// card falls back to an outbound link.
    pub fn render_source(&self) -> RenderSource<'_> {
        match self.platform {
            Platform::Youtube => match youtube_video_id(&self.url) {
                Some(id) => RenderSource::YoutubeIframe { video_id: id },
                None => RenderSource::Fallback,
            },
            Platform::TikTok => {
                if self.tiktok_embed.trim().is_empty() {
                    RenderSource::Fallback
                } else {
                    RenderSource::TikTokMarkup(&self.tiktok_embed)
                }
            }
            Platform::Instagram => {
                if self.insta_embed.trim().is_empty() {
                    RenderSource::Fallback
                } else {
                    RenderSource::InstagramMarkup(&self.insta_embed)
                }
            }
        }
    }

    /// Creator handle normalized for display, always with a leading "@".
    pub fn display_handle(&self) -> String {
        if self.user.starts_with('@') {
            self.user.clone()
        } else {
            format!("@{}", self.user)
        }
    }
}

static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*)").expect("valid regex")
});

/// Extract the 11-character video id from any of the usual YouTube URL
/// shapes; anything else is unrenderable.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let caps = YOUTUBE_ID_RE.captures(url)?;
    let id = caps.get(1)?.as_str();
    (id.len() == 11).then_some(id)
}
