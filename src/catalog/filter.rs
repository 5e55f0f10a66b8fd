//! Content and orientation filtering.
//!
//! Active filters combine with AND across kinds and OR within a kind. The
//! UI only ever holds one value per kind (selecting a second replaces the
//! first) but the contract supports several.

use std::collections::HashMap;

use crate::models::{Platform, Video};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Category,
    Focus,
    Mood,
    SponsoredContent,
}

/// One active `(kind, value)` selection. Values are the canonical taxonomy
/// labels; `SponsoredContent` additionally accepts the literal "None",
/// which matches videos with no sponsorship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub kind: FilterKind,
    pub value: String,
}

impl Filter {
    pub fn new(kind: FilterKind, value: impl Into<String>) -> Self {
        Filter {
            kind,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    All,
    Vertical,
    Horizontal,
}

impl Orientation {
    fn passes(&self, platform: Platform) -> bool {
        match self {
            Orientation::All => true,
            Orientation::Vertical => matches!(platform, Platform::TikTok | Platform::Instagram),
            Orientation::Horizontal => platform == Platform::Youtube,
        }
    }
}

fn field_matches(video: &Video, kind: FilterKind, value: &str) -> bool {
    match kind {
        FilterKind::Category => video.category.as_str() == value,
        FilterKind::Focus => video.focus.as_str() == value,
        FilterKind::Mood => video.mood.as_str() == value,
        FilterKind::SponsoredContent => match &video.sponsored_content {
            None => value == "None",
            Some(s) => s.as_str() == value,
        },
    }
}

/// Pure, stable filter: a video is kept iff it matches every represented
/// filter kind (any value within the kind) and the orientation predicate.
/// Input order is preserved.
pub fn apply<'a>(
    videos: &'a [Video],
    filters: &[Filter],
    orientation: Orientation,
) -> Vec<&'a Video> {
    let mut groups: HashMap<FilterKind, Vec<&str>> = HashMap::new();
    for f in filters {
        groups.entry(f.kind).or_default().push(&f.value);
    }

    videos
        .iter()
        .filter(|video| {
            let content_pass = groups.iter().all(|(kind, values)| {
                values.iter().any(|value| field_matches(video, *kind, value))
            });
            content_pass && orientation.passes(video.platform)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Focus, Mood, Sponsored};
    use chrono::Utc;

    fn video(id: i64, platform: Platform, category: Category, focus: Focus) -> Video {
        Video {
            id,
            platform,
            title: format!("video {id}"),
            user: "creator".into(),
            views: 0,
            likes: None,
            category,
            focus,
            mood: Mood::Calm,
            sponsored_content: None,
            rating: 7.0,
            url: String::new(),
            insta_embed: String::new(),
            tiktok_embed: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_single_category_filter() {
        let videos = vec![
            video(1, Platform::Youtube, Category::ComedyHumor, Focus::Sports),
            video(2, Platform::TikTok, Category::Educational, Focus::Sports),
        ];
        let filters = vec![Filter::new(FilterKind::Category, "Comedy/Humor")];
        let out = apply(&videos, &filters, Orientation::All);
        assert_eq!(out.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_and_across_kinds_or_within_kind() {
        let videos = vec![
            video(1, Platform::Youtube, Category::ComedyHumor, Focus::Sports),
            video(2, Platform::Youtube, Category::ComedyHumor, Focus::Fashion),
            video(3, Platform::Youtube, Category::Educational, Focus::Sports),
        ];
        // Two values in the same kind: OR
        let filters = vec![
            Filter::new(FilterKind::Focus, "Sports"),
            Filter::new(FilterKind::Focus, "Fashion"),
        ];
        let out = apply(&videos, &filters, Orientation::All);
        assert_eq!(out.len(), 3);

        // Adding a filter of a new kind never grows the result
        let filters = vec![
            Filter::new(FilterKind::Focus, "Sports"),
            Filter::new(FilterKind::Category, "Comedy/Humor"),
        ];
        let out = apply(&videos, &filters, Orientation::All);
        assert_eq!(out.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_sponsored_none_matches_absence() {
        let mut sponsored = video(1, Platform::Youtube, Category::Lifestyle, Focus::Beauty);
        sponsored.sponsored_content = Some(Sponsored::Goods);
        let unsponsored = video(2, Platform::Youtube, Category::Lifestyle, Focus::Beauty);
        let videos = vec![sponsored, unsponsored];

        let none = vec![Filter::new(FilterKind::SponsoredContent, "None")];
        let out = apply(&videos, &none, Orientation::All);
        assert_eq!(out.iter().map(|v| v.id).collect::<Vec<_>>(), vec![2]);

        let goods = vec![Filter::new(FilterKind::SponsoredContent, "Goods")];
        let out = apply(&videos, &goods, Orientation::All);
        assert_eq!(out.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_orientation_axis() {
        let videos = vec![
            video(1, Platform::Youtube, Category::Lifestyle, Focus::Sports),
            video(2, Platform::TikTok, Category::Lifestyle, Focus::Sports),
            video(3, Platform::Instagram, Category::Lifestyle, Focus::Sports),
        ];
        let vertical = apply(&videos, &[], Orientation::Vertical);
        assert_eq!(vertical.iter().map(|v| v.id).collect::<Vec<_>>(), vec![2, 3]);
        let horizontal = apply(&videos, &[], Orientation::Horizontal);
        assert_eq!(horizontal.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1]);
        let all = apply(&videos, &[], Orientation::All);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_input_order_preserved() {
        let videos = vec![
            video(3, Platform::Youtube, Category::Lifestyle, Focus::Sports),
            video(1, Platform::Youtube, Category::Lifestyle, Focus::Sports),
            video(2, Platform::Youtube, Category::Lifestyle, Focus::Sports),
        ];
        let out = apply(&videos, &[], Orientation::All);
        assert_eq!(out.iter().map(|v| v.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
