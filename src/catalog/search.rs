//! Token-based search and ranking over the filtered list.
//!
//! Queries under two characters are a no-op so a single keystroke never
//! reshuffles the grid. Tokens are expanded through a small synonym table;
//! the table is not required to be symmetric.

use crate::models::Video;

/// Queries shorter than this (trimmed) leave the list untouched.
pub const MIN_QUERY_LEN: usize = 2;

/// Lightweight synonym map for semantic-ish matching.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("ocean", &["sea", "beach", "waves", "surf", "coast"]),
    ("surf", &["ocean", "waves", "beach"]),
    ("cinema", &["cinematic", "movie", "film"]),
    ("movie", &["cinematic", "film", "cinema"]),
    ("relaxing", &["calm", "chill"]),
    ("energetic", &["high energy", "hype", "intense"]),
    ("tech", &["technology", "gaming", "tech + gaming"]),
    ("music", &["music + culture", "song", "artist"]),
    ("finance", &["money", "investing"]),
    ("sports", &["athletics", "competition"]),
    ("funny", &["comedy", "humor"]),
];

/// Lowercase, split on whitespace, drop tokens under two characters, then
/// union in synonyms. Insertion order is kept and duplicates removed so the
/// result is deterministic.
pub fn tokenize(query: &str) -> Vec<String> {
    let base: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.len() >= MIN_QUERY_LEN)
        .map(str::to_owned)
        .collect();

    fn push_unique(tokens: &mut Vec<String>, t: String) {
        if !tokens.contains(&t) {
            tokens.push(t);
        }
    }

    let mut tokens: Vec<String> = Vec::with_capacity(base.len());
    for word in &base {
        push_unique(&mut tokens, word.clone());
        if let Some((_, syns)) = SYNONYMS.iter().find(|(k, _)| k == word) {
            for s in *syns {
                push_unique(&mut tokens, (*s).to_owned());
            }
        }
    }
    tokens
}

/// Weighted substring scoring: title=5, handle=4, category=3, focus=3,
/// mood=2, platform=1, summed over all tokens.
pub fn score(video: &Video, tokens: &[String]) -> u32 {
    let title = video.title.to_lowercase();
    let user = video
        .user
        .to_lowercase()
        .trim_start_matches('@')
        .to_owned();
    let category = video.category.as_str().to_lowercase();
    let focus = video.focus.as_str().to_lowercase();
    let mood = video.mood.as_str().to_lowercase();
    let platform = video.platform.as_str().to_lowercase();

    let mut score = 0;
    for t in tokens {
        if title.contains(t.as_str()) {
            score += 5;
        }
        if user.contains(t.as_str()) {
            score += 4;
        }
        if category.contains(t.as_str()) {
            score += 3;
        }
        if focus.contains(t.as_str()) {
            score += 3;
        }
        if mood.contains(t.as_str()) {
            score += 2;
        }
        if platform.contains(t.as_str()) {
            score += 1;
        }
    }
    score
}

/// Re-rank `videos` by the query: zero-score entries are dropped and the
/// rest sorted by descending score. The sort is stable, so equal scores
/// keep their relative input order.
pub fn search<'a>(videos: Vec<&'a Video>, query: &str) -> Vec<&'a Video> {
    let q = query.trim();
    if q.len() < MIN_QUERY_LEN {
        return videos;
    }

    let tokens = tokenize(q);
    let mut scored: Vec<(&Video, u32)> = videos
        .into_iter()
        .map(|v| (v, score(v, &tokens)))
        .filter(|(_, s)| *s > 0)
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(v, _)| v).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Focus, Mood, Platform};
    use chrono::Utc;

    fn video(id: i64, title: &str, user: &str) -> Video {
        Video {
            id,
            platform: Platform::Youtube,
            title: title.into(),
            user: user.into(),
            views: 0,
            likes: None,
            category: Category::Lifestyle,
            focus: Focus::TechGaming,
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

    fn ids(videos: &[&Video]) -> Vec<i64> {
        videos.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_short_query_is_a_noop() {
        let a = video(1, "alpha", "x");
        let b = video(2, "beta", "y");
        let list = vec![&a, &b];
        assert_eq!(ids(&search(list.clone(), "")), vec![1, 2]);
        assert_eq!(ids(&search(list.clone(), "a")), vec![1, 2]);
        assert_eq!(ids(&search(list, "  z  ")), vec![1, 2]);
    }

    #[test]
    fn test_zero_score_videos_dropped() {
        let a = video(1, "ocean sunrise", "x");
        let b = video(2, "desert dunes", "y");
        let list = vec![&a, &b];
        assert_eq!(ids(&search(list, "ocean")), vec![1]);
    }

    #[test]
    fn test_title_outranks_handle() {
        let by_title = video(1, "skate tricks", "someone");
        let by_user = video(2, "weekly vlog", "@skate_pro");
        let list = vec![&by_user, &by_title];
        // title hit (5) beats handle hit (4) regardless of input order
        assert_eq!(ids(&search(list, "skate")), vec![1, 2]);
    }

    #[test]
    fn test_stable_order_for_ties() {
        let a = video(1, "calm morning", "x");
        let b = video(2, "calm evening", "y");
        let list = vec![&a, &b];
        assert_eq!(ids(&search(list, "calm")), vec![1, 2]);
        let list = vec![&b, &a];
        assert_eq!(ids(&search(list, "calm")), vec![2, 1]);
    }

    #[test]
    fn test_synonym_expansion_is_one_way() {
        let a = video(1, "ocean waves at dawn", "x");
        let list = vec![&a];
        // "surf" expands to "ocean" via the table
        assert_eq!(ids(&search(list, "surf")), vec![1]);

        // the reverse direction relies on "ocean"'s own row; a title that
        // only says "surfing" still matches because ocean -> surf
        let b = video(2, "surfing the break", "y");
        let list = vec![&b];
        assert_eq!(ids(&search(list, "ocean")), vec![2]);
    }

    #[test]
    fn test_handle_at_sign_stripped() {
        let a = video(1, "untitled", "@surfqueen");
        let list = vec![&a];
        assert_eq!(ids(&search(list, "surfqueen")), vec![1]);
    }

    #[test]
    fn test_tokenize_drops_short_and_dedupes() {
        let tokens = tokenize("a ocean OCEAN");
        assert_eq!(tokens[0], "ocean");
        assert_eq!(tokens.iter().filter(|t| *t == "ocean").count(), 1);
        assert!(tokens.contains(&"surf".to_owned()));
    }
}
