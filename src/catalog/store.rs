//! Catalog view state: fetched videos, active filters, committed search,
//! pagination counters and embed failures for one page visit.

use crate::catalog::embeds::{EmbedManager, ScriptHost};
use crate::catalog::filter::{self, Filter, FilterKind, Orientation};
use crate::catalog::pagination::{Breakpoint, Pager};
use crate::catalog::search;
use crate::models::Video;

/// Storage key for the committed search query.
pub const SEARCH_STORAGE_KEY: &str = "bp:search";

/// Per-browser persistence for the committed query (localStorage in a web
/// host). The key is fixed; an empty query clears the entry.
pub trait QueryStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, query: &str);
    fn clear(&mut self);
}

/// In-memory store for hosts without persistent storage, and for tests.
#[derive(Debug, Default)]
pub struct MemoryQueryStore {
    query: Option<String>,
}

impl QueryStore for MemoryQueryStore {
    fn load(&self) -> Option<String> {
        self.query.clone()
    }

    fn save(&mut self, query: &str) {
        self.query = Some(query.to_owned());
    }

    fn clear(&mut self) {
        self.query = None;
    }
}

pub struct CatalogStore<Q: QueryStore> {
    videos: Vec<Video>,
    filters: Vec<Filter>,
    orientation: Orientation,
    /// Raw text in the input box; only committed text affects results.
    search_input: String,
    search_query: String,
    pager: Pager,
    embeds: EmbedManager,
    query_store: Q,
    /// Ids of the last derived result list, compared by value so the pager
    /// resets on real content changes and not on incidental re-derivation.
    last_result_ids: Vec<i64>,
}

impl<Q: QueryStore> CatalogStore<Q> {
    pub fn new(query_store: Q) -> Self {
        let persisted = query_store.load().unwrap_or_default();
        CatalogStore {
            videos: Vec::new(),
            filters: Vec::new(),
            orientation: Orientation::All,
            search_input: persisted.clone(),
            search_query: persisted,
            pager: Pager::new(),
            embeds: EmbedManager::new(),
            query_store,
            last_result_ids: Vec::new(),
        }
    }

    /// First-mount hook: make sure both vendor scripts are present.
    pub fn mount(&self, host: &mut impl ScriptHost) {
        self.embeds.ensure_loaded(host);
    }

    pub fn set_videos(&mut self, videos: Vec<Video>) {
        self.videos = videos;
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Filter selection: clicking the active value removes it, a different
    /// value of the same kind replaces it, anything else is added.
    pub fn toggle_filter(&mut self, kind: FilterKind, value: &str) {
        if let Some(idx) = self
            .filters
            .iter()
            .position(|f| f.kind == kind && f.value == value)
        {
            self.filters.remove(idx);
        } else if let Some(existing) = self.filters.iter_mut().find(|f| f.kind == kind) {
            existing.value = value.to_owned();
        } else {
            self.filters.push(Filter::new(kind, value));
        }
    }

    pub fn remove_filter(&mut self, kind: FilterKind, value: &str) {
        self.filters.retain(|f| !(f.kind == kind && f.value == value));
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_search_input(&mut self, raw: &str) {
        self.search_input = raw.to_owned();
    }

    /// Commit the raw input as the active query and persist it. An empty
    /// commit clears the persisted entry.
    pub fn commit_search(&mut self, raw: &str) {
        let query = raw.trim().to_owned();
        self.search_input = query.clone();
        if query.is_empty() {
            self.query_store.clear();
        } else {
            self.query_store.save(&query);
        }
        self.search_query = query;
    }

    pub fn clear_search(&mut self) {
        self.commit_search("");
    }

    /// Filter then rank. Pure derivation, safe to call repeatedly.
    pub fn filtered(&self) -> Vec<&Video> {
        let base = filter::apply(&self.videos, &self.filters, self.orientation);
        search::search(base, &self.search_query)
    }

    /// Reset both pagination counters whenever the derived list's content
    /// changed since the last call. Compared by video ids, not by
    /// reference, so re-derivation alone never resets.
    fn sync_pager(&mut self) {
        let ids: Vec<i64> = self.filtered().iter().map(|v| v.id).collect();
        if ids != self.last_result_ids {
            self.pager.reset();
            self.last_result_ids = ids;
        }
    }

    /// The slice currently on screen for the given breakpoint.
    pub fn displayed(&mut self, breakpoint: Breakpoint) -> Vec<&Video> {
        self.sync_pager();
        let filtered = self.filtered();
        self.pager.displayed(&filtered, breakpoint).to_vec()
    }

    pub fn visible_count(&self, breakpoint: Breakpoint) -> usize {
        self.pager.visible_count(breakpoint)
    }

    pub fn load_more(&mut self, breakpoint: Breakpoint) {
        self.sync_pager();
        let total = self.filtered().len();
        self.pager.load_more(breakpoint, total);
    }

    /// Re-run the vendor scripts. The view calls this after the displayed
    /// set changes (filter, search, load more, new data).
    pub fn refresh_embeds(&self, host: &mut impl ScriptHost) {
        self.embeds.refresh(host);
    }

    pub fn embed_failed(&self, video_id: i64) -> bool {
        self.embeds.has_failed(video_id)
    }

    pub fn mark_embed_failed(&mut self, video_id: i64) {
        self.embeds.mark_failed(video_id);
    }

    pub fn retry_embed(&mut self, video_id: i64, host: &mut impl ScriptHost) {
        self.embeds.retry(video_id, host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Focus, Mood, Platform};
    use chrono::Utc;

    fn video(id: i64, platform: Platform, category: Category) -> Video {
        Video {
            id,
            platform,
            title: format!("video {id}"),
            user: "creator".into(),
            views: 0,
            likes: None,
            category,
            focus: Focus::Sports,
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

    fn store_with(videos: Vec<Video>) -> CatalogStore<MemoryQueryStore> {
        let mut store = CatalogStore::new(MemoryQueryStore::default());
        store.set_videos(videos);
        store
    }

    #[test]
    fn test_toggle_filter_replace_and_remove() {
        let mut store = store_with(vec![]);
        store.toggle_filter(FilterKind::Category, "Comedy/Humor");
        assert_eq!(store.filters().len(), 1);

        // same kind, new value: replace, not accumulate
        store.toggle_filter(FilterKind::Category, "Educational");
        assert_eq!(store.filters().len(), 1);
        assert_eq!(store.filters()[0].value, "Educational");

        // different kind: AND across kinds
        store.toggle_filter(FilterKind::Mood, "Calm");
        assert_eq!(store.filters().len(), 2);

        // same kind and value: toggle off
        store.toggle_filter(FilterKind::Category, "Educational");
        assert_eq!(store.filters().len(), 1);
    }

    #[test]
    fn test_two_filter_scenario() {
        let videos = vec![
            video(1, Platform::Youtube, Category::ComedyHumor),
            video(2, Platform::TikTok, Category::Educational),
        ];
        let mut store = store_with(videos);
        store.toggle_filter(FilterKind::Category, "Comedy/Humor");
        let shown = store.displayed(Breakpoint::Desktop);
        assert_eq!(shown.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_pager_resets_on_content_change_only() {
        let videos: Vec<Video> = (1..=40)
            .map(|id| video(id, Platform::Youtube, Category::Lifestyle))
            .collect();
        let mut store = store_with(videos);

        store.displayed(Breakpoint::Mobile);
        store.load_more(Breakpoint::Mobile);
        assert_eq!(store.visible_count(Breakpoint::Mobile), 20);

        // re-deriving the same content must not reset
        store.displayed(Breakpoint::Mobile);
        assert_eq!(store.visible_count(Breakpoint::Mobile), 20);

        // a real content change resets both counters
        store.toggle_filter(FilterKind::Category, "Lifestyle");
        store.toggle_filter(FilterKind::Category, "Lifestyle");
        store.set_orientation(Orientation::Horizontal); // same content (all Youtube)
        store.displayed(Breakpoint::Mobile);
        assert_eq!(store.visible_count(Breakpoint::Mobile), 20);

        store.set_orientation(Orientation::Vertical); // now empty
        store.displayed(Breakpoint::Mobile);
        assert_eq!(store.visible_count(Breakpoint::Mobile), 10);
    }

    #[test]
    fn test_breakpoint_switch_does_not_reset() {
        let videos: Vec<Video> = (1..=60)
            .map(|id| video(id, Platform::Youtube, Category::Lifestyle))
            .collect();
        let mut store = store_with(videos);

        store.displayed(Breakpoint::Mobile);
        store.load_more(Breakpoint::Mobile);
        assert_eq!(store.displayed(Breakpoint::Mobile).len(), 20);

        // switching to desktop reads the other counter, untouched
        assert_eq!(store.displayed(Breakpoint::Desktop).len(), 25);
        assert_eq!(store.displayed(Breakpoint::Mobile).len(), 20);
    }

    #[test]
    fn test_search_commit_persists_and_clears() {
        let mut store = CatalogStore::new(MemoryQueryStore::default());
        store.commit_search("  ocean  ");
        assert_eq!(store.search_query(), "ocean");

        // a fresh store over the same backing storage picks the query up
        let persisted = store.query_store.load();
        assert_eq!(persisted.as_deref(), Some("ocean"));

        store.clear_search();
        assert_eq!(store.search_query(), "");
        assert_eq!(store.query_store.load(), None);
    }

    #[test]
    fn test_search_applies_after_filters() {
        let mut a = video(1, Platform::Youtube, Category::Lifestyle);
        a.title = "ocean drone shots".into();
        let mut b = video(2, Platform::TikTok, Category::Lifestyle);
        b.title = "ocean swimming".into();
        let mut store = store_with(vec![a, b]);

        store.set_orientation(Orientation::Horizontal);
        store.commit_search("ocean");
        let shown = store.displayed(Breakpoint::Desktop);
        assert_eq!(shown.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_embed_failure_scoped_to_card() {
        let mut store = store_with(vec![]);
        store.mark_embed_failed(4);
        assert!(store.embed_failed(4));
        assert!(!store.embed_failed(5));
    }
}
