//! Third-party embed script lifecycle.
//!
//! TikTok and Instagram players come alive only after a vendor script scans
//! the page. Instagram exposes a re-invokable `process()` hook; TikTok does
//! not notice new placeholders after its first run, so the only reliable
//! refresh is removing and re-appending its script. The host environment
//! (the script-tag set, effectively a global) is abstracted behind
//! [`ScriptHost`] so every call site goes through one idempotent registry
//! instead of querying the document directly.

use std::collections::HashSet;

pub const INSTAGRAM_SCRIPT_SRC: &str = "//www.instagram.com/embed.js";
pub const TIKTOK_SCRIPT_SRC: &str = "https://www.tiktok.com/embed.js";

/// Substrings used to detect an already-present script tag.
pub const INSTAGRAM_SCRIPT_MARKER: &str = "instagram.com/embed.js";
pub const TIKTOK_SCRIPT_MARKER: &str = "tiktok.com/embed.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLoadError;

/// The environment that actually owns the script tags. `inject` resolves
/// with the script's load/error outcome rather than a fire-and-forget
/// timer; `process_instagram` returns false when the global hook is absent
/// (script not loaded yet), which is not an error.
pub trait ScriptHost {
    fn has_script(&self, marker: &str) -> bool;
    fn inject(&mut self, src: &str) -> Result<(), ScriptLoadError>;
    fn remove(&mut self, marker: &str);
    fn process_instagram(&mut self) -> bool;
}

/// Owns the failed-embed set and drives script lifecycle against a host.
#[derive(Debug, Default)]
pub struct EmbedManager {
    failed: HashSet<i64>,
}

impl EmbedManager {
    pub fn new() -> Self {
        EmbedManager::default()
    }

    /// Inject both vendor scripts if missing. Idempotent: check before
    /// insert, safe to call from every mount path.
    pub fn ensure_loaded(&self, host: &mut impl ScriptHost) {
        if !host.has_script(INSTAGRAM_SCRIPT_MARKER) {
            let _ = host.inject(INSTAGRAM_SCRIPT_SRC);
        }
        if !host.has_script(TIKTOK_SCRIPT_MARKER) {
            let _ = host.inject(TIKTOK_SCRIPT_SRC);
        }
    }

    /// Re-materialize players after the displayed set changed: ask
    /// Instagram to re-process, and give TikTok a fresh script since it has
    /// no incremental re-scan API. A failed TikTok load gets exactly one
    /// retry; after that the affected cards surface their own fallback.
    pub fn refresh(&self, host: &mut impl ScriptHost) {
        host.process_instagram();

        host.remove(TIKTOK_SCRIPT_MARKER);
        if host.inject(TIKTOK_SCRIPT_SRC).is_err() {
            let _ = host.inject(TIKTOK_SCRIPT_SRC);
        }
    }

    pub fn has_failed(&self, video_id: i64) -> bool {
        self.failed.contains(&video_id)
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Record a render failure for one card. Other cards are unaffected.
    pub fn mark_failed(&mut self, video_id: i64) {
        self.failed.insert(video_id);
    }

    /// User-triggered retry: clear the card's failure and re-run the same
    /// script refresh used on filter changes.
    pub fn retry(&mut self, video_id: i64, host: &mut impl ScriptHost) {
        self.failed.remove(&video_id);
        self.refresh(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recording host: scripts as a list of srcs, plus call counters.
    #[derive(Default)]
    struct FakeHost {
        scripts: Vec<String>,
        injections: Vec<String>,
        instagram_processed: usize,
        fail_next_injects: usize,
    }

    impl ScriptHost for FakeHost {
        fn has_script(&self, marker: &str) -> bool {
            self.scripts.iter().any(|s| s.contains(marker))
        }

        fn inject(&mut self, src: &str) -> Result<(), ScriptLoadError> {
            self.injections.push(src.to_owned());
            if self.fail_next_injects > 0 {
                self.fail_next_injects -= 1;
                return Err(ScriptLoadError);
            }
            self.scripts.push(src.to_owned());
            Ok(())
        }

        fn remove(&mut self, marker: &str) {
            self.scripts.retain(|s| !s.contains(marker));
        }

        fn process_instagram(&mut self) -> bool {
            self.instagram_processed += 1;
            self.has_script(INSTAGRAM_SCRIPT_MARKER)
        }
    }

    #[test]
    fn test_ensure_loaded_is_idempotent() {
        let mut host = FakeHost::default();
        let manager = EmbedManager::new();
        manager.ensure_loaded(&mut host);
        manager.ensure_loaded(&mut host);
        assert_eq!(host.scripts.len(), 2);
        assert_eq!(host.injections.len(), 2);
    }

    #[test]
    fn test_refresh_reloads_tiktok_and_processes_instagram() {
        let mut host = FakeHost::default();
        let manager = EmbedManager::new();
        manager.ensure_loaded(&mut host);

        manager.refresh(&mut host);
        assert_eq!(host.instagram_processed, 1);
        // exactly one tiktok script present after remove + reinsert
        let tiktok_count = host
            .scripts
            .iter()
            .filter(|s| s.contains(TIKTOK_SCRIPT_MARKER))
            .count();
        assert_eq!(tiktok_count, 1);
    }

    #[test]
    fn test_refresh_retries_failed_tiktok_load_once() {
        let mut host = FakeHost::default();
        let manager = EmbedManager::new();

        host.fail_next_injects = 1;
        manager.refresh(&mut host);
        assert!(host.has_script(TIKTOK_SCRIPT_MARKER));

        // two consecutive failures: bounded retry gives up
        host.remove(TIKTOK_SCRIPT_MARKER);
        host.injections.clear();
        host.fail_next_injects = 2;
        manager.refresh(&mut host);
        assert!(!host.has_script(TIKTOK_SCRIPT_MARKER));
        assert_eq!(host.injections.len(), 2);
    }

    #[test]
    fn test_failure_set_and_retry() {
        let mut host = FakeHost::default();
        let mut manager = EmbedManager::new();

        manager.mark_failed(7);
        manager.mark_failed(7);
        manager.mark_failed(9);
        assert!(manager.has_failed(7));
        assert_eq!(manager.failed_count(), 2);

        manager.retry(7, &mut host);
        assert!(!manager.has_failed(7));
        assert!(manager.has_failed(9));
        // retry re-runs the script refresh
        assert!(host.has_script(TIKTOK_SCRIPT_MARKER));
    }
}
