//! Stable identity for imported records.
//!
//! Re-running an import against an updated export must update rows, not
//! duplicate them, so every record gets a dedupe key derived from its most
//! stable identifier: a platform-native id mined from the embed markup,
//! then the source url, then a fingerprint of the markup itself.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::ingest::VideoImport;
use crate::models::Platform;

static INSTA_REEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"instagram\.com/reel/([^/?]+)").expect("valid regex"));

static TIKTOK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-video-id="([^"]+)""#).expect("valid regex"));

fn markup_fingerprint(markup: &str) -> String {
    let digest = Sha256::digest(markup.as_bytes());
    // 16 bytes of the digest is plenty for a uniqueness key
    digest[..16].iter().map(|b| format!("{b:02x}")).collect()
}

/// The unique key this record upserts under. Prefixes keep the namespaces
/// disjoint so a url can never collide with a platform id.
pub fn dedupe_key(import: &VideoImport) -> String {
    match import.platform {
        Platform::Instagram => {
            if let Some(caps) = INSTA_REEL_RE.captures(&import.insta_embed) {
                return format!("instagram:{}", &caps[1]);
            }
        }
        Platform::TikTok => {
            if let Some(caps) = TIKTOK_ID_RE.captures(&import.tiktok_embed) {
                return format!("tiktok:{}", &caps[1]);
            }
        }
        Platform::Youtube => {}
    }

    if !import.url.is_empty() {
        return format!("url:{}", import.url);
    }

    let markup = if import.insta_embed.is_empty() {
        &import.tiktok_embed
    } else {
        &import.insta_embed
    };
    format!("embed:{}", markup_fingerprint(markup))
}
