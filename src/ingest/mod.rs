//! Normalization and de-duplication shared by the import/export jobs.

pub mod dedupe;
pub mod normalize;

use std::collections::BTreeMap;

use sqlx::PgPool;

use crate::domain::videos;
use crate::models::{Category, Focus, Mood, Platform, Sponsored};

/// A fully normalized record, ready to upsert. Unlike
/// [`crate::models::Video`] it carries no id or timestamps; the database
/// assigns those.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoImport {
    pub platform: Platform,
    pub title: String,
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
}

/// Per-run tally printed at the end of every batch job.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
    pub by_platform: BTreeMap<&'static str, usize>,
}

impl ImportSummary {
    pub fn record_added(&mut self, platform: Platform) {
        self.added += 1;
        *self.by_platform.entry(platform.as_str()).or_default() += 1;
    }

    pub fn record_updated(&mut self, platform: Platform) {
        self.updated += 1;
        *self.by_platform.entry(platform.as_str()).or_default() += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Normalize one raw record and upsert it, tallying the outcome.
    /// Bad records are logged with their row number and skipped; the batch
    /// always runs to completion.
    pub async fn upsert_record(&mut self, db: &PgPool, record: &normalize::RawRecord, row: usize) {
        let import = match normalize::normalize(record) {
            Ok(import) => import,
            Err(reason) => {
                eprintln!("[import] row {row} skipped: {reason}");
                self.record_skipped();
                return;
            }
        };

        let key = dedupe::dedupe_key(&import);
        match videos::upsert_by_dedupe_key(db, &import, &key).await {
            Ok(true) => self.record_added(import.platform),
            Ok(false) => self.record_updated(import.platform),
            Err(e) => {
                eprintln!("[import] row {row} failed: {e}");
                self.record_skipped();
            }
        }
    }

    pub fn print(&self) {
        println!(
            "[import] done: {} added, {} updated, {} skipped",
            self.added, self.updated, self.skipped
        );
        for (platform, count) in &self.by_platform {
            println!("[import]   {platform}: {count}");
        }
    }
}
