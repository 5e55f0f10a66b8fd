//! Video domain - DB queries for the catalog.
//!
//! Taxonomy columns are stored as their canonical text labels. Reads go
//! through [`VideoRow`] and a lenient conversion: a row whose label no
//! longer parses (a value retired from the closed set) falls back to the
//! domain default instead of poisoning the whole page.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};

use crate::ingest::VideoImport;
use crate::models::{Category, Focus, Mood, Platform, Sponsored, Video};

const VIDEO_COLUMNS: &str = "id, platform, title, creator, views, likes, category, focus, mood, \
     sponsored_content, rating, url, insta_embed, tiktok_embed, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub struct VideoRow {
    pub id: i64,
    pub platform: String,
    pub title: String,
    pub creator: String,
    pub views: i64,
    pub likes: Option<i64>,
    pub category: String,
    pub focus: String,
    pub mood: String,
    pub sponsored_content: Option<String>,
    pub rating: f64,
    pub url: String,
    pub insta_embed: String,
    pub tiktok_embed: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VideoRow> for Video {
    fn from(row: VideoRow) -> Video {
        Video {
            id: row.id,
            platform: row.platform.parse().unwrap_or(Platform::Youtube),
            title: row.title,
            user: row.creator,
            views: row.views,
            likes: row.likes,
            category: row.category.parse().unwrap_or(Category::Lifestyle),
            focus: row.focus.parse().unwrap_or(Focus::TechGaming),
            mood: row.mood.parse().unwrap_or(Mood::Calm),
            sponsored_content: row
                .sponsored_content
                .and_then(|s| s.parse::<Sponsored>().ok()),
            rating: row.rating,
            url: row.url,
            insta_embed: row.insta_embed,
            tiktok_embed: row.tiktok_embed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Fetch the newest `limit` videos, newest first.
pub async fn list_newest<'e, E>(executor: E, limit: i64) -> Result<Vec<Video>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos ORDER BY id DESC LIMIT $1");
    let rows: Vec<VideoRow> = sqlx::query_as(&sql).bind(limit).fetch_all(executor).await?;
    Ok(rows.into_iter().map(Video::from).collect())
}

/// Fetch every video, newest first. Used by the export job.
pub async fn list_all_newest<'e, E>(executor: E) -> Result<Vec<Video>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos ORDER BY id DESC");
    let rows: Vec<VideoRow> = sqlx::query_as(&sql).fetch_all(executor).await?;
    Ok(rows.into_iter().map(Video::from).collect())
}

/// Fetch videos by id, preserving the order of `ids`. Unknown ids are
/// silently omitted.
pub async fn get_by_ids<'e, E>(executor: E, ids: &[i64]) -> Result<Vec<Video>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = ANY($1)");
    let rows: Vec<VideoRow> = sqlx::query_as(&sql).bind(ids).fetch_all(executor).await?;
    Ok(reorder_by_ids(ids, rows.into_iter().map(Video::from)))
}

/// Postgres returns `ANY($1)` matches in storage order; callers rely on
/// request order (favorites lists, shared links).
fn reorder_by_ids(ids: &[i64], videos: impl IntoIterator<Item = Video>) -> Vec<Video> {
    let mut by_id: HashMap<i64, Video> = videos.into_iter().map(|v| (v.id, v)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

/// Insert or update a video keyed by its dedupe key. Returns `true` when a
/// new row was created, `false` when an existing row was refreshed.
pub async fn upsert_by_dedupe_key<'e, E>(
    executor: E,
    import: &VideoImport,
    dedupe_key: &str,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    // xmax = 0 only for freshly inserted tuples, which distinguishes the
    // two ON CONFLICT outcomes in a single round trip.
    let row: (bool,) = sqlx::query_as(
        r#"
        INSERT INTO videos
            (platform, title, creator, views, likes, category, focus, mood,
             sponsored_content, rating, url, insta_embed, tiktok_embed, dedupe_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (dedupe_key) DO UPDATE SET
            platform = EXCLUDED.platform,
            title = EXCLUDED.title,
            creator = EXCLUDED.creator,
            views = EXCLUDED.views,
            likes = EXCLUDED.likes,
            category = EXCLUDED.category,
            focus = EXCLUDED.focus,
            mood = EXCLUDED.mood,
            sponsored_content = EXCLUDED.sponsored_content,
            rating = EXCLUDED.rating,
            url = EXCLUDED.url,
            insta_embed = EXCLUDED.insta_embed,
            tiktok_embed = EXCLUDED.tiktok_embed,
            updated_at = NOW()
        RETURNING (xmax = 0) AS inserted
        "#,
    )
    .bind(import.platform.as_str())
    .bind(&import.title)
    .bind(&import.user)
    .bind(import.views)
    .bind(import.likes)
    .bind(import.category.as_str())
    .bind(import.focus.as_str())
    .bind(import.mood.as_str())
    .bind(import.sponsored_content.map(|s| s.as_str()))
    .bind(import.rating)
    .bind(&import.url)
    .bind(&import.insta_embed)
    .bind(&import.tiktok_embed)
    .bind(dedupe_key)
    .fetch_one(executor)
    .await?;

    Ok(row.0)
}
