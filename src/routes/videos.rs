//! Catalog endpoints: the paged feed and the by-ids hydration lookup.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::AppState;
use crate::constants::{DEFAULT_VIDEO_LIMIT, MAX_VIDEO_LIMIT};
use crate::domain::videos;
use crate::models::Video;
use crate::services::error::json_500;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/videos", get(list_videos))
        .route("/api/videos/by-ids", get(videos_by_ids))
}

#[derive(Deserialize)]
struct ListQuery {
    limit: Option<i64>,
}

/// GET /api/videos?limit=N - newest videos, newest first
async fn list_videos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Video>>, (StatusCode, Json<Value>)> {
    let limit = effective_limit(query.limit);

    let videos = videos::list_newest(&state.db, limit).await.map_err(|e| {
        eprintln!("List videos error: {}", e);
        json_500("Failed to fetch videos")
    })?;

    Ok(Json(videos))
}

#[derive(Deserialize)]
struct ByIdsQuery {
    ids: Option<String>,
}

/// GET /api/videos/by-ids?ids=3,1,5 - fetch specific videos, preserving
/// the order of the ids parameter. Unknown and malformed ids are skipped.
async fn videos_by_ids(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ByIdsQuery>,
) -> Result<Json<Vec<Video>>, (StatusCode, Json<Value>)> {
    let ids = parse_ids(query.ids.as_deref().unwrap_or(""));
    if ids.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let videos = videos::get_by_ids(&state.db, &ids).await.map_err(|e| {
        eprintln!("Videos by ids error: {}", e);
        json_500("Failed to fetch videos")
    })?;

    Ok(Json(videos))
}

fn effective_limit(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_VIDEO_LIMIT).clamp(1, MAX_VIDEO_LIMIT)
}

fn parse_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}
