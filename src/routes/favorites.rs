//! Per-user favorites, keyed by (user, video).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::domain::{favorites, videos};
use crate::models::Video;
use crate::routes::auth::AuthUser;
use crate::services::error::LogErr;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/favorites", get(list_favorites).post(add_favorite))
        .route("/api/favorites/{video_id}", delete(remove_favorite))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteEntry {
    video_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct FavoritesResponse {
    favorites: Vec<FavoriteEntry>,
    /// The favorited videos, hydrated in the same order as `favorites`.
    /// A favorite whose video has been deleted appears only in the first
    /// list.
    videos: Vec<Video>,
}

/// GET /api/favorites - the signed-in user's favorites, newest first
async fn list_favorites(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<FavoritesResponse>, StatusCode> {
    let favorites = favorites::list_for_user(&state.db, user_id)
        .await
        .log_500("List favorites error")?;

    let ids: Vec<i64> = favorites.iter().map(|f| f.video_id).collect();
    let videos = videos::get_by_ids(&state.db, &ids)
        .await
        .log_500("Hydrate favorites error")?;

    Ok(Json(FavoritesResponse {
        favorites: favorites
            .into_iter()
            .map(|f| FavoriteEntry {
                video_id: f.video_id,
                created_at: f.created_at,
            })
            .collect(),
        videos,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddFavoriteRequest {
    video_id: i64,
}

/// POST /api/favorites - add a favorite; 201 when created, 200 when it
/// already existed
async fn add_favorite(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<AddFavoriteRequest>,
) -> Result<StatusCode, StatusCode> {
    let inserted = favorites::add(&state.db, user_id, req.video_id)
        .await
        .log_500("Add favorite error")?;

    Ok(if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    })
}

/// DELETE /api/favorites/{video_id} - remove a favorite; 404 when absent
async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(video_id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let removed = favorites::remove(&state.db, user_id, video_id)
        .await
        .log_500("Remove favorite error")?;

    if !removed {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(StatusCode::NO_CONTENT)
}
