//! Favorites domain - DB queries for per-user bookmarks.
//!
//! A favorite is identified by `(user_id, video_id)`, so adding is an
//! idempotent point insert and removing a point delete.

use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};

#[derive(Debug, sqlx::FromRow)]
pub struct Favorite {
    pub video_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A user's favorites, most recently added first.
pub async fn list_for_user<'e, E>(executor: E, user_id: i64) -> Result<Vec<Favorite>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        SELECT video_id, created_at FROM favorites
        WHERE user_id = $1
        ORDER BY created_at DESC, video_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Add a favorite. Returns `false` when it already existed.
pub async fn add<'e, E>(executor: E, user_id: i64, video_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO favorites (user_id, video_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, video_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(video_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Remove a favorite. Returns `false` when it wasn't there.
pub async fn remove<'e, E>(executor: E, user_id: i64, video_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND video_id = $2")
        .bind(user_id)
        .bind(video_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}
