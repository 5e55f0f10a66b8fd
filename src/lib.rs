pub mod catalog;
pub mod constants;
pub mod domain;
pub mod ingest;
pub mod models;
pub mod routes;
pub mod services;

use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_secret: Vec<u8>,
}
