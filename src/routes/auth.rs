//! Authentication and session management endpoints

use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{StatusCode, header::SET_COOKIE, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

use crate::AppState;
use crate::domain::users;
use crate::services::error::LogErr;
use crate::services::{cookies, password, session};

const MIN_PASSWORD_LEN: usize = 8;

pub fn routes() -> Router<Arc<AppState>> {
    // Rate limit the auth endpoints to slow down credential stuffing
    let rate_limit_config = GovernorConfigBuilder::default()
        .per_second(6)
        .burst_size(10)
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .expect("Failed to build rate limit config");

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config.into(),
    };

    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh_session))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(get_me))
        .layer(rate_limit_layer)
}

// ============================================================================
// Auth Extractor - validates JWT cookie and extracts user_id
// ============================================================================

/// Extractor that validates the access_token cookie and returns the user_id
pub struct AuthUser(pub i64);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .log_500("Cookie extraction error")?;

        let access_token = jar
            .get(cookies::config::ACCESS_TOKEN_NAME)
            .map(|c| c.value())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let user_id = session::validate_access_token(access_token, &state.jwt_secret)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser(user_id))
    }
}

// ============================================================================
// Session endpoints
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    email: String,
    password: String,
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MeResponse {
    id: i64,
    email: String,
    display_name: Option<String>,
}

/// Start a session for `user_id`: mint both tokens and attach their
/// Set-Cookie headers to `body`'s response.
async fn start_session(
    state: &AppState,
    user_id: i64,
    body: impl IntoResponse,
) -> Result<Response, StatusCode> {
    let access_token = session::create_access_token(user_id, &state.jwt_secret)
        .log_500("Failed to create access token")?;
    let refresh_token = session::create_refresh_token(user_id, &state.db)
        .await
        .log_500("Failed to create refresh token")?;

    let mut response = body.into_response();
    response
        .headers_mut()
        .append(SET_COOKIE, cookies::build_access_cookie(&access_token)?);
    response
        .headers_mut()
        .append(SET_COOKIE, cookies::build_refresh_cookie(&refresh_token)?);

    Ok(response)
}

/// POST /api/auth/register - Create an account and start a session
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, StatusCode> {
    let email = req.email.trim().to_lowercase();
    if !email.contains('@') || req.password.len() < MIN_PASSWORD_LEN {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let password_hash =
        password::hash_password(&req.password).log_500("Password hashing error")?;

    let user_id = users::create(
        &state.db,
        &email,
        &password_hash,
        req.display_name.as_deref(),
    )
    .await
    .map_err(|e| {
        if e.as_database_error()
            .is_some_and(|d| d.is_unique_violation())
        {
            StatusCode::CONFLICT
        } else {
            eprintln!("Create user error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    })?;

    let body = Json(MeResponse {
        id: user_id,
        email,
        display_name: req.display_name,
    });
    start_session(&state, user_id, (StatusCode::CREATED, body)).await
}

/// POST /api/auth/login - Verify credentials and start a session
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, StatusCode> {
    let email = req.email.trim().to_lowercase();

    let auth = users::get_auth_by_email(&state.db, &email)
        .await
        .log_500("Login lookup error")?;

    // Same rejection for unknown email and wrong password
    let (user_id, stored_hash) = auth.ok_or(StatusCode::UNAUTHORIZED)?;
    if !password::verify_password(&req.password, &stored_hash) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = users::get_by_id(&state.db, user_id)
        .await
        .log_500("Get user by ID error")?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let body = Json(MeResponse {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
    });
    start_session(&state, user_id, body).await
}

/// POST /api/auth/refresh - Refresh the access token using the refresh token cookie
/// Implements refresh token rotation: old token is invalidated, new one is issued
async fn refresh_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, StatusCode> {
    let old_refresh_token = jar
        .get(cookies::config::REFRESH_TOKEN_NAME)
        .map(|c| c.value().to_string())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Atomic rotation - if two requests race on the same token, one wins
    // (silent - invalid/expired tokens are expected for expired sessions)
    let (user_id, new_refresh_token) =
        session::rotate_refresh_token(&old_refresh_token, &state.db)
            .await
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let access_token = session::create_access_token(user_id, &state.jwt_secret)
        .log_500("Failed to create access token")?;

    // 204 No Content - only sets cookies
    let mut response = StatusCode::NO_CONTENT.into_response();
    response
        .headers_mut()
        .append(SET_COOKIE, cookies::build_access_cookie(&access_token)?);
    response.headers_mut().append(
        SET_COOKIE,
        cookies::build_refresh_cookie(&new_refresh_token)?,
    );

    Ok(response)
}

/// POST /api/auth/logout - Clear session and revoke refresh token
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(refresh_token) = jar.get(cookies::config::REFRESH_TOKEN_NAME) {
        if let Err(e) = session::revoke_refresh_token(refresh_token.value(), &state.db).await {
            // Log but don't fail logout - user is still logged out client-side
            eprintln!("Failed to revoke refresh token during logout: {}", e);
        }
    }

    let mut response = StatusCode::NO_CONTENT.into_response();
    response
        .headers_mut()
        .append(SET_COOKIE, cookies::build_clear_access_cookie());
    response
        .headers_mut()
        .append(SET_COOKIE, cookies::build_clear_refresh_cookie());

    response
}

/// GET /api/auth/me - Get current user info (validates session)
async fn get_me(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, StatusCode> {
    let user = users::get_by_id(&state.db, user_id)
        .await
        .log_500("Get user by ID error")?;

    // A valid JWT for a deleted user is still unauthorized
    let user = user.ok_or(StatusCode::UNAUTHORIZED)?;

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
    }))
}
