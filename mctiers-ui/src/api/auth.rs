//! Admin authentication: password login and bearer-token middleware
//!
//! `POST /api/admin/auth` checks the presented password against the salted
//! hash in the settings table and issues a session token. Admin routes are
//! guarded by [`auth_middleware`], which expects the token in an
//! `Authorization: Bearer` header.

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mctiers_common::db::settings::verify_admin_password;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::sessions::Session;
use crate::AppState;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /api/admin/auth
///
/// Issues a session token on a correct password, 401 otherwise.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Session>, AuthError> {
    let ok = verify_admin_password(&state.db, &request.password)
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?;
    if !ok {
        warn!("Admin login attempt with wrong password");
        return Err(AuthError::WrongPassword);
    }

    // Opportunistic cleanup; keeps the map from accumulating dead tokens
    state.sessions.expire_stale();

    Ok(Json(state.sessions.issue()))
}

/// POST /api/admin/logout
///
/// Revokes the presented token. Runs behind the auth middleware, so the
/// token is known to be present and valid.
pub async fn logout(State(state): State<AppState>, request: Request) -> Result<Response, AuthError> {
    let token = bearer_token(&request).ok_or(AuthError::MissingToken)?;
    state.sessions.revoke(&token);
    Ok(Json(json!({ "success": true })).into_response())
}

/// Authentication middleware for admin routes
///
/// Returns 401 Unauthorized when the bearer token is missing, unknown, or
/// expired. Public routes (leaderboard, tier lists, login, health) do not
/// pass through here.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&request).ok_or(AuthError::MissingToken)?;
    if !state.sessions.validate(&token) {
        return Err(AuthError::InvalidToken);
    }
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    WrongPassword,
    MissingToken,
    InvalidToken,
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::WrongPassword => (StatusCode::UNAUTHORIZED, "Invalid password".to_string()),
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing bearer token".to_string(),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired session".to_string(),
            ),
            AuthError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Authentication error: {msg}"))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
