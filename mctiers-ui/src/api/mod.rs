//! HTTP API handlers for mctiers-ui

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mctiers_common::Error;
use serde_json::json;
use tracing::error;

pub mod auth;
pub mod health;
pub mod order;
pub mod players;
pub mod tiers;

pub use auth::{auth_middleware, login, logout};
pub use health::health_routes;
pub use order::{get_order, set_order};
pub use players::{
    create_player, delete_player, get_player, list_players, set_player_tier, update_player,
};
pub use tiers::get_tier_list;

/// Engine error bridged to an HTTP response
///
/// Maps the shared error taxonomy onto status codes and renders the usual
/// `{"error": ...}` body. Storage-level details are logged, not leaked.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            Error::DuplicateName(_) => (StatusCode::CONFLICT, self.0.to_string()),
            Error::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string()),
            Error::Conflict { .. } => (StatusCode::CONFLICT, self.0.to_string()),
            Error::Database(e) => {
                error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Error::Io(_) | Error::Config(_) | Error::Internal(_) => {
                error!("Internal error: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
