//! Manual order endpoints
//!
//! `GET` returns the stored order (empty list, version 0 when never set).
//! `PUT` replaces it under optimistic concurrency: a stale `expectedVersion`
//! yields 409 and the caller is expected to refetch and retry; a list that
//! fails membership validation yields 422 and changes nothing.

use axum::extract::{Path, State};
use axum::Json;
use mctiers_common::db::StoredOrder;
use mctiers_common::tier::{GameMode, TierLevel};
use mctiers_common::Error;
use serde::Deserialize;

use super::ApiError;
use crate::AppState;

/// Reorder request body
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    #[serde(rename = "playerIds")]
    pub player_ids: Vec<String>,
    #[serde(rename = "expectedVersion")]
    pub expected_version: Option<i64>,
}

fn parse_key(mode: &str, level: &str) -> Result<(GameMode, TierLevel), Error> {
    let mode = GameMode::parse(mode)
        .ok_or_else(|| Error::InvalidInput(format!("unknown game mode: {mode}")))?;
    let level = TierLevel::parse(level)
        .ok_or_else(|| Error::InvalidInput(format!("unknown tier level: {level}")))?;
    Ok((mode, level))
}

/// GET /api/tiers/:mode/:level/order
pub async fn get_order(
    State(state): State<AppState>,
    Path((mode, level)): Path<(String, String)>,
) -> Result<Json<StoredOrder>, ApiError> {
    let (mode, level) = parse_key(&mode, &level)?;
    let order = state.orders.get(mode, level).await?;
    Ok(Json(order))
}

/// PUT /api/tiers/:mode/:level/order
pub async fn set_order(
    State(state): State<AppState>,
    Path((mode, level)): Path<(String, String)>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<StoredOrder>, ApiError> {
    let (mode, level) = parse_key(&mode, &level)?;
    let order = state
        .orders
        .set(mode, level, request.player_ids, request.expected_version)
        .await?;
    Ok(Json(order))
}
