//! Player CRUD handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse, response::Response};
use mctiers_common::db::models::{NewPlayer, Player, PlayerPatch};
use mctiers_common::scoring::Score;
use mctiers_common::tier::{GameMode, TierCode};
use mctiers_common::{classify, Error};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::ApiError;
use crate::AppState;

/// Player enriched with the computed score fields
#[derive(Debug, Serialize)]
pub struct PlayerView {
    #[serde(flatten)]
    pub player: Player,
    #[serde(flatten)]
    pub score: Score,
}

impl PlayerView {
    pub fn new(player: Player, score: Score) -> Self {
        Self { player, score }
    }
}

/// GET /api/players
///
/// Every player with computed points/title/overall tier, sorted by total
/// points descending.
pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<PlayerView>>, ApiError> {
    let players = state.players.all().await?;
    let ranked = classify::overall_leaderboard(&players, &state.scoring);
    Ok(Json(
        ranked
            .into_iter()
            .map(|(player, score)| PlayerView::new(player, score))
            .collect(),
    ))
}

/// GET /api/players/:id
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerView>, ApiError> {
    let player = state
        .players
        .get(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("player {id}")))?;
    let score = state.scoring.compute_score(&player);
    Ok(Json(PlayerView::new(player, score)))
}

/// POST /api/players
///
/// Creates a player, or — when the name is already taken — merges the
/// supplied non-NR tiers into the existing record instead of failing.
/// The repository itself always rejects duplicates; this merge policy
/// belongs to the transport layer.
pub async fn create_player(
    State(state): State<AppState>,
    Json(new): Json<NewPlayer>,
) -> Result<Response, ApiError> {
    if new.name.trim().is_empty() {
        return Err(Error::InvalidInput("player name must not be empty".to_string()).into());
    }

    if let Some(existing) = state.players.get_by_name(&new.name).await? {
        let patch = merge_patch(&new);
        let player = state.players.update(&existing.id, patch).await?;
        info!("Merged tiers into existing player {}", player.name);
        return Ok(Json(player).into_response());
    }

    let player = state.players.create(new).await?;
    info!("Created player {}", player.name);
    Ok((StatusCode::CREATED, Json(player)).into_response())
}

/// Patch that carries only the non-NR tiers of a create request
fn merge_patch(new: &NewPlayer) -> PlayerPatch {
    let keep = |code: TierCode| code.is_ranked().then_some(code);
    PlayerPatch {
        name: None,
        skywars: keep(new.skywars),
        midfight: keep(new.midfight),
        uhc: keep(new.uhc),
        nodebuff: keep(new.nodebuff),
        bedfight: keep(new.bedfight),
    }
}

/// PATCH /api/players/:id
pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PlayerPatch>,
) -> Result<Json<Player>, ApiError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("player name must not be empty".to_string()).into());
        }
    }
    let player = state.players.update(&id, patch).await?;
    Ok(Json(player))
}

/// DELETE /api/players/:id
///
/// Removes the player and cascades the id out of every stored manual order.
pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let deleted = state.players.delete(&id).await?;
    if !deleted {
        return Err(Error::NotFound(format!("player {id}")).into());
    }
    state.orders.remove_player(&id).await?;
    info!("Deleted player {id}");
    Ok(Json(json!({ "success": true })).into_response())
}

/// Tier change request body
#[derive(Debug, Deserialize)]
pub struct TierChange {
    #[serde(rename = "gameMode")]
    pub game_mode: GameMode,
    pub tier: TierCode,
}

/// PATCH /api/players/:id/tier
///
/// Changes one mode's tier. `overall` is derived, never written.
pub async fn set_player_tier(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(change): Json<TierChange>,
) -> Result<Json<Player>, ApiError> {
    if change.game_mode.is_overall() {
        return Err(
            Error::InvalidInput("overall is a derived mode and cannot be set".to_string()).into(),
        );
    }
    let patch = PlayerPatch::tier_change(change.game_mode, change.tier);
    let player = state.players.update(&id, patch).await?;
    Ok(Json(player))
}
