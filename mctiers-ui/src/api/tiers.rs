//! Tier list endpoint: classified buckets with manual order applied

use axum::extract::{Path, State};
use axum::Json;
use mctiers_common::tier::{GameMode, TierLevel};
use mctiers_common::{classify, Error};
use serde::Serialize;

use super::players::PlayerView;
use super::ApiError;
use crate::AppState;

/// One tier-level bucket in a tier list response
#[derive(Debug, Serialize)]
pub struct TierBucket {
    /// Long key, e.g. "S Tier"
    pub key: &'static str,
    /// Short name, e.g. "ST"
    pub name: &'static str,
    pub players: Vec<PlayerView>,
}

/// Full tier list for one game mode
#[derive(Debug, Serialize)]
pub struct TierListResponse {
    pub mode: GameMode,
    pub tiers: Vec<TierBucket>,
}

/// GET /api/tiers/:mode
///
/// Buckets for a concrete mode or the synthetic `overall` selector, best
/// level first. Natural sort within each bucket, superseded by the stored
/// manual order where one exists. Unranked players appear in no bucket.
pub async fn get_tier_list(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Json<TierListResponse>, ApiError> {
    let mode = GameMode::parse(&mode)
        .ok_or_else(|| Error::InvalidInput(format!("unknown game mode: {mode}")))?;

    let players = state.players.all().await?;
    let mut buckets = classify::classify(&players, mode, &state.scoring);

    let mut tiers = Vec::with_capacity(TierLevel::ALL.len());
    for level in TierLevel::ALL {
        let natural = buckets.remove(&level).unwrap_or_default();
        let ordered = state.orders.apply(mode, level, natural).await?;
        tiers.push(TierBucket {
            key: level.key(),
            name: level.short_name(),
            players: ordered
                .into_iter()
                .map(|p| {
                    let score = state.scoring.compute_score(&p);
                    PlayerView::new(p, score)
                })
                .collect(),
        });
    }

    Ok(Json(TierListResponse { mode, tiers }))
}
