//! Manual order store
//!
//! Holds the admin-curated ordering of player ids within one
//! `(game mode, tier level)` bucket, versioned for optimistic concurrency.
//! A write validates the whole list against current tier membership before
//! anything is persisted; rejected writes leave both list and version
//! untouched.
//!
//! Writes to the same key are serialized by a per-key async mutex held
//! across the entire read-validate-write sequence, including await points.
//! Unrelated keys never contend with each other.

use crate::classify;
use crate::db::models::Player;
use crate::db::players::PlayerStore;
use crate::scoring::ScoringConfig;
use crate::tier::{GameMode, TierLevel};
use crate::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

/// One stored manual order: the id list and its version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredOrder {
    #[serde(rename = "playerIds")]
    pub player_ids: Vec<String>,
    pub version: i64,
}

impl StoredOrder {
    fn empty() -> Self {
        Self {
            player_ids: Vec::new(),
            version: 0,
        }
    }
}

pub struct OrderStore {
    pool: SqlitePool,
    players: PlayerStore,
    scoring: Arc<ScoringConfig>,
    /// Per-key write locks. The outer std mutex only guards map access and
    /// is never held across an await.
    locks: StdMutex<HashMap<(GameMode, TierLevel), Arc<Mutex<()>>>>,
}

impl OrderStore {
    pub fn new(pool: SqlitePool, scoring: Arc<ScoringConfig>) -> Self {
        let players = PlayerStore::new(pool.clone());
        Self {
            pool,
            players,
            scoring,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Current order for a bucket. A key that was never written reads as an
    /// empty list at version 0.
    pub async fn get(&self, mode: GameMode, level: TierLevel) -> Result<StoredOrder> {
        self.fetch(mode, level).await
    }

    /// Replace a bucket's order.
    ///
    /// Rejections, in check order:
    /// - [`Error::Conflict`] when `expected_version` is below the stored
    ///   version (another admin wrote first; refetch and retry).
    /// - [`Error::Validation`] for a duplicated id, an unknown id, or an id
    ///   whose current effective tier for `mode` is outside `level`.
    ///
    /// On success the list is persisted and the version incremented by one,
    /// atomically with respect to other writers of the same key.
    pub async fn set(
        &self,
        mode: GameMode,
        level: TierLevel,
        player_ids: Vec<String>,
        expected_version: Option<i64>,
    ) -> Result<StoredOrder> {
        let lock = self.key_lock(mode, level);
        let _guard = lock.lock().await;

        let current = self.fetch(mode, level).await?;
        if let Some(expected) = expected_version {
            if expected < current.version {
                return Err(Error::Conflict {
                    expected,
                    current: current.version,
                });
            }
        }

        self.validate_membership(mode, level, &player_ids).await?;

        let next = StoredOrder {
            player_ids,
            version: current.version + 1,
        };
        self.write(mode, level, &next).await?;
        Ok(next)
    }

    /// Reorder a naturally-sorted bucket by the stored manual order.
    ///
    /// Unmentioned players keep their natural relative order after the
    /// explicitly-ordered ones.
    pub async fn apply(
        &self,
        mode: GameMode,
        level: TierLevel,
        players: Vec<Player>,
    ) -> Result<Vec<Player>> {
        let order = self.fetch(mode, level).await?;
        Ok(classify::apply_order(players, &order.player_ids))
    }

    /// Remove a player id from every stored order (cascading delete).
    ///
    /// Idempotent: buckets not containing the id are left untouched, version
    /// included.
    pub async fn remove_player(&self, player_id: &str) -> Result<()> {
        let keys: Vec<(String, String)> =
            sqlx::query_as("SELECT game_mode, tier_level FROM tier_orders")
                .fetch_all(&self.pool)
                .await?;

        for (mode_key, level_key) in keys {
            let (Some(mode), Some(level)) =
                (GameMode::parse(&mode_key), TierLevel::parse(&level_key))
            else {
                continue;
            };

            let lock = self.key_lock(mode, level);
            let _guard = lock.lock().await;

            let current = self.fetch(mode, level).await?;
            if !current.player_ids.iter().any(|id| id == player_id) {
                continue;
            }
            let next = StoredOrder {
                player_ids: current
                    .player_ids
                    .into_iter()
                    .filter(|id| id != player_id)
                    .collect(),
                version: current.version + 1,
            };
            self.write(mode, level, &next).await?;
        }
        Ok(())
    }

    /// The write lock for one key, created on first use
    fn key_lock(&self, mode: GameMode, level: TierLevel) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("order lock map poisoned");
        locks
            .entry((mode, level))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Every id must be unique, known, and currently classified into `level`
    /// for `mode`.
    async fn validate_membership(
        &self,
        mode: GameMode,
        level: TierLevel,
        player_ids: &[String],
    ) -> Result<()> {
        let mut seen = HashSet::new();
        for id in player_ids {
            if !seen.insert(id.as_str()) {
                return Err(Error::Validation(format!("duplicate player id: {id}")));
            }
            let player = self
                .players
                .get(id)
                .await?
                .ok_or_else(|| Error::Validation(format!("unknown player id: {id}")))?;
            let effective = classify::effective_level(&player, mode, &self.scoring);
            if effective != Some(level) {
                return Err(Error::Validation(format!(
                    "player {} is not in {} for {}",
                    player.name,
                    level.key(),
                    mode.key()
                )));
            }
        }
        Ok(())
    }

    async fn fetch(&self, mode: GameMode, level: TierLevel) -> Result<StoredOrder> {
        let row: Option<(String, i64)> = sqlx::query_as(
            "SELECT player_ids, version FROM tier_orders WHERE game_mode = ? AND tier_level = ?",
        )
        .bind(mode.key())
        .bind(level.key())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((json, version)) => {
                let player_ids: Vec<String> = serde_json::from_str(&json).map_err(|e| {
                    Error::Internal(format!(
                        "corrupt order list for {}/{}: {e}",
                        mode.key(),
                        level.key()
                    ))
                })?;
                Ok(StoredOrder {
                    player_ids,
                    version,
                })
            }
            None => Ok(StoredOrder::empty()),
        }
    }

    async fn write(&self, mode: GameMode, level: TierLevel, order: &StoredOrder) -> Result<()> {
        let json = serde_json::to_string(&order.player_ids)
            .map_err(|e| Error::Internal(format!("failed to encode order list: {e}")))?;
        sqlx::query(
            "INSERT INTO tier_orders (game_mode, tier_level, player_ids, version, updated_at)
             VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT (game_mode, tier_level) DO UPDATE SET
                 player_ids = excluded.player_ids,
                 version = excluded.version,
                 updated_at = CURRENT_TIMESTAMP",
        )
        .bind(mode.key())
        .bind(level.key())
        .bind(&json)
        .bind(order.version)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
