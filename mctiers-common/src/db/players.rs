//! Player repository
//!
//! CRUD storage for player records over SQLite. Names are unique
//! case-insensitively; tier columns always hold a vocabulary string and
//! decode leniently (unknown values read as `NR`).

use crate::db::models::{NewPlayer, Player, PlayerPatch};
use crate::{Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PlayerStore {
    pool: SqlitePool,
}

impl PlayerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch one player by id
    pub async fn get(&self, id: &str) -> Result<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            "SELECT id, name, skywars_tier, midfight_tier, uhc_tier, nodebuff_tier, bedfight_tier
             FROM players WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(player)
    }

    /// Fetch one player by display name (case-insensitive)
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            "SELECT id, name, skywars_tier, midfight_tier, uhc_tier, nodebuff_tier, bedfight_tier
             FROM players WHERE name = ? COLLATE NOCASE",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(player)
    }

    /// All players, name-sorted
    pub async fn all(&self) -> Result<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            "SELECT id, name, skywars_tier, midfight_tier, uhc_tier, nodebuff_tier, bedfight_tier
             FROM players ORDER BY name COLLATE NOCASE",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(players)
    }

    /// Create a player. Rejects an already-taken name (case-insensitive)
    /// with [`Error::DuplicateName`].
    pub async fn create(&self, new: NewPlayer) -> Result<Player> {
        let player = Player {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            skywars: new.skywars,
            midfight: new.midfight,
            uhc: new.uhc,
            nodebuff: new.nodebuff,
            bedfight: new.bedfight,
        };

        let result = sqlx::query(
            "INSERT INTO players
                 (id, name, skywars_tier, midfight_tier, uhc_tier, nodebuff_tier, bedfight_tier)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&player.id)
        .bind(&player.name)
        .bind(player.skywars.as_str())
        .bind(player.midfight.as_str())
        .bind(player.uhc.as_str())
        .bind(player.nodebuff.as_str())
        .bind(player.bedfight.as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(player),
            Err(e) => Err(map_unique_violation(e, &player.name)),
        }
    }

    /// Apply a partial update. Fails with [`Error::NotFound`] for an unknown
    /// id and [`Error::DuplicateName`] when a rename collides.
    pub async fn update(&self, id: &str, patch: PlayerPatch) -> Result<Player> {
        let mut player = self
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("player {id}")))?;
        patch.apply_to(&mut player);

        let result = sqlx::query(
            "UPDATE players SET
                 name = ?,
                 skywars_tier = ?,
                 midfight_tier = ?,
                 uhc_tier = ?,
                 nodebuff_tier = ?,
                 bedfight_tier = ?,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = ?",
        )
        .bind(&player.name)
        .bind(player.skywars.as_str())
        .bind(player.midfight.as_str())
        .bind(player.uhc.as_str())
        .bind(player.nodebuff.as_str())
        .bind(player.bedfight.as_str())
        .bind(id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(player),
            Err(e) => Err(map_unique_violation(e, &player.name)),
        }
    }

    /// Delete a player. Returns false when the id was absent.
    ///
    /// The caller is responsible for cascading the removal into the manual
    /// order store afterwards.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Translate a UNIQUE-constraint failure on the name column into the
/// domain's duplicate-name error; anything else passes through.
fn map_unique_violation(e: sqlx::Error, name: &str) -> Error {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return Error::DuplicateName(name.to_string());
        }
    }
    Error::Database(e)
}
