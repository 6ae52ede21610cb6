//! Database access layer: initialization, models, and stores

use crate::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

pub mod models;
pub mod orders;
pub mod players;
pub mod settings;

pub use models::{NewPlayer, Player, PlayerPatch};
pub use orders::{OrderStore, StoredOrder};
pub use players::PlayerStore;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while an admin write is in flight
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schema(&pool).await?;
    settings::init_default_settings(&pool).await?;

    Ok(pool)
}

/// In-memory database with the full schema, for tests.
///
/// A pooled `sqlite::memory:` connection gets a private database per
/// connection, so the pool is pinned to a single connection.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    create_schema(&pool).await?;
    settings::init_default_settings(&pool).await?;
    Ok(pool)
}

/// Create all tables (idempotent)
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_settings_table(pool).await?;
    create_players_table(pool).await?;
    create_tier_orders_table(pool).await?;
    Ok(())
}

async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_players_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS players (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            skywars_tier TEXT NOT NULL DEFAULT 'NR',
            midfight_tier TEXT NOT NULL DEFAULT 'NR',
            uhc_tier TEXT NOT NULL DEFAULT 'NR',
            nodebuff_tier TEXT NOT NULL DEFAULT 'NR',
            bedfight_tier TEXT NOT NULL DEFAULT 'NR',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_tier_orders_table(pool: &SqlitePool) -> Result<()> {
    // player_ids holds a JSON array of player id strings
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tier_orders (
            game_mode TEXT NOT NULL,
            tier_level TEXT NOT NULL,
            player_ids TEXT NOT NULL DEFAULT '[]',
            version INTEGER NOT NULL DEFAULT 0,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (game_mode, tier_level)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
