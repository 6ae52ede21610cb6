//! mctiers-ui - web admin panel and public leaderboard service
//!
//! Serves the tier-list API: public leaderboard and per-mode tier lists,
//! plus authenticated admin endpoints for managing players and the manual
//! intra-bucket ordering.

use anyhow::Result;
use clap::Parser;
use mctiers_common::{config, db};
use mctiers_ui::{build_router, AppState};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "mctiers-ui", about = "MCTiers leaderboard and admin panel")]
struct Args {
    /// Data directory holding the database (overrides env and config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// HTTP listen port (overrides env and config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting MCTiers UI (mctiers-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let cfg = config::resolve(args.root_folder.as_deref(), args.port)?;
    cfg.ensure_root_exists()?;

    let db_path = cfg.database_path();
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path).await?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port)).await?;
    info!("mctiers-ui listening on http://0.0.0.0:{}", cfg.port);
    info!("Health check: http://127.0.0.1:{}/health", cfg.port);

    axum::serve(listener, app).await?;

    Ok(())
}
