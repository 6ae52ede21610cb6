//! mctiers-ui library - web service for the MCTiers leaderboard
//!
//! Serves the public leaderboard/tier-list API and the authenticated admin
//! API on top of the shared engine in `mctiers-common`.

use axum::Router;
use mctiers_common::db::{OrderStore, PlayerStore};
use mctiers_common::scoring::ScoringConfig;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::sessions::SessionStore;

pub mod api;
pub mod sessions;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Player repository
    pub players: PlayerStore,
    /// Manual order store (per-key serialized writes)
    pub orders: Arc<OrderStore>,
    /// Admin session tokens
    pub sessions: Arc<SessionStore>,
    /// Scoring rule set in effect for this deployment
    pub scoring: Arc<ScoringConfig>,
}

impl AppState {
    /// Create application state with the default scoring rules
    pub fn new(db: SqlitePool) -> Self {
        Self::with_scoring(db, ScoringConfig::default())
    }

    /// Create application state with an explicit scoring rule set
    pub fn with_scoring(db: SqlitePool, scoring: ScoringConfig) -> Self {
        let scoring = Arc::new(scoring);
        Self {
            players: PlayerStore::new(db.clone()),
            orders: Arc::new(OrderStore::new(db.clone(), scoring.clone())),
            sessions: Arc::new(SessionStore::default()),
            scoring,
            db,
        }
    }
}

/// Build application router
///
/// Admin routes require a bearer session token; the leaderboard, tier
/// lists, login, and health endpoints are public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, patch, post, put};
    use tower_http::trace::TraceLayer;

    // Admin routes (require an authenticated session)
    let admin = Router::new()
        .route("/api/players", post(api::create_player))
        .route(
            "/api/players/:id",
            patch(api::update_player).delete(api::delete_player),
        )
        .route("/api/players/:id/tier", patch(api::set_player_tier))
        .route("/api/tiers/:mode/:level/order", put(api::set_order))
        .route("/api/admin/logout", post(api::logout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/api/players", get(api::list_players))
        .route("/api/players/:id", get(api::get_player))
        .route("/api/tiers/:mode", get(api::get_tier_list))
        .route("/api/tiers/:mode/:level/order", get(api::get_order))
        .route("/api/admin/auth", post(api::login))
        .merge(api::health_routes());

    Router::new()
        .merge(admin)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
