//! Tier classification: bucket partition, natural sort, and the
//! manual-order overlay
//!
//! Classification is pure: it recomputes from whatever player snapshot the
//! caller passes in and holds no state of its own. Players whose effective
//! code is `NR` appear in no bucket; they still show up on the points-sorted
//! overall leaderboard.

use crate::db::models::Player;
use crate::scoring::{OverallPolicy, Score, ScoringConfig};
use crate::tier::{GameMode, TierCode, TierLevel};
use std::collections::{BTreeMap, HashMap};

/// The tier level a player effectively belongs to for `mode`.
///
/// Concrete modes read the stored code directly. The synthetic `overall`
/// selector goes through the configured aggregation policy. `None` means the
/// player is unranked for this mode and belongs to no bucket.
pub fn effective_level(player: &Player, mode: GameMode, cfg: &ScoringConfig) -> Option<TierLevel> {
    match mode {
        GameMode::Overall => match cfg.policy {
            OverallPolicy::BestMode => cfg.best_mode_code(player).level(),
            OverallPolicy::PointsThreshold => cfg.overall_bucket(cfg.total_points(player)),
        },
        concrete => player.tier_for(concrete).level(),
    }
}

/// Partition players into tier buckets for one game mode.
///
/// Every level is present in the result, empty or not. Within each bucket
/// players carry the natural sort: High-n before Mid-n before Low-n, names
/// breaking ties. Under the points-threshold overall policy there is no
/// per-player code to rank by, so those buckets sort by total points
/// descending instead.
pub fn classify(
    players: &[Player],
    mode: GameMode,
    cfg: &ScoringConfig,
) -> BTreeMap<TierLevel, Vec<Player>> {
    let mut buckets: BTreeMap<TierLevel, Vec<Player>> =
        TierLevel::ALL.iter().map(|l| (*l, Vec::new())).collect();

    for player in players {
        if let Some(level) = effective_level(player, mode, cfg) {
            buckets.entry(level).or_default().push(player.clone());
        }
    }

    for bucket in buckets.values_mut() {
        sort_bucket(bucket, mode, cfg);
    }
    buckets
}

/// Natural sort for one bucket's players
fn sort_bucket(bucket: &mut [Player], mode: GameMode, cfg: &ScoringConfig) {
    match (mode, cfg.policy) {
        (GameMode::Overall, OverallPolicy::PointsThreshold) => {
            bucket.sort_by(|a, b| {
                cfg.total_points(b)
                    .cmp(&cfg.total_points(a))
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            });
        }
        (GameMode::Overall, OverallPolicy::BestMode) => {
            bucket.sort_by(|a, b| {
                cfg.best_mode_code(a)
                    .cmp(&cfg.best_mode_code(b))
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            });
        }
        (concrete, _) => {
            bucket.sort_by(|a, b| {
                a.tier_for(concrete)
                    .cmp(&b.tier_for(concrete))
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            });
        }
    }
}

/// Overlay a stored manual order onto a naturally-sorted bucket.
///
/// Players named in `order` come first, in that order. Players the order does
/// not mention keep their incoming relative order and are appended after all
/// explicitly-ordered ones. Ids in `order` with no matching player are
/// ignored.
pub fn apply_order(players: Vec<Player>, order: &[String]) -> Vec<Player> {
    if order.is_empty() {
        return players;
    }
    let position: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let (mut ordered, unordered): (Vec<Player>, Vec<Player>) = players
        .into_iter()
        .partition(|p| position.contains_key(p.id.as_str()));
    ordered.sort_by_key(|p| position[p.id.as_str()]);
    ordered.extend(unordered);
    ordered
}

/// All players ranked purely by total points, descending, names breaking
/// ties. Includes unranked (zero-point) players at the bottom.
pub fn overall_leaderboard(players: &[Player], cfg: &ScoringConfig) -> Vec<(Player, Score)> {
    let mut rows: Vec<(Player, Score)> = players
        .iter()
        .map(|p| (p.clone(), cfg.compute_score(p)))
        .collect();
    rows.sort_by(|a, b| {
        b.1.points
            .cmp(&a.1.points)
            .then_with(|| a.0.name.to_lowercase().cmp(&b.0.name.to_lowercase()))
    });
    rows
}
