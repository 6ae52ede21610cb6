//! Scoring engine: point values, titles, and the overall tier
//!
//! Every rule table in here is instance configuration rather than a global
//! constant. The points→title table and the points→overall-tier table are
//! deliberately independent of each other, and the overall aggregation policy
//! is a named variant; callers pick one [`ScoringConfig`] and pass it through
//! classification.

use crate::db::models::Player;
use crate::tier::{TierCode, TierLevel};
use serde::{Deserialize, Serialize};

/// Point value for each tier code.
///
/// Indexed by code rank; `NR` is always 0. The default values are the
/// production table (100 down to 6).
#[derive(Debug, Clone)]
pub struct PointsTable {
    values: [u32; 16],
}

impl PointsTable {
    /// Build a table from explicit per-code values. `NR` is forced to 0.
    pub fn new(mut values: [u32; 16]) -> Self {
        values[TierCode::NR as usize] = 0;
        Self { values }
    }

    /// Point value for a code. Pure lookup; `NR` yields 0.
    pub fn points_for(&self, code: TierCode) -> u32 {
        self.values[code as usize]
    }
}

impl Default for PointsTable {
    fn default() -> Self {
        // S: 100/90/80, A: 70/65/60, B: 50/45/40, C: 30/25/20, D: 10/8/6
        Self::new([
            100, 90, 80, // S
            70, 65, 60, // A
            50, 45, 40, // B
            30, 25, 20, // C
            10, 8, 6, // D
            0, // NR
        ])
    }
}

/// Points→title step table: descending `(min_points, title)` pairs with a
/// floor title for anything below the lowest threshold.
///
/// The constructor sorts thresholds descending, so lookup is first-match-wins
/// and the resulting title function is monotonic in points by construction.
#[derive(Debug, Clone)]
pub struct TitleTable {
    thresholds: Vec<(u32, String)>,
    floor: String,
}

impl TitleTable {
    pub fn new(mut thresholds: Vec<(u32, String)>, floor: impl Into<String>) -> Self {
        thresholds.sort_by(|a, b| b.0.cmp(&a.0));
        Self {
            thresholds,
            floor: floor.into(),
        }
    }

    /// Title for a point total: first threshold at or below `points` wins.
    pub fn title_for(&self, points: u32) -> &str {
        self.thresholds
            .iter()
            .find(|(min, _)| points >= *min)
            .map(|(_, title)| title.as_str())
            .unwrap_or(&self.floor)
    }
}

impl Default for TitleTable {
    fn default() -> Self {
        Self::new(
            vec![
                (450, "Grandmaster".to_string()),
                (350, "Master".to_string()),
                (275, "Elite".to_string()),
                (200, "Ace".to_string()),
                (125, "Specialist".to_string()),
                (50, "Cadet".to_string()),
            ],
            "Rookie",
        )
    }
}

/// Points→overall-tier step table, independent of [`TitleTable`].
///
/// Zero points (or anything below the lowest threshold) maps to no bucket,
/// i.e. the player is overall not-ranked.
#[derive(Debug, Clone)]
pub struct OverallTable {
    thresholds: Vec<(u32, TierLevel)>,
}

impl OverallTable {
    pub fn new(mut thresholds: Vec<(u32, TierLevel)>) -> Self {
        thresholds.sort_by(|a, b| b.0.cmp(&a.0));
        Self { thresholds }
    }

    /// Overall bucket for a point total; `None` below the lowest threshold.
    pub fn bucket_for(&self, points: u32) -> Option<TierLevel> {
        self.thresholds
            .iter()
            .find(|(min, _)| points >= *min)
            .map(|(_, level)| *level)
    }
}

impl Default for OverallTable {
    fn default() -> Self {
        Self::new(vec![
            (400, TierLevel::S),
            (300, TierLevel::A),
            (200, TierLevel::B),
            (100, TierLevel::C),
            (1, TierLevel::D),
        ])
    }
}

/// How the synthetic `overall` mode derives a player's tier.
///
/// Both policies shipped at some point; they are kept as named configuration
/// so exactly one is in effect per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverallPolicy {
    /// Best single non-NR code across the five modes,
    /// ties broken High > Mid > Low
    BestMode,
    /// Threshold table over the summed point total
    PointsThreshold,
}

impl Default for OverallPolicy {
    /// BestMode is what the shipped tier list used
    fn default() -> Self {
        OverallPolicy::BestMode
    }
}

/// Computed score for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub points: u32,
    pub title: String,
    /// Threshold-derived overall bucket; `None` means overall not-ranked
    #[serde(rename = "overallTier")]
    pub overall_tier: Option<TierLevel>,
}

/// The full scoring rule set: point values, both threshold tables, and the
/// overall aggregation policy.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub points: PointsTable,
    pub titles: TitleTable,
    pub overall: OverallTable,
    pub policy: OverallPolicy,
}

impl ScoringConfig {
    /// Point value for one tier code
    pub fn points_for(&self, code: TierCode) -> u32 {
        self.points.points_for(code)
    }

    /// Sum of point values over all five mode fields
    pub fn total_points(&self, player: &Player) -> u32 {
        player
            .codes()
            .iter()
            .map(|&code| self.points_for(code))
            .sum()
    }

    /// Title for a point total
    pub fn title_for(&self, points: u32) -> &str {
        self.titles.title_for(points)
    }

    /// Threshold-derived overall bucket for a point total
    pub fn overall_bucket(&self, points: u32) -> Option<TierLevel> {
        self.overall.bucket_for(points)
    }

    /// Best non-NR code across the five modes; `NR` when all modes are unranked
    pub fn best_mode_code(&self, player: &Player) -> TierCode {
        // TierCode's Ord is natural rank, so min() is the best code
        player.codes().into_iter().min().unwrap_or(TierCode::NR)
    }

    /// Full computed score: points, title, and threshold-derived overall tier.
    ///
    /// Never fails: absent or malformed codes have already degraded to `NR`
    /// on the read path and contribute 0 points.
    pub fn compute_score(&self, player: &Player) -> Score {
        let points = self.total_points(player);
        Score {
            points,
            title: self.title_for(points).to_string(),
            overall_tier: self.overall_bucket(points),
        }
    }
}
