//! Database models

use crate::tier::{GameMode, TierCode};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// A ranked player.
///
/// Each of the five concrete game modes always holds a vocabulary code,
/// defaulting to `NR`. Title and overall tier are never stored; they are
/// recomputed from these five codes on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(rename = "skywarsTier")]
    pub skywars: TierCode,
    #[serde(rename = "midfightTier")]
    pub midfight: TierCode,
    #[serde(rename = "uhcTier")]
    pub uhc: TierCode,
    #[serde(rename = "nodebuffTier")]
    pub nodebuff: TierCode,
    #[serde(rename = "bedfightTier")]
    pub bedfight: TierCode,
}

impl Player {
    /// New player with every mode unranked
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skywars: TierCode::NR,
            midfight: TierCode::NR,
            uhc: TierCode::NR,
            nodebuff: TierCode::NR,
            bedfight: TierCode::NR,
        }
    }

    /// Stored code for a concrete mode.
    ///
    /// `Overall` has no stored code and reads as `NR`; the classifier derives
    /// the overall tier through the configured policy instead.
    pub fn tier_for(&self, mode: GameMode) -> TierCode {
        match mode {
            GameMode::Overall => TierCode::NR,
            GameMode::Skywars => self.skywars,
            GameMode::Midfight => self.midfight,
            GameMode::Uhc => self.uhc,
            GameMode::Nodebuff => self.nodebuff,
            GameMode::Bedfight => self.bedfight,
        }
    }

    /// Set the stored code for a concrete mode. `Overall` is ignored.
    pub fn set_tier(&mut self, mode: GameMode, code: TierCode) {
        match mode {
            GameMode::Overall => {}
            GameMode::Skywars => self.skywars = code,
            GameMode::Midfight => self.midfight = code,
            GameMode::Uhc => self.uhc = code,
            GameMode::Nodebuff => self.nodebuff = code,
            GameMode::Bedfight => self.bedfight = code,
        }
    }

    /// All five stored codes, in concrete-mode order
    pub fn codes(&self) -> [TierCode; 5] {
        [
            self.skywars,
            self.midfight,
            self.uhc,
            self.nodebuff,
            self.bedfight,
        ]
    }
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for Player {
    /// Lenient row decode: unknown stored tier strings degrade to `NR`
    /// instead of failing the whole query.
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let code = |column: &str| -> Result<TierCode, sqlx::Error> {
            Ok(TierCode::parse_or_nr(&row.try_get::<String, _>(column)?))
        };
        Ok(Player {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            skywars: code("skywars_tier")?,
            midfight: code("midfight_tier")?,
            uhc: code("uhc_tier")?,
            nodebuff: code("nodebuff_tier")?,
            bedfight: code("bedfight_tier")?,
        })
    }
}

/// Fields accepted when creating a player.
///
/// Tier fields are optional on the wire and default to `NR`; unknown codes
/// are rejected at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    #[serde(default, rename = "skywarsTier")]
    pub skywars: TierCode,
    #[serde(default, rename = "midfightTier")]
    pub midfight: TierCode,
    #[serde(default, rename = "uhcTier")]
    pub uhc: TierCode,
    #[serde(default, rename = "nodebuffTier")]
    pub nodebuff: TierCode,
    #[serde(default, rename = "bedfightTier")]
    pub bedfight: TierCode,
}

/// Partial update for a player; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerPatch {
    pub name: Option<String>,
    #[serde(rename = "skywarsTier")]
    pub skywars: Option<TierCode>,
    #[serde(rename = "midfightTier")]
    pub midfight: Option<TierCode>,
    #[serde(rename = "uhcTier")]
    pub uhc: Option<TierCode>,
    #[serde(rename = "nodebuffTier")]
    pub nodebuff: Option<TierCode>,
    #[serde(rename = "bedfightTier")]
    pub bedfight: Option<TierCode>,
}

impl PlayerPatch {
    /// Patch that changes a single mode's tier
    pub fn tier_change(mode: GameMode, code: TierCode) -> Self {
        let mut patch = Self::default();
        match mode {
            GameMode::Overall => {}
            GameMode::Skywars => patch.skywars = Some(code),
            GameMode::Midfight => patch.midfight = Some(code),
            GameMode::Uhc => patch.uhc = Some(code),
            GameMode::Nodebuff => patch.nodebuff = Some(code),
            GameMode::Bedfight => patch.bedfight = Some(code),
        }
        patch
    }

    /// Apply this patch to a player in place
    pub fn apply_to(&self, player: &mut Player) {
        if let Some(name) = &self.name {
            player.name = name.clone();
        }
        if let Some(code) = self.skywars {
            player.skywars = code;
        }
        if let Some(code) = self.midfight {
            player.midfight = code;
        }
        if let Some(code) = self.uhc {
            player.uhc = code;
        }
        if let Some(code) = self.nodebuff {
            player.nodebuff = code;
        }
        if let Some(code) = self.bedfight {
            player.bedfight = code;
        }
    }

    /// True when nothing would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.skywars.is_none()
            && self.midfight.is_none()
            && self.uhc.is_none()
            && self.nodebuff.is_none()
            && self.bedfight.is_none()
    }
}
