//! Tier vocabulary: codes, qualifiers, levels, and game modes
//!
//! The vocabulary is a closed set of 16 codes: High/Mid/Low for each of the
//! five levels, plus the `NR` (not ranked) sentinel. Codes are immutable
//! constants; point values live in [`crate::scoring`] so they stay swappable.

use serde::{Deserialize, Serialize};

/// One of the 16 fixed tier codes.
///
/// Declaration order is natural rank: earlier variants outrank later ones,
/// `NR` is always last. The derived `Ord` therefore sorts a bucket
/// High-n, Mid-n, Low-n without any extra lookup table.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TierCode {
    HT1,
    MIDT1,
    LT1,
    HT2,
    MIDT2,
    LT2,
    HT3,
    MIDT3,
    LT3,
    HT4,
    MIDT4,
    LT4,
    HT5,
    MIDT5,
    LT5,
    NR,
}

impl TierCode {
    /// Every code in natural-rank order (best first, `NR` last)
    pub const ALL: [TierCode; 16] = [
        TierCode::HT1,
        TierCode::MIDT1,
        TierCode::LT1,
        TierCode::HT2,
        TierCode::MIDT2,
        TierCode::LT2,
        TierCode::HT3,
        TierCode::MIDT3,
        TierCode::LT3,
        TierCode::HT4,
        TierCode::MIDT4,
        TierCode::LT4,
        TierCode::HT5,
        TierCode::MIDT5,
        TierCode::LT5,
        TierCode::NR,
    ];

    /// Parse the canonical code string, e.g. `"HT1"` or `"MIDT3"`.
    ///
    /// Case-insensitive. Returns `None` for anything outside the vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "HT1" => Some(TierCode::HT1),
            "MIDT1" => Some(TierCode::MIDT1),
            "LT1" => Some(TierCode::LT1),
            "HT2" => Some(TierCode::HT2),
            "MIDT2" => Some(TierCode::MIDT2),
            "LT2" => Some(TierCode::LT2),
            "HT3" => Some(TierCode::HT3),
            "MIDT3" => Some(TierCode::MIDT3),
            "LT3" => Some(TierCode::LT3),
            "HT4" => Some(TierCode::HT4),
            "MIDT4" => Some(TierCode::MIDT4),
            "LT4" => Some(TierCode::LT4),
            "HT5" => Some(TierCode::HT5),
            "MIDT5" => Some(TierCode::MIDT5),
            "LT5" => Some(TierCode::LT5),
            "NR" => Some(TierCode::NR),
            _ => None,
        }
    }

    /// Parse a stored code, degrading unknown strings to `NR`.
    ///
    /// This is the read-path behavior: malformed database values must not
    /// crash classification, they classify as not-ranked. Admin write paths
    /// use [`TierCode::parse`] and reject unknown codes instead.
    pub fn parse_or_nr(s: &str) -> Self {
        Self::parse(s).unwrap_or(TierCode::NR)
    }

    /// Canonical string form, e.g. `"MIDT2"`
    pub fn as_str(self) -> &'static str {
        match self {
            TierCode::HT1 => "HT1",
            TierCode::MIDT1 => "MIDT1",
            TierCode::LT1 => "LT1",
            TierCode::HT2 => "HT2",
            TierCode::MIDT2 => "MIDT2",
            TierCode::LT2 => "LT2",
            TierCode::HT3 => "HT3",
            TierCode::MIDT3 => "MIDT3",
            TierCode::LT3 => "LT3",
            TierCode::HT4 => "HT4",
            TierCode::MIDT4 => "MIDT4",
            TierCode::LT4 => "LT4",
            TierCode::HT5 => "HT5",
            TierCode::MIDT5 => "MIDT5",
            TierCode::LT5 => "LT5",
            TierCode::NR => "NR",
        }
    }

    /// Human-readable display name, e.g. `"HighS"`, `"MidB"`, `"Not Ranked"`
    pub fn display_name(self) -> String {
        match (self.qualifier(), self.level()) {
            (Some(q), Some(l)) => format!("{}{}", q.display_prefix(), l.letter()),
            _ => "Not Ranked".to_string(),
        }
    }

    /// The High/Mid/Low qualifier; `None` for `NR`
    pub fn qualifier(self) -> Option<Qualifier> {
        if self == TierCode::NR {
            return None;
        }
        Some(match (self as usize) % 3 {
            0 => Qualifier::High,
            1 => Qualifier::Mid,
            _ => Qualifier::Low,
        })
    }

    /// The tier level this code belongs to; `None` for `NR`
    pub fn level(self) -> Option<TierLevel> {
        if self == TierCode::NR {
            return None;
        }
        Some(TierLevel::ALL[(self as usize) / 3])
    }

    /// True for anything except the `NR` sentinel
    pub fn is_ranked(self) -> bool {
        self != TierCode::NR
    }
}

impl Default for TierCode {
    /// Absent tier fields default to not-ranked
    fn default() -> Self {
        TierCode::NR
    }
}

impl std::fmt::Display for TierCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sub-level qualifier within a tier level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Qualifier {
    High,
    Mid,
    Low,
}

impl Qualifier {
    /// Prefix used in display names ("HighS", "MidS", "LowS")
    pub fn display_prefix(self) -> &'static str {
        match self {
            Qualifier::High => "High",
            Qualifier::Mid => "Mid",
            Qualifier::Low => "Low",
        }
    }
}

/// One of the five tier levels (buckets), `S` best through `D` worst.
///
/// Each level owns exactly the three qualifier variants of its numeric level;
/// the level is both a display grouping and the addressable unit for manual
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TierLevel {
    #[serde(rename = "S Tier")]
    S,
    #[serde(rename = "A Tier")]
    A,
    #[serde(rename = "B Tier")]
    B,
    #[serde(rename = "C Tier")]
    C,
    #[serde(rename = "D Tier")]
    D,
}

impl TierLevel {
    /// All levels, best first
    pub const ALL: [TierLevel; 5] = [
        TierLevel::S,
        TierLevel::A,
        TierLevel::B,
        TierLevel::C,
        TierLevel::D,
    ];

    /// The three codes belonging to this level, best first
    pub fn codes(self) -> [TierCode; 3] {
        let base = (self as usize) * 3;
        [
            TierCode::ALL[base],
            TierCode::ALL[base + 1],
            TierCode::ALL[base + 2],
        ]
    }

    /// True when `code` is one of this level's three codes
    pub fn contains(self, code: TierCode) -> bool {
        code.level() == Some(self)
    }

    /// Long display key, e.g. `"S Tier"` (also the persisted form)
    pub fn key(self) -> &'static str {
        match self {
            TierLevel::S => "S Tier",
            TierLevel::A => "A Tier",
            TierLevel::B => "B Tier",
            TierLevel::C => "C Tier",
            TierLevel::D => "D Tier",
        }
    }

    /// Short name, e.g. `"ST"`
    pub fn short_name(self) -> &'static str {
        match self {
            TierLevel::S => "ST",
            TierLevel::A => "AT",
            TierLevel::B => "BT",
            TierLevel::C => "CT",
            TierLevel::D => "DT",
        }
    }

    /// Level letter, used in code display names ("HighS")
    pub fn letter(self) -> char {
        match self {
            TierLevel::S => 'S',
            TierLevel::A => 'A',
            TierLevel::B => 'B',
            TierLevel::C => 'C',
            TierLevel::D => 'D',
        }
    }

    /// Parse from any accepted spelling: `"S"`, `"ST"`, or `"S Tier"`.
    ///
    /// Case-insensitive; URL paths use the single letter, stored records the
    /// long key.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "S" | "ST" | "S TIER" => Some(TierLevel::S),
            "A" | "AT" | "A TIER" => Some(TierLevel::A),
            "B" | "BT" | "B TIER" => Some(TierLevel::B),
            "C" | "CT" | "C TIER" => Some(TierLevel::C),
            "D" | "DT" | "D TIER" => Some(TierLevel::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for TierLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A competitive category: one of the five concrete modes, or the synthetic
/// `overall` aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Overall,
    Skywars,
    Midfight,
    Uhc,
    Nodebuff,
    Bedfight,
}

impl GameMode {
    /// The five concrete modes (excludes `overall`)
    pub const CONCRETE: [GameMode; 5] = [
        GameMode::Skywars,
        GameMode::Midfight,
        GameMode::Uhc,
        GameMode::Nodebuff,
        GameMode::Bedfight,
    ];

    /// Wire/storage key, e.g. `"skywars"`
    pub fn key(self) -> &'static str {
        match self {
            GameMode::Overall => "overall",
            GameMode::Skywars => "skywars",
            GameMode::Midfight => "midfight",
            GameMode::Uhc => "uhc",
            GameMode::Nodebuff => "nodebuff",
            GameMode::Bedfight => "bedfight",
        }
    }

    /// Display name, e.g. `"Skywars"`, `"UHC"`
    pub fn display_name(self) -> &'static str {
        match self {
            GameMode::Overall => "Overall",
            GameMode::Skywars => "Skywars",
            GameMode::Midfight => "Midfight",
            GameMode::Uhc => "UHC",
            GameMode::Nodebuff => "Nodebuff",
            GameMode::Bedfight => "Bedfight",
        }
    }

    /// Parse a mode key (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "overall" => Some(GameMode::Overall),
            "skywars" => Some(GameMode::Skywars),
            "midfight" => Some(GameMode::Midfight),
            "uhc" => Some(GameMode::Uhc),
            "nodebuff" => Some(GameMode::Nodebuff),
            "bedfight" => Some(GameMode::Bedfight),
            _ => None,
        }
    }

    /// True for the synthetic aggregate selector
    pub fn is_overall(self) -> bool {
        self == GameMode::Overall
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_complete() {
        assert_eq!(TierCode::ALL.len(), 16);
        // 5 levels x 3 qualifiers + NR
        let ranked = TierCode::ALL.iter().filter(|c| c.is_ranked()).count();
        assert_eq!(ranked, 15);
    }

    #[test]
    fn test_parse_round_trip() {
        for code in TierCode::ALL {
            assert_eq!(TierCode::parse(code.as_str()), Some(code));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(TierCode::parse("ht1"), Some(TierCode::HT1));
        assert_eq!(TierCode::parse("midt3"), Some(TierCode::MIDT3));
        assert_eq!(TierCode::parse("nr"), Some(TierCode::NR));
    }

    #[test]
    fn test_unknown_code_degrades_to_nr() {
        assert_eq!(TierCode::parse("MT1"), None);
        assert_eq!(TierCode::parse_or_nr("MT1"), TierCode::NR);
        assert_eq!(TierCode::parse_or_nr(""), TierCode::NR);
        assert_eq!(TierCode::parse_or_nr("garbage"), TierCode::NR);
    }

    #[test]
    fn test_decomposition() {
        assert_eq!(TierCode::HT1.qualifier(), Some(Qualifier::High));
        assert_eq!(TierCode::HT1.level(), Some(TierLevel::S));
        assert_eq!(TierCode::MIDT3.qualifier(), Some(Qualifier::Mid));
        assert_eq!(TierCode::MIDT3.level(), Some(TierLevel::B));
        assert_eq!(TierCode::LT5.qualifier(), Some(Qualifier::Low));
        assert_eq!(TierCode::LT5.level(), Some(TierLevel::D));
        assert_eq!(TierCode::NR.qualifier(), None);
        assert_eq!(TierCode::NR.level(), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TierCode::HT1.display_name(), "HighS");
        assert_eq!(TierCode::MIDT1.display_name(), "MidS");
        assert_eq!(TierCode::LT3.display_name(), "LowB");
        assert_eq!(TierCode::MIDT4.display_name(), "MidC");
        assert_eq!(TierCode::NR.display_name(), "Not Ranked");
    }

    #[test]
    fn test_natural_rank_ordering() {
        // High-n before Mid-n before Low-n, level n before level n+1
        assert!(TierCode::HT1 < TierCode::MIDT1);
        assert!(TierCode::MIDT1 < TierCode::LT1);
        assert!(TierCode::LT1 < TierCode::HT2);
        assert!(TierCode::LT5 < TierCode::NR);
    }

    #[test]
    fn test_level_codes() {
        assert_eq!(
            TierLevel::S.codes(),
            [TierCode::HT1, TierCode::MIDT1, TierCode::LT1]
        );
        assert_eq!(
            TierLevel::D.codes(),
            [TierCode::HT5, TierCode::MIDT5, TierCode::LT5]
        );
        assert!(TierLevel::A.contains(TierCode::MIDT2));
        assert!(!TierLevel::A.contains(TierCode::MIDT3));
        assert!(!TierLevel::A.contains(TierCode::NR));
    }

    #[test]
    fn test_level_parse_spellings() {
        for level in TierLevel::ALL {
            assert_eq!(TierLevel::parse(level.key()), Some(level));
            assert_eq!(TierLevel::parse(level.short_name()), Some(level));
            assert_eq!(TierLevel::parse(&level.letter().to_string()), Some(level));
        }
        assert_eq!(TierLevel::parse("s tier"), Some(TierLevel::S));
        assert_eq!(TierLevel::parse("E"), None);
    }

    #[test]
    fn test_game_mode_parse() {
        assert_eq!(GameMode::parse("overall"), Some(GameMode::Overall));
        assert_eq!(GameMode::parse("SkyWars"), Some(GameMode::Skywars));
        assert_eq!(GameMode::parse("bridge"), None);
        assert_eq!(GameMode::CONCRETE.len(), 5);
        assert!(!GameMode::CONCRETE.contains(&GameMode::Overall));
    }

    #[test]
    fn test_serde_wire_format() {
        assert_eq!(
            serde_json::to_string(&TierCode::MIDT2).unwrap(),
            "\"MIDT2\""
        );
        assert_eq!(
            serde_json::to_string(&TierLevel::S).unwrap(),
            "\"S Tier\""
        );
        assert_eq!(
            serde_json::to_string(&GameMode::Skywars).unwrap(),
            "\"skywars\""
        );
        let code: TierCode = serde_json::from_str("\"LT4\"").unwrap();
        assert_eq!(code, TierCode::LT4);
    }
}
