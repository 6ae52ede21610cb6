//! # MCTiers Common Library
//!
//! Shared code for the MCTiers services including:
//! - Tier vocabulary (codes, levels, qualifiers, game modes)
//! - Scoring engine (point, title, and overall-tier tables)
//! - Tier classifier and manual-order overlay
//! - Database models, player repository, and order store
//! - Configuration loading

pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod scoring;
pub mod tier;

pub use error::{Error, Result};
pub use scoring::{OverallPolicy, Score, ScoringConfig};
pub use tier::{GameMode, Qualifier, TierCode, TierLevel};
