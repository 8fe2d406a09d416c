//! Defensive play resolution configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Timing windows for contested plays and the outfield throw doctrine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct DefenseConfig {
    /// Margins tighter than this (seconds) are decided by a weighted coin (default: 0.2)
    pub close_play_margin_s: f64,
    /// Chance the runner is called safe on a close tag play (default: 0.55)
    pub close_play_safe_chance: f64,
    /// Time to apply a tag after the ball arrives (default: 0.25)
    pub tag_application_s: f64,
    /// Time for the pivot on a double-play relay (default: 0.35)
    pub double_play_pivot_s: f64,
    /// Outfielders throw two bases ahead of the lead runner (default: true)
    pub enforce_doctrine: bool,
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            close_play_margin_s: 0.2,
            close_play_safe_chance: 0.55,
            tag_application_s: 0.25,
            double_play_pivot_s: 0.35,
            enforce_doctrine: true,
        }
    }
}
