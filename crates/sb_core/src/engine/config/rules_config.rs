//! Game rules configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rules of the game itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct RulesConfig {
    /// Innings before the game can end (default: 9)
    pub regulation_innings: u8,
    /// Starters in the batting order (default: 9)
    pub lineup_size: usize,
    /// Pitches before an at-bat is resolved on the count (default: 30)
    pub pitch_cap: u32,
    /// Defensive actions allowed on one ground ball (default: 3)
    pub max_throws: u8,
    /// End the game as soon as the home team leads in a late bottom half (default: false)
    pub walk_off: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            regulation_innings: 9,
            lineup_size: 9,
            pitch_cap: 30,
            max_throws: 3,
            walk_off: false,
        }
    }
}
