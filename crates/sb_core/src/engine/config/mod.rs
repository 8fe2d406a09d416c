//! # Engine Configuration
//!
//! Rule and defensive-timing knobs that callers may legitimately change.
//! Tuning heuristics live in [`crate::engine::constants`] instead.
//!
//! ## Usage
//! ```rust
//! use sb_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let short_game = EngineConfig::seven_innings();
//! assert!(short_game.validate().is_ok());
//! ```
//!
//! ## Environment Variables
//!
//! - `SB_ENGINE_PROFILE`: Select preset (standard, seven_innings, walk_off)

mod defense_config;
mod rules_config;

pub use defense_config::DefenseConfig;
pub use rules_config::RulesConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Result, SimError};

pub const PROFILE_ENV: &str = "SB_ENGINE_PROFILE";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
pub struct EngineConfig {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub defense: DefenseConfig,
}

impl EngineConfig {
    /// Regulation softball as the engine plays it by default
    pub fn standard() -> Self {
        Self::default()
    }

    /// Seven-inning games (doubleheaders, youth leagues)
    pub fn seven_innings() -> Self {
        Self {
            rules: RulesConfig { regulation_innings: 7, ..RulesConfig::default() },
            ..Self::default()
        }
    }

    /// Home team wins the moment it takes the lead late
    pub fn walk_off() -> Self {
        Self { rules: RulesConfig { walk_off: true, ..RulesConfig::default() }, ..Self::default() }
    }

    /// Load from environment variable SB_ENGINE_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        Self::from_profile(&env::var(PROFILE_ENV).unwrap_or_default())
    }

    pub fn from_profile(profile: &str) -> Self {
        match profile.to_lowercase().as_str() {
            "seven_innings" | "seven" => Self::seven_innings(),
            "walk_off" | "walkoff" => Self::walk_off(),
            _ => Self::standard(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let rules = &self.rules;
        if rules.regulation_innings == 0 {
            return Err(SimError::Config("regulation_innings must be at least 1".into()));
        }
        if rules.lineup_size == 0 {
            return Err(SimError::Config("lineup_size must be at least 1".into()));
        }
        if rules.pitch_cap == 0 {
            return Err(SimError::Config("pitch_cap must be at least 1".into()));
        }
        if rules.max_throws == 0 {
            return Err(SimError::Config("max_throws must be at least 1".into()));
        }

        let defense = &self.defense;
        if !(0.0..=1.0).contains(&defense.close_play_safe_chance) {
            return Err(SimError::Config(format!(
                "close_play_safe_chance out of range: {}",
                defense.close_play_safe_chance
            )));
        }
        for (name, value) in [
            ("close_play_margin_s", defense.close_play_margin_s),
            ("tag_application_s", defense.tag_application_s),
            ("double_play_pivot_s", defense.double_play_pivot_s),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::Config(format!("{name} must be a non-negative time")));
            }
        }
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.rules.regulation_innings, 9);
        assert_eq!(cfg.rules.pitch_cap, 30);
        assert_eq!(cfg.rules.max_throws, 3);
        assert!(!cfg.rules.walk_off);
        assert!(cfg.defense.enforce_doctrine);
        assert!((cfg.defense.close_play_safe_chance - 0.55).abs() < 1e-9);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(EngineConfig::standard(), EngineConfig::default());
        assert_eq!(EngineConfig::seven_innings().rules.regulation_innings, 7);
        assert!(EngineConfig::walk_off().rules.walk_off);
        assert!(EngineConfig::seven_innings().validate().is_ok());
        assert!(EngineConfig::walk_off().validate().is_ok());
    }

    #[test]
    fn test_profile_names() {
        assert_eq!(EngineConfig::from_profile("WALK_OFF"), EngineConfig::walk_off());
        assert_eq!(EngineConfig::from_profile("seven_innings"), EngineConfig::seven_innings());
        assert_eq!(EngineConfig::from_profile("unknown"), EngineConfig::standard());
    }

    #[test]
    fn test_validate_rejects_zero_rules() {
        let mut cfg = EngineConfig::default();
        cfg.rules.regulation_innings = 0;
        assert!(matches!(cfg.validate(), Err(SimError::Config(_))));

        let mut cfg = EngineConfig::default();
        cfg.rules.max_throws = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let mut cfg = EngineConfig::default();
        cfg.defense.close_play_safe_chance = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::default();
        cfg.defense.tag_application_s = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"rules":{"walk_off":true}}"#).unwrap();
        assert!(cfg.rules.walk_off);
        assert_eq!(cfg.rules.regulation_innings, 9);
        assert_eq!(cfg.defense, DefenseConfig::default());
    }
}
