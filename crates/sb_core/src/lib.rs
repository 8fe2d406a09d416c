//! # sb_core - Stochastic Softball Game Simulation Engine
//!
//! Simulates a softball game pitch by pitch: pitch location, swing and
//! contact, ball flight, fielder assignment, catches and errors, and runner
//! advancement, all driven by a seedable generator.
//!
//! ## Features
//! - Reproducible games (same seed, rosters and config = same game)
//! - Play-by-play event log and box score
//! - Parallel batch simulation for season-scale sampling
//! - JSON API for host integration

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Fielding resolution threads many play parameters through
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{
    game_request_schema, simulate_game, simulate_game_json, GameRequest, GameResponse,
};
pub use engine::{simulate_series, EngineConfig, Game, GameState, PlayResult, SeriesSummary};
pub use error::{Result, SimError};
pub use models::{FieldPosition, Player, PlayerId, Stats, Team};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
