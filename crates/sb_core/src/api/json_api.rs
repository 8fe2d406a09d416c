//! JSON request/response surface
//!
//! A request carries two rosters, a seed and optional rule overrides; the
//! response is the finished game with line score, box score and the full
//! play-by-play.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config_env::load_config_from_env;
use crate::engine::config::EngineConfig;
use crate::engine::game::Game;
use crate::error::{Result, SimError};
use crate::models::box_score::BoxScore;
use crate::models::events::{GameEvent, TeamSide};
use crate::models::team::Team;
use crate::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: Team,
    pub away_team: Team,
    /// Overrides the environment-selected configuration when present
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineScore {
    pub away: Vec<u32>,
    pub home: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub home_score: u32,
    pub away_score: u32,
    pub winner: Option<TeamSide>,
    pub innings: u8,
    pub line_score: LineScore,
    pub box_score: BoxScore,
    pub events: Vec<GameEvent>,
}

impl GameResponse {
    fn from_game(game: &Game) -> Self {
        let state = game.state();
        let box_score = game.box_score().clone();
        Self {
            schema_version: SCHEMA_VERSION,
            seed: game.seed(),
            home_score: state.home_score,
            away_score: state.away_score,
            winner: state.winner,
            innings: state.inning,
            line_score: LineScore {
                away: box_score.away.line_score.clone(),
                home: box_score.home.line_score.clone(),
            },
            box_score,
            events: game.events().as_slice().to_vec(),
        }
    }
}

/// Simulate one game from an already-parsed request.
pub fn simulate_game(request: GameRequest) -> Result<GameResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::UnsupportedSchema {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let GameRequest { seed, home_team, away_team, config, .. } = request;
    let config = match config {
        Some(config) => config,
        None => load_config_from_env()?,
    };

    let mut game = Game::with_config(home_team, away_team, config, seed)?;
    game.simulate()?;
    debug!(events = game.events().len(), "game simulated from request");
    Ok(GameResponse::from_game(&game))
}

/// Simulate one game from a JSON request and return the JSON response.
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    let response = simulate_game(request)?;
    serde_json::to_string(&response).map_err(|e| SimError::Serialization(e.to_string()))
}

/// JSON schema of [`GameRequest`].
pub fn game_request_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(GameRequest)).unwrap_or(serde_json::Value::Null)
}
