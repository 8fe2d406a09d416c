//! Batch simulation of independent games
//!
//! Each game owns its rosters and generator for its whole run, so games are
//! spread across the rayon pool with no shared state.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::EngineConfig;
use super::game::{Game, GameState};
use crate::error::Result;
use crate::models::events::TeamSide;
use crate::models::team::Team;

/// Small batches run sequentially to avoid pool overhead
const PARALLEL_THRESHOLD: u32 = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeriesSummary {
    pub games: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    pub extra_inning_games: u32,
    pub avg_home_runs: f64,
    pub avg_away_runs: f64,
}

impl SeriesSummary {
    fn from_states(states: &[GameState], regulation: u8) -> Self {
        let games = states.len() as u32;
        let count =
            |side: TeamSide| states.iter().filter(|s| s.winner == Some(side)).count() as u32;
        let avg = |total: u32| if games == 0 { 0.0 } else { f64::from(total) / f64::from(games) };
        Self {
            games,
            home_wins: count(TeamSide::Home),
            away_wins: count(TeamSide::Away),
            extra_inning_games: states.iter().filter(|s| s.inning > regulation).count() as u32,
            avg_home_runs: avg(states.iter().map(|s| s.home_score).sum()),
            avg_away_runs: avg(states.iter().map(|s| s.away_score).sum()),
        }
    }

    pub fn home_win_pct(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.home_wins) / f64::from(self.games)
        }
    }
}

/// Play `games` games between the same two teams, seeding game `i` with
/// `base_seed + i`.
pub fn simulate_series(
    home: &Team,
    away: &Team,
    config: &EngineConfig,
    games: u32,
    base_seed: u64,
) -> Result<SeriesSummary> {
    // Validate once up front so every task starts from a playable matchup.
    Game::with_config(home.clone(), away.clone(), config.clone(), base_seed)?;

    let play = |i: u32| -> Result<GameState> {
        let seed = base_seed.wrapping_add(u64::from(i));
        let mut game = Game::with_config(home.clone(), away.clone(), config.clone(), seed)?;
        game.simulate().cloned()
    };

    let states: Vec<GameState> = if games > PARALLEL_THRESHOLD {
        (0..games).into_par_iter().map(play).collect::<Result<_>>()?
    } else {
        (0..games).map(play).collect::<Result<_>>()?
    };

    let summary = SeriesSummary::from_states(&states, config.rules.regulation_innings);
    info!(
        games = summary.games,
        home_wins = summary.home_wins,
        away_wins = summary.away_wins,
        "series complete"
    );
    Ok(summary)
}
