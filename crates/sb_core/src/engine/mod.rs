pub mod at_bat;
pub mod ball_flight;
pub mod config;
pub mod constants;
pub mod contact;
pub mod drop_zone;
pub mod fielding;
pub mod force_play; // live ground balls: force outs, double plays, extra-base throws
pub mod game;
pub mod pitch;
pub mod play;
pub mod probability;
pub mod runners;
pub mod series;
pub mod strategy; // throw doctrine + throw-out model

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use at_bat::{simulate_at_bat, AtBatOutcome, AtBatResult};
pub use ball_flight::BallType;
pub use config::EngineConfig;
pub use contact::BattedBall;
pub use game::{Game, GameState};
pub use pitch::{simulate_pitch, ThrownPitch};
pub use play::{simulate_fielding, PlayResult, PlayType};
pub use runners::{Base, RunnerAdvance, RunnersState};
pub use series::{simulate_series, SeriesSummary};
