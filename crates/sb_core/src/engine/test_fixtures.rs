//! Test Fixtures Module
//!
//! Shared builders for rosters, players and batted balls used across the
//! engine's unit tests.
//!
//! ## Usage
//! ```rust,ignore
//! use crate::engine::test_fixtures::*;
//! ```

use super::contact::BattedBall;
use crate::models::player::{FieldPosition, Player, PlayerId, PlayerRef, Stats};
use crate::models::team::Team;

/// Batting order used by every fixture team: position per lineup slot.
pub const FIXTURE_ORDER: [FieldPosition; 9] = [
    FieldPosition::CenterField,
    FieldPosition::Shortstop,
    FieldPosition::FirstBase,
    FieldPosition::LeftField,
    FieldPosition::ThirdBase,
    FieldPosition::RightField,
    FieldPosition::SecondBase,
    FieldPosition::Catcher,
    FieldPosition::Pitcher,
];

// =============================================================================
// Players
// =============================================================================

pub fn player_with(id: u32, stats: Stats, position: FieldPosition) -> Player {
    Player::new(id, "Test", format!("Player{id}"), stats, position)
}

pub fn batter_ref(id: u32, running: f64) -> PlayerRef {
    PlayerRef { id: PlayerId(id), running }
}

// =============================================================================
// Teams
// =============================================================================

/// Nine average players (all skills 5.0), every position filled.
pub fn create_test_team(name: &str) -> Team {
    create_test_team_with_stats(name, Stats::default())
}

pub fn create_test_team_with_stats(name: &str, stats: Stats) -> Team {
    // Offset ids per team name so two fixture teams never share player ids.
    let base = name.bytes().map(u32::from).sum::<u32>() * 100;
    let lineup = FIXTURE_ORDER
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            Player::new(base + i as u32, name, format!("{}", pos), stats, pos)
        })
        .collect();
    Team::new(name, lineup)
}

/// Average team whose player at `position` has the given fielding skill.
pub fn team_with_fielder(name: &str, position: FieldPosition, fielding: f64) -> Team {
    let mut team = create_test_team(name);
    for player in team.lineup.iter_mut().filter(|p| p.position == position) {
        player.stats.fielding = fielding;
    }
    team
}

// =============================================================================
// Batted balls
// =============================================================================

/// Fair, non-homer ball hit by an average runner.
pub fn ball(velo: f64, launch: f64, attack: f64) -> BattedBall {
    BattedBall {
        batter: batter_ref(1, 5.0),
        velo,
        launch,
        attack,
        foul: false,
        homer: false,
    }
}

pub fn foul_ball(velo: f64, launch: f64, attack: f64) -> BattedBall {
    BattedBall { foul: true, ..ball(velo, launch, attack) }
}

pub fn homer_ball(velo: f64, launch: f64, attack: f64) -> BattedBall {
    BattedBall { homer: true, ..ball(velo, launch, attack) }
}
