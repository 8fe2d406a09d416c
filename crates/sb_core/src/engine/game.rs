//! Game state machine
//!
//! Drives plate appearances until a terminal condition:
//!
//! - after the top of a regulation-or-later inning, the home team wins outright
//!   when the away team trails and did not score in that half
//! - after the bottom of a regulation-or-later inning, any unequal score ends it
//! - with `walk_off` enabled, the home team wins the moment it takes the lead
//!   in the bottom of a regulation-or-later inning
//!
//! Ties after regulation roll into extra innings.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::at_bat::{simulate_at_bat_capped, AtBatOutcome};
use super::config::EngineConfig;
use super::play::{simulate_fielding_with, PlayResult};
use super::runners::{RunnersState, OUTS_PER_HALF};
use crate::error::{Result, SimError};
use crate::models::box_score::BoxScore;
use crate::models::events::{EventKind, EventLog, GameEvent, Half, TeamSide};
use crate::models::team::Team;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub inning: u8,
    pub half: Half,
    pub away_score: u32,
    pub home_score: u32,
    pub away_batter: usize,
    pub home_batter: usize,
    pub runners: RunnersState,
    pub is_over: bool,
    pub winner: Option<TeamSide>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            inning: 1,
            half: Half::Top,
            away_score: 0,
            home_score: 0,
            away_batter: 0,
            home_batter: 0,
            runners: RunnersState::new(),
            is_over: false,
            winner: None,
        }
    }
}

impl GameState {
    pub fn outs(&self) -> u8 {
        self.runners.outs
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    pub fn batter_index(&self, side: TeamSide) -> usize {
        match side {
            TeamSide::Home => self.home_batter,
            TeamSide::Away => self.away_batter,
        }
    }

    fn add_runs(&mut self, side: TeamSide, runs: u32) {
        match side {
            TeamSide::Home => self.home_score += runs,
            TeamSide::Away => self.away_score += runs,
        }
    }

    fn advance_batter(&mut self, side: TeamSide, lineup_len: usize) {
        let idx = match side {
            TeamSide::Home => &mut self.home_batter,
            TeamSide::Away => &mut self.away_batter,
        };
        *idx = (*idx + 1) % lineup_len.max(1);
    }
}

/// One game, exclusively owning its rosters, state and generator.
#[derive(Debug, Clone)]
pub struct Game {
    home: Team,
    away: Team,
    config: EngineConfig,
    seed: u64,
    rng: ChaCha8Rng,
    state: GameState,
    events: EventLog,
    box_score: BoxScore,
    /// Batting team's score when the current half began
    half_start_score: u32,
}

impl Game {
    pub fn new(home: Team, away: Team, seed: u64) -> Result<Self> {
        Self::with_config(home, away, EngineConfig::default(), seed)
    }

    pub fn with_config(home: Team, away: Team, config: EngineConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        if home.name == away.name {
            return Err(SimError::SelfMatchup { team: home.name.clone() });
        }
        home.validate(config.rules.lineup_size)?;
        away.validate(config.rules.lineup_size)?;

        let box_score = BoxScore::new(&home, &away);
        Ok(Self {
            home,
            away,
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: GameState::default(),
            events: EventLog::new(),
            box_score,
            half_start_score: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn box_score(&self) -> &BoxScore {
        &self.box_score
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn home(&self) -> &Team {
        &self.home
    }

    pub fn away(&self) -> &Team {
        &self.away
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    /// Run plate appearances until the game is over.
    pub fn simulate(&mut self) -> Result<&GameState> {
        info!(home = %self.home.name, away = %self.away.name, seed = self.seed, "game start");
        while !self.state.is_over {
            self.play_plate_appearance()?;
        }
        Ok(&self.state)
    }

    /// Play a single plate appearance and apply its outcome.
    pub fn play_plate_appearance(&mut self) -> Result<()> {
        if self.state.is_over {
            return Ok(());
        }

        let side = self.state.half.batting_side();
        let (batting, fielding) = match side {
            TeamSide::Away => (&self.away, &self.home),
            TeamSide::Home => (&self.home, &self.away),
        };
        let lineup_len = batting.lineup.len();
        let batter = batting.batter(self.state.batter_index(side));
        let pitcher = fielding.pitcher()?;
        let (batter_id, pitcher_id) = (batter.id, pitcher.id);
        let outs_before = self.state.runners.outs;

        let at_bat =
            simulate_at_bat_capped(batter, pitcher, self.config.rules.pitch_cap, &mut self.rng);

        let (kind, runs, stranded) = match at_bat.outcome {
            AtBatOutcome::Walk => {
                let forced_home = self.state.runners.force_advance(batter.to_ref());
                self.box_score.record_walk(side, batter_id, forced_home.map(|r| r.id));
                (EventKind::Walk, u8::from(forced_home.is_some()), 0)
            }
            AtBatOutcome::Strikeout => {
                self.state.runners.outs += 1;
                self.box_score.record_strikeout(side, batter_id);
                (EventKind::Strikeout, 0, self.state.runners.count() as u32)
            }
            AtBatOutcome::InPlay { ball } => {
                let play = simulate_fielding_with(
                    &ball,
                    fielding,
                    &self.state.runners,
                    &self.config,
                    &mut self.rng,
                )?;
                self.box_score.record_play(side, batter_id, &play);
                self.state.runners = play.bases_after;
                let kind = EventKind::BallInPlay {
                    play_type: play.play_type,
                    fielder: play.fielder,
                    is_error: play.is_error,
                    batter_bases: play.batter_bases,
                    outs: play.outs,
                };
                (kind, play.runs, stranded_after(&play))
            }
        };

        self.state.add_runs(side, u32::from(runs));
        self.state.advance_batter(side, lineup_len);
        debug!(
            inning = self.state.inning,
            half = ?self.state.half,
            batter = %batter_id,
            outcome = ?kind,
            runs,
            outs = self.state.runners.outs,
            "plate appearance"
        );
        self.push_event(Some(batter_id), Some(pitcher_id), outs_before, kind, runs);

        if self.is_walk_off() {
            let stranded = self.state.runners.count() as u32;
            self.close_half(stranded);
            self.finish(TeamSide::Home);
        } else if self.state.runners.outs >= OUTS_PER_HALF {
            self.end_half(stranded);
        }
        Ok(())
    }

    fn is_walk_off(&self) -> bool {
        self.config.rules.walk_off
            && self.state.half == Half::Bottom
            && self.state.inning >= self.config.rules.regulation_innings
            && self.state.runners.outs < OUTS_PER_HALF
            && self.state.home_score > self.state.away_score
            && self.half_start_score <= self.state.away_score
    }

    fn push_event(
        &mut self,
        batter: Option<crate::models::player::PlayerId>,
        pitcher: Option<crate::models::player::PlayerId>,
        outs_before: u8,
        kind: EventKind,
        runs_scored: u8,
    ) {
        self.events.push(GameEvent {
            sequence: 0,
            inning: self.state.inning,
            half: self.state.half,
            outs_before,
            batter,
            pitcher,
            kind,
            runs_scored,
            score_after: (self.state.away_score, self.state.home_score),
        });
    }

    /// Record the half in the line score and event log. Returns its runs.
    fn close_half(&mut self, stranded: u32) -> u32 {
        let side = self.state.half.batting_side();
        let runs = self.state.score(side) - self.half_start_score;
        self.box_score.record_half(side, self.state.inning, runs, stranded);
        info!(
            inning = self.state.inning,
            half = ?self.state.half,
            runs,
            away = self.state.away_score,
            home = self.state.home_score,
            "half-inning complete"
        );
        let outs = self.state.runners.outs;
        self.push_event(None, None, outs, EventKind::HalfInningEnd { runs }, 0);
        runs
    }

    fn end_half(&mut self, stranded: u32) {
        let half_runs = self.close_half(stranded);
        let regulation = self.config.rules.regulation_innings;
        let (away, home) = (self.state.away_score, self.state.home_score);

        match self.state.half {
            Half::Top if self.state.inning >= regulation && away < home && half_runs == 0 => {
                self.finish(TeamSide::Home);
            }
            Half::Bottom if self.state.inning >= regulation && away != home => {
                self.finish(if home > away { TeamSide::Home } else { TeamSide::Away });
            }
            Half::Top => {
                self.state.half = Half::Bottom;
                self.start_half();
            }
            Half::Bottom => {
                self.state.half = Half::Top;
                self.state.inning = self.state.inning.saturating_add(1);
                self.start_half();
            }
        }
    }

    fn start_half(&mut self) {
        self.state.runners = RunnersState::new();
        self.half_start_score = self.state.score(self.state.half.batting_side());
    }

    fn finish(&mut self, winner: TeamSide) {
        self.state.is_over = true;
        self.state.winner = Some(winner);
        info!(
            ?winner,
            away = self.state.away_score,
            home = self.state.home_score,
            innings = self.state.inning,
            "game over"
        );
        let outs = self.state.runners.outs;
        self.push_event(None, None, outs, EventKind::GameOver { winner }, 0);
    }
}

/// Runners (batter included) still on base once the play is over.
fn stranded_after(play: &PlayResult) -> u32 {
    let runners = play.runner_advances.iter().filter(|a| !a.out && !a.scored()).count();
    let batter = !play.batter_out && play.batter_bases < 4;
    (runners + usize::from(batter)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::create_test_team;
    use crate::models::events::EventType;
    use crate::models::player::FieldPosition;
    use proptest::prelude::*;

    fn play_game(seed: u64, config: EngineConfig) -> Game {
        let (home, away) = (create_test_team("Hawks"), create_test_team("Owls"));
        let mut game = Game::with_config(home, away, config, seed).unwrap();
        game.simulate().unwrap();
        game
    }

    fn last_half(game: &Game) -> Half {
        game.events().of_kind(EventType::HalfInningEnd).last().unwrap().half
    }

    #[test]
    fn test_game_reaches_a_winner() {
        let game = play_game(7, EngineConfig::default());
        let state = game.state();
        assert!(state.is_over);
        assert!(state.inning >= 9);
        assert_ne!(state.home_score, state.away_score);
        let expected =
            if state.home_score > state.away_score { TeamSide::Home } else { TeamSide::Away };
        assert_eq!(state.winner, Some(expected));
        assert!(matches!(game.events().last().unwrap().kind, EventKind::GameOver { .. }));
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = play_game(42, EngineConfig::default());
        let b = play_game(42, EngineConfig::default());
        assert_eq!(a.state(), b.state());
        assert_eq!(a.events(), b.events());
        assert_eq!(a.box_score(), b.box_score());
    }

    #[test]
    fn test_different_seeds_diverge() {
        let first = play_game(1, EngineConfig::default());
        let differs =
            (2..6).any(|seed| play_game(seed, EngineConfig::default()).events() != first.events());
        assert!(differs);
    }

    #[test]
    fn test_box_score_reconciles_with_score() {
        for seed in 0..10 {
            let game = play_game(seed, EngineConfig::default());
            let (state, bs) = (game.state(), game.box_score());
            assert_eq!(bs.away.runs, state.away_score);
            assert_eq!(bs.home.runs, state.home_score);
            assert_eq!(bs.away.line_score.iter().sum::<u32>(), state.away_score);
            assert_eq!(bs.home.line_score.iter().sum::<u32>(), state.home_score);
            let batter_runs: u32 = bs.away.batting.iter().map(|l| l.runs).sum();
            assert_eq!(batter_runs, state.away_score);
            let pa = game.events().iter().filter(|e| e.kind.is_plate_appearance()).count() as u32;
            let lines: u32 = bs.away.batting.iter().chain(&bs.home.batting).map(|l| l.pa).sum();
            assert_eq!(pa, lines);
        }
    }

    #[test]
    fn test_event_context_stays_in_bounds() {
        for seed in 0..10 {
            let game = play_game(seed, EngineConfig::default());
            for (i, e) in game.events().iter().enumerate() {
                assert_eq!(e.sequence as usize, i);
                if e.kind.is_plate_appearance() {
                    assert!(e.outs_before < 3);
                }
            }
            // Each half ends with exactly three outs unless the game ended mid-half.
            for e in game.events().of_kind(EventType::HalfInningEnd) {
                assert_eq!(e.outs_before, 3);
            }
        }
    }

    #[test]
    fn test_top_half_shortcut_only_when_away_trails_scoreless() {
        for seed in 0..40 {
            let game = play_game(seed, EngineConfig::default());
            if last_half(&game) == Half::Top {
                let state = game.state();
                assert_eq!(state.winner, Some(TeamSide::Home));
                assert!(state.home_score > state.away_score);
                let last_inning = state.inning as usize;
                assert_eq!(game.box_score().away.line_score[last_inning - 1], 0);
                assert_eq!(game.box_score().home.line_score.len(), last_inning - 1);
            }
        }
    }

    #[test]
    fn test_seven_inning_games() {
        let mut ended_in_seventh = false;
        for seed in 0..20 {
            let game = play_game(seed, EngineConfig::seven_innings());
            assert!(game.state().inning >= 7);
            ended_in_seventh |= game.state().inning == 7;
        }
        assert!(ended_in_seventh);
    }

    #[test]
    fn test_walk_off_ends_on_the_winning_play() {
        let mut walk_offs = 0;
        for seed in 0..80 {
            let game = play_game(seed, EngineConfig::walk_off());
            let events = game.events().as_slice();
            let ends: Vec<usize> = events
                .iter()
                .enumerate()
                .filter(|(_, e)| e.kind.event_type() == EventType::HalfInningEnd)
                .map(|(i, _)| i)
                .collect();
            let end = ends[ends.len() - 1];
            if events[end].outs_before >= 3 {
                continue;
            }
            walk_offs += 1;
            assert_eq!(events[end].half, Half::Bottom);
            assert_eq!(game.state().winner, Some(TeamSide::Home));

            // The top half's marker carries the score the bottom half started from.
            let start = ends[ends.len() - 2];
            let (away, home_at_start) = events[start].score_after;
            assert!(home_at_start <= away);

            let half = &events[start + 1..end];
            let (winning, earlier) = half.split_last().unwrap();
            assert!(winning.outs_before < 3);
            if let EventKind::BallInPlay { outs, .. } = winning.kind {
                assert!(winning.outs_before + outs < 3);
            }
            assert!(winning.score_after.1 > winning.score_after.0);
            for e in earlier {
                assert!(e.score_after.1 <= e.score_after.0, "home led before the final play");
            }
        }
        assert!(walk_offs > 0);
    }

    #[test]
    fn test_self_matchup_rejected() {
        let err = Game::new(create_test_team("Hawks"), create_test_team("Hawks"), 1).unwrap_err();
        assert!(matches!(err, SimError::SelfMatchup { .. }));
    }

    #[test]
    fn test_unfilled_position_rejected() {
        let mut home = create_test_team("Hawks");
        home.lineup[0].position = FieldPosition::Bench;
        let err = Game::new(home, create_test_team("Owls"), 1).unwrap_err();
        assert!(matches!(err, SimError::MissingPosition { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.rules.pitch_cap = 0;
        let err = Game::with_config(create_test_team("Hawks"), create_test_team("Owls"), config, 1);
        assert!(matches!(err, Err(SimError::Config(_))));
    }

    #[test]
    fn test_batting_order_wraps() {
        let mut game = Game::new(create_test_team("Hawks"), create_test_team("Owls"), 3).unwrap();
        let mut away_pas = 0;
        while game.state().half == Half::Top && !game.is_over() {
            game.play_plate_appearance().unwrap();
            away_pas += 1;
        }
        assert_eq!(game.state().away_batter, away_pas % 9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_games_respect_out_and_inning_rules(seed in any::<u64>()) {
            let (home, away) = (create_test_team("Hawks"), create_test_team("Owls"));
            let mut game = Game::new(home, away, seed).unwrap();
            while !game.is_over() {
                game.play_plate_appearance().unwrap();
                let state = game.state();
                prop_assert!(state.outs() < 3 || state.is_over);
                prop_assert!(state.runners.count() <= 3);
            }
            let state = game.state();
            prop_assert!(state.inning >= 9);
            prop_assert_ne!(state.home_score, state.away_score);
        }
    }
}
