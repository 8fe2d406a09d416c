//! Line score and batting lines
//!
//! RBIs follow the usual scoring convention: credited on hits, walks and
//! ordinary outs, but not on errors, double plays or triple plays.

use serde::{Deserialize, Serialize};

use super::events::TeamSide;
use super::player::PlayerId;
use super::team::Team;
use crate::engine::play::{PlayResult, PlayType};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BattingLine {
    pub player: PlayerId,
    pub name: String,
    pub pa: u32,
    pub ab: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub runs: u32,
    pub rbi: u32,
}

impl BattingLine {
    pub fn new(player: PlayerId, name: impl Into<String>) -> Self {
        Self { player, name: name.into(), ..Self::default() }
    }

    pub fn total_bases(&self) -> u32 {
        let singles = self.hits - self.doubles - self.triples - self.home_runs;
        singles + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamBox {
    pub name: String,
    /// Runs per half-inning batted, first inning first
    pub line_score: Vec<u32>,
    pub runs: u32,
    pub hits: u32,
    /// Errors committed by this team in the field
    pub errors: u32,
    pub left_on_base: u32,
    pub batting: Vec<BattingLine>,
}

impl TeamBox {
    pub fn new(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            batting: team.lineup.iter().map(|p| BattingLine::new(p.id, p.full_name())).collect(),
            ..Self::default()
        }
    }

    fn line_mut(&mut self, player: PlayerId) -> Option<&mut BattingLine> {
        self.batting.iter_mut().find(|l| l.player == player)
    }

    pub fn line(&self, player: PlayerId) -> Option<&BattingLine> {
        self.batting.iter().find(|l| l.player == player)
    }

    fn credit_runs<I: IntoIterator<Item = PlayerId>>(&mut self, scorers: I) {
        for id in scorers {
            self.runs += 1;
            if let Some(line) = self.line_mut(id) {
                line.runs += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoxScore {
    pub away: TeamBox,
    pub home: TeamBox,
}

impl BoxScore {
    pub fn new(home: &Team, away: &Team) -> Self {
        Self { away: TeamBox::new(away), home: TeamBox::new(home) }
    }

    pub fn side(&self, side: TeamSide) -> &TeamBox {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    fn side_mut(&mut self, side: TeamSide) -> &mut TeamBox {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn record_walk(
        &mut self,
        batting: TeamSide,
        batter: PlayerId,
        forced_home: Option<PlayerId>,
    ) {
        let team = self.side_mut(batting);
        if let Some(line) = team.line_mut(batter) {
            line.pa += 1;
            line.walks += 1;
            line.rbi += u32::from(forced_home.is_some());
        }
        team.credit_runs(forced_home);
    }

    pub fn record_strikeout(&mut self, batting: TeamSide, batter: PlayerId) {
        if let Some(line) = self.side_mut(batting).line_mut(batter) {
            line.pa += 1;
            line.ab += 1;
            line.strikeouts += 1;
        }
    }

    pub fn record_play(&mut self, batting: TeamSide, batter: PlayerId, play: &PlayResult) {
        if play.is_error {
            self.side_mut(batting.opponent()).errors += 1;
        }

        let earns_rbi = !play.is_error
            && !matches!(play.play_type, PlayType::DoublePlay | PlayType::TriplePlay);
        let team = self.side_mut(batting);
        if play.is_hit {
            team.hits += 1;
        }
        if let Some(line) = team.line_mut(batter) {
            line.pa += 1;
            line.ab += 1;
            if play.is_hit {
                line.hits += 1;
                match play.play_type {
                    PlayType::Double => line.doubles += 1,
                    PlayType::Triple => line.triples += 1,
                    PlayType::HomeRun => line.home_runs += 1,
                    _ => {}
                }
            }
            if earns_rbi {
                line.rbi += u32::from(play.runs);
            }
        }
        team.credit_runs(play.scorers.iter().map(|r| r.id));
    }

    /// Close out a half-inning in the line score.
    pub fn record_half(&mut self, batting: TeamSide, inning: u8, runs: u32, left_on_base: u32) {
        let team = self.side_mut(batting);
        let idx = usize::from(inning.saturating_sub(1));
        if team.line_score.len() <= idx {
            team.line_score.resize(idx + 1, 0);
        }
        team.line_score[idx] = runs;
        team.left_on_base += left_on_base;
    }
}
