use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::player::{FieldPosition, Player};
use crate::error::{Result, SimError};

/// A roster as the engine sees it: batting order plus defensive assignments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Team {
    pub name: String,
    /// Batting order. Defensive positions are read from each player.
    pub lineup: Vec<Player>,
}

impl Team {
    pub fn new(name: impl Into<String>, lineup: Vec<Player>) -> Self {
        Self { name: name.into(), lineup }
    }

    /// Player currently assigned to `position`.
    ///
    /// An unfilled position is a configuration error, not a fallback case.
    pub fn fielder_at(&self, position: FieldPosition) -> Result<&Player> {
        self.lineup.iter().find(|p| p.position == position).ok_or_else(|| {
            SimError::MissingPosition { team: self.name.clone(), position }
        })
    }

    pub fn pitcher(&self) -> Result<&Player> {
        self.fielder_at(FieldPosition::Pitcher)
    }

    /// Batter due up at `index`, wrapping around the order.
    pub fn batter(&self, index: usize) -> &Player {
        &self.lineup[index % self.lineup.len()]
    }

    /// Check lineup size, stat ranges and the one-player-per-position rule.
    pub fn validate(&self, lineup_size: usize) -> Result<()> {
        if self.lineup.len() != lineup_size {
            return Err(SimError::InvalidLineupSize {
                team: self.name.clone(),
                expected: lineup_size,
                found: self.lineup.len(),
            });
        }

        for player in &self.lineup {
            player.stats.validate().map_err(|e| SimError::InvalidStats {
                player: player.full_name(),
                reason: e.to_string(),
            })?;
        }

        for position in FieldPosition::DEFENSIVE {
            let assigned = self.lineup.iter().filter(|p| p.position == position).count();
            match assigned {
                0 => {
                    return Err(SimError::MissingPosition { team: self.name.clone(), position })
                }
                1 => {}
                _ => {
                    return Err(SimError::DuplicatePosition { team: self.name.clone(), position })
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::create_test_team;

    #[test]
    fn test_fixture_team_is_valid() {
        let team = create_test_team("Hawks");
        assert!(team.validate(9).is_ok());
        assert_eq!(team.pitcher().unwrap().position, FieldPosition::Pitcher);
    }

    #[test]
    fn test_missing_position_is_error() {
        let mut team = create_test_team("Hawks");
        team.lineup[5].position = FieldPosition::Bench;
        let err = team.validate(9).unwrap_err();
        assert!(matches!(err, SimError::MissingPosition { .. }));
    }

    #[test]
    fn test_duplicate_position_is_error() {
        let mut team = create_test_team("Hawks");
        // Pitcher is checked first, so the duplicate surfaces before the vacated slot.
        team.lineup[1].position = FieldPosition::Pitcher;
        let err = team.validate(9).unwrap_err();
        assert_eq!(
            err,
            SimError::DuplicatePosition {
                team: "Hawks".to_string(),
                position: FieldPosition::Pitcher
            }
        );
    }

    #[test]
    fn test_lineup_size_is_checked() {
        let mut team = create_test_team("Hawks");
        team.lineup.pop();
        let err = team.validate(9).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidLineupSize { team: "Hawks".to_string(), expected: 9, found: 8 }
        );
    }

    #[test]
    fn test_batter_wraps_modulo_lineup() {
        let team = create_test_team("Hawks");
        assert_eq!(team.batter(9).id, team.batter(0).id);
        assert_eq!(team.batter(13).id, team.batter(4).id);
    }
}
