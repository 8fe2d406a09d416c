use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Stable player identity within a game.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
    JsonSchema,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Seven skill scalars, each in `[0, 10]`.
///
/// `growth` and `charisma` are carried for the roster layer; the simulation
/// itself reads contact, power, running, pitching and fielding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate, JsonSchema)]
pub struct Stats {
    #[validate(range(min = 0.0, max = 10.0))]
    pub contact: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    pub power: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    pub running: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    pub pitching: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    pub fielding: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    #[serde(default)]
    pub charisma: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    #[serde(default)]
    pub growth: f64,
}

impl Stats {
    /// Every skill set to the same value.
    pub fn uniform(value: f64) -> Self {
        Self {
            contact: value,
            power: value,
            running: value,
            pitching: value,
            fielding: value,
            charisma: value,
            growth: value,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}

/// Defensive assignment. `Bench` doubles as the "unplayable" drop zone for fouls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum FieldPosition {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
    #[serde(rename = "BN")]
    Bench,
}

impl FieldPosition {
    /// The nine positions that must be filled for a team to take the field.
    pub const DEFENSIVE: [FieldPosition; 9] = [
        FieldPosition::Pitcher,
        FieldPosition::Catcher,
        FieldPosition::FirstBase,
        FieldPosition::SecondBase,
        FieldPosition::ThirdBase,
        FieldPosition::Shortstop,
        FieldPosition::LeftField,
        FieldPosition::CenterField,
        FieldPosition::RightField,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            FieldPosition::Pitcher => "P",
            FieldPosition::Catcher => "C",
            FieldPosition::FirstBase => "1B",
            FieldPosition::SecondBase => "2B",
            FieldPosition::ThirdBase => "3B",
            FieldPosition::Shortstop => "SS",
            FieldPosition::LeftField => "LF",
            FieldPosition::CenterField => "CF",
            FieldPosition::RightField => "RF",
            FieldPosition::Bench => "BN",
        }
    }

    pub fn is_outfield(self) -> bool {
        matches!(
            self,
            FieldPosition::LeftField | FieldPosition::CenterField | FieldPosition::RightField
        )
    }

    /// Four infield positions, battery excluded.
    pub fn is_infield(self) -> bool {
        matches!(
            self,
            FieldPosition::FirstBase
                | FieldPosition::SecondBase
                | FieldPosition::ThirdBase
                | FieldPosition::Shortstop
        )
    }

    pub fn is_battery(self) -> bool {
        matches!(self, FieldPosition::Pitcher | FieldPosition::Catcher)
    }

    /// Decode the scorekeeping number (1 = P ... 9 = RF, 0 = bench).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FieldPosition::Bench),
            1 => Some(FieldPosition::Pitcher),
            2 => Some(FieldPosition::Catcher),
            3 => Some(FieldPosition::FirstBase),
            4 => Some(FieldPosition::SecondBase),
            5 => Some(FieldPosition::ThirdBase),
            6 => Some(FieldPosition::Shortstop),
            7 => Some(FieldPosition::LeftField),
            8 => Some(FieldPosition::CenterField),
            9 => Some(FieldPosition::RightField),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for FieldPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "P" | "PITCHER" => Ok(FieldPosition::Pitcher),
            "C" | "CATCHER" => Ok(FieldPosition::Catcher),
            "1B" | "FIRST" => Ok(FieldPosition::FirstBase),
            "2B" | "SECOND" => Ok(FieldPosition::SecondBase),
            "3B" | "THIRD" => Ok(FieldPosition::ThirdBase),
            "SS" | "SHORTSTOP" => Ok(FieldPosition::Shortstop),
            "LF" => Ok(FieldPosition::LeftField),
            "CF" => Ok(FieldPosition::CenterField),
            "RF" => Ok(FieldPosition::RightField),
            "BN" | "BENCH" => Ok(FieldPosition::Bench),
            _ => Err(format!("Invalid position: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub stats: Stats,
    #[serde(default = "default_position")]
    pub position: FieldPosition,
}

fn default_position() -> FieldPosition {
    FieldPosition::Bench
}

impl Player {
    pub fn new(
        id: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        stats: Stats,
        position: FieldPosition,
    ) -> Self {
        Self {
            id: PlayerId(id),
            first_name: first_name.into(),
            last_name: last_name.into(),
            stats,
            position,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Snapshot used once the player is on the bases.
    pub fn to_ref(&self) -> PlayerRef {
        PlayerRef { id: self.id, running: self.stats.running }
    }
}

/// Copyable batter/runner handle.
///
/// Carries the running skill so fielding and baserunning never need the
/// batting roster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub running: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_position_round_trips_through_abbreviation() {
        for pos in FieldPosition::iter() {
            let parsed: FieldPosition = pos.abbreviation().parse().unwrap();
            assert_eq!(parsed, pos);
        }
    }

    #[test]
    fn test_position_groups_are_disjoint() {
        for pos in FieldPosition::iter() {
            let groups = [pos.is_infield(), pos.is_outfield(), pos.is_battery()];
            let count = groups.iter().filter(|g| **g).count();
            if pos == FieldPosition::Bench {
                assert_eq!(count, 0);
            } else {
                assert_eq!(count, 1, "{pos} should be in exactly one group");
            }
        }
    }

    #[test]
    fn test_scorekeeping_codes() {
        assert_eq!(FieldPosition::from_code(6), Some(FieldPosition::Shortstop));
        assert_eq!(FieldPosition::from_code(0), Some(FieldPosition::Bench));
        assert_eq!(FieldPosition::from_code(10), None);
    }

    #[test]
    fn test_stats_validation_rejects_out_of_range() {
        let mut stats = Stats::default();
        assert!(stats.validate().is_ok());
        stats.power = 11.0;
        assert!(stats.validate().is_err());
    }

    #[test]
    fn test_position_serializes_as_abbreviation() {
        let json = serde_json::to_string(&FieldPosition::FirstBase).unwrap();
        assert_eq!(json, "\"1B\"");
    }
}
