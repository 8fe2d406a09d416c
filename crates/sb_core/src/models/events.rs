use serde::{Deserialize, Serialize};

use super::player::{FieldPosition, PlayerId};
use crate::engine::play::PlayType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// Top halves are batted by the away team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    #[default]
    Top,
    Bottom,
}

impl Half {
    pub fn batting_side(self) -> TeamSide {
        match self {
            Half::Top => TeamSide::Away,
            Half::Bottom => TeamSide::Home,
        }
    }
}

/// One entry in the play-by-play.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameEvent {
    pub sequence: u32,
    pub inning: u8,
    pub half: Half,
    pub outs_before: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batter: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitcher: Option<PlayerId>,
    pub kind: EventKind,
    pub runs_scored: u8,
    /// (away, home) after the event
    pub score_after: (u32, u32),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Walk,
    Strikeout,
    BallInPlay {
        play_type: PlayType,
        fielder: FieldPosition,
        is_error: bool,
        batter_bases: u8,
        outs: u8,
    },
    HalfInningEnd {
        runs: u32,
    },
    GameOver {
        winner: TeamSide,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Walk,
    Strikeout,
    BallInPlay,
    HalfInningEnd,
    GameOver,
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Walk => EventType::Walk,
            EventKind::Strikeout => EventType::Strikeout,
            EventKind::BallInPlay { .. } => EventType::BallInPlay,
            EventKind::HalfInningEnd { .. } => EventType::HalfInningEnd,
            EventKind::GameOver { .. } => EventType::GameOver,
        }
    }

    /// Plate appearances, as opposed to inning and game markers.
    pub fn is_plate_appearance(&self) -> bool {
        matches!(self, EventKind::Walk | EventKind::Strikeout | EventKind::BallInPlay { .. })
    }
}

/// Ordered, append-only play-by-play.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, stamping its sequence number.
    pub fn push(&mut self, mut event: GameEvent) -> &GameEvent {
        event.sequence = self.events.len() as u32;
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn by_inning(&self, inning: u8) -> Vec<&GameEvent> {
        self.events.iter().filter(|e| e.inning == inning).collect()
    }

    pub fn of_kind(&self, event_type: EventType) -> Vec<&GameEvent> {
        self.events.iter().filter(|e| e.kind.event_type() == event_type).collect()
    }
}
