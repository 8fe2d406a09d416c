pub mod box_score;
pub mod events;
pub mod player;
pub mod team;

pub use box_score::{BattingLine, BoxScore, TeamBox};
pub use events::{EventKind, EventLog, EventType, GameEvent, Half, TeamSide};
pub use player::{FieldPosition, Player, PlayerId, PlayerRef, Stats};
pub use team::Team;
