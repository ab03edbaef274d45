// Core value types for the room protocol.
//
// `PlayerId` and `Verdict` are kept as two distinct types even though both
// travel as the same 4-byte scalar on the wire: a role/turn announcement
// always names a player, while a verdict may say "no winner yet". Wire value
// 0 only exists on the `Verdict` side.
//
// `Move` is the structured payload of a move message. Coordinates are signed
// and unchecked here; the board decides what an out-of-grid move means.

use serde::{Deserialize, Serialize};

/// One of the two seats in a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Scalar value used for role and turn announcements.
    pub fn to_wire(self) -> u32 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    pub fn from_wire(value: u32) -> Option<Self> {
        match value {
            1 => Some(PlayerId::One),
            2 => Some(PlayerId::Two),
            _ => None,
        }
    }

    /// The opposing seat.
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Board symbol for this player.
    pub fn mark(self) -> char {
        match self {
            PlayerId::One => 'X',
            PlayerId::Two => 'O',
        }
    }
}

/// Outcome of evaluating the board after a half-turn.
///
/// There is no draw: a full board without a line stays `NoWinner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    NoWinner,
    Win(PlayerId),
}

impl Verdict {
    pub fn to_wire(self) -> u32 {
        match self {
            Verdict::NoWinner => 0,
            Verdict::Win(player) => player.to_wire(),
        }
    }

    pub fn from_wire(value: u32) -> Option<Self> {
        match value {
            0 => Some(Verdict::NoWinner),
            other => PlayerId::from_wire(other).map(Verdict::Win),
        }
    }

    /// The winning player, if the game is over.
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Verdict::NoWinner => None,
            Verdict::Win(player) => Some(player),
        }
    }
}

/// A single move: zero-based grid coordinates supplied by the acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub x: i64,
    pub y: i64,
}

impl Move {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_wire_values() {
        assert_eq!(PlayerId::One.to_wire(), 1);
        assert_eq!(PlayerId::Two.to_wire(), 2);
        assert_eq!(PlayerId::from_wire(1), Some(PlayerId::One));
        assert_eq!(PlayerId::from_wire(2), Some(PlayerId::Two));
        assert_eq!(PlayerId::from_wire(0), None);
        assert_eq!(PlayerId::from_wire(3), None);
    }

    #[test]
    fn other_alternates() {
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.other().other(), PlayerId::Two);
    }

    #[test]
    fn verdict_zero_means_no_winner() {
        assert_eq!(Verdict::NoWinner.to_wire(), 0);
        assert_eq!(Verdict::from_wire(0), Some(Verdict::NoWinner));
        assert_eq!(Verdict::from_wire(2), Some(Verdict::Win(PlayerId::Two)));
        assert_eq!(Verdict::from_wire(7), None);
        assert_eq!(Verdict::Win(PlayerId::One).winner(), Some(PlayerId::One));
        assert_eq!(Verdict::NoWinner.winner(), None);
    }

    #[test]
    fn move_serializes_as_named_fields() {
        let json = serde_json::to_string(&Move::new(2, 0)).unwrap();
        assert_eq!(json, r#"{"x":2,"y":0}"#);
    }

    #[test]
    fn move_accepts_spaced_json() {
        let mv: Move = serde_json::from_str(r#"{"x": 1, "y": 2}"#).unwrap();
        assert_eq!(mv, Move::new(1, 2));
    }
}
