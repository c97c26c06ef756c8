//! Action identifiers shared by the learning core and game engines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A move direction on the grid.
///
/// `Stop` is the no-op action: the agent stays where it is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Every direction, in enumeration order.
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    /// The four moving directions (everything except `Stop`).
    pub const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Row/column offset applied by this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::Stop => (0, 0),
        }
    }

    pub fn is_stop(self) -> bool {
        self == Direction::Stop
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_exclude_stop() {
        assert!(Direction::MOVES.iter().all(|d| !d.is_stop()));
        assert_eq!(Direction::ALL.len(), Direction::MOVES.len() + 1);
    }

    #[test]
    fn stop_has_no_displacement() {
        assert_eq!(Direction::Stop.delta(), (0, 0));
        assert_eq!(Direction::North.to_string(), "north");
    }
}
