//! Common test utilities for the gridq test suite.
//!
//! Provides a one-decision environment whose optimal policy is known.

#![allow(dead_code)]

use gridq::{
    Direction,
    ports::{Environment, EpisodeOutcome, GameState},
};

/// A hall with a treasure door to the east and a pit to the west.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Doors {
    Hall,
    Treasure,
    Pit,
}

impl GameState for Doors {
    fn legal_actions(&self) -> Vec<Direction> {
        match self {
            Doors::Hall => vec![Direction::East, Direction::West, Direction::Stop],
            Doors::Treasure | Doors::Pit => Vec::new(),
        }
    }

    fn score(&self) -> f64 {
        match self {
            Doors::Hall => 0.0,
            Doors::Treasure => 10.0,
            Doors::Pit => -10.0,
        }
    }
}

/// Environment wrapper for [`Doors`]
#[derive(Debug, Default)]
pub struct TwoDoors;

impl Environment for TwoDoors {
    type State = Doors;

    fn reset(&mut self) -> Doors {
        Doors::Hall
    }

    fn step(&mut self, state: &Doors, action: Direction) -> Doors {
        match (state, action) {
            (Doors::Hall, Direction::East) => Doors::Treasure,
            (Doors::Hall, Direction::West) => Doors::Pit,
            (other, _) => *other,
        }
    }

    fn outcome(&self, state: &Doors) -> Option<EpisodeOutcome> {
        match state {
            Doors::Hall => None,
            Doors::Treasure => Some(EpisodeOutcome::Won),
            Doors::Pit => Some(EpisodeOutcome::Lost),
        }
    }
}
