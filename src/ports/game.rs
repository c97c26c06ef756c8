//! Game engine ports - the boundary between the learning core and a game
//!
//! The learning core only ever sees a [`GameState`]: an opaque, hashable
//! snapshot that can report its legal moves and current score. Training
//! drivers additionally need an [`Environment`] that can start episodes and
//! apply moves.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::types::Direction;

/// Snapshot of the game world at a decision point.
///
/// Implementations decide what goes into the key (position, remaining
/// targets, adversaries, score...). The learning core never inspects it
/// beyond these two queries and uses it as a table key.
///
/// # Examples
///
/// ```
/// use gridq::{Direction, ports::GameState};
///
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Cell {
///     column: u8,
///     score: i32,
/// }
///
/// impl GameState for Cell {
///     fn legal_actions(&self) -> Vec<Direction> {
///         vec![Direction::East, Direction::West, Direction::Stop]
///     }
///
///     fn score(&self) -> f64 {
///         self.score as f64
///     }
/// }
/// ```
pub trait GameState: Clone + Eq + Hash {
    /// Moves available to the controlled agent. Empty in terminal states.
    fn legal_actions(&self) -> Vec<Direction>;

    /// Running score; rewards are derived from score deltas.
    fn score(&self) -> f64;
}

/// How an episode finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOutcome {
    Won,
    Lost,
    TimedOut,
}

/// A game engine that a training pipeline can drive episode by episode.
pub trait Environment {
    type State: GameState;

    /// Start a fresh episode and return its first state.
    fn reset(&mut self) -> Self::State;

    /// Apply the agent's move (and whatever the world does in response).
    fn step(&mut self, state: &Self::State, action: Direction) -> Self::State;

    /// `Some` once the episode is over.
    fn outcome(&self, state: &Self::State) -> Option<EpisodeOutcome>;
}
