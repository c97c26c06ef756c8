//! Game state and scoring for the grid world

use std::{
    collections::BTreeSet,
    hash::{Hash, Hasher},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use super::layout::{Cell, Layout};
use crate::{
    ports::{EpisodeOutcome, GameState},
    types::Direction,
};

/// Points lost for every move, including `Stop`
pub const TIME_PENALTY: i64 = 1;
/// Points for eating one piece of food
pub const FOOD_REWARD: i64 = 10;
/// Bonus for clearing the board
pub const WIN_BONUS: i64 = 500;
/// Penalty for walking into a hazard
pub const HAZARD_PENALTY: i64 = 500;

/// Whether an episode is still running and how it ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Won,
    Lost,
    TimedOut,
}

impl Status {
    pub fn outcome(self) -> Option<EpisodeOutcome> {
        match self {
            Status::Playing => None,
            Status::Won => Some(EpisodeOutcome::Won),
            Status::Lost => Some(EpisodeOutcome::Lost),
            Status::TimedOut => Some(EpisodeOutcome::TimedOut),
        }
    }
}

/// Snapshot of a grid world episode
///
/// Equality and hashing cover the agent position, the remaining food, the
/// score and the status. The shared layout and the step counter are not
/// part of the key.
#[derive(Debug, Clone)]
pub struct GridState {
    layout: Arc<Layout>,
    agent: Cell,
    food: BTreeSet<Cell>,
    score: i64,
    steps: usize,
    status: Status,
}

impl GridState {
    /// Starting state for `layout`
    pub fn initial(layout: Arc<Layout>) -> Self {
        Self {
            agent: layout.start(),
            food: layout.food().clone(),
            score: 0,
            steps: 0,
            status: Status::Playing,
            layout,
        }
    }

    /// State after the agent makes `action`.
    ///
    /// Moving into a wall leaves the agent in place. Terminal states are
    /// returned unchanged. Reaching `max_steps` without winning or losing
    /// ends the episode as a timeout.
    pub fn apply(&self, action: Direction, max_steps: usize) -> Self {
        if self.status != Status::Playing {
            return self.clone();
        }

        let mut next = self.clone();
        next.steps += 1;
        next.score -= TIME_PENALTY;

        if let Some(target) = self.neighbour(action) {
            next.agent = target;
        }

        if self.layout.is_hazard(next.agent) {
            next.score -= HAZARD_PENALTY;
            next.status = Status::Lost;
        } else if next.food.remove(&next.agent) {
            next.score += FOOD_REWARD;
            if next.food.is_empty() {
                next.score += WIN_BONUS;
                next.status = Status::Won;
            }
        }

        if next.status == Status::Playing && next.steps >= max_steps {
            next.status = Status::TimedOut;
        }
        next
    }

    /// The open cell one step away in `direction`, if any.
    fn neighbour(&self, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let row = self.agent.0.checked_add_signed(dr)?;
        let col = self.agent.1.checked_add_signed(dc)?;
        (!self.layout.is_wall((row, col))).then_some((row, col))
    }

    pub fn agent(&self) -> Cell {
        self.agent
    }

    pub fn food_remaining(&self) -> usize {
        self.food.len()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn points(&self) -> i64 {
        self.score
    }
}

impl PartialEq for GridState {
    fn eq(&self, other: &Self) -> bool {
        self.agent == other.agent
            && self.score == other.score
            && self.status == other.status
            && self.food == other.food
    }
}

impl Eq for GridState {}

impl Hash for GridState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.agent.hash(state);
        self.food.hash(state);
        self.score.hash(state);
        self.status.hash(state);
    }
}

impl GameState for GridState {
    /// `Stop` plus every unblocked direction; nothing once the episode is over.
    fn legal_actions(&self) -> Vec<Direction> {
        if self.status != Status::Playing {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .filter(|&direction| direction.is_stop() || self.neighbour(direction).is_some())
            .collect()
    }

    fn score(&self) -> f64 {
        self.score as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> GridState {
        GridState::initial(Arc::new(Layout::builtin("corridor").unwrap()))
    }

    #[test]
    fn test_legal_actions_respect_walls() {
        let state = corridor();
        assert_eq!(
            state.legal_actions(),
            vec![Direction::East, Direction::Stop]
        );
    }

    #[test]
    fn test_wall_bump_costs_a_step() {
        let state = corridor().apply(Direction::North, 100);
        assert_eq!(state.agent(), (1, 1));
        assert_eq!(state.points(), -TIME_PENALTY);
        assert_eq!(state.steps(), 1);
    }

    #[test]
    fn test_clearing_food_wins() {
        let mut state = corridor();
        for _ in 0..7 {
            state = state.apply(Direction::East, 100);
        }
        assert_eq!(state.status(), Status::Won);
        assert_eq!(state.points(), -7 + FOOD_REWARD + WIN_BONUS);
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.apply(Direction::West, 100), state);
    }

    #[test]
    fn test_hazard_loses() {
        let layout = Arc::new(Layout::parse("%%%%\n%PG%\n%%%%\n%.%%").unwrap());
        let state = GridState::initial(layout).apply(Direction::East, 100);
        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.points(), -TIME_PENALTY - HAZARD_PENALTY);
        assert_eq!(state.status().outcome(), Some(EpisodeOutcome::Lost));
    }

    #[test]
    fn test_step_limit_times_out() {
        let state = corridor().apply(Direction::Stop, 1);
        assert_eq!(state.status(), Status::TimedOut);
        assert!(state.legal_actions().is_empty());
    }

    #[test]
    fn test_wall_bump_matches_stop() {
        let start = corridor();
        let wandered = start
            .apply(Direction::East, 100)
            .apply(Direction::West, 100);
        assert_ne!(start, wandered, "score is part of the key");

        let stopped = start.apply(Direction::Stop, 100);
        let bumped = start.apply(Direction::North, 100);
        assert_eq!(stopped, bumped);
    }
}
