//! A small Pacman-style grid world
//!
//! The agent walks a maze eating food. Every move costs a point, food is
//! worth ten, clearing the board earns a bonus and stepping onto a hazard
//! ends the episode with a penalty. This is the game engine the pipeline,
//! the CLI and the integration tests drive; the learning core itself only
//! sees the [`GameState`](crate::ports::GameState) it implements.

pub mod layout;
pub mod state;

use std::sync::Arc;

pub use layout::{Cell, Layout};
pub use state::{GridState, Status};

use crate::{
    ports::{Environment, EpisodeOutcome},
    types::Direction,
};

/// Grid world environment: a shared layout and a per-episode step limit.
#[derive(Debug, Clone)]
pub struct GridWorld {
    layout: Arc<Layout>,
    max_steps: usize,
}

impl GridWorld {
    pub fn new(layout: Layout, max_steps: usize) -> Self {
        Self {
            layout: Arc::new(layout),
            max_steps,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}

impl Environment for GridWorld {
    type State = GridState;

    fn reset(&mut self) -> GridState {
        GridState::initial(Arc::clone(&self.layout))
    }

    fn step(&mut self, state: &GridState, action: Direction) -> GridState {
        state.apply(action, self.max_steps)
    }

    fn outcome(&self, state: &GridState) -> Option<EpisodeOutcome> {
        state.status().outcome()
    }
}
