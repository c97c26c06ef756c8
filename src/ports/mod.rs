//! Ports (trait boundaries) between the learning core and the outside world.
//!
//! The game engine owns board representation, move legality and scoring;
//! these traits are the only surface the core and the pipeline depend on.

pub mod game;
pub mod observer;

pub use game::{Environment, EpisodeOutcome, GameState};
pub use observer::{EpisodeObserver, EpisodeSummary};
