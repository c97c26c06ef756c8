//! Training pipeline abstractions
//!
//! Drives an agent through episodes of an environment and reports progress
//! to composable observers.

pub mod observers;
pub mod training;

pub use observers::ProgressObserver;
pub use training::{EpisodeStats, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Environment, EpisodeObserver};
