//! Observer port - abstraction for training observation
//!
//! Observers receive episode and step events from the training pipeline
//! without the pipeline knowing how they are displayed or recorded.

use serde::{Deserialize, Serialize};

use crate::{Result, ports::EpisodeOutcome, types::Direction};

/// Summary of one finished episode, handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Index of the episode (0-based)
    pub episode: usize,
    /// How the episode finished
    pub outcome: EpisodeOutcome,
    /// Final score reported by the game
    pub score: f64,
    /// Number of moves the agent made
    pub steps: usize,
    /// Whether the agent was still learning during this episode
    pub training: bool,
}

/// Observer trait for monitoring training
///
/// The methods are called in this order:
/// 1. `on_training_start(total_episodes)`
/// 2. For each episode: `on_episode_start`, `on_step` per move, `on_episode_end`
/// 3. `on_training_end()`
///
/// Every method has a no-op default.
///
/// # Examples
///
/// ```no_run
/// use gridq::ports::{EpisodeObserver, EpisodeOutcome, EpisodeSummary};
///
/// struct WinCounter {
///     wins: usize,
/// }
///
/// impl EpisodeObserver for WinCounter {
///     fn on_episode_end(&mut self, summary: &EpisodeSummary) -> gridq::Result<()> {
///         if summary.outcome == EpisodeOutcome::Won {
///             self.wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait EpisodeObserver: Send {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after the agent picked `action`, before the game applies it.
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _action: Direction,
        _score: f64,
    ) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Last call of the lifecycle. Use it to flush output or finish displays.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
