//! Observer implementations for training pipelines

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    ports::{EpisodeObserver, EpisodeOutcome, EpisodeSummary},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
    timeouts: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
            timeouts: 0,
        }
    }

    fn message(&self) -> String {
        format!("W:{} L:{} T:{}", self.wins, self.losses, self.timeouts)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeObserver for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match summary.outcome {
            EpisodeOutcome::Won => self.wins += 1,
            EpisodeOutcome::Lost => self.losses += 1,
            EpisodeOutcome::TimedOut => self.timeouts += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_observer_counts_outcomes() {
        let mut observer = ProgressObserver::new();
        observer.on_training_start(3).unwrap();
        for (episode, outcome) in [
            EpisodeOutcome::Won,
            EpisodeOutcome::Lost,
            EpisodeOutcome::Won,
        ]
        .into_iter()
        .enumerate()
        {
            observer
                .on_episode_end(&EpisodeSummary {
                    episode,
                    outcome,
                    score: 0.0,
                    steps: 1,
                    training: true,
                })
                .unwrap();
        }
        observer.on_training_end().unwrap();
        assert_eq!(observer.message(), "W:2 L:1 T:0");
    }
}
