//! Training pipeline for Q-learning agents

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Environment, EpisodeObserver, EpisodeOutcome, EpisodeSummary, GameState},
    q_learning::{LearningParameters, QLearnAgent},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes to play, training and evaluation combined
    pub num_episodes: usize,

    /// Reseeds the agent before the first episode, replacing any seed it
    /// was built with. `None` keeps the agent's own random source.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 100,
            seed: None,
        }
    }
}

/// Aggregate statistics over a group of episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub timeouts: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub timeout_rate: f64,
    pub mean_score: f64,
    pub mean_steps: f64,
}

impl EpisodeStats {
    fn from_summaries(summaries: &[EpisodeSummary]) -> Self {
        let episodes = summaries.len();
        let count = |outcome: EpisodeOutcome| {
            summaries
                .iter()
                .filter(|summary| summary.outcome == outcome)
                .count()
        };
        let wins = count(EpisodeOutcome::Won);
        let losses = count(EpisodeOutcome::Lost);
        let timeouts = count(EpisodeOutcome::TimedOut);

        let ratio = |n: f64| if episodes > 0 { n / episodes as f64 } else { 0.0 };

        Self {
            episodes,
            wins,
            losses,
            timeouts,
            win_rate: ratio(wins as f64),
            loss_rate: ratio(losses as f64),
            timeout_rate: ratio(timeouts as f64),
            mean_score: ratio(summaries.iter().map(|summary| summary.score).sum()),
            mean_steps: ratio(summaries.iter().map(|summary| summary.steps as f64).sum()),
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played while the agent was still learning
    pub training: EpisodeStats,

    /// Episodes played after learning froze
    pub evaluation: EpisodeStats,

    /// Parameters at the end of the run
    pub parameters: LearningParameters,

    /// Number of Q-values the agent has stored
    pub table_entries: usize,
}

impl TrainingResult {
    pub fn total_episodes(&self) -> usize {
        self.training.episodes + self.evaluation.episodes
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays episodes of an environment with a single agent
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn EpisodeObserver>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn EpisodeObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run `num_episodes` episodes, learning as the agent's budget allows.
    ///
    /// The agent keeps its table and episode count, so calling `run` again
    /// continues where the previous run stopped.
    pub fn run<E: Environment>(
        &mut self,
        agent: &mut QLearnAgent<E::State>,
        env: &mut E,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let mut summaries = Vec::with_capacity(self.config.num_episodes);
        for episode in 0..self.config.num_episodes {
            let summary = self.play_episode(episode, agent, env)?;

            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
            summaries.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let (training, evaluation): (Vec<_>, Vec<_>) =
            summaries.into_iter().partition(|summary| summary.training);

        Ok(TrainingResult {
            training: EpisodeStats::from_summaries(&training),
            evaluation: EpisodeStats::from_summaries(&evaluation),
            parameters: agent.params(),
            table_entries: agent.q_table().len(),
        })
    }

    fn play_episode<E: Environment>(
        &mut self,
        episode: usize,
        agent: &mut QLearnAgent<E::State>,
        env: &mut E,
    ) -> Result<EpisodeSummary> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let training = agent.is_training();
        let mut state = env.reset();
        let mut steps = 0;

        let outcome = loop {
            if let Some(outcome) = env.outcome(&state) {
                break outcome;
            }

            let action = agent
                .decide(&state)
                .ok_or(Error::NoLegalMove { step: steps })?;

            for observer in &mut self.observers {
                observer.on_step(episode, steps, action, state.score())?;
            }

            state = env.step(&state, action);
            steps += 1;
        };

        agent.notify_episode_end(&state);

        Ok(EpisodeSummary {
            episode,
            outcome,
            score: state.score(),
            steps,
            training,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridworld::{GridWorld, Layout};

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig {
            num_episodes: 10,
            seed: Some(42),
        };

        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = QLearnAgent::with_params(0.2, 0.05, 0.8, 6);
        let mut world = GridWorld::new(Layout::builtin("tiny").unwrap(), 60);

        let result = pipeline.run(&mut agent, &mut world).unwrap();

        assert_eq!(result.total_episodes(), 10);
        assert_eq!(result.training.episodes, 6);
        assert_eq!(result.evaluation.episodes, 4);
        assert_eq!(
            result.training.wins + result.training.losses + result.training.timeouts,
            6
        );
        assert_eq!(result.parameters.alpha, 0.0);
        assert_eq!(agent.episodes_so_far(), 10);
        assert!(result.table_entries > 0);
    }

    #[test]
    fn test_result_save_and_load() {
        let mut agent = QLearnAgent::with_params(0.2, 0.1, 0.8, 3).with_seed(9);
        let mut world = GridWorld::new(Layout::builtin("corridor").unwrap(), 30);
        let result = TrainingPipeline::new(TrainingConfig {
            num_episodes: 5,
            seed: None,
        })
        .run(&mut agent, &mut world)
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        result.save(&path).unwrap();
        let loaded = TrainingResult::load(&path).unwrap();

        assert_eq!(loaded.training.episodes, 3);
        assert_eq!(loaded.training.wins, result.training.wins);
        assert_eq!(loaded.evaluation.episodes, 2);
        assert_eq!(loaded.parameters.episodes_so_far, 5);
        assert_eq!(loaded.parameters.alpha, 0.0);
        assert_eq!(loaded.table_entries, result.table_entries);
    }

    #[test]
    fn test_pipeline_seed_overrides_agent_seed() {
        let config = crate::app::AgentConfig::default().with_seed(9);
        let mut world = GridWorld::new(Layout::builtin("corridor").unwrap(), 20);

        let mut kept = QLearnAgent::from_config(&config).unwrap();
        TrainingPipeline::new(TrainingConfig {
            num_episodes: 1,
            seed: None,
        })
        .run(&mut kept, &mut world)
        .unwrap();
        assert_eq!(kept.rng_seed(), Some(9));

        let mut reseeded = QLearnAgent::from_config(&config).unwrap();
        TrainingPipeline::new(TrainingConfig {
            num_episodes: 1,
            seed: Some(4),
        })
        .run(&mut reseeded, &mut world)
        .unwrap();
        assert_eq!(reseeded.rng_seed(), Some(4));
    }

    #[test]
    fn test_stats_of_nothing_are_zero() {
        let stats = EpisodeStats::from_summaries(&[]);
        assert_eq!(stats, EpisodeStats::default());
    }
}
