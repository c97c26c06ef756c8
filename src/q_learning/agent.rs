//! Online Q-learning agent driven turn by turn by a game engine
//!
//! The engine calls [`QLearnAgent::decide`] once per turn and
//! [`QLearnAgent::notify_episode_end`] once per episode. Between the two the
//! agent holds at most one pending transition, which is learned from as soon
//! as the resulting state is observed.

use std::mem;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    app::AgentConfig,
    ports::GameState,
    q_learning::{greedy::GreedyEvaluator, policy::EpsilonGreedy, q_table::QTable},
    types::Direction,
};

/// Completed episodes between progress notices.
const PROGRESS_INTERVAL: usize = 100;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Learning parameters and episode bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningParameters {
    /// Learning rate α
    pub alpha: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Episodes before alpha and epsilon are frozen at zero
    pub num_training: usize,
    /// Completed episodes
    pub episodes_so_far: usize,
}

impl LearningParameters {
    fn is_training(&self) -> bool {
        self.episodes_so_far < self.num_training
    }

    fn freeze(&mut self) {
        self.alpha = 0.0;
        self.epsilon = 0.0;
    }
}

/// Where the agent is within an episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase<S> {
    /// No pending transition: start of an episode, or just after one ended.
    Idle,
    /// An action was chosen in `state` and its outcome is not yet known.
    InEpisode { state: S, action: Direction },
}

impl<S> Phase<S> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    /// The pending (state, action) pair, if any.
    pub fn pending(&self) -> Option<(&S, Direction)> {
        match self {
            Phase::Idle => None,
            Phase::InEpisode { state, action } => Some((state, *action)),
        }
    }
}

/// Tabular Q-learning agent (off-policy TD control)
///
/// Rewards are score deltas between consecutive decision points. After
/// `num_training` completed episodes alpha and epsilon drop to zero for good
/// and the agent plays its greedy policy without learning.
#[derive(Debug, Clone)]
pub struct QLearnAgent<S> {
    q_table: QTable<S>,
    params: LearningParameters,
    phase: Phase<S>,
    policy: EpsilonGreedy,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl<S: GameState> QLearnAgent<S> {
    /// Create an agent with the default parameters
    /// (α = 0.2, ε = 0.05, γ = 0.8, 10 training episodes).
    pub fn new() -> Self {
        Self::with_params(
            AgentConfig::DEFAULT_ALPHA,
            AgentConfig::DEFAULT_EPSILON,
            AgentConfig::DEFAULT_GAMMA,
            AgentConfig::DEFAULT_NUM_TRAINING,
        )
    }

    /// Create an agent with explicit parameters
    ///
    /// # Arguments
    ///
    /// * `alpha` - learning rate (0.0 to 1.0)
    /// * `epsilon` - exploration rate (0.0 to 1.0)
    /// * `gamma` - discount factor (0.0 to 1.0)
    /// * `num_training` - episodes before learning freezes; 0 starts frozen
    pub fn with_params(alpha: f64, epsilon: f64, gamma: f64, num_training: usize) -> Self {
        let mut params = LearningParameters {
            alpha,
            epsilon,
            gamma,
            num_training,
            episodes_so_far: 0,
        };
        if !params.is_training() {
            params.freeze();
        }
        Self {
            q_table: QTable::new(),
            params,
            phase: Phase::Idle,
            policy: EpsilonGreedy,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Create an agent from a validated configuration.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        let agent = Self::with_params(
            config.alpha,
            config.epsilon,
            config.gamma,
            config.num_training,
        );
        Ok(match config.seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    /// Use a caller-supplied random source for exploration and tie-breaking.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self.rng_seed = None;
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Choose a move for the current turn.
    ///
    /// Learns from the pending transition first (if there is one), then
    /// selects among the legal actions with `Stop` removed, unless `Stop` is
    /// the only thing legal. Returns `None` when no move is possible; the
    /// agent is then left without a pending transition.
    pub fn decide(&mut self, state: &S) -> Option<Direction> {
        if let Phase::InEpisode {
            state: previous,
            action,
        } = mem::replace(&mut self.phase, Phase::Idle)
        {
            let reward = state.score() - previous.score();
            self.learn_transition(previous, action, state, reward);
        }

        let candidates = decision_candidates(state.legal_actions());
        let action = self.policy.select_action(
            &self.q_table,
            state,
            &candidates,
            self.params.epsilon,
            &mut self.rng,
        )?;

        self.phase = Phase::InEpisode {
            state: state.clone(),
            action,
        };
        Some(action)
    }

    /// Learn from the final transition and close the episode.
    pub fn notify_episode_end(&mut self, state: &S) {
        if let Phase::InEpisode {
            state: previous,
            action,
        } = mem::replace(&mut self.phase, Phase::Idle)
        {
            let reward = state.score() - previous.score();
            self.learn_transition(previous, action, state, reward);
        }

        self.params.episodes_so_far += 1;
        let episodes = self.params.episodes_so_far;
        log::debug!("episode {episodes} finished with score {}", state.score());

        if episodes.is_multiple_of(PROGRESS_INTERVAL) {
            log::info!("number of training episodes: {episodes}");
        }
        if episodes == self.params.num_training {
            self.params.freeze();
            log::info!("training done after {episodes} episodes (turning off epsilon and alpha)");
        }
    }

    /// Q-learning update for a single transition.
    ///
    /// Q(s,a) ← (1 - α) Q(s,a) + α [r + γ max_a' Q(s',a')]
    ///
    /// The maximum ranges over every legal action of `next_state` and is 0.0
    /// when there are none.
    pub fn update(&mut self, state: &S, action: Direction, next_state: &S, reward: f64) {
        self.learn_transition(state.clone(), action, next_state, reward);
    }

    fn learn_transition(&mut self, state: S, action: Direction, next_state: &S, reward: f64) {
        let alpha = self.params.alpha;
        if alpha == 0.0 {
            // (1 - 0) * Q + 0 * target == Q; skip so frozen play adds no entries
            return;
        }
        let max_next_q =
            GreedyEvaluator::new(&self.q_table).best_value(next_state, &next_state.legal_actions());
        let td_target = reward + self.params.gamma * max_next_q;
        let current_q = self.q_table.get(&state, action);
        self.q_table
            .set(state, action, (1.0 - alpha) * current_q + alpha * td_target);
    }

    pub fn alpha(&self) -> f64 {
        self.params.alpha
    }

    /// Change the learning rate. Ignored once training has finished.
    pub fn set_alpha(&mut self, value: f64) {
        if self.params.is_training() {
            self.params.alpha = value;
        } else {
            log::warn!("ignoring alpha = {value}: learning is frozen");
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.params.epsilon
    }

    /// Change the exploration rate. Ignored once training has finished.
    pub fn set_epsilon(&mut self, value: f64) {
        if self.params.is_training() {
            self.params.epsilon = value;
        } else {
            log::warn!("ignoring epsilon = {value}: learning is frozen");
        }
    }

    pub fn gamma(&self) -> f64 {
        self.params.gamma
    }

    pub fn num_training(&self) -> usize {
        self.params.num_training
    }

    pub fn episodes_so_far(&self) -> usize {
        self.params.episodes_so_far
    }

    /// Whether the agent is still inside its training budget.
    pub fn is_training(&self) -> bool {
        self.params.is_training()
    }

    pub fn params(&self) -> LearningParameters {
        self.params
    }

    pub fn phase(&self) -> &Phase<S> {
        &self.phase
    }

    pub fn q_table(&self) -> &QTable<S> {
        &self.q_table
    }
}

impl<S: GameState> Default for QLearnAgent<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Distinct legal actions minus `Stop`, unless `Stop` is all there is.
fn decision_candidates(legal: Vec<Direction>) -> Vec<Direction> {
    let mut candidates = Vec::with_capacity(legal.len());
    for action in legal {
        if !candidates.contains(&action) {
            candidates.push(action);
        }
    }
    if candidates.iter().any(|action| !action.is_stop()) {
        candidates.retain(|action| !action.is_stop());
    }
    candidates
}
