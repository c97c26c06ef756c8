//! Tabular Q-learning
//!
//! The learning core: a sparse Q-table, greedy evaluation over it, an
//! ε-greedy policy and the agent that ties them to a game's turn/episode
//! lifecycle.
//!
//! ## Usage Example
//!
//! ```no_run
//! use gridq::{gridworld::{GridWorld, Layout}, ports::Environment, q_learning::QLearnAgent};
//!
//! let mut world = GridWorld::new(Layout::builtin("small").unwrap(), 200);
//! let mut agent = QLearnAgent::with_params(
//!     0.2,  // alpha
//!     0.05, // epsilon
//!     0.8,  // gamma
//!     100,  // training episodes
//! )
//! .with_seed(42);
//!
//! let mut state = world.reset();
//! while world.outcome(&state).is_none() {
//!     let Some(action) = agent.decide(&state) else { break };
//!     state = world.step(&state, action);
//! }
//! agent.notify_episode_end(&state);
//! ```

pub mod agent;
pub mod greedy;
pub mod policy;
pub mod q_table;

// Public re-exports
pub use agent::{LearningParameters, Phase, QLearnAgent};
pub use greedy::GreedyEvaluator;
pub use policy::EpsilonGreedy;
pub use q_table::QTable;
