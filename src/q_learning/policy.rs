//! ε-greedy action selection

use std::hash::Hash;

use rand::{Rng, seq::IndexedRandom};

use crate::{
    q_learning::{greedy::GreedyEvaluator, q_table::QTable},
    types::Direction,
};

/// ε-greedy policy with random tie-breaking among the best actions.
///
/// Breaking ties at random keeps the agent from always favouring whichever
/// action happens to be enumerated first while most values are still 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsilonGreedy;

impl EpsilonGreedy {
    /// Pick an action, or `None` when there is nothing legal to pick.
    pub fn select_action<S, R>(
        &self,
        table: &QTable<S>,
        state: &S,
        legal_actions: &[Direction],
        epsilon: f64,
        rng: &mut R,
    ) -> Option<Direction>
    where
        S: Eq + Hash,
        R: Rng,
    {
        if rng.random::<f64>() < epsilon {
            // Explore: random action
            legal_actions.choose(rng).copied()
        } else {
            // Exploit: random choice among the greedy actions
            GreedyEvaluator::new(table)
                .best_actions(state, legal_actions)
                .choose(rng)
                .copied()
        }
    }
}
