//! Q-table implementation for temporal difference learning

use std::{collections::HashMap, hash::Hash};

use crate::types::Direction;

/// Q-table mapping (state, action) pairs to Q-values
///
/// Entries are created lazily: reading an unseen pair yields 0.0 and leaves
/// the table untouched. Nothing is ever removed.
#[derive(Debug, Clone)]
pub struct QTable<S> {
    /// Q-values grouped by state: state -> (action -> Q-value)
    q_values: HashMap<S, HashMap<Direction, f64>>,
}

impl<S: Eq + Hash> QTable<S> {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self {
            q_values: HashMap::new(),
        }
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &S, action: Direction) -> f64 {
        self.q_values
            .get(state)
            .and_then(|row| row.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: S, action: Direction, value: f64) {
        self.q_values.entry(state).or_default().insert(action, value);
    }

    /// Total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Number of distinct states with at least one stored value
    pub fn states(&self) -> usize {
        self.q_values.len()
    }
}

impl<S: Eq + Hash> Default for QTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_pairs_read_zero() {
        let qtable: QTable<&str> = QTable::new();
        for action in Direction::ALL {
            assert_eq!(qtable.get(&"start", action), 0.0);
        }
        assert!(qtable.is_empty());
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new();
        qtable.set("start", Direction::East, 1.5);
        assert_eq!(qtable.get(&"start", Direction::East), 1.5);
        assert_eq!(qtable.get(&"start", Direction::West), 0.0);
        assert_eq!(qtable.get(&"other", Direction::East), 0.0);
    }

    #[test]
    fn test_set_overwrites_existing_entry() {
        let mut qtable = QTable::new();
        qtable.set("start", Direction::North, 2.0);
        qtable.set("start", Direction::North, -3.25);
        assert_eq!(qtable.get(&"start", Direction::North), -3.25);
        assert_eq!(qtable.len(), 1);
    }

    #[test]
    fn test_reads_do_not_create_entries() {
        let mut qtable = QTable::new();
        qtable.set("a", Direction::North, 1.0);
        qtable.set("a", Direction::South, 1.0);
        qtable.set("b", Direction::North, 1.0);
        let _ = qtable.get(&"c", Direction::East);

        assert_eq!(qtable.len(), 3);
        assert_eq!(qtable.states(), 2);
    }
}
