//! Greedy evaluation over a Q-table

use std::hash::Hash;

use crate::{q_learning::q_table::QTable, types::Direction};

/// Read-only view answering "what is the best I can do from here?"
#[derive(Debug, Clone, Copy)]
pub struct GreedyEvaluator<'a, S> {
    table: &'a QTable<S>,
}

impl<'a, S: Eq + Hash> GreedyEvaluator<'a, S> {
    pub fn new(table: &'a QTable<S>) -> Self {
        Self { table }
    }

    /// Maximum Q-value over the legal actions, or 0.0 when there are none.
    pub fn best_value(&self, state: &S, legal_actions: &[Direction]) -> f64 {
        if legal_actions.is_empty() {
            return 0.0;
        }
        legal_actions
            .iter()
            .map(|&action| self.table.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Every legal action whose Q-value equals the maximum.
    ///
    /// Values are compared with exact equality, so early in training most
    /// actions tie at 0.0. Order follows `legal_actions`; duplicates in the
    /// input are reported once.
    pub fn best_actions(&self, state: &S, legal_actions: &[Direction]) -> Vec<Direction> {
        let mut best_value = f64::NEG_INFINITY;
        let mut best = Vec::new();
        for &action in legal_actions {
            let value = self.table.get(state, action);
            if value > best_value {
                best_value = value;
                best.clear();
                best.push(action);
            } else if value == best_value && !best.contains(&action) {
                best.push(action);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> QTable<&'static str> {
        let mut qtable = QTable::new();
        qtable.set("s", Direction::North, 0.5);
        qtable.set("s", Direction::South, 1.5);
        qtable.set("s", Direction::East, 0.8);
        qtable
    }

    #[test]
    fn test_best_value() {
        let qtable = table();
        let greedy = GreedyEvaluator::new(&qtable);
        let legal = [Direction::North, Direction::South, Direction::East];
        assert_eq!(greedy.best_value(&"s", &legal), 1.5);
        assert_eq!(greedy.best_value(&"s", &[Direction::North]), 0.5);
    }

    #[test]
    fn test_empty_legal_set_is_terminal() {
        let qtable = table();
        let greedy = GreedyEvaluator::new(&qtable);
        assert_eq!(greedy.best_value(&"s", &[]), 0.0);
        assert!(greedy.best_actions(&"s", &[]).is_empty());
    }

    #[test]
    fn test_negative_values_are_not_clamped_to_zero() {
        let mut qtable = QTable::new();
        qtable.set("s", Direction::North, -4.0);
        qtable.set("s", Direction::South, -2.0);
        let greedy = GreedyEvaluator::new(&qtable);
        let legal = [Direction::North, Direction::South];
        assert_eq!(greedy.best_value(&"s", &legal), -2.0);
        assert_eq!(greedy.best_actions(&"s", &legal), vec![Direction::South]);
    }

    #[test]
    fn test_best_actions_reports_ties() {
        let mut qtable = table();
        qtable.set("s", Direction::West, 1.5);
        let greedy = GreedyEvaluator::new(&qtable);
        let legal = [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ];
        assert_eq!(
            greedy.best_actions(&"s", &legal),
            vec![Direction::South, Direction::West]
        );
    }

    #[test]
    fn test_unvisited_state_ties_everything() {
        let qtable: QTable<&str> = QTable::new();
        let greedy = GreedyEvaluator::new(&qtable);
        assert_eq!(
            greedy.best_actions(&"fresh", &Direction::MOVES),
            Direction::MOVES.to_vec()
        );
    }
}
