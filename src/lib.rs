//! Tabular Q-learning decision module for turn-based grid games
//!
//! This crate provides:
//! - A sparse Q-table, greedy evaluation and an ε-greedy policy
//! - An online agent driven turn by turn by a game engine, which freezes
//!   learning after a fixed number of training episodes
//! - Ports describing the game-engine boundary
//! - A small Pacman-style grid world, a training pipeline and a CLI

pub mod app;
pub mod cli;
pub mod error;
pub mod gridworld;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use app::AgentConfig;
pub use error::{Error, Result};
pub use q_learning::QLearnAgent;
pub use types::Direction;
