//! CLI infrastructure for the gridq toolkit
//!
//! This module provides the command-line interface for training and
//! evaluating Q-learning agents on grid world layouts.

pub mod commands;
pub mod output;
