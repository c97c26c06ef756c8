//! Configuration types for agent creation.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Learning parameters for a Q-learning agent.
///
/// Builder-style API; every field has a default, so a JSON file only needs
/// the keys it wants to override.
///
/// # Examples
///
/// ```
/// use gridq::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_alpha(0.5)
///     .with_num_training(200)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α
    pub alpha: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Episodes before alpha and epsilon are frozen at zero
    pub num_training: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub const DEFAULT_ALPHA: f64 = 0.2;
    pub const DEFAULT_EPSILON: f64 = 0.05;
    pub const DEFAULT_GAMMA: f64 = 0.8;
    pub const DEFAULT_NUM_TRAINING: usize = 10;

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_num_training(mut self, num_training: usize) -> Self {
        self.num_training = num_training;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that alpha, epsilon and gamma are finite and within [0, 1].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("epsilon", self.epsilon),
            ("gamma", self.gamma),
        ] {
            check_unit_interval(name, value)?;
        }
        Ok(())
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            epsilon: Self::DEFAULT_EPSILON,
            gamma: Self::DEFAULT_GAMMA,
            num_training: Self::DEFAULT_NUM_TRAINING,
            seed: None,
        }
    }
}

pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("{name} must be within [0, 1], got {value}"),
        })
    }
}
