use crate::action_selection::TieBreak;
use crate::error::{Error, Result};

/// Hyper-parameters of a Q-learning agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentConfig {
    /// γ, in `[0, 1]`
    pub discount_factor: f64,
    /// α, in `(0, 1]`
    pub learning_rate: f64,
    /// ε, in `[0, 1]`
    pub epsilon: f64,
    pub tie_break: TieBreak,
    /// Seed of the exploration RNG, `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            discount_factor: 0.99,
            learning_rate: 0.1,
            epsilon: 0.1,
            tie_break: TieBreak::UniformRandom,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn new(discount_factor: f64, learning_rate: f64, epsilon: f64) -> Self {
        Self {
            discount_factor,
            learning_rate,
            epsilon,
            ..Self::default()
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(invalid(format!(
                "discount factor must be in [0, 1], got {}",
                self.discount_factor
            )));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid(format!(
                "learning rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}
