use rand::rngs::StdRng;
use rand::{distributions::Uniform, prelude::Distribution, Rng};

use super::{greedy_index, greedy_probs, seeded_rng, ActionSelection, TieBreak};

/// Explores uniformly with probability `epsilon`, exploits otherwise.
///
/// Epsilon stays fixed for the whole life of the selector.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    exploration_decider: Uniform<f64>,
    epsilon: f64,
    tie_break: TieBreak,
    rng: StdRng,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64, tie_break: TieBreak, seed: Option<u64>) -> Self {
        Self {
            exploration_decider: Uniform::from(0.0..1.0),
            epsilon,
            tie_break,
            rng: seeded_rng(seed),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    fn should_explore(&mut self) -> bool {
        self.epsilon != 0.0 && self.exploration_decider.sample(&mut self.rng) < self.epsilon
    }
}

impl ActionSelection for EpsilonGreedy {
    fn get_action(&mut self, values: &[f64]) -> Option<usize> {
        if values.is_empty() {
            return None;
        }
        if self.should_explore() {
            Some(self.rng.gen_range(0..values.len()))
        } else {
            greedy_index(values, self.tie_break, &mut self.rng)
        }
    }

    fn get_exploration_probs(&self, values: &[f64]) -> Vec<f64> {
        let uniform: f64 = self.epsilon / values.len() as f64;
        greedy_probs(values, self.tie_break)
            .into_iter()
            .map(|p| uniform + (1.0 - self.epsilon) * p)
            .collect()
    }
}
