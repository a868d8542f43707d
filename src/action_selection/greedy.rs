use rand::rngs::StdRng;

use super::{greedy_index, greedy_probs, seeded_rng, ActionSelection, TieBreak};

/// Always exploits, used for evaluation roll-outs.
#[derive(Debug, Clone)]
pub struct Greedy {
    tie_break: TieBreak,
    rng: StdRng,
}

impl Greedy {
    pub fn new(tie_break: TieBreak, seed: Option<u64>) -> Self {
        Self {
            tie_break,
            rng: seeded_rng(seed),
        }
    }
}

impl ActionSelection for Greedy {
    fn get_action(&mut self, values: &[f64]) -> Option<usize> {
        greedy_index(values, self.tie_break, &mut self.rng)
    }

    fn get_exploration_probs(&self, values: &[f64]) -> Vec<f64> {
        greedy_probs(values, self.tie_break)
    }
}
