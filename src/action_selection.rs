mod epsilon_greedy;
mod greedy;

use enum_dispatch::enum_dispatch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::{argmax, argmax_all};

pub use epsilon_greedy::EpsilonGreedy;
pub use greedy::Greedy;

/// How a greedy choice is made among actions sharing the maximal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Uniformly at random among every maximal action.
    #[default]
    UniformRandom,
    /// The first maximal action in enumeration order. Deterministic, but it
    /// biases exploration towards the actions listed first.
    FirstMatch,
}

/// Picks an action from the current values of a state's entries.
///
/// Both methods work on indices into `values`, which are laid out in the
/// order the entries were created.
#[enum_dispatch]
pub trait ActionSelection {
    /// `None` only when `values` is empty.
    fn get_action(&mut self, values: &[f64]) -> Option<usize>;
    fn get_exploration_probs(&self, values: &[f64]) -> Vec<f64>;
}

#[derive(Debug, Clone)]
#[enum_dispatch(ActionSelection)]
pub enum EnumActionSelection {
    EpsilonGreedy(EpsilonGreedy),
    Greedy(Greedy),
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub(crate) fn greedy_index(values: &[f64], tie_break: TieBreak, rng: &mut StdRng) -> Option<usize> {
    match tie_break {
        TieBreak::FirstMatch => argmax(values),
        TieBreak::UniformRandom => {
            let best = argmax_all(values);
            if best.is_empty() {
                None
            } else {
                Some(best[rng.gen_range(0..best.len())])
            }
        }
    }
}

/// Probability of each index under the greedy choice alone.
pub(crate) fn greedy_probs(values: &[f64], tie_break: TieBreak) -> Vec<f64> {
    let mut probs: Vec<f64> = vec![0.0; values.len()];
    match tie_break {
        TieBreak::FirstMatch => {
            if let Some(i) = argmax(values) {
                probs[i] = 1.0;
            }
        }
        TieBreak::UniformRandom => {
            let best = argmax_all(values);
            for i in best.iter() {
                probs[*i] = 1.0 / best.len() as f64;
            }
        }
    }
    probs
}
