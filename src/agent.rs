mod qlearning_agent;

pub use qlearning_agent::QLearningAgent;

use crate::env::Environment;
use crate::episode::Episode;
use crate::error::Result;
use crate::policy::ValueFunction;

/// An agent that improves its behavior from episodes of interaction.
pub trait LearningAgent<S, A> {
    /// Runs one episode, learning after every step.
    ///
    /// Stops when the environment reaches a terminal state or after
    /// `max_steps` transitions; `None` never stops on its own.
    fn run_learning_episode(
        &mut self,
        env: &mut dyn Environment<S, A>,
        max_steps: Option<usize>,
    ) -> Result<Episode<S, A>>;

    /// Runs one episode following the greedy policy, without learning.
    fn run_evaluation_episode(
        &mut self,
        env: &mut dyn Environment<S, A>,
        max_steps: Option<usize>,
    ) -> Result<Episode<S, A>>;

    /// Forgets everything learned so far.
    fn reset_solver(&mut self);
}

/// One-step Q-learning target: `reward` alone on termination, otherwise
/// bootstrapped from the greedy value of `next_state`.
pub fn qlearning_target<S>(
    value_function: &mut dyn ValueFunction<S>,
    reward: f64,
    terminated: bool,
    discount_factor: f64,
    next_state: &S,
) -> f64 {
    if terminated {
        reward
    } else {
        reward + discount_factor * value_function.value(next_state)
    }
}

#[inline(always)]
fn within_budget(steps: usize, max_steps: Option<usize>) -> bool {
    max_steps.map_or(true, |max| steps < max)
}
