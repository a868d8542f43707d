use kdam::{tqdm, BarExt};
use tracing::info;

use crate::agent::LearningAgent;
use crate::env::Environment;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainResults {
    pub episode_rewards: Vec<f64>,
    pub episode_lengths: Vec<usize>,
}

impl TrainResults {
    fn push(&mut self, reward: f64, length: usize) {
        self.episode_rewards.push(reward);
        self.episode_lengths.push(length);
    }

    pub fn mean_reward(&self) -> f64 {
        mean(self.episode_rewards.iter().copied())
    }

    pub fn mean_length(&self) -> f64 {
        mean(self.episode_lengths.iter().map(|l| *l as f64))
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

/// Runs `n_episodes` learning episodes, resetting the environment after each one.
pub fn train<S, A>(
    agent: &mut dyn LearningAgent<S, A>,
    env: &mut dyn Environment<S, A>,
    n_episodes: usize,
    max_steps: Option<usize>,
    show_progress: bool,
) -> Result<TrainResults> {
    let mut results = TrainResults::default();
    let mut pb = if show_progress {
        Some(tqdm!(total = n_episodes))
    } else {
        None
    };

    for episode in 0..n_episodes {
        let record = agent.run_learning_episode(env, max_steps)?;
        env.reset_environment();
        results.push(record.total_reward(), record.max_time_step());

        if let Some(pb) = pb.as_mut() {
            pb.set_postfix(format!(
                "reward={}, ep len={}",
                record.total_reward(),
                record.max_time_step()
            ));
            pb.update(1)?;
        }
        if (episode + 1) % 100 == 0 {
            info!(
                episode = episode + 1,
                mean_length = mean(
                    results.episode_lengths[episode + 1 - 100..]
                        .iter()
                        .map(|l| *l as f64)
                ),
                "training progress"
            );
        }
    }
    if pb.is_some() {
        eprintln!();
    }
    Ok(results)
}

/// Runs `n_episodes` greedy episodes without learning.
pub fn evaluate<S, A>(
    agent: &mut dyn LearningAgent<S, A>,
    env: &mut dyn Environment<S, A>,
    n_episodes: usize,
    max_steps: Option<usize>,
) -> Result<TrainResults> {
    let mut results = TrainResults::default();
    for _episode in 0..n_episodes {
        let record = agent.run_evaluation_episode(env, max_steps)?;
        env.reset_environment();
        results.push(record.total_reward(), record.max_time_step());
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn means_of_empty_results_are_zero() {
        let results = TrainResults::default();
        assert_eq!(results.mean_reward(), 0.0);
        assert_eq!(results.mean_length(), 0.0);
    }

    #[test]
    fn means() {
        let mut results = TrainResults::default();
        results.push(-4.0, 4);
        results.push(-2.0, 2);
        assert_eq!(results.mean_reward(), -3.0);
        assert_eq!(results.mean_length(), 3.0);
    }
}
