use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use tabular_qlearning::env::{GridWorldAction, GridWorldEnv, GridWorldState};
use tabular_qlearning::observation::IdentityCanonicalizer;
use tabular_qlearning::policy::ConstantValueInitialization;
use tabular_qlearning::trainer::{evaluate, train};
use tabular_qlearning::utils::{moving_average, plot_moving_average};
use tabular_qlearning::{AgentConfig, QLearningAgent};

extern crate structopt;

use structopt::StructOpt;

/// Train a Q-learning agent on the four rooms grid world
#[derive(StructOpt, Debug)]
#[structopt(name = "QLearning - GridWorld")]
struct Cli {
    /// Number of episodes for the training
    #[structopt(long = "n_episodes", short = "n", default_value = "1000")]
    n_episodes: usize,

    /// Maximum number of steps per episode, unbounded when absent
    #[structopt(long = "max_steps")]
    max_steps: Option<usize>,

    /// Learning rate of the agent
    #[structopt(long = "learning_rate", default_value = "0.1")]
    learning_rate: f64,

    /// Discount factor used on the temporal difference target
    #[structopt(long = "discount_factor", default_value = "0.99")]
    discount_factor: f64,

    /// Exploration ratio
    #[structopt(long = "epsilon", default_value = "0.1")]
    epsilon: f64,

    /// Initial value of every action
    #[structopt(long = "initial_value", default_value = "0.0")]
    initial_value: f64,

    /// Seed of the agent's exploration
    #[structopt(long = "seed")]
    seed: Option<u64>,

    /// Seed of the environment's transitions
    #[structopt(long = "env_seed", default_value = "0")]
    env_seed: u64,

    /// Number of greedy episodes run after training
    #[structopt(long = "eval_for", default_value = "10")]
    eval_for: usize,

    /// Moving average window to be used on the visualization of results
    #[structopt(long = "moving_average_window", default_value = "20")]
    moving_average_window: usize,

    /// Write the episode length curve to this file
    #[structopt(long = "plot", parse(from_os_str))]
    plot: Option<PathBuf>,

    /// Show a progress bar while training
    #[structopt(long = "show_progress")]
    show_progress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli: Cli = Cli::from_args();

    let mut config = AgentConfig::new(cli.discount_factor, cli.learning_rate, cli.epsilon);
    config.seed = cli.seed;

    let mut env = GridWorldEnv::four_rooms(cli.env_seed);
    let mut agent: QLearningAgent<GridWorldState, GridWorldAction, IdentityCanonicalizer> =
        QLearningAgent::with_config(
            env.domain().clone(),
            IdentityCanonicalizer,
            ConstantValueInitialization::new(cli.initial_value),
            config,
        )?;

    let now: Instant = Instant::now();
    let results = train(
        &mut agent,
        &mut env,
        cli.n_episodes,
        cli.max_steps,
        cli.show_progress,
    )?;
    info!(
        elapsed = ?now.elapsed(),
        states = agent.table().len(),
        mean_length = results.mean_length(),
        "training done"
    );

    let evaluation = evaluate(&mut agent, &mut env, cli.eval_for, cli.max_steps.or(Some(1000)))?;
    info!(
        mean_length = evaluation.mean_length(),
        mean_reward = evaluation.mean_reward(),
        "greedy evaluation"
    );

    let first = results.episode_lengths.first().copied().unwrap_or(0);
    let last = results.episode_lengths.last().copied().unwrap_or(0);
    println!(
        "episodes: {}, first episode length: {}, last episode length: {}",
        cli.n_episodes, first, last
    );

    if let Some(path) = cli.plot {
        let lengths: Vec<f64> = results.episode_lengths.iter().map(|l| *l as f64).collect();
        let ma_lengths = moving_average(cli.moving_average_window, &lengths);
        plot_moving_average(&[ma_lengths], &["ε-Greedy Q-learning"], "Episodes Length", &path)?;
        info!(path = ?path, "plot written");
    }
    Ok(())
}
