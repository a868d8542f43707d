pub mod action_selection;
pub mod agent;
pub mod config;
pub mod env;
pub mod episode;
pub mod error;
pub mod observation;
pub mod policy;
pub mod trainer;
pub mod utils;

pub use agent::{LearningAgent, QLearningAgent};
pub use config::AgentConfig;
pub use episode::{Episode, Transition};
pub use error::{Error, Result};
