//! Error types for the tabular Q-learning crate

use thiserror::Error;

use crate::env::EnvError;

/// Main error type of the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The action has no entry among the ones recorded for the state at its first visit.
    #[error("could not find a matching Q-value for action {action} in state {state}")]
    ActionNotFound { state: String, action: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("non-terminal state {state} has no legal actions")]
    NoLegalActions { state: String },

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
