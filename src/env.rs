mod grid_world;

use thiserror::Error;

pub use grid_world::{GridWorldAction, GridWorldDomain, GridWorldEnv, GridWorldState};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    #[error("environment is not ready, it must be reset first")]
    EnvNotReady,
    #[error("action {0} can not be executed in the current state")]
    InvalidAction(String),
    #[error("environment failed: {0}")]
    Failed(String),
}

/// Interaction surface the agent learns from.
///
/// The agent never inspects what sits behind it, it only observes states,
/// executes actions and reads back `(next_state, reward, terminated)`.
pub trait Environment<S, A> {
    fn current_observation(&self) -> S;
    fn is_in_terminal_state(&self) -> bool;
    fn execute_action(&mut self, action: &A) -> Result<(S, f64, bool), EnvError>;
    fn reset_environment(&mut self);
}

/// Lists the actions available in a state.
///
/// Must be deterministic for a given state: the table records the returned
/// actions once, at the first visit of the state.
pub trait ActionEnumerator<S, A> {
    fn legal_actions(&self, state: &S) -> Vec<A>;
}

impl<S, A, F> ActionEnumerator<S, A> for F
where
    F: Fn(&S) -> Vec<A>,
{
    fn legal_actions(&self, state: &S) -> Vec<A> {
        self(state)
    }
}
