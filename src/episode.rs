/// One step of an episode, borrowed from its [`Episode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<'a, S, A> {
    pub state: &'a S,
    pub action: &'a A,
    pub reward: f64,
    pub next_state: &'a S,
}

/// Append-only trace of one run.
///
/// Holds `n + 1` states for `n` actions and rewards: the state at time `t`
/// is followed by action `t`, which yields reward `t` and state `t + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode<S, A> {
    states: Vec<S>,
    actions: Vec<A>,
    rewards: Vec<f64>,
}

impl<S, A> Episode<S, A> {
    pub fn new(initial_state: S) -> Self {
        Self {
            states: vec![initial_state],
            actions: vec![],
            rewards: vec![],
        }
    }

    pub fn record_transition_to(&mut self, action: A, next_state: S, reward: f64) {
        self.actions.push(action);
        self.states.push(next_state);
        self.rewards.push(reward);
    }

    pub fn initial_state(&self) -> &S {
        &self.states[0]
    }

    pub fn last_state(&self) -> &S {
        &self.states[self.states.len() - 1]
    }

    pub fn state(&self, t: usize) -> Option<&S> {
        self.states.get(t)
    }

    pub fn action(&self, t: usize) -> Option<&A> {
        self.actions.get(t)
    }

    pub fn reward(&self, t: usize) -> Option<f64> {
        self.rewards.get(t).copied()
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Number of states, the initial one included.
    pub fn num_time_steps(&self) -> usize {
        self.states.len()
    }

    /// Number of transitions.
    pub fn max_time_step(&self) -> usize {
        self.actions.len()
    }

    pub fn transitions(&self) -> impl Iterator<Item = Transition<'_, S, A>> {
        self.actions
            .iter()
            .enumerate()
            .map(move |(t, action)| Transition {
                state: &self.states[t],
                action,
                reward: self.rewards[t],
                next_state: &self.states[t + 1],
            })
    }

    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }

    pub fn discounted_return(&self, discount_factor: f64) -> f64 {
        let mut result: f64 = 0.0;
        let mut discount: f64 = 1.0;
        for reward in self.rewards.iter() {
            result += discount * reward;
            discount *= discount_factor;
        }
        result
    }
}
