use std::fmt::Debug;
use tracing::{debug, trace};

use super::{qlearning_target, within_budget, LearningAgent};
use crate::action_selection::{ActionSelection, EnumActionSelection, EpsilonGreedy, Greedy};
use crate::config::AgentConfig;
use crate::env::{ActionEnumerator, Environment};
use crate::episode::Episode;
use crate::error::{Error, Result};
use crate::observation::StateCanonicalizer;
use crate::policy::{QEntry, QTable, ValueFunction, ValueInitialization};

/// Tabular one-step Q-learning with an epsilon-greedy behavior policy.
///
/// The agent exclusively owns its table. Learning updates are off-policy:
/// the target of every step uses the greedy value of the next state whatever
/// the behavior policy would do there.
pub struct QLearningAgent<S, A, C: StateCanonicalizer<S>> {
    table: QTable<S, A, C>,
    config: AgentConfig,
    learning_policy: EnumActionSelection,
    evaluation_policy: EnumActionSelection,
}

impl<S, A, C> QLearningAgent<S, A, C>
where
    S: Clone + Debug,
    A: Clone + PartialEq + Debug,
    C: StateCanonicalizer<S>,
{
    pub fn new(
        domain: impl ActionEnumerator<S, A> + 'static,
        discount_factor: f64,
        canonicalizer: C,
        initialization: impl ValueInitialization<S, A> + 'static,
        learning_rate: f64,
        epsilon: f64,
    ) -> Result<Self> {
        Self::with_config(
            domain,
            canonicalizer,
            initialization,
            AgentConfig::new(discount_factor, learning_rate, epsilon),
        )
    }

    pub fn with_config(
        domain: impl ActionEnumerator<S, A> + 'static,
        canonicalizer: C,
        initialization: impl ValueInitialization<S, A> + 'static,
        config: AgentConfig,
    ) -> Result<Self> {
        config.validate()?;
        let (learning_policy, evaluation_policy) = Self::policies(&config);
        Ok(Self {
            table: QTable::new(domain, canonicalizer, initialization),
            config,
            learning_policy,
            evaluation_policy,
        })
    }

    fn policies(config: &AgentConfig) -> (EnumActionSelection, EnumActionSelection) {
        (
            EpsilonGreedy::new(config.epsilon, config.tie_break, config.seed).into(),
            Greedy::new(config.tie_break, config.seed.map(|seed| seed.wrapping_add(1))).into(),
        )
    }

    /// Replaces the hyper-parameters, keeping what was learned.
    pub fn reconfigure(&mut self, config: AgentConfig) -> Result<()> {
        config.validate()?;
        let (learning_policy, evaluation_policy) = Self::policies(&config);
        self.learning_policy = learning_policy;
        self.evaluation_policy = evaluation_policy;
        self.config = config;
        debug!(?config, "agent reconfigured");
        Ok(())
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn table(&self) -> &QTable<S, A, C> {
        &self.table
    }

    pub fn value(&mut self, state: &S) -> f64 {
        self.table.value(state)
    }

    pub fn q_values(&mut self, state: &S) -> &[QEntry<S, A>] {
        self.table.get_entries(state)
    }

    pub fn q_value(&mut self, state: &S, action: &A) -> Result<f64> {
        Ok(self.table.get_entry(state, action)?.value)
    }

    /// Action of the behavior policy in `state`.
    pub fn select_action(&mut self, state: &S) -> Result<A> {
        Self::choose(&mut self.learning_policy, &mut self.table, state)
    }

    /// Probability the behavior policy gives to each action of `state`.
    pub fn action_distribution(&mut self, state: &S) -> Vec<(A, f64)> {
        let entries = self.table.get_entries(state);
        let values: Vec<f64> = entries.iter().map(|entry| entry.value).collect();
        let probs = self.learning_policy.get_exploration_probs(&values);
        entries
            .iter()
            .zip(probs)
            .map(|(entry, p)| (entry.action.clone(), p))
            .collect()
    }

    fn choose(
        policy: &mut EnumActionSelection,
        table: &mut QTable<S, A, C>,
        state: &S,
    ) -> Result<A> {
        let entries = table.get_entries(state);
        let values: Vec<f64> = entries.iter().map(|entry| entry.value).collect();
        let index = policy
            .get_action(&values)
            .ok_or_else(|| Error::NoLegalActions {
                state: format!("{:?}", state),
            })?;
        Ok(entries[index].action.clone())
    }

    /// Same as [`LearningAgent::run_learning_episode`], recording into a
    /// caller-owned episode.
    ///
    /// `episode` must end with the environment's current observation. When a
    /// step fails the error is returned right away and `episode` keeps every
    /// transition completed before it.
    pub fn run_learning_episode_into(
        &mut self,
        env: &mut dyn Environment<S, A>,
        max_steps: Option<usize>,
        episode: &mut Episode<S, A>,
    ) -> Result<()> {
        let mut curr_state: S = env.current_observation();
        let mut steps: usize = 0;
        while !env.is_in_terminal_state() && within_budget(steps, max_steps) {
            let action: A = Self::choose(&mut self.learning_policy, &mut self.table, &curr_state)?;
            let (next_state, reward, terminated) = env.execute_action(&action)?;
            episode.record_transition_to(action.clone(), next_state.clone(), reward);

            // the target reads next_state's values before this step writes anything
            let target: f64 = qlearning_target(
                &mut self.table,
                reward,
                terminated,
                self.config.discount_factor,
                &next_state,
            );
            let temporal_difference: f64 =
                self.table.update(&curr_state, &action, target, self.config.learning_rate)?;
            trace!(step = steps, reward, temporal_difference, "q-learning update");

            curr_state = next_state;
            steps += 1;
        }
        if !env.is_in_terminal_state() {
            debug!(steps, "episode stopped by its step budget");
        }
        Ok(())
    }
}

impl<S, A, C> LearningAgent<S, A> for QLearningAgent<S, A, C>
where
    S: Clone + Debug,
    A: Clone + PartialEq + Debug,
    C: StateCanonicalizer<S>,
{
    fn run_learning_episode(
        &mut self,
        env: &mut dyn Environment<S, A>,
        max_steps: Option<usize>,
    ) -> Result<Episode<S, A>> {
        let mut episode: Episode<S, A> = Episode::new(env.current_observation());
        self.run_learning_episode_into(env, max_steps, &mut episode)?;
        debug!(
            steps = episode.max_time_step(),
            reward = episode.total_reward(),
            states = self.table.len(),
            "learning episode finished"
        );
        Ok(episode)
    }

    fn run_evaluation_episode(
        &mut self,
        env: &mut dyn Environment<S, A>,
        max_steps: Option<usize>,
    ) -> Result<Episode<S, A>> {
        let mut curr_state: S = env.current_observation();
        let mut episode: Episode<S, A> = Episode::new(curr_state.clone());
        while !env.is_in_terminal_state() && within_budget(episode.max_time_step(), max_steps) {
            let action: A =
                Self::choose(&mut self.evaluation_policy, &mut self.table, &curr_state)?;
            let (next_state, reward, _terminated) = env.execute_action(&action)?;
            episode.record_transition_to(action, next_state.clone(), reward);
            curr_state = next_state;
        }
        debug!(
            steps = episode.max_time_step(),
            reward = episode.total_reward(),
            "evaluation episode finished"
        );
        Ok(episode)
    }

    fn reset_solver(&mut self) {
        debug!(states = self.table.len(), "clearing action-value table");
        self.table.reset();
    }
}

impl<S, A, C> ValueFunction<S> for QLearningAgent<S, A, C>
where
    S: Clone + Debug,
    A: Clone + PartialEq + Debug,
    C: StateCanonicalizer<S>,
{
    fn value(&mut self, state: &S) -> f64 {
        self.table.value(state)
    }
}
