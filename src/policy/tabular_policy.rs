use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::fmt::Debug;

use crate::env::ActionEnumerator;
use crate::error::{Error, Result};
use crate::observation::StateCanonicalizer;
use crate::utils::max;

use super::{ValueFunction, ValueInitialization};

#[derive(Debug, Clone, PartialEq)]
pub struct QEntry<S, A> {
    pub state: S,
    pub action: A,
    pub value: f64,
}

impl<S, A> QEntry<S, A> {
    pub fn new(state: S, action: A, value: f64) -> Self {
        Self {
            state,
            action,
            value,
        }
    }
}

/// Action-value table filled lazily, one state at a time.
///
/// The first time a state is seen its legal actions are enumerated and one
/// entry per action is created with the configured initial value. From then
/// on the set of actions of that state is fixed; only the values move.
pub struct QTable<S, A, C: StateCanonicalizer<S>> {
    canonicalizer: C,
    domain: Box<dyn ActionEnumerator<S, A>>,
    initialization: Box<dyn ValueInitialization<S, A>>,
    values: IndexMap<C::Key, Vec<QEntry<S, A>>, FxBuildHasher>,
}

impl<S, A, C: StateCanonicalizer<S>> Debug for QTable<S, A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QTable")
            .field("states", &self.values.len())
            .finish()
    }
}

impl<S, A, C> QTable<S, A, C>
where
    S: Clone + Debug,
    A: Clone + PartialEq + Debug,
    C: StateCanonicalizer<S>,
{
    pub fn new(
        domain: impl ActionEnumerator<S, A> + 'static,
        canonicalizer: C,
        initialization: impl ValueInitialization<S, A> + 'static,
    ) -> Self {
        Self {
            canonicalizer,
            domain: Box::new(domain),
            initialization: Box::new(initialization),
            values: IndexMap::default(),
        }
    }

    fn entries_mut(&mut self, state: &S) -> &mut Vec<QEntry<S, A>> {
        let key = self.canonicalizer.canonicalize(state);
        let domain = &self.domain;
        let initialization = &self.initialization;
        self.values.entry(key).or_insert_with(|| {
            domain
                .legal_actions(state)
                .into_iter()
                .map(|action| {
                    let value = initialization.initial_value(state, &action);
                    QEntry::new(state.clone(), action, value)
                })
                .collect()
        })
    }

    /// Entries of `state`, created on its first visit.
    pub fn get_entries(&mut self, state: &S) -> &[QEntry<S, A>] {
        self.entries_mut(state)
    }

    /// Entry of `action` in `state`.
    ///
    /// Fails with [`Error::ActionNotFound`] when the action was not among the
    /// ones enumerated at the first visit of the state.
    pub fn get_entry(&mut self, state: &S, action: &A) -> Result<&QEntry<S, A>> {
        let position = self.position(state, action)?;
        Ok(&self.entries_mut(state)[position])
    }

    fn position(&mut self, state: &S, action: &A) -> Result<usize> {
        self.entries_mut(state)
            .iter()
            .position(|entry| entry.action == *action)
            .ok_or_else(|| Error::ActionNotFound {
                state: format!("{:?}", state),
                action: format!("{:?}", action),
            })
    }

    /// Moves Q(state, action) a `learning_rate` fraction of the way to `target`.
    ///
    /// Returns the temporal difference `target - Q(state, action)` measured
    /// before the update.
    pub fn update(
        &mut self,
        state: &S,
        action: &A,
        target: f64,
        learning_rate: f64,
    ) -> Result<f64> {
        let position = self.position(state, action)?;
        let entry = &mut self.entries_mut(state)[position];
        let temporal_difference = target - entry.value;
        entry.value += learning_rate * temporal_difference;
        Ok(temporal_difference)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.values
            .contains_key(&self.canonicalizer.canonicalize(state))
    }

    /// Number of visited states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Visited states in first-visit order.
    pub fn iter(&self) -> impl Iterator<Item = (&C::Key, &[QEntry<S, A>])> {
        self.values
            .iter()
            .map(|(key, entries)| (key, entries.as_slice()))
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }
}

impl<S, A, C> ValueFunction<S> for QTable<S, A, C>
where
    S: Clone + Debug,
    A: Clone + PartialEq + Debug,
    C: StateCanonicalizer<S>,
{
    /// Greedy value of the state, 0 when it has no actions.
    fn value(&mut self, state: &S) -> f64 {
        let entries = self.get_entries(state);
        if entries.is_empty() {
            return 0.0;
        }
        max(entries.iter().map(|entry| entry.value))
    }
}
