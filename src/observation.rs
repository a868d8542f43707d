use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

/// Maps a state to the key the Q-table stores it under.
///
/// Two states the domain considers the same must produce equal keys, for
/// any two objects carrying them. Implementations are pure and total.
pub trait StateCanonicalizer<S> {
    type Key: Hash + Eq + Clone + Debug;

    fn canonicalize(&self, state: &S) -> Self::Key;
}

/// Uses the state's own `Hash`/`Eq` as its identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCanonicalizer;

impl<S: Hash + Eq + Clone + Debug> StateCanonicalizer<S> for IdentityCanonicalizer {
    type Key = S;

    fn canonicalize(&self, state: &S) -> S {
        state.clone()
    }
}

/// Canonicalizer backed by a key-extraction function, e.g. to ignore parts of
/// a state that do not matter for the decision problem.
pub struct FnCanonicalizer<S, K, F>
where
    F: Fn(&S) -> K,
{
    func: F,
    _marker: PhantomData<fn(&S) -> K>,
}

impl<S, K, F> FnCanonicalizer<S, K, F>
where
    F: Fn(&S) -> K,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _marker: PhantomData,
        }
    }
}

impl<S, K, F> StateCanonicalizer<S> for FnCanonicalizer<S, K, F>
where
    K: Hash + Eq + Clone + Debug,
    F: Fn(&S) -> K,
{
    type Key = K;

    fn canonicalize(&self, state: &S) -> K {
        (self.func)(state)
    }
}
