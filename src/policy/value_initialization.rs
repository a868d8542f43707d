/// Initial estimate of a (state, action) pair, used once at the first visit of the state.
pub trait ValueInitialization<S, A> {
    fn initial_value(&self, state: &S, action: &A) -> f64;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstantValueInitialization {
    pub value: f64,
}

impl ConstantValueInitialization {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl<S, A> ValueInitialization<S, A> for ConstantValueInitialization {
    fn initial_value(&self, _state: &S, _action: &A) -> f64 {
        self.value
    }
}

impl<S, A, F> ValueInitialization<S, A> for F
where
    F: Fn(&S, &A) -> f64,
{
    fn initial_value(&self, state: &S, action: &A) -> f64 {
        self(state, action)
    }
}
