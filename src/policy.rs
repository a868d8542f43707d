mod tabular_policy;
mod value_initialization;

pub use tabular_policy::{QEntry, QTable};
pub use value_initialization::{ConstantValueInitialization, ValueInitialization};

/// Anything able to estimate the value of a state.
///
/// The learning loop only needs this capability to bootstrap its targets, so
/// another estimator could take the table's place without touching the loop.
/// It takes `&mut self` because tabular estimators create entries on demand.
pub trait ValueFunction<S> {
    fn value(&mut self, state: &S) -> f64;
}
