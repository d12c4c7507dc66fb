use crate::costing::Strategy;

use chrono::TimeDelta;

pub trait TransitionStrategy: Strategy<TransitionContext> {}
impl<T> TransitionStrategy for T where T: Strategy<TransitionContext> {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionContext {
    /// The cost of the optimal trip between the two candidates,
    /// under the cost function of the matcher.
    pub route_cost: f64,

    /// The cost the trip is expected to take at most, derived from
    /// the straight-line distance between the two samples.
    pub base: f64,

    /// The time elapsed between the two samples.
    pub elapsed: TimeDelta,
}

impl TransitionContext {
    pub fn new(route_cost: f64, base: f64, elapsed: TimeDelta) -> Self {
        Self {
            route_cost,
            base,
            elapsed,
        }
    }

    /// The cost of the trip beyond what is expected, never negative.
    pub fn detour(&self) -> f64 {
        (self.route_cost - self.base).max(0.0)
    }
}
