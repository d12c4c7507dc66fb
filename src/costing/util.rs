pub trait Strategy<Ctx> {
    /// A calculable cost which can be any required
    /// type, so long as it is castable into a 64-bit float.
    type Cost: Into<f64>;

    /// The calculation cost you must implement
    fn calculate(&self, context: Ctx) -> Self::Cost;

    #[inline(always)]
    fn cost(&self, context: Ctx) -> f64 {
        self.calculate(context).into()
    }
}

/// The negative exponential decay of `value` with the scale `beta`.
///
/// ### Formula
/// The scalar is given by `1 / β`, such that the decay is a probability
/// density over all non-negative values.
///
/// ```math
/// decay(value) = (1 / β) * e^(-1 * value / β)
/// ```
#[inline]
pub fn decay(value: f64, beta: f64) -> f64 {
    (1.0 / beta) * (-1.0 * value / beta).exp()
}

/// The normal (gaussian) density at `value`, given a precomputed
/// variance and normalising denominator `sqrt(2πσ²)`.
#[inline]
pub fn gaussian(value: f64, variance: f64, denominator: f64) -> f64 {
    (1.0 / denominator) * (-1.0 * value / (2.0 * variance)).exp()
}

/// The smallest angle between two azimuths, in degrees within `[0, 180]`.
#[inline]
pub fn azimuth_delta(a: f64, b: f64) -> f64 {
    let delta = (a - b).abs().rem_euclid(360.0);
    delta.min(360.0 - delta)
}
