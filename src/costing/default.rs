pub mod emission {
    use crate::costing::*;
    use crate::matching::ConfigError;
    use std::f64::consts::PI;

    /// 5 meters, the standard deviation of the positional error.
    pub const DEFAULT_SIGMA: f64 = 5.0;

    /// 10 degrees, the standard deviation of the heading error.
    pub const DEFAULT_SIGMA_AZIMUTH: f64 = 10.0;

    // Lower bound of the heading term, so a wrong heading alone
    // never rules out a candidate.
    const AZIMUTH_FLOOR: f64 = 1e-2;

    /// Calculates the emission probability of a candidate relative
    /// to its sample.
    ///
    /// ## Calculation
    ///
    /// The positional error is taken to be normally distributed with
    /// the standard deviation `σ`. If the sample carries a heading, the
    /// density is scaled by the heading term, using the variance `σA²`
    /// of the heading error. The heading term is floored at `0.01`.
    ///
    /// ```math
    /// distance(d) = e^(-d² / 2σ²) / sqrt(2πσ²)
    /// heading(Δ)  = max(0.01, e^(-Δ / 2σA²) / sqrt(2πσA²))
    ///
    /// emission(d, Δ) = distance(d) * heading(Δ)
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct DefaultEmissionCost {
        variance: f64,
        denominator: f64,
        azimuth_variance: f64,
        azimuth_denominator: f64,
    }

    impl DefaultEmissionCost {
        /// Both deviations must be positive and finite.
        pub fn new(sigma: f64, sigma_azimuth: f64) -> Result<Self, ConfigError> {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(ConfigError::InvalidSigma(sigma));
            }

            if !(sigma_azimuth.is_finite() && sigma_azimuth > 0.0) {
                return Err(ConfigError::InvalidAzimuthSigma(sigma_azimuth));
            }

            Ok(Self::precompute(sigma, sigma_azimuth))
        }

        fn precompute(sigma: f64, sigma_azimuth: f64) -> Self {
            let variance = sigma.powi(2);
            let azimuth_variance = sigma_azimuth.powi(2);

            Self {
                variance,
                denominator: (2.0 * PI * variance).sqrt(),
                azimuth_variance,
                azimuth_denominator: (2.0 * PI * azimuth_variance).sqrt(),
            }
        }

        pub fn sigma(&self) -> f64 {
            self.variance.sqrt()
        }
    }

    impl Default for DefaultEmissionCost {
        fn default() -> Self {
            Self::precompute(DEFAULT_SIGMA, DEFAULT_SIGMA_AZIMUTH)
        }
    }

    impl Strategy<EmissionContext> for DefaultEmissionCost {
        type Cost = f64;

        fn calculate(&self, context: EmissionContext) -> Self::Cost {
            let emission = gaussian(
                context.distance.powi(2),
                self.variance,
                self.denominator,
            );

            match context.azimuth_delta {
                Some(delta) => {
                    let heading = gaussian(delta, self.azimuth_variance, self.azimuth_denominator);
                    emission * heading.max(AZIMUTH_FLOOR)
                }
                None => emission,
            }
        }
    }
}

pub mod transition {
    use crate::costing::*;
    use crate::matching::ConfigError;

    /// Calculates the transition probability between two candidates.
    ///
    /// # Calculation
    ///
    /// The detour of a trip is the cost it takes beyond the base
    /// expectation, and is never negative. Trips which are no costlier
    /// than the base are therefore equally likely, which avoids
    /// favouring u-turns over routes that move forward.
    ///
    /// ```math
    /// detour(trip) = max(0, cost(trip) - base)
    /// transition(trip) = (1 / β) * e^(-detour(trip) / β)
    /// ```
    ///
    /// ## Scale
    /// With a non-zero `λ`, the scale is fixed at `β = 1 / λ`. Otherwise
    /// it adapts to the time elapsed between the samples, such that
    /// longer gaps tolerate longer detours.
    ///
    /// ```math
    /// β = 2 * max(1, Δt[ms]) / 1000
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct DefaultTransitionCost {
        lambda: f64,
    }

    impl DefaultTransitionCost {
        /// A `lambda` of zero selects the adaptive scale. Negative or
        /// non-finite rates are rejected.
        pub fn new(lambda: f64) -> Result<Self, ConfigError> {
            if !(lambda.is_finite() && lambda >= 0.0) {
                return Err(ConfigError::InvalidLambda(lambda));
            }

            Ok(Self { lambda })
        }

        pub fn lambda(&self) -> f64 {
            self.lambda
        }

        pub fn beta(&self, context: &TransitionContext) -> f64 {
            if self.lambda == 0.0 {
                let elapsed = context.elapsed.num_milliseconds() as f64;
                2.0 * elapsed.max(1.0) / 1000.0
            } else {
                1.0 / self.lambda
            }
        }
    }

    impl Default for DefaultTransitionCost {
        fn default() -> Self {
            Self { lambda: 0.0 }
        }
    }

    impl Strategy<TransitionContext> for DefaultTransitionCost {
        type Cost = f64;

        fn calculate(&self, context: TransitionContext) -> Self::Cost {
            decay(context.detour(), self.beta(&context))
        }
    }
}

pub mod costing {
    use super::{DefaultEmissionCost, DefaultTransitionCost};
    use crate::costing::*;

    #[derive(Clone, Copy, Debug)]
    pub struct CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        emission: E,
        transition: T,
    }

    impl<E, T> CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        pub fn new(emission: E, transition: T) -> Self {
            Self {
                emission,
                transition,
            }
        }

        #[inline(always)]
        pub fn emission(&self, context: EmissionContext) -> f64 {
            self.emission.cost(context)
        }

        #[inline(always)]
        pub fn transition(&self, context: TransitionContext) -> f64 {
            self.transition.cost(context)
        }
    }

    impl Default for CostingStrategies<DefaultEmissionCost, DefaultTransitionCost> {
        fn default() -> Self {
            CostingStrategies::new(DefaultEmissionCost::default(), DefaultTransitionCost::default())
        }
    }
}

#[doc(inline)]
pub use costing::*;
#[doc(inline)]
pub use emission::*;
#[doc(inline)]
pub use transition::*;
