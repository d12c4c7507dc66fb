use crate::costing::{azimuth_delta, Strategy};

pub trait EmissionStrategy: Strategy<EmissionContext> {}
impl<T> EmissionStrategy for T where T: Strategy<EmissionContext> {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmissionContext {
    /// The distance between the sample and the candidate position,
    /// in the units of the spatial operator (meters for geodetic maps).
    pub distance: f64,

    /// The smallest angle between the heading of the sample and the
    /// direction of travel of the candidate, if the sample has a heading.
    pub azimuth_delta: Option<f64>,
}

impl EmissionContext {
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            azimuth_delta: None,
        }
    }

    /// Applies the heading of the sample, if any, against the azimuth
    /// of the candidate.
    pub fn with_azimuths(self, sample: Option<f64>, candidate: f64) -> Self {
        Self {
            azimuth_delta: sample.map(|sample| azimuth_delta(sample, candidate)),
            ..self
        }
    }
}
