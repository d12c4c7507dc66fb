use chrono::{DateTime, TimeDelta, Utc};
use geo::Point;

/// A positional measurement of the trajectory being matched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub position: Point,

    /// The heading of travel in degrees clockwise from north,
    /// if the measurement carries one.
    pub azimuth: Option<f64>,
}

impl Sample {
    pub fn new(time: DateTime<Utc>, position: Point) -> Self {
        Self {
            time,
            position,
            azimuth: None,
        }
    }

    pub fn with_azimuth(self, azimuth: f64) -> Self {
        Self {
            azimuth: azimuth.is_finite().then(|| azimuth.rem_euclid(360.0)),
            ..self
        }
    }

    /// The time elapsed since the `earlier` sample.
    pub fn elapsed_since(&self, earlier: &Sample) -> TimeDelta {
        self.time - earlier.time
    }
}
