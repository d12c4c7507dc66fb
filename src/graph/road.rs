use crate::graph::Spatial;

use geo::{Line, Point};

pub type EdgeId = u64;
pub type NodeId = u64;

/// The direction of travel of a road, relative to its base geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Forward,
    Backward,
}

/// A directed edge of the road network.
///
/// Every road is a travel direction over a base geometry, a two-way
/// street is therefore represented by two roads which share the same
/// `base`, one of each [`Heading`]. The `source` and `target` are the
/// nodes in the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Road {
    pub id: EdgeId,
    pub base: u64,
    pub source: NodeId,
    pub target: NodeId,
    pub heading: Heading,

    /// The base geometry, from the start to the end of the base road.
    pub geometry: Line,
    pub length: f64,

    /// Speed of travel, in distance units per second.
    pub speed: f64,
}

impl Road {
    /// Converts a fraction along the base geometry into the fraction
    /// travelled along this road.
    #[inline]
    pub fn travel_fraction(&self, fraction: f64) -> f64 {
        match self.heading {
            Heading::Forward => fraction,
            Heading::Backward => 1.0 - fraction,
        }
    }

    /// The position at the `fraction` along the base geometry.
    #[inline]
    pub fn position(&self, fraction: f64) -> Point {
        (self.geometry.start + self.geometry.delta() * fraction).into()
    }
}

/// A position upon a [`Road`], and a candidate state of the matcher.
///
/// Two points describe the same state slot if they lie upon the same
/// edge, see [`RoadPoint::edge`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadPoint {
    pub road: Road,

    /// Fraction along the base geometry, within `[0, 1]`.
    pub fraction: f64,
    pub position: Point,

    /// The azimuth of travel at this point.
    pub azimuth: f64,
}

impl RoadPoint {
    pub fn on(road: Road, fraction: f64, spatial: &impl Spatial) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        let forward = spatial.azimuth(road.geometry.start.into(), road.geometry.end.into());

        let azimuth = match road.heading {
            Heading::Forward => forward,
            Heading::Backward => (forward + 180.0).rem_euclid(360.0),
        };

        Self {
            road,
            fraction,
            position: road.position(fraction),
            azimuth,
        }
    }

    #[inline]
    pub fn edge(&self) -> EdgeId {
        self.road.id
    }

    /// The fraction of the road already travelled upon reaching this point.
    #[inline]
    pub fn travel_fraction(&self) -> f64 {
        self.road.travel_fraction(self.fraction)
    }
}
