use crate::graph::{RoadMap, RoadPoint, Scan, Spatial};

use geo::{LineLocatePoint, Point};
use itertools::Itertools;
use log::trace;
use measure_time::debug_time;
use rstar::AABB;
use std::f64::consts::SQRT_2;
#[cfg(feature = "tracing")]
use tracing::Level;

impl<S> RoadMap<S>
where
    S: Spatial,
{
    /// The square envelope around `point` which contains the
    /// circle of the `radius`.
    fn envelope(&self, point: &Point, radius: f64) -> AABB<[f64; 2]> {
        let bottom_right = self.spatial.destination(*point, 135.0, radius * SQRT_2);
        let top_left = self.spatial.destination(*point, 315.0, radius * SQRT_2);

        AABB::from_corners(
            [top_left.x(), top_left.y()],
            [bottom_right.x(), bottom_right.y()],
        )
    }
}

impl<S> Scan for RoadMap<S>
where
    S: Spatial,
{
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    fn radius(&self, point: &Point, radius: f64, max: usize) -> Vec<RoadPoint> {
        debug_time!("radius scan");

        let envelope = self.envelope(point, radius);
        let points = self
            .index
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|indexed| self.roads.get(&indexed.id))
            .filter_map(|road| {
                // Locate the point upon the road, and project that
                // fraction back upon it to obtain its closest point.
                let fraction = road.geometry.line_locate_point(point)?;
                fraction
                    .is_finite()
                    .then(|| RoadPoint::on(*road, fraction, &self.spatial))
            })
            .map(|candidate| (self.spatial.distance(*point, candidate.position), candidate))
            .filter(|(distance, _)| *distance <= radius)
            .sorted_by(|(a, left), (b, right)| {
                a.total_cmp(b).then_with(|| left.edge().cmp(&right.edge()))
            })
            .take(max)
            .map(|(_, candidate)| candidate)
            .collect::<Vec<_>>();

        trace!("Found {} roads within {radius} of {point:?}", points.len());
        points
    }
}
