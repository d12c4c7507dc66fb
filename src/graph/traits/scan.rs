use crate::graph::RoadPoint;

use geo::Point;

/// Finds the roads around a position.
pub trait Scan {
    /// Returns the projections of `point` onto every road within the
    /// `radius` of it, closest first, keeping at most `max` of them.
    ///
    /// ### Note
    /// Every road within the radius yields exactly one point, its
    /// closest point to the origin. Two-way roads therefore yield a
    /// point for each direction of travel.
    fn radius(&self, point: &Point, radius: f64, max: usize) -> Vec<RoadPoint>;
}
