//! Cost functions of travel upon a [`Road`].
use crate::graph::Road;

/// The cost of travelling the full length of a road.
pub type Cost = fn(&Road) -> f64;

/// Costs a road by its length.
pub fn distance(road: &Road) -> f64 {
    road.length
}

/// Costs a road by its travel time, in seconds.
pub fn time(road: &Road) -> f64 {
    road.length / road.speed
}
