use crate::graph::{Cost, Road, RoadPoint};

use rustc_hash::FxHashMap;

pub trait Route {
    /// Finds the cheapest path, under `cost`, from the `source` to every
    /// one of the `targets`.
    ///
    /// The search is bounded, a path whose `bound` cost exceeds the
    /// `limit` is not explored further. The result is keyed by the index
    /// of the target, and holds the roads of the path in the order of
    /// travel. Unreachable targets are omitted.
    fn route(
        &self,
        source: &RoadPoint,
        targets: &[RoadPoint],
        cost: Cost,
        bound: Cost,
        limit: f64,
    ) -> FxHashMap<usize, Vec<Road>>;
}
