use crate::graph::{costs, Cost, Road, RoadPoint};

/// The travelled path between two [`RoadPoint`]s.
///
/// Roads are held in the order of travel, starting with the road of the
/// source and ending with the road of the target. A trip upon a single
/// road holds that road once.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    source: RoadPoint,
    target: RoadPoint,
    roads: Vec<Road>,
}

impl Trip {
    pub fn new(source: RoadPoint, target: RoadPoint, roads: Vec<Road>) -> Self {
        Self {
            source,
            target,
            roads,
        }
    }

    pub fn source(&self) -> &RoadPoint {
        &self.source
    }

    pub fn target(&self) -> &RoadPoint {
        &self.target
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// The cost of the trip, accounting for the partial travel upon the
    /// roads of the source and target.
    pub fn cost(&self, cost: Cost) -> f64 {
        let source = self.source.travel_fraction();
        let target = self.target.travel_fraction();

        match self.roads.as_slice() {
            [] => 0.0,
            [road] => cost(road) * (target - source),
            [first, inner @ .., last] => {
                cost(first) * (1.0 - source)
                    + inner.iter().map(cost).sum::<f64>()
                    + cost(last) * target
            }
        }
    }

    /// The travelled distance of the trip.
    pub fn length(&self) -> f64 {
        self.cost(costs::distance)
    }
}
