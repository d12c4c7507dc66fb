use crate::graph::primitives::{Dijkstra, DijkstraReachable};
use crate::graph::{Cost, EdgeId, Road, RoadMap, RoadPoint, Route, Spatial};

use log::{debug, trace};
use measure_time::debug_time;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::ops::Add;
#[cfg(feature = "tracing")]
use tracing::Level;

/// A node of the search, which is the remainder of the source road,
/// or the full length of a road.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Entry {
    Source,
    Road(EdgeId),
}

/// The accumulated cost of a path, with its bounding length.
#[derive(Clone, Copy, Debug, Default)]
struct Weight {
    cost: f64,
    length: f64,
}

impl Weight {
    fn of(road: &Road, fraction: f64, cost: Cost, bound: Cost) -> Self {
        Self {
            cost: cost(road) * fraction,
            length: bound(road) * fraction,
        }
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Self) -> Self::Output {
        Weight {
            cost: self.cost + rhs.cost,
            length: self.length + rhs.length,
        }
    }
}

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weight {}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.length.total_cmp(&other.length))
    }
}

impl<S> RoadMap<S>
where
    S: Spatial,
{
    /// Walks the parents of the `edge` back to the source, returning
    /// the roads of the path in the order of travel.
    fn unwind<FN>(
        &self,
        reach: &DijkstraReachable<Entry, Weight, FN>,
        source: &RoadPoint,
        edge: EdgeId,
    ) -> Vec<Road> {
        let mut roads = vec![];
        let mut current = Entry::Road(edge);

        while let Entry::Road(id) = current {
            if let Some(road) = self.roads.get(&id) {
                roads.push(*road);
            }

            match reach.parent(&current) {
                Some(parent) => current = *parent,
                None => break,
            }
        }

        roads.push(source.road);
        roads.reverse();
        roads
    }
}

impl<S> Route for RoadMap<S>
where
    S: Spatial,
{
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip_all))]
    fn route(
        &self,
        source: &RoadPoint,
        targets: &[RoadPoint],
        cost: Cost,
        bound: Cost,
        limit: f64,
    ) -> FxHashMap<usize, Vec<Road>> {
        debug_time!("route");

        let mut routes = FxHashMap::default();
        let mut pending: FxHashMap<EdgeId, SmallVec<[usize; 2]>> = FxHashMap::default();

        for (index, target) in targets.iter().enumerate() {
            let ahead = target.travel_fraction() - source.travel_fraction();

            // Targets ahead upon the same road need no search.
            if target.edge() == source.edge() && ahead >= 0.0 {
                if bound(&source.road) * ahead <= limit {
                    routes.insert(index, vec![source.road]);
                }

                continue;
            }

            pending.entry(target.edge()).or_default().push(index);
        }

        if pending.is_empty() {
            return routes;
        }

        let mut reach = Dijkstra.reach(Entry::Source, |entry: &Entry, weight: &Weight| {
            let mut successors = SmallVec::<[(Entry, Weight); 8]>::new();
            if weight.length > limit {
                return successors;
            }

            let (road, step) = match entry {
                Entry::Source => {
                    let remaining = 1.0 - source.travel_fraction();
                    (&source.road, Weight::of(&source.road, remaining, cost, bound))
                }
                Entry::Road(id) => match self.roads.get(id) {
                    Some(road) => (road, Weight::of(road, 1.0, cost, bound)),
                    None => return successors,
                },
            };

            successors.extend(
                self.successors(road.target)
                    .map(|next| (Entry::Road(next.id), step)),
            );

            successors
        });

        while let Some(item) = reach.next() {
            let Entry::Road(edge) = item.node else {
                continue;
            };

            let Some(indices) = pending.remove(&edge) else {
                continue;
            };

            let Some(road) = self.roads.get(&edge) else {
                continue;
            };

            for index in indices {
                let fraction = targets[index].travel_fraction();
                let total = item.total_cost + Weight::of(road, fraction, cost, bound);

                if total.length > limit {
                    trace!("Target {index} exceeds the bound at {}", total.length);
                    continue;
                }

                routes.insert(index, self.unwind(&reach, source, edge));
            }

            if pending.is_empty() {
                break;
            }
        }

        debug!(
            "Routed to {} of {} targets from road {}",
            routes.len(),
            targets.len(),
            source.edge()
        );

        routes
    }
}
