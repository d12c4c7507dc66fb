//! An in-memory road network.
//!
//! The [`RoadMap`] holds every directed road of the network, indexed
//! spatially for the [`Scan`](crate::graph::Scan) and topologically
//! for the [`Route`](crate::graph::Route) implementations.
//!
//! ```rust
//! use waymark::graph::{Planar, RoadMap, RoadSpec};
//! use geo::point;
//!
//! let map = RoadMap::builder(Planar)
//!     .node(1, point! { x: 0.0, y: 0.0 })
//!     .node(2, point! { x: 100.0, y: 0.0 })
//!     .road(RoadSpec::two_way(1, 1, 2))
//!     .build()
//!     .expect("valid network");
//!
//! // A two-way road yields a road for each direction
//! assert_eq!(map.len(), 2);
//! ```
use crate::graph::{EdgeId, Geodetic, NodeId, Road, Spatial};

use geo::Point;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rstar::{RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

#[doc(hidden)]
pub mod builder;
#[doc(hidden)]
pub mod error;
mod proximity;
mod route;


#[doc(inline)]
pub use builder::*;
#[doc(inline)]
pub use error::*;

/// The spatial index entry of a road.
#[derive(Clone, Copy, Debug)]
pub(crate) struct IndexedRoad {
    pub(crate) id: EdgeId,
    envelope: AABB<[f64; 2]>,
}

impl IndexedRoad {
    fn new(road: &Road) -> Self {
        let start = road.geometry.start;
        let end = road.geometry.end;

        Self {
            id: road.id,
            envelope: AABB::from_corners([start.x, start.y], [end.x, end.y]),
        }
    }
}

impl RTreeObject for IndexedRoad {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// A directed road network over the coordinate space `S`.
pub struct RoadMap<S = Geodetic> {
    pub(crate) spatial: S,

    pub(crate) graph: DiGraph<NodeId, EdgeId>,
    pub(crate) nodes: FxHashMap<NodeId, (NodeIndex, Point)>,
    pub(crate) roads: FxHashMap<EdgeId, Road>,

    pub(crate) index: RTree<IndexedRoad>,
}

impl<S> RoadMap<S>
where
    S: Spatial,
{
    pub fn builder(spatial: S) -> RoadMapBuilder<S> {
        RoadMapBuilder::new(spatial)
    }

    pub fn spatial(&self) -> &S {
        &self.spatial
    }

    pub fn road(&self, id: EdgeId) -> Option<&Road> {
        self.roads.get(&id)
    }

    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    pub fn node(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(&id).map(|(_, position)| *position)
    }

    /// The number of directed roads.
    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    /// Every road which leaves the `node`.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = &Road> {
        self.nodes
            .get(&node)
            .into_iter()
            .flat_map(|(index, _)| self.graph.edges_directed(*index, Direction::Outgoing))
            .filter_map(|edge| self.roads.get(edge.weight()))
    }
}
