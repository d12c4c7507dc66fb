use crate::graph::map::{IndexedRoad, RoadMap};
use crate::graph::{EdgeId, GraphError, Heading, NodeId, Road, Spatial};

use geo::{Line, Point};
use log::info;
use measure_time::debug_time;
use petgraph::graph::DiGraph;
use rstar::RTree;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// 50km/h, in meters per second.
pub const DEFAULT_SPEED: f64 = 50.0 / 3.6;

/// The directions of travel permitted upon a road.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// From the source to the target only.
    OneWay,
    TwoWay,
}

/// Describes a base road between two nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadSpec {
    pub id: u64,
    pub source: NodeId,
    pub target: NodeId,
    pub flow: Flow,
    pub speed: f64,
}

impl RoadSpec {
    pub fn one_way(id: u64, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            flow: Flow::OneWay,
            speed: DEFAULT_SPEED,
        }
    }

    pub fn two_way(id: u64, source: NodeId, target: NodeId) -> Self {
        Self {
            flow: Flow::TwoWay,
            ..Self::one_way(id, source, target)
        }
    }

    /// The travel speed, which must be positive and finite when built.
    pub fn with_speed(self, speed: f64) -> Self {
        Self { speed, ..self }
    }

    /// The directed roads of this base road as `(heading, edge, source, target)`.
    ///
    /// The forward road takes the edge `id * 2`, and the backward road
    /// of a two-way road takes `id * 2 + 1`.
    fn directions(&self) -> SmallVec<[(Heading, EdgeId, NodeId, NodeId); 2]> {
        let mut directions = SmallVec::new();
        directions.push((Heading::Forward, self.id * 2, self.source, self.target));

        if self.flow == Flow::TwoWay {
            directions.push((Heading::Backward, self.id * 2 + 1, self.target, self.source));
        }

        directions
    }
}

pub struct RoadMapBuilder<S> {
    spatial: S,
    nodes: FxHashMap<NodeId, Point>,
    roads: Vec<RoadSpec>,
}

impl<S> RoadMapBuilder<S>
where
    S: Spatial,
{
    pub fn new(spatial: S) -> Self {
        Self {
            spatial,
            nodes: FxHashMap::default(),
            roads: vec![],
        }
    }

    pub fn node(mut self, id: NodeId, position: Point) -> Self {
        self.nodes.insert(id, position);
        self
    }

    pub fn road(mut self, road: RoadSpec) -> Self {
        self.roads.push(road);
        self
    }

    pub fn build(self) -> Result<RoadMap<S>, GraphError> {
        debug_time!("road map build");

        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.roads.len() * 2);
        let nodes = self
            .nodes
            .iter()
            .map(|(id, position)| (*id, (graph.add_node(*id), *position)))
            .collect::<FxHashMap<_, _>>();

        let mut roads = FxHashMap::default();
        for spec in &self.roads {
            if spec.source == spec.target {
                return Err(GraphError::DegenerateRoad { road: spec.id });
            }

            if !(spec.speed.is_finite() && spec.speed > 0.0) {
                return Err(GraphError::InvalidSpeed {
                    road: spec.id,
                    speed: spec.speed,
                });
            }

            let locate = |node: NodeId| {
                nodes.get(&node).copied().ok_or(GraphError::UnknownNode {
                    road: spec.id,
                    node,
                })
            };

            let (source, start) = locate(spec.source)?;
            let (target, end) = locate(spec.target)?;

            let geometry = Line::new(start, end);
            let length = self.spatial.distance(start, end);

            for (heading, edge, from, to) in spec.directions() {
                if roads.contains_key(&edge) {
                    return Err(GraphError::DuplicateRoad { road: spec.id });
                }

                let (a, b) = match heading {
                    Heading::Forward => (source, target),
                    Heading::Backward => (target, source),
                };

                graph.add_edge(a, b, edge);
                roads.insert(
                    edge,
                    Road {
                        id: edge,
                        base: spec.id,
                        source: from,
                        target: to,
                        heading,
                        geometry,
                        length,
                        speed: spec.speed,
                    },
                );
            }
        }

        let index = RTree::bulk_load(roads.values().map(IndexedRoad::new).collect());
        info!(
            "Built road map with {} nodes and {} roads",
            nodes.len(),
            roads.len()
        );

        Ok(RoadMap {
            spatial: self.spatial,
            graph,
            nodes,
            roads,
            index,
        })
    }
}
