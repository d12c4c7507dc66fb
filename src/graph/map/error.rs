use crate::graph::NodeId;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("road {road} references the unknown node {node}")]
    UnknownNode { road: u64, node: NodeId },

    #[error("road {road} was added more than once")]
    DuplicateRoad { road: u64 },

    #[error("road {road} starts and ends at the same node")]
    DegenerateRoad { road: u64 },

    #[error("road {road} must have a positive and finite speed, got {speed}")]
    InvalidSpeed { road: u64, speed: f64 },
}
