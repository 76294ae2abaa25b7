//! Core citation-graph data structures

mod builder;
mod edge;
mod network;
mod node;
mod paper;

pub use builder::{NetworkBuilder, SortAlgorithm, WeightingMode};
pub use edge::{Edge, EdgeId, EdgeKind, EdgeProvenance};
pub use network::{GraphError, GraphResult, Network, NetworkStats};
pub use node::{Node, NodeRole, Position};
pub use paper::{Paper, PaperId, UserInputs};
