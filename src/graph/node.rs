//! Node: a paper's place in a citation network

use super::paper::{Paper, PaperId};
use serde::{Deserialize, Serialize};

/// How a node relates to the root paper.
///
/// Closed variant so sort and cluster logic can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// The paper the network was built around
    Root,
    /// Reachable only via the "cites root" direction
    Citing,
    /// Reachable only via the "root cites" direction
    Referenced,
    /// Appears in both directions
    Both,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            NodeRole::Root => "root",
            NodeRole::Citing => "citing",
            NodeRole::Referenced => "referenced",
            NodeRole::Both => "both",
        };
        write!(f, "{label}")
    }
}

/// Layout position, owned exclusively by the visualization layer.
///
/// The core serializes it when present but never assigns one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node in the citation network
///
/// Node identity is the paper id; a network holds at most one node per id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// The wrapped paper
    pub paper: Paper,
    /// Relationship to the root paper
    pub role: NodeRole,
    /// Citation count copied from the paper at build time
    pub citation_count: u32,
    /// Relevance weight computed by the network builder, in [0, 1]
    #[serde(default)]
    pub weight: Option<f64>,
    /// Layout position (visualization-owned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Node {
    /// Create a node for a paper with the given role
    pub fn new(paper: Paper, role: NodeRole) -> Self {
        let citation_count = paper.citation_count;
        Self {
            paper,
            role,
            citation_count,
            weight: None,
            position: None,
        }
    }

    /// The node's identity
    pub fn id(&self) -> &PaperId {
        &self.paper.id
    }
}
