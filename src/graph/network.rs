//! Network: the citation graph built around a root paper

use super::edge::Edge;
use super::node::{Node, NodeRole};
use super::paper::PaperId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised when a network invariant would be violated
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("self-edge on paper {0} is invalid")]
    SelfEdge(PaperId),

    #[error("edge endpoint {0} is not a node in this network")]
    UnknownEndpoint(PaperId),

    #[error("root paper {0} is not present in the input set")]
    RootMissing(PaperId),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Summary counts over a finished network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub citing_count: usize,
    pub referenced_count: usize,
    pub both_count: usize,
}

/// A citation network: nodes keyed by paper id, a list of directed edges,
/// and a deterministic display ranking.
///
/// Built fresh per request and never mutated after the builder's own
/// sort/stat pass. The root node is always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Id of the root paper
    pub root: PaperId,
    /// Nodes, unique per paper id
    pub nodes: HashMap<PaperId, Node>,
    /// Directed edges; every endpoint references a node in `nodes`
    pub edges: Vec<Edge>,
    /// Display order: root first, then non-root nodes in sort order
    pub ranking: Vec<PaperId>,
    /// Summary counts
    pub stats: NetworkStats,
    /// When the network was built
    pub built_at: DateTime<Utc>,
}

impl Network {
    /// Create a network seeded with its root node
    pub fn new(root_node: Node) -> Self {
        debug_assert_eq!(root_node.role, NodeRole::Root);
        let root = root_node.id().clone();
        let mut nodes = HashMap::new();
        nodes.insert(root.clone(), root_node);
        Self {
            root: root.clone(),
            nodes,
            edges: Vec::new(),
            ranking: vec![root],
            stats: NetworkStats::default(),
            built_at: Utc::now(),
        }
    }

    /// Add a node, keyed by its paper id.
    ///
    /// Inserting an id that is already present replaces the existing node.
    pub fn add_node(&mut self, node: Node) -> PaperId {
        let id = node.id().clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Add an edge, enforcing the network invariants: both endpoints must
    /// already exist as nodes and self-edges are rejected.
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if edge.source == edge.target {
            return Err(GraphError::SelfEdge(edge.source));
        }
        if !self.nodes.contains_key(&edge.source) {
            return Err(GraphError::UnknownEndpoint(edge.source));
        }
        if !self.nodes.contains_key(&edge.target) {
            return Err(GraphError::UnknownEndpoint(edge.target));
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Get a node by id
    pub fn get_node(&self, id: &PaperId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The root node
    pub fn root_node(&self) -> &Node {
        // Invariant: the root node is inserted at construction and never removed.
        &self.nodes[&self.root]
    }

    /// All nodes, in no particular order (use `ranking` for display order)
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes in display order
    pub fn ranked_nodes(&self) -> impl Iterator<Item = &Node> {
        self.ranking.iter().filter_map(|id| self.nodes.get(id))
    }

    /// All edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Recompute summary stats in a single pass over nodes and edges
    pub fn recompute_stats(&mut self) {
        let mut stats = NetworkStats {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            ..NetworkStats::default()
        };
        for node in self.nodes.values() {
            match node.role {
                NodeRole::Root => {}
                NodeRole::Citing => stats.citing_count += 1,
                NodeRole::Referenced => stats.referenced_count += 1,
                NodeRole::Both => stats.both_count += 1,
            }
        }
        self.stats = stats;
    }
}
