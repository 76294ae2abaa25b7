//! Edge: a directed citation relation between two papers

use super::paper::PaperId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(Uuid);

impl EdgeId {
    /// Create a new random EdgeId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The direction-of-meaning of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Source paper cites the target
    Cites,
    /// Source paper lists the target among its references
    References,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EdgeKind::Cites => "cites",
            EdgeKind::References => "references",
        };
        write!(f, "{label}")
    }
}

/// Why this edge exists: signals shared between the two endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeProvenance {
    /// User keywords found in the non-root paper's title or fields of study
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_keywords: Vec<String>,
    /// Authors the two endpoint papers have in common
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_authors: Vec<String>,
    /// Provider similarity/relevance score, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl EdgeProvenance {
    pub fn is_empty(&self) -> bool {
        self.shared_keywords.is_empty()
            && self.shared_authors.is_empty()
            && self.similarity.is_none()
    }
}

/// A directed edge between two papers in a network.
///
/// Weight is kept in [0, 1]. Self-edges are invalid and rejected when the
/// edge is inserted into a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier
    pub id: EdgeId,
    /// Source paper
    pub source: PaperId,
    /// Target paper
    pub target: PaperId,
    /// Relation type
    pub kind: EdgeKind,
    /// Relation strength in [0, 1]
    pub weight: f64,
    /// Shared-signal metadata
    #[serde(default, skip_serializing_if = "EdgeProvenance::is_empty")]
    pub provenance: EdgeProvenance,
}

impl Edge {
    /// Create a new edge with weight clamped to [0, 1]
    pub fn new(source: PaperId, target: PaperId, kind: EdgeKind, weight: f64) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            target,
            kind,
            weight: weight.clamp(0.0, 1.0),
            provenance: EdgeProvenance::default(),
        }
    }

    /// Attach provenance metadata
    pub fn with_provenance(mut self, provenance: EdgeProvenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Whether the edge touches the given paper (either endpoint)
    pub fn touches(&self, id: &PaperId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite to `id`, if the edge touches it
    pub fn other_endpoint(&self, id: &PaperId) -> Option<&PaperId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}
