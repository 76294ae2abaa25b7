//! Citenet: citation network construction for academic papers
//!
//! Builds an explorable citation network around a single root paper:
//! search phrases are derived from user input, related papers are fetched
//! through an asynchronous job provider, and the results are assembled
//! into a scored graph plus a leveled tree for visualization.
//!
//! # Core Concepts
//!
//! - **Network**: root-centered citation graph with weighted, ranked nodes
//! - **Tree**: BFS-leveled parent/children view derived from the network
//! - **Analytics**: clustering and path finding over a built network
//!
//! # Example
//!
//! ```
//! use citenet::{NetworkBuilder, Paper};
//!
//! let network = NetworkBuilder::new(Paper::new("root", "Root Paper")).build();
//! assert_eq!(network.node_count(), 1);
//! ```

pub mod analytics;
mod graph;
pub mod pipeline;
pub mod search;
pub mod tree;

pub use graph::{
    Edge, EdgeId, EdgeKind, EdgeProvenance, GraphError, GraphResult, Network, NetworkBuilder,
    NetworkStats, Node, NodeRole, Paper, PaperId, Position, SortAlgorithm, UserInputs,
    WeightingMode,
};
pub use pipeline::{BuildOptions, BuildOutcome, CitationNetworkService, PipelineError};
pub use search::{
    CancellationToken, JobClient, JobOrchestrator, PaperLookup, PaperRef, PollConfig, SearchError,
    SearchFilters,
};
pub use tree::{Relationship, Tree};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
