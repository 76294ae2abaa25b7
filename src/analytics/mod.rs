//! Read-only transforms over an already-built network, consumed by the
//! visualization client for filtering and selection

mod cluster;
mod path;

pub use cluster::{
    cluster_by_citations, cluster_by_role, cluster_by_year, CitationRange, Cluster,
    ClusterBounds, OTHER_CITATIONS_LABEL, UNKNOWN_YEAR_LABEL,
};
pub use path::{all_paths, connected_component, shortest_path};
