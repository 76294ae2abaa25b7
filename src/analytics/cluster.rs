//! Clustering: named groupings of network nodes for visualization filtering
//!
//! Every clustering is recomputed from a built network; clusters never own
//! nodes or survive a rebuild. Bounding boxes are placeholders the layout
//! layer fills in after positioning.

use crate::graph::{Network, NodeRole, PaperId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label used for papers with no publication year
pub const UNKNOWN_YEAR_LABEL: &str = "unknown";
/// Label used for papers matching no caller-supplied citation range
pub const OTHER_CITATIONS_LABEL: &str = "other";

/// Bounding box, populated only by the layout layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A named, per-dimension-disjoint grouping of nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub label: String,
    /// Member node ids, in network ranking order
    pub members: Vec<PaperId>,
    /// Layout-owned bounding box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<ClusterBounds>,
}

impl Cluster {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            members: Vec::new(),
            bounds: None,
        }
    }
}

/// A caller-supplied citation-count bucket; first matching range wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRange {
    pub min: u32,
    pub max: u32,
    pub label: String,
}

impl CitationRange {
    pub fn new(min: u32, max: u32, label: impl Into<String>) -> Self {
        Self {
            min,
            max,
            label: label.into(),
        }
    }

    fn contains(&self, count: u32) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// Cluster nodes by publication-year buckets of the given width.
///
/// A paper of year `y` lands in the bucket starting at
/// `floor(y / year_range) * year_range`, labeled `"{start}-{end}"` with an
/// inclusive end. Papers with no year go to the `"unknown"` bucket.
/// Buckets are returned ascending by start year, `"unknown"` last; only
/// buckets with members are emitted.
pub fn cluster_by_year(network: &Network, year_range: i32) -> Vec<Cluster> {
    let year_range = year_range.max(1);

    let mut buckets: HashMap<Option<i32>, Cluster> = HashMap::new();
    for node in network.ranked_nodes() {
        let key = node.paper.year.map(|year| year.div_euclid(year_range) * year_range);
        let cluster = buckets.entry(key).or_insert_with(|| match key {
            Some(start) => Cluster::new(format!("{start}-{}", start + year_range - 1)),
            None => Cluster::new(UNKNOWN_YEAR_LABEL),
        });
        cluster.members.push(node.id().clone());
    }

    let mut keyed: Vec<(Option<i32>, Cluster)> = buckets.into_iter().collect();
    keyed.sort_by_key(|(key, _)| match key {
        Some(start) => (0, *start),
        None => (1, 0),
    });
    keyed.into_iter().map(|(_, cluster)| cluster).collect()
}

/// Cluster nodes by caller-supplied citation-count ranges.
///
/// Ranges are evaluated in order and the first match wins; nodes matching
/// none land in `"other"`. Empty clusters are dropped. Output order is the
/// caller's range order, with `"other"` last.
pub fn cluster_by_citations(network: &Network, ranges: &[CitationRange]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = ranges
        .iter()
        .map(|range| Cluster::new(range.label.clone()))
        .collect();
    let mut other = Cluster::new(OTHER_CITATIONS_LABEL);

    for node in network.ranked_nodes() {
        let slot = ranges
            .iter()
            .position(|range| range.contains(node.citation_count));
        match slot {
            Some(index) => clusters[index].members.push(node.id().clone()),
            None => other.members.push(node.id().clone()),
        }
    }

    clusters.push(other);
    clusters.retain(|cluster| !cluster.members.is_empty());
    clusters
}

/// Cluster nodes by their role relative to the root.
///
/// One cluster per role present in the network, in ranking order of first
/// appearance (so the root's cluster comes first).
pub fn cluster_by_role(network: &Network) -> Vec<Cluster> {
    let mut order: Vec<NodeRole> = Vec::new();
    let mut by_role: HashMap<NodeRole, Cluster> = HashMap::new();

    for node in network.ranked_nodes() {
        if !by_role.contains_key(&node.role) {
            order.push(node.role);
            by_role.insert(node.role, Cluster::new(node.role.to_string()));
        }
        if let Some(cluster) = by_role.get_mut(&node.role) {
            cluster.members.push(node.id().clone());
        }
    }

    order
        .into_iter()
        .filter_map(|role| by_role.remove(&role))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NetworkBuilder, Paper};

    fn network_with_years(years: &[Option<i32>]) -> Network {
        let mut papers = Vec::new();
        for (index, year) in years.iter().enumerate() {
            let mut paper = Paper::new(format!("p{index}"), format!("Paper {index}"));
            if let Some(year) = year {
                paper = paper.with_year(*year);
            }
            papers.push(paper);
        }
        NetworkBuilder::new(Paper::new("root", "Root").with_year(2024))
            .search_results(papers)
            .build()
    }

    #[test]
    fn year_buckets_match_floor_semantics() {
        // Years [2019, 2021, 2024, none] with a range of 5 give
        // "2015-2019", "2020-2024" (twice), and "unknown".
        let network = network_with_years(&[Some(2019), Some(2021), Some(2024), None]);
        let clusters = cluster_by_year(&network, 5);

        let labels: Vec<&str> = clusters.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["2015-2019", "2020-2024", "unknown"]);

        let by_label: HashMap<&str, usize> = clusters
            .iter()
            .map(|c| (c.label.as_str(), c.members.len()))
            .collect();
        assert_eq!(by_label["2015-2019"], 1);
        // Root (2024) and the two 2020-2024 papers.
        assert_eq!(by_label["2020-2024"], 3);
        assert_eq!(by_label["unknown"], 1);
    }

    #[test]
    fn year_clustering_partitions_every_node() {
        let network = network_with_years(&[Some(1999), None, Some(2003)]);
        let clusters = cluster_by_year(&network, 10);
        let total: usize = clusters.iter().map(|c| c.members.len()).sum();
        assert_eq!(total, network.node_count());
    }

    #[test]
    fn citation_ranges_use_first_match_and_drop_empty() {
        let network = NetworkBuilder::new(Paper::new("root", "Root").with_citation_count(500))
            .search_results([
                Paper::new("a", "A").with_citation_count(5),
                Paper::new("b", "B").with_citation_count(50),
            ])
            .build();

        let ranges = vec![
            CitationRange::new(0, 9, "low"),
            CitationRange::new(0, 99, "overlapping"),
            CitationRange::new(1000, 2000, "never-matches"),
        ];
        let clusters = cluster_by_citations(&network, &ranges);

        let labels: Vec<&str> = clusters.iter().map(|c| c.label.as_str()).collect();
        // "a" hits "low" before "overlapping"; the root falls through to
        // "other"; "never-matches" is dropped as empty.
        assert_eq!(labels, vec!["low", "overlapping", "other"]);
        assert_eq!(clusters[0].members, vec![PaperId::from("a")]);
        assert_eq!(clusters[1].members, vec![PaperId::from("b")]);
        assert_eq!(clusters[2].members, vec![PaperId::from("root")]);
    }

    #[test]
    fn role_clusters_start_with_root() {
        let network = NetworkBuilder::new(Paper::new("root", "Root"))
            .search_results([Paper::new("a", "A"), Paper::new("b", "B")])
            .referenced_papers([Paper::new("b", "B"), Paper::new("c", "C")])
            .build();

        let clusters = cluster_by_role(&network);
        assert_eq!(clusters[0].label, "root");

        let labels: std::collections::HashSet<&str> =
            clusters.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels.len(), 4);
        assert!(labels.contains("citing"));
        assert!(labels.contains("referenced"));
        assert!(labels.contains("both"));
    }
}
