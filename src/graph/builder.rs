//! NetworkBuilder: merge root, search results, and referenced papers into
//! a scored, deterministically ordered citation network

use super::edge::{Edge, EdgeKind, EdgeProvenance};
use super::network::Network;
use super::node::{Node, NodeRole};
use super::paper::{Paper, PaperId, UserInputs};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// How non-root nodes are ordered in the network ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    /// By computed relevance weight
    #[default]
    Relevance,
    /// By citation count
    Citations,
    /// By publication year
    Year,
}

/// Strategy for scoring candidate papers against the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightingMode {
    /// 0.4·citations + 0.4·relevance + 0.2·year, each min-max normalized
    #[default]
    Balanced,
    /// Normalized citation count only
    Citations,
    /// Normalized year only
    Recency,
    /// Fraction of user keywords found in the paper's fields of study or title
    Keywords,
}

/// Builder for a citation network.
///
/// All input papers are merged by id: a paper appearing in both the search
/// results and the referenced list becomes a single `Both` node. Empty
/// inputs are valid and yield a root-only network.
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    root: Paper,
    search_results: Vec<Paper>,
    referenced_papers: Vec<Paper>,
    sort: SortAlgorithm,
    weighting: WeightingMode,
    user_inputs: UserInputs,
}

impl NetworkBuilder {
    /// Start a builder around the given root paper
    pub fn new(root: Paper) -> Self {
        Self {
            root,
            search_results: Vec::new(),
            referenced_papers: Vec::new(),
            sort: SortAlgorithm::default(),
            weighting: WeightingMode::default(),
            user_inputs: UserInputs::default(),
        }
    }

    /// Papers returned by the search provider, in provider order.
    /// Each is modeled as citing the root.
    pub fn search_results(mut self, papers: impl IntoIterator<Item = Paper>) -> Self {
        self.search_results = papers.into_iter().collect();
        self
    }

    /// Papers the root is known to cite
    pub fn referenced_papers(mut self, papers: impl IntoIterator<Item = Paper>) -> Self {
        self.referenced_papers = papers.into_iter().collect();
        self
    }

    /// Set the sort algorithm
    pub fn sort(mut self, sort: SortAlgorithm) -> Self {
        self.sort = sort;
        self
    }

    /// Set the weighting mode
    pub fn weighting(mut self, weighting: WeightingMode) -> Self {
        self.weighting = weighting;
        self
    }

    /// Set the user inputs consumed by keyword weighting and edge provenance
    pub fn user_inputs(mut self, inputs: UserInputs) -> Self {
        self.user_inputs = inputs;
        self
    }

    /// Build the network: merge nodes, compute weights, synthesize edges,
    /// rank, and compute stats.
    pub fn build(self) -> Network {
        let root_id = self.root.id.clone();

        // Merge non-root papers by id, first occurrence wins for the payload.
        // Membership in each list determines the role.
        let mut order: Vec<PaperId> = Vec::new();
        let mut merged: HashMap<PaperId, MergedPaper> = HashMap::new();

        for paper in &self.search_results {
            if Self::is_root_duplicate(&self.root, paper) {
                continue;
            }
            let entry = merged
                .entry(paper.id.clone())
                .or_insert_with(|| MergedPaper::remember(&mut order, paper));
            entry.cites_root = true;
        }
        for paper in &self.referenced_papers {
            if Self::is_root_duplicate(&self.root, paper) {
                continue;
            }
            let entry = merged
                .entry(paper.id.clone())
                .or_insert_with(|| MergedPaper::remember(&mut order, paper));
            entry.cited_by_root = true;
        }

        let mut network = Network::new(Node::new(self.root.clone(), NodeRole::Root));
        for id in &order {
            let entry = &merged[id];
            let role = match (entry.cites_root, entry.cited_by_root) {
                (true, true) => NodeRole::Both,
                (true, false) => NodeRole::Citing,
                (false, true) => NodeRole::Referenced,
                // Unreachable: entries are only created from one of the two lists.
                (false, false) => NodeRole::Citing,
            };
            network.add_node(Node::new(entry.paper.clone(), role));
        }

        self.assign_weights(&mut network);
        self.attach_edges(&mut network, &order, &merged);
        network.ranking = self.rank(&network, &root_id, &order);
        network.recompute_stats();
        network
    }

    /// Detect a paper that reuses the root's id. Conflicting payloads are a
    /// permissive merge: keep the root's own data and continue.
    fn is_root_duplicate(root: &Paper, paper: &Paper) -> bool {
        if paper.id != root.id {
            return false;
        }
        if paper.title != root.title {
            warn!(
                id = %root.id,
                kept = %root.title,
                dropped = %paper.title,
                "duplicate root id with conflicting payload; preferring root data"
            );
        }
        true
    }

    /// Compute and assign a weight in [0, 1] for every node
    fn assign_weights(&self, network: &mut Network) {
        let ids: Vec<PaperId> = network.nodes.keys().cloned().collect();

        let weights: HashMap<PaperId, f64> = match self.weighting {
            WeightingMode::Citations => min_max_normalize(&ids, |id| {
                Some(f64::from(network.nodes[id].citation_count))
            }),
            WeightingMode::Recency => {
                min_max_normalize(&ids, |id| network.nodes[id].paper.year.map(f64::from))
            }
            WeightingMode::Keywords => ids
                .iter()
                .map(|id| (id.clone(), keyword_fraction(&network.nodes[id].paper, &self.user_inputs)))
                .collect(),
            WeightingMode::Balanced => {
                let citations = min_max_normalize(
                    &ids,
                    |id| Some(f64::from(network.nodes[id].citation_count)),
                );
                let relevance =
                    min_max_normalize(&ids, |id| network.nodes[id].paper.relevance_score);
                let years =
                    min_max_normalize(&ids, |id| network.nodes[id].paper.year.map(f64::from));
                ids.iter()
                    .map(|id| {
                        let w = 0.4 * citations[id] + 0.4 * relevance[id] + 0.2 * years[id];
                        (id.clone(), w)
                    })
                    .collect()
            }
        };

        for (id, weight) in weights {
            if let Some(node) = network.nodes.get_mut(&id) {
                node.weight = Some(weight);
            }
        }
    }

    /// Synthesize the base edges: `p -> root` (cites) for search results,
    /// `root -> p` (references) for referenced papers. The base algorithm
    /// never links two non-root papers.
    fn attach_edges(
        &self,
        network: &mut Network,
        order: &[PaperId],
        merged: &HashMap<PaperId, MergedPaper>,
    ) {
        let root_id = network.root.clone();
        for id in order {
            let entry = &merged[id];
            let weight = network.nodes[id].weight.unwrap_or(0.0);
            let provenance = self.provenance_for(&entry.paper);
            if entry.cites_root {
                let edge = Edge::new(id.clone(), root_id.clone(), EdgeKind::Cites, weight)
                    .with_provenance(provenance.clone());
                if let Err(err) = network.add_edge(edge) {
                    warn!(%err, "skipping invalid citing edge");
                }
            }
            if entry.cited_by_root {
                let edge = Edge::new(root_id.clone(), id.clone(), EdgeKind::References, weight)
                    .with_provenance(provenance);
                if let Err(err) = network.add_edge(edge) {
                    warn!(%err, "skipping invalid reference edge");
                }
            }
        }
    }

    /// Shared-signal metadata between the root and a candidate paper
    fn provenance_for(&self, paper: &Paper) -> EdgeProvenance {
        let shared_keywords = self
            .user_inputs
            .keywords
            .iter()
            .filter(|kw| paper_mentions(paper, kw))
            .cloned()
            .collect();
        let shared_authors = self
            .root
            .authors
            .iter()
            .filter(|author| {
                paper
                    .authors
                    .iter()
                    .any(|other| other.eq_ignore_ascii_case(author))
            })
            .cloned()
            .collect();
        EdgeProvenance {
            shared_keywords,
            shared_authors,
            similarity: paper.relevance_score,
        }
    }

    /// Display order: root first, then non-root nodes by the sort key,
    /// descending, ties broken by ascending paper id.
    fn rank(&self, network: &Network, root_id: &PaperId, order: &[PaperId]) -> Vec<PaperId> {
        let mut rest: Vec<PaperId> = order.to_vec();
        rest.sort_by(|a, b| {
            let ka = self.sort_key(&network.nodes[a]);
            let kb = self.sort_key(&network.nodes[b]);
            kb.total_cmp(&ka).then_with(|| a.cmp(b))
        });

        let mut ranking = Vec::with_capacity(rest.len() + 1);
        ranking.push(root_id.clone());
        ranking.extend(rest);
        ranking
    }

    fn sort_key(&self, node: &Node) -> f64 {
        match self.sort {
            SortAlgorithm::Relevance => node.weight.unwrap_or(0.0),
            SortAlgorithm::Citations => f64::from(node.citation_count),
            SortAlgorithm::Year => node.paper.year.map(f64::from).unwrap_or(f64::NEG_INFINITY),
        }
    }
}

/// Per-id merge record built from the two input lists
#[derive(Debug, Clone)]
struct MergedPaper {
    paper: Paper,
    cites_root: bool,
    cited_by_root: bool,
}

impl MergedPaper {
    fn remember(order: &mut Vec<PaperId>, paper: &Paper) -> Self {
        order.push(paper.id.clone());
        Self {
            paper: paper.clone(),
            cites_root: false,
            cited_by_root: false,
        }
    }
}

/// Min-max normalization over the current node set.
///
/// Min and max are computed over present raw values only. When every
/// present value is equal the normalized value is 0.5 for each of them
/// (avoids divide-by-zero without biasing the sort). Nodes with no raw
/// value normalize to 0.0.
fn min_max_normalize(
    ids: &[PaperId],
    raw: impl Fn(&PaperId) -> Option<f64>,
) -> HashMap<PaperId, f64> {
    let values: Vec<(PaperId, Option<f64>)> =
        ids.iter().map(|id| (id.clone(), raw(id))).collect();

    let present: Vec<f64> = values.iter().filter_map(|(_, v)| *v).collect();
    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    values
        .into_iter()
        .map(|(id, value)| {
            let normalized = match value {
                None => 0.0,
                Some(_) if max == min => 0.5,
                Some(v) => (v - min) / (max - min),
            };
            (id, normalized)
        })
        .collect()
}

/// Fraction of the user's keywords found (case-insensitive substring) in
/// the paper's fields of study or title. Zero keywords yields 0.0.
fn keyword_fraction(paper: &Paper, inputs: &UserInputs) -> f64 {
    if inputs.keywords.is_empty() {
        return 0.0;
    }
    let hits = inputs
        .keywords
        .iter()
        .filter(|kw| paper_mentions(paper, kw))
        .count();
    hits as f64 / inputs.keywords.len() as f64
}

/// Case-insensitive substring match against title and fields of study
fn paper_mentions(paper: &Paper, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    if paper.title.to_lowercase().contains(&needle) {
        return true;
    }
    paper
        .fields_of_study
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
