//! Tree: a leveled parent/children view derived from a network's edges
//!
//! Level 0 is the root; level k+1 holds the nodes adjacent (either edge
//! direction) to a level-k node that are not already assigned to a lower
//! level. First assignment wins, so the layering is a BFS, and every level
//! beyond the root records which node discovered it.

use crate::graph::{Edge, Network, Paper, PaperId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A paper's place in the tree: its discovering parent and the children it
/// discovered, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// `None` only for the root
    #[serde(default)]
    pub parent: Option<PaperId>,
    #[serde(default)]
    pub children: Vec<PaperId>,
}

/// Derived, read-only hierarchy over a network.
///
/// Levels partition exactly the nodes reachable from the root; unreachable
/// nodes simply do not appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    /// Papers by depth; `levels[0]` holds only the root
    pub levels: Vec<Vec<Paper>>,
    /// Parent/children mapping for every paper in `levels`
    pub relationships: HashMap<PaperId, Relationship>,
}

impl Tree {
    /// Derive a tree from a root paper, the papers it may reach, and the
    /// network's edges.
    ///
    /// Returns `None` only when the root is absent from `papers`; an
    /// edgeless input still yields a single-level tree holding the root.
    pub fn build(root: &Paper, papers: &[Paper], edges: &[Edge]) -> Option<Tree> {
        let by_id: HashMap<&PaperId, &Paper> =
            papers.iter().map(|paper| (&paper.id, paper)).collect();
        by_id.get(&root.id)?;

        // Undirected adjacency in edge insertion order.
        let mut adjacency: HashMap<&PaperId, Vec<&PaperId>> = HashMap::new();
        for edge in edges {
            adjacency.entry(&edge.source).or_default().push(&edge.target);
            adjacency.entry(&edge.target).or_default().push(&edge.source);
        }

        let mut relationships: HashMap<PaperId, Relationship> = HashMap::new();
        relationships.insert(root.id.clone(), Relationship::default());

        let mut levels: Vec<Vec<Paper>> = vec![vec![root.clone()]];
        let mut current: Vec<PaperId> = vec![root.id.clone()];

        while !current.is_empty() {
            let mut next: Vec<PaperId> = Vec::new();
            let mut level_papers: Vec<Paper> = Vec::new();

            for parent_id in &current {
                let Some(neighbors) = adjacency.get(parent_id) else {
                    continue;
                };
                for &neighbor_id in neighbors {
                    if relationships.contains_key(neighbor_id) {
                        continue;
                    }
                    let Some(&paper) = by_id.get(neighbor_id) else {
                        continue;
                    };
                    relationships.insert(
                        neighbor_id.clone(),
                        Relationship {
                            parent: Some(parent_id.clone()),
                            children: Vec::new(),
                        },
                    );
                    if let Some(parent) = relationships.get_mut(parent_id) {
                        parent.children.push(neighbor_id.clone());
                    }
                    next.push(neighbor_id.clone());
                    level_papers.push(paper.clone());
                }
            }

            if !level_papers.is_empty() {
                levels.push(level_papers);
            }
            current = next;
        }

        Some(Tree {
            levels,
            relationships,
        })
    }

    /// Derive a tree directly from a built network, using its ranking for
    /// a deterministic paper order.
    pub fn from_network(network: &Network) -> Option<Tree> {
        let papers: Vec<Paper> = network
            .ranked_nodes()
            .map(|node| node.paper.clone())
            .collect();
        Tree::build(&network.root_node().paper, &papers, &network.edges)
    }

    /// Number of levels (root-only trees have depth 1)
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// The level a paper was assigned to, if it is in the tree
    pub fn level_of(&self, id: &PaperId) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.iter().any(|paper| &paper.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, NetworkBuilder};

    fn paper(id: &str) -> Paper {
        Paper::new(id, format!("Paper {id}"))
    }

    fn edge(source: &str, target: &str) -> Edge {
        Edge::new(source.into(), target.into(), EdgeKind::Cites, 0.5)
    }

    #[test]
    fn missing_root_yields_none() {
        let tree = Tree::build(&paper("root"), &[paper("a")], &[]);
        assert!(tree.is_none());
    }

    #[test]
    fn edgeless_input_yields_single_level_tree() {
        let tree = Tree::build(&paper("root"), &[paper("root"), paper("a")], &[]).unwrap();
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.levels[0].len(), 1);
        assert_eq!(tree.levels[0][0].id, "root".into());
        // Unreachable nodes do not appear.
        assert!(tree.level_of(&"a".into()).is_none());
    }

    #[test]
    fn bfs_layering_assigns_each_node_once() {
        // root - a - c, root - b, b - c: c is discovered at level 2 via a
        // (first assignment wins) even though b also links to it.
        let papers = vec![paper("root"), paper("a"), paper("b"), paper("c")];
        let edges = vec![
            edge("a", "root"),
            edge("b", "root"),
            edge("c", "a"),
            edge("c", "b"),
        ];
        let tree = Tree::build(&paper("root"), &papers, &edges).unwrap();

        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.level_of(&"a".into()), Some(1));
        assert_eq!(tree.level_of(&"b".into()), Some(1));
        assert_eq!(tree.level_of(&"c".into()), Some(2));

        let seen: usize = tree.levels.iter().map(Vec::len).sum();
        assert_eq!(seen, 4);

        // c's parent is a, the node that discovered it.
        assert_eq!(
            tree.relationships[&PaperId::from("c")].parent,
            Some(PaperId::from("a"))
        );
        assert_eq!(
            tree.relationships[&PaperId::from("a")].children,
            vec![PaperId::from("c")]
        );
        assert!(tree.relationships[&PaperId::from("b")].children.is_empty());
    }

    #[test]
    fn child_level_is_parent_level_plus_one() {
        let papers = vec![paper("root"), paper("a"), paper("b"), paper("c")];
        let edges = vec![edge("a", "root"), edge("b", "a"), edge("c", "b")];
        let tree = Tree::build(&paper("root"), &papers, &edges).unwrap();

        for (id, relationship) in &tree.relationships {
            if let Some(parent) = &relationship.parent {
                assert_eq!(
                    tree.level_of(id).unwrap(),
                    tree.level_of(parent).unwrap() + 1
                );
            }
        }
    }

    #[test]
    fn from_network_builds_depth_two_for_base_networks() {
        let network = NetworkBuilder::new(paper("root"))
            .search_results([paper("a"), paper("b")])
            .build();
        let tree = Tree::from_network(&network).unwrap();

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.levels[1].len(), 2);
        assert_eq!(
            tree.relationships[&PaperId::from("a")].parent,
            Some(PaperId::from("root"))
        );
    }
}
