//! Path finding over a citation network
//!
//! Connectivity questions from the visualization layer ("are these papers
//! linked", "show every route between them") treat the network as an
//! undirected simple graph: edge direction carries citation meaning, not
//! reachability meaning.

use crate::graph::{Network, PaperId};
use std::collections::{HashMap, HashSet, VecDeque};

/// Undirected adjacency index, neighbors in edge insertion order
struct AdjacencyIndex<'a> {
    neighbors: HashMap<&'a PaperId, Vec<&'a PaperId>>,
}

impl<'a> AdjacencyIndex<'a> {
    fn build(network: &'a Network) -> Self {
        let mut neighbors: HashMap<&PaperId, Vec<&PaperId>> = HashMap::new();
        for edge in network.edges() {
            neighbors.entry(&edge.source).or_default().push(&edge.target);
            neighbors.entry(&edge.target).or_default().push(&edge.source);
        }
        Self { neighbors }
    }

    fn of(&self, id: &PaperId) -> &[&'a PaperId] {
        self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Breadth-first shortest path between two nodes, ignoring edge direction.
///
/// Returns the node ids from `start` to `end` inclusive; `[start]` when the
/// endpoints coincide; `None` when either endpoint is missing or no path
/// exists.
pub fn shortest_path(network: &Network, start: &PaperId, end: &PaperId) -> Option<Vec<PaperId>> {
    network.get_node(start)?;
    network.get_node(end)?;
    if start == end {
        return Some(vec![start.clone()]);
    }

    let index = AdjacencyIndex::build(network);
    let mut predecessors: HashMap<&PaperId, &PaperId> = HashMap::new();
    let mut visited: HashSet<&PaperId> = HashSet::new();
    let mut queue: VecDeque<&PaperId> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &neighbor in index.of(current) {
            if !visited.insert(neighbor) {
                continue;
            }
            predecessors.insert(neighbor, current);
            if neighbor == end {
                return Some(reconstruct(&predecessors, start, end));
            }
            queue.push_back(neighbor);
        }
    }

    None
}

/// Walk the predecessor map backwards from `end` to `start`
fn reconstruct(
    predecessors: &HashMap<&PaperId, &PaperId>,
    start: &PaperId,
    end: &PaperId,
) -> Vec<PaperId> {
    let mut path = vec![end.clone()];
    let mut current = end;
    while current != start {
        // Invariant: every visited node except `start` has a predecessor.
        if let Some(&previous) = predecessors.get(current) {
            path.push(previous.clone());
            current = previous;
        } else {
            break;
        }
    }
    path.reverse();
    path
}

/// Enumerate every simple path between two nodes up to `max_depth` hops,
/// ignoring edge direction.
///
/// Paths are returned in depth-first discovery order, not sorted by
/// length. A path never revisits a node. Missing endpoints yield an empty
/// result.
pub fn all_paths(
    network: &Network,
    start: &PaperId,
    end: &PaperId,
    max_depth: usize,
) -> Vec<Vec<PaperId>> {
    if network.get_node(start).is_none() || network.get_node(end).is_none() {
        return Vec::new();
    }

    let index = AdjacencyIndex::build(network);
    let mut found: Vec<Vec<PaperId>> = Vec::new();
    let mut trail: Vec<PaperId> = vec![start.clone()];
    let mut on_trail: HashSet<PaperId> = HashSet::from([start.clone()]);

    explore(
        &index, start, end, max_depth, &mut trail, &mut on_trail, &mut found,
    );
    found
}

fn explore(
    index: &AdjacencyIndex<'_>,
    current: &PaperId,
    end: &PaperId,
    remaining: usize,
    trail: &mut Vec<PaperId>,
    on_trail: &mut HashSet<PaperId>,
    found: &mut Vec<Vec<PaperId>>,
) {
    if current == end {
        found.push(trail.clone());
        return;
    }
    if remaining == 0 {
        return;
    }
    for &neighbor in index.of(current) {
        if on_trail.contains(neighbor) {
            continue;
        }
        trail.push(neighbor.clone());
        on_trail.insert(neighbor.clone());
        explore(index, neighbor, end, remaining - 1, trail, on_trail, found);
        on_trail.remove(neighbor);
        trail.pop();
    }
}

/// The full set of nodes reachable from `id`, ignoring edge direction.
///
/// Includes `id` itself when present; empty when the node is unknown.
/// Used to answer "is this node part of the same component as the
/// selection".
pub fn connected_component(network: &Network, id: &PaperId) -> HashSet<PaperId> {
    if network.get_node(id).is_none() {
        return HashSet::new();
    }

    let index = AdjacencyIndex::build(network);
    let mut component: HashSet<PaperId> = HashSet::from([id.clone()]);
    let mut stack: Vec<&PaperId> = vec![id];

    while let Some(current) = stack.pop() {
        for &neighbor in index.of(current) {
            if component.insert(neighbor.clone()) {
                stack.push(neighbor);
            }
        }
    }

    component
}
