use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::graph::Graph;
use crate::model::NodeId;

/// Search state left behind by [`dijkstra`].
///
/// Nodes the search never reached are absent from `distances` (infinite
/// distance) and from `predecessors` (unset link).
#[derive(Debug, Clone, Default)]
pub struct ShortestPaths {
    pub distances: HashMap<NodeId, f64>,
    pub predecessors: HashMap<NodeId, NodeId>,
    /// Number of nodes settled before the search stopped.
    pub settled: usize,
}

impl ShortestPaths {
    /// Final distance to `node`, or infinity when it was never reached.
    pub fn distance(&self, node: &str) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn predecessor(&self, node: &str) -> Option<&str> {
        self.predecessors.get(node).map(String::as_str)
    }
}

/// Run Dijkstra's algorithm from `start`, stopping as soon as `goal` is settled
/// or no reachable node remains.
///
/// Edge weights must be non-negative; a settled node is never reopened.
pub fn dijkstra(graph: &Graph, start: &str, goal: &str) -> ShortestPaths {
    let mut paths = ShortestPaths::default();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut queue = BinaryHeap::new();

    paths.distances.insert(start.to_string(), 0.0);
    queue.push(QueueEntry::new(start.to_string(), 0.0));

    while let Some(entry) = queue.pop() {
        if settled.contains(&entry.node) {
            continue;
        }
        if entry.cost.0 > paths.distance(&entry.node) {
            continue;
        }

        let current_distance = entry.cost.0;
        settled.insert(entry.node.clone());
        paths.settled += 1;

        if entry.node == goal {
            break;
        }

        for edge in graph.neighbours(&entry.node) {
            if settled.contains(&edge.target) {
                continue;
            }
            let next_cost = current_distance + edge.weight;
            if next_cost < paths.distance(&edge.target) {
                paths.distances.insert(edge.target.clone(), next_cost);
                paths
                    .predecessors
                    .insert(edge.target.clone(), entry.node.clone());
                queue.push(QueueEntry::new(edge.target.clone(), next_cost));
            }
        }
    }

    debug!(
        start,
        goal,
        settled = paths.settled,
        reached = settled.contains(goal),
        "dijkstra search finished"
    );
    paths
}

/// Walk predecessor links backwards from `goal` until a node without a
/// predecessor is reached, returning the ids in travel order.
///
/// When `goal` has no predecessor the result is just `[goal]`; callers decide
/// whether that means "already there" or "unreachable".
pub fn reconstruct_path(predecessors: &HashMap<NodeId, NodeId>, goal: &str) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        // A valid predecessor tree never yields more than len + 1 ids.
        if path.len() > predecessors.len() {
            break;
        }
        path.push(node.to_string());
        current = predecessors.get(node).map(String::as_str);
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeKind};

    fn graph(edges: &[(&str, &str, f64)]) -> Graph {
        let mut adjacency: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        for &(a, b, weight) in edges {
            for (from, to) in [(a, b), (b, a)] {
                adjacency.entry(from.to_string()).or_default().push(Edge {
                    target: to.to_string(),
                    kind: EdgeKind::Corridor,
                    weight,
                });
            }
        }
        Graph::from_parts(adjacency)
    }

    #[test]
    fn prefers_cheaper_multi_hop_path() {
        let graph = graph(&[("a", "b", 1.0), ("b", "c", 1.0), ("a", "c", 5.0)]);
        let paths = dijkstra(&graph, "a", "c");

        assert_eq!(paths.distance("c"), 2.0);
        assert_eq!(
            reconstruct_path(&paths.predecessors, "c"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn stops_once_goal_is_settled() {
        let graph = graph(&[("a", "b", 1.0), ("b", "c", 1.0), ("c", "d", 1.0), ("d", "e", 1.0)]);
        let paths = dijkstra(&graph, "a", "b");
        assert_eq!(paths.settled, 2);
        assert!(paths.distance("e").is_infinite());
    }

    #[test]
    fn unreachable_goal_keeps_infinite_distance() {
        let graph = graph(&[("a", "b", 1.0), ("x", "y", 1.0)]);
        let paths = dijkstra(&graph, "a", "y");

        assert!(paths.distance("y").is_infinite());
        assert!(paths.predecessor("y").is_none());
        assert_eq!(paths.settled, 2);
        assert_eq!(reconstruct_path(&paths.predecessors, "y"), vec!["y".to_string()]);
    }

    #[test]
    fn start_equal_to_goal_settles_immediately() {
        let graph = graph(&[("a", "b", 1.0)]);
        let paths = dijkstra(&graph, "a", "a");
        assert_eq!(paths.settled, 1);
        assert_eq!(paths.distance("a"), 0.0);
        assert!(paths.predecessors.is_empty());
    }

    #[test]
    fn zero_weight_edges_are_allowed() {
        let graph = graph(&[("a", "b", 0.0), ("b", "c", 2.0), ("a", "c", 3.0)]);
        let paths = dijkstra(&graph, "a", "c");
        assert_eq!(paths.distance("c"), 2.0);
    }

    #[test]
    fn reconstruct_path_survives_cyclic_maps() {
        let predecessors = HashMap::from([
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "a".to_string()),
        ]);
        let path = reconstruct_path(&predecessors, "a");
        assert!(path.len() <= 3);
    }
}
