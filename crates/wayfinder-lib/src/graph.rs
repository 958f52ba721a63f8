use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::model::{BuildingData, NodeId, PathNode};

/// Fixed cost charged for moving between floors through an elevator or stairwell.
///
/// Deliberately larger than a short corridor hop so the search stays on one
/// floor unless changing floors actually shortens the route.
pub const TRANSITION_PENALTY: f64 = 20.0;

/// Classification for the edge used in the routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeKind {
    /// Same-floor connection weighted by Euclidean distance.
    Corridor,
    /// Floor change weighted by the transition penalty.
    Transition,
}

/// Edge within the routing graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub kind: EdgeKind,
    pub weight: f64,
}

/// Options controlling graph construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphBuildOptions {
    pub transition_penalty: f64,
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            transition_penalty: TRANSITION_PENALTY,
        }
    }
}

/// Weighted undirected graph over every floor's path nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
}

impl Graph {
    /// Build a graph directly from an adjacency map.
    pub fn from_parts(adjacency: HashMap<NodeId, Vec<Edge>>) -> Self {
        Self {
            adjacency: Arc::new(adjacency),
        }
    }

    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, node: &str) -> &[Edge] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges; each undirected link counts twice.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Cheapest edge joining `from` to `to`, if any.
    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.target == to)
            .min_by(|a, b| compare_weight(a.weight, b.weight))
    }

    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.edge(from, to).map(|edge| edge.weight)
    }

    /// Sum of the cheapest edge weights along `steps`, or `None` when two
    /// consecutive steps are not adjacent.
    pub fn route_weight(&self, steps: &[NodeId]) -> Option<f64> {
        steps
            .windows(2)
            .map(|pair| self.edge_weight(&pair[0], &pair[1]))
            .sum()
    }
}

/// Build the routing graph with the default transition penalty.
pub fn build_graph(building: &BuildingData) -> Graph {
    build_graph_with(building, &GraphBuildOptions::default())
}

/// Build the routing graph for every floor of `building`.
///
/// Corridor edges are inserted in both directions whichever endpoint declared
/// them. Transition edges join a flagged node to its counterpart in both
/// directions. References to unknown nodes are skipped.
pub fn build_graph_with(building: &BuildingData, options: &GraphBuildOptions) -> Graph {
    let nodes: HashMap<&str, &PathNode> = building
        .nodes()
        .map(|node| (node.id.as_str(), node))
        .collect();

    let mut adjacency: HashMap<NodeId, Vec<Edge>> = nodes
        .keys()
        .map(|id| (id.to_string(), Vec::new()))
        .collect();
    let mut skipped = 0usize;

    for node in building.nodes() {
        for neighbour_id in &node.connections {
            let Some(neighbour) = nodes.get(neighbour_id.as_str()) else {
                debug!(node = %node.id, target = %neighbour_id, "skipping dangling connection");
                skipped += 1;
                continue;
            };
            let weight = node.position.planar_distance_to(&neighbour.position);
            insert_undirected(&mut adjacency, &node.id, neighbour_id, EdgeKind::Corridor, weight);
        }

        if let Some(target_id) = node.transition_target() {
            if nodes.contains_key(target_id) {
                insert_undirected(
                    &mut adjacency,
                    &node.id,
                    target_id,
                    EdgeKind::Transition,
                    options.transition_penalty,
                );
            } else {
                debug!(node = %node.id, target = %target_id, "skipping dangling transition");
                skipped += 1;
            }
        }
    }

    let graph = Graph::from_parts(adjacency);
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        skipped,
        "built routing graph"
    );
    graph
}

fn insert_undirected(
    adjacency: &mut HashMap<NodeId, Vec<Edge>>,
    a: &str,
    b: &str,
    kind: EdgeKind,
    weight: f64,
) {
    insert_directed(adjacency, a, b, kind, weight);
    insert_directed(adjacency, b, a, kind, weight);
}

fn insert_directed(
    adjacency: &mut HashMap<NodeId, Vec<Edge>>,
    from: &str,
    to: &str,
    kind: EdgeKind,
    weight: f64,
) {
    let entry = adjacency.entry(from.to_string()).or_default();
    if let Some(existing) = entry
        .iter_mut()
        .find(|existing| existing.target == to && existing.kind == kind)
    {
        if weight < existing.weight {
            existing.weight = weight;
        }
        return;
    }
    entry.push(Edge {
        target: to.to_string(),
        kind,
        weight,
    });
}

fn compare_weight(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Greater)
}
