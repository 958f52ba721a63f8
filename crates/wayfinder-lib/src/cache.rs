//! Reuse built graphs across requests while the building is unchanged.
//!
//! The cache key is a SHA-256 fingerprint of the building's canonical JSON
//! serialization plus the transition penalty. Graphs are immutable and shared
//! through an `Arc`, so each request still gets its own search state.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;
use crate::graph::{build_graph_with, Graph, GraphBuildOptions};
use crate::model::BuildingData;
use crate::routing::{check_preconditions, plan_route_on_graph, RoutePlan, RouteRequest};

/// Hex-encoded SHA-256 digest of the building's JSON serialization.
pub fn fingerprint(building: &BuildingData) -> Result<String> {
    let bytes = serde_json::to_vec(building)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fingerprint: String,
    transition_penalty: f64,
    graph: Graph,
}

/// Single-entry cache of the most recently built graph.
#[derive(Debug, Clone, Default)]
pub struct GraphCache {
    entry: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the graph for `building`, rebuilding only when its fingerprint
    /// or the build options changed since the last call.
    pub fn graph(&mut self, building: &BuildingData, options: &GraphBuildOptions) -> Result<Graph> {
        let current = fingerprint(building)?;

        if let Some(entry) = &self.entry {
            if entry.fingerprint == current && entry.transition_penalty == options.transition_penalty
            {
                self.hits += 1;
                return Ok(entry.graph.clone());
            }
        }

        self.misses += 1;
        debug!(fingerprint = %current, "graph cache miss; rebuilding");
        let graph = build_graph_with(building, options);
        self.entry = Some(CacheEntry {
            fingerprint: current,
            transition_penalty: options.transition_penalty,
            graph: graph.clone(),
        });
        Ok(graph)
    }

    /// Plan a route, reusing the cached graph when possible.
    pub fn plan_route(&mut self, building: &BuildingData, request: &RouteRequest) -> Result<RoutePlan> {
        check_preconditions(building, &request.options)?;
        let graph = self.graph(building, &request.options.graph_options())?;
        plan_route_on_graph(building, &graph, request)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop the cached graph.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
