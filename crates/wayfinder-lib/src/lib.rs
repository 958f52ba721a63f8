//! Wayfinder library entry points.
//!
//! This crate loads multi-floor building descriptions, builds a weighted
//! routing graph over their path nodes (including elevator and stair
//! transitions between floors), and finds shortest routes between named
//! locations. Higher-level consumers (the CLI, map renderers) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod building;
pub mod cache;
pub mod error;
pub mod graph;
pub mod model;
pub mod output;
pub mod overlay;
pub mod path;
pub mod resolver;
pub mod routing;
pub mod validate;

pub use building::{
    default_building_path, ensure_building, load_building, resolve_building_path,
    BUILDING_ENV_VAR,
};
pub use cache::{fingerprint, GraphCache};
pub use error::{Error, Result};
pub use graph::{
    build_graph, build_graph_with, Edge, EdgeKind, Graph, GraphBuildOptions, TRANSITION_PENALTY,
};
pub use model::{BuildingData, FloorPlan, Location, LocationType, NodeId, PathNode, Position};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary, StepKind};
pub use overlay::{floor_overlay, floors_visited, FloorOverlay};
pub use path::{dijkstra, reconstruct_path, ShortestPaths};
pub use resolver::nearest_node;
pub use routing::{
    find_route, find_route_with, plan_route, plan_route_on_graph, resolve_location,
    route_on_graph, Route, RouteOutcome, RoutePlan, RouteRequest, RoutingOptions,
};
pub use validate::{validate_building, Severity, ValidationIssue, ValidationReport};
