//! Route planning between two locations in a building.
//!
//! This module ties the pipeline together:
//! - [`nearest_node`](crate::resolver::nearest_node) snaps both locations to the graph
//! - [`build_graph_with`] materialises the weighted graph
//! - [`dijkstra`] searches it and [`reconstruct_path`] orders the result
//!
//! The outcome is tagged so callers can tell "already there", "no path" and
//! "location cannot be placed on the graph" apart.
//!
//! # Example
//!
//! ```ignore
//! use wayfinder_lib::{load_building, plan_route, RouteRequest};
//!
//! let building = load_building("tech_innovation_center.json".as_ref())?;
//! let plan = plan_route(&building, &RouteRequest::new("Conference Room"))?;
//! println!("{} steps, {:.1} units", plan.route.steps.len(), plan.route.total_weight);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{build_graph_with, EdgeKind, Graph, GraphBuildOptions, TRANSITION_PENALTY};
use crate::model::{BuildingData, Location, NodeId};
use crate::path::{dijkstra, reconstruct_path};
use crate::resolver::nearest_node;
use crate::validate::validate_building;

/// Options applied to a routing request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingOptions {
    /// Cost of each floor change.
    pub transition_penalty: f64,
    /// Refuse to route over buildings whose validation report has errors.
    pub strict: bool,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            transition_penalty: TRANSITION_PENALTY,
            strict: false,
        }
    }
}

impl RoutingOptions {
    /// Reject options the shortest-path search cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !self.transition_penalty.is_finite() || self.transition_penalty < 0.0 {
            return Err(Error::InvalidOption {
                option: "transition_penalty".to_string(),
                reason: format!(
                    "must be a finite, non-negative number (got {})",
                    self.transition_penalty
                ),
            });
        }
        Ok(())
    }

    pub fn graph_options(&self) -> GraphBuildOptions {
        GraphBuildOptions {
            transition_penalty: self.transition_penalty,
        }
    }
}

/// Ordered waypoints from the node nearest the start to the node nearest the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub steps: Vec<NodeId>,
    /// Weight accumulated on arrival at each step; parallel to `steps`.
    pub cumulative_weights: Vec<f64>,
    pub total_weight: f64,
    /// Number of floor changes along the route.
    pub transitions: usize,
}

impl Route {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&str> {
        self.steps.first().map(String::as_str)
    }

    pub fn goal(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }
}

/// Result of a single routing request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// A route exists. Start and end snapping to the same node yields a
    /// single step with zero weight.
    Found(Route),
    /// Both locations snapped to the graph but no path joins them.
    Unreachable { start: NodeId, goal: NodeId },
    /// The location's floor has no path nodes to snap to.
    InvalidLocation { location: String, floor: i32 },
}

impl RouteOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            _ => None,
        }
    }

    /// Flat list of node ids; empty whenever no route exists.
    pub fn into_steps(self) -> Vec<NodeId> {
        match self {
            RouteOutcome::Found(route) => route.steps,
            _ => Vec::new(),
        }
    }
}

/// Route between two locations using the default lenient options.
pub fn find_route(building: &BuildingData, start: &Location, end: &Location) -> RouteOutcome {
    let graph = build_graph_with(building, &GraphBuildOptions::default());
    route_on_graph(building, &graph, start, end)
}

/// Route between two locations with explicit options.
///
/// Fails only for invalid options or, in strict mode, a building with
/// validation errors. Every routing result is reported through [`RouteOutcome`].
pub fn find_route_with(
    building: &BuildingData,
    start: &Location,
    end: &Location,
    options: &RoutingOptions,
) -> Result<RouteOutcome> {
    check_preconditions(building, options)?;
    let graph = build_graph_with(building, &options.graph_options());
    Ok(route_on_graph(building, &graph, start, end))
}

/// Route over an already-built graph of `building`.
pub fn route_on_graph(
    building: &BuildingData,
    graph: &Graph,
    start: &Location,
    end: &Location,
) -> RouteOutcome {
    let Some(start_node) = nearest_node(building, start) else {
        return RouteOutcome::InvalidLocation {
            location: start.id.clone(),
            floor: start.floor,
        };
    };
    let Some(goal_node) = nearest_node(building, end) else {
        return RouteOutcome::InvalidLocation {
            location: end.id.clone(),
            floor: end.floor,
        };
    };

    let start_id = start_node.id.as_str();
    let goal_id = goal_node.id.as_str();
    debug!(from = %start.id, to = %end.id, start_id, goal_id, "resolved route endpoints");

    if start_id == goal_id {
        return RouteOutcome::Found(Route {
            steps: vec![start_id.to_string()],
            cumulative_weights: vec![0.0],
            total_weight: 0.0,
            transitions: 0,
        });
    }

    let paths = dijkstra(graph, start_id, goal_id);
    if paths.predecessor(goal_id).is_none() {
        return RouteOutcome::Unreachable {
            start: start_id.to_string(),
            goal: goal_id.to_string(),
        };
    }

    let steps = reconstruct_path(&paths.predecessors, goal_id);
    let cumulative_weights = steps.iter().map(|id| paths.distance(id)).collect();
    let transitions = steps
        .windows(2)
        .filter(|pair| {
            graph
                .edge(&pair[0], &pair[1])
                .is_some_and(|edge| edge.kind == EdgeKind::Transition)
        })
        .count();

    RouteOutcome::Found(Route {
        total_weight: paths.distance(goal_id),
        steps,
        cumulative_weights,
        transitions,
    })
}

pub(crate) fn check_preconditions(building: &BuildingData, options: &RoutingOptions) -> Result<()> {
    options.validate()?;
    if options.strict {
        let report = validate_building(building);
        if report.has_errors() {
            return Err(Error::InvalidBuilding {
                issues: report.errors().cloned().collect(),
            });
        }
    }
    Ok(())
}

/// High-level routing request expressed with location ids or names.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    /// Origin reference; `None` routes from the building's kiosk.
    pub from: Option<String>,
    pub to: String,
    pub options: RoutingOptions,
}

impl RouteRequest {
    /// Route from the building's kiosk to `to`.
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            from: None,
            to: to.into(),
            options: RoutingOptions::default(),
        }
    }

    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: to.into(),
            options: RoutingOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RoutingOptions) -> Self {
        self.options = options;
        self
    }
}

/// Planned route together with the locations it joins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub origin: Location,
    pub destination: Location,
    pub route: Route,
}

impl RoutePlan {
    pub fn hop_count(&self) -> usize {
        self.route.hop_count()
    }
}

/// Resolve location references to [`Location`]s, returning fuzzy suggestions
/// for unknown names.
pub fn resolve_location<'a>(building: &'a BuildingData, reference: &str) -> Result<&'a Location> {
    building.find_location(reference).ok_or_else(|| {
        let suggestions = building.fuzzy_location_matches(reference, 3);
        Error::UnknownLocation {
            name: reference.to_string(),
            suggestions,
        }
    })
}

fn resolve_origin<'a>(building: &'a BuildingData, from: Option<&str>) -> Result<&'a Location> {
    match from {
        Some(reference) => resolve_location(building, reference),
        None => building.kiosk().ok_or(Error::MissingOrigin),
    }
}

/// Compute a route for a request, building a fresh graph.
pub fn plan_route(building: &BuildingData, request: &RouteRequest) -> Result<RoutePlan> {
    check_preconditions(building, &request.options)?;
    let graph = build_graph_with(building, &request.options.graph_options());
    plan_route_on_graph(building, &graph, request)
}

/// Compute a route for a request over a graph built from `building`.
///
/// Options are not re-validated here; the caller built `graph` with them.
pub fn plan_route_on_graph(
    building: &BuildingData,
    graph: &Graph,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let origin = resolve_origin(building, request.from.as_deref())?;
    let destination = resolve_location(building, &request.to)?;

    match route_on_graph(building, graph, origin, destination) {
        RouteOutcome::Found(route) => Ok(RoutePlan {
            origin: origin.clone(),
            destination: destination.clone(),
            route,
        }),
        RouteOutcome::Unreachable { .. } => Err(Error::RouteNotFound {
            start: origin.name.clone(),
            goal: destination.name.clone(),
        }),
        RouteOutcome::InvalidLocation { location, floor } => {
            Err(Error::UnresolvableLocation { location, floor })
        }
    }
}
