use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{BuildingData, Location, LocationType, NodeId, Position};
use crate::overlay::floors_visited;
use crate::routing::RoutePlan;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    Basic,
}

/// Location a planned route starts or ends at.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub floor: i32,
    /// Path node the location snapped to.
    pub node: NodeId,
}

impl RouteEndpoint {
    fn new(location: &Location, node: &str) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            location_type: location.location_type,
            floor: location.floor,
            node: node.to_string(),
        }
    }
}

/// How a step was reached from the previous one.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Start,
    Walk,
    FloorChange,
}

/// Waypoint taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub kind: StepKind,
    /// Accumulated route weight on arrival at this step.
    pub cumulative_weight: f64,
}

impl RouteStep {
    fn floor_label(&self) -> String {
        self.floor
            .map(|floor| floor.to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub building: String,
    pub hops: usize,
    pub transitions: usize,
    pub total_weight: f64,
    pub floors: Vec<i32>,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with per-step floors and weights.
    pub fn from_plan(building: &BuildingData, plan: &RoutePlan) -> Result<Self> {
        let route = &plan.route;
        let (Some(first), Some(last)) = (route.start(), route.goal()) else {
            return Err(Error::EmptyRoute);
        };

        let mut steps = Vec::with_capacity(route.steps.len());
        let mut previous_floor: Option<Option<i32>> = None;

        for (index, id) in route.steps.iter().enumerate() {
            let node = building.node(id);
            let floor = node.map(|n| n.floor);

            let kind = match previous_floor {
                None => StepKind::Start,
                Some(prev) if prev != floor => StepKind::FloorChange,
                Some(_) => StepKind::Walk,
            };

            steps.push(RouteStep {
                index,
                id: id.clone(),
                floor,
                position: node.map(|n| n.position),
                kind,
                cumulative_weight: route.cumulative_weights.get(index).copied().unwrap_or(0.0),
            });
            previous_floor = Some(floor);
        }

        Ok(Self {
            building: building.name.clone(),
            hops: route.hop_count(),
            transitions: route.transitions,
            total_weight: route.total_weight,
            floors: floors_visited(building, &route.steps),
            start: RouteEndpoint::new(&plan.origin, first),
            goal: RouteEndpoint::new(&plan.destination, last),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Basic => self.render_basic(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route from {} to {} ({} hops, {} floor change{}, distance {:.1}):",
            self.start.name,
            self.goal.name,
            self.hops,
            self.transitions,
            if self.transitions == 1 { "" } else { "s" },
            self.total_weight
        );
        for step in &self.steps {
            let marker = match step.kind {
                StepKind::FloorChange => " [change floor]",
                _ => "",
            };
            let _ = writeln!(
                buffer,
                "{:>3}: {} (floor {}, {:.1}){}",
                step.index,
                step.id,
                step.floor_label(),
                step.cumulative_weight,
                marker
            );
        }
        buffer
    }

    fn render_basic(&self) -> String {
        let mut buffer = String::new();
        let last = self.steps.len().saturating_sub(1);
        for step in &self.steps {
            let prefix = if step.index == 0 {
                '+'
            } else if step.index == last {
                '-'
            } else {
                '|'
            };
            let _ = writeln!(buffer, "{prefix} {}", step.id);
        }
        buffer
    }
}
