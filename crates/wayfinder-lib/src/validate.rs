//! Structural checks for building descriptions.
//!
//! Graph construction tolerates malformed references by dropping the affected
//! edges. This module reports those problems explicitly so data authors can fix
//! them instead of receiving silently suboptimal routes. Errors describe data
//! the graph builder has to discard; warnings describe data that routes
//! correctly but is not self-documenting (for example a transition declared on
//! only one side).

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::model::{BuildingData, NodeId, PathNode};

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A single problem found in the building description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// The same node id appears more than once across the building.
    DuplicateNodeId { node: NodeId },
    /// A `connections` entry names a node that does not exist.
    DanglingConnection { node: NodeId, target: NodeId },
    /// A `transitionTo` entry names a node that does not exist.
    DanglingTransition { node: NodeId, target: NodeId },
    /// A node is flagged as a transition but has no counterpart.
    TransitionWithoutTarget { node: NodeId },
    /// A node's own floor differs from the floor plan that lists it.
    FloorMismatch {
        node: NodeId,
        declared: i32,
        listed_on: i32,
    },
    /// `node` transitions to `target`, but `target` does not point back.
    OneSidedTransition { node: NodeId, target: NodeId },
    /// `node` connects to `target`, but `target` does not list `node`.
    OneSidedConnection { node: NodeId, target: NodeId },
    /// A same-floor `connections` entry reaches a node on another floor.
    CrossFloorConnection { node: NodeId, target: NodeId },
    /// A transition joins two nodes on the same floor.
    TransitionOnSameFloor { node: NodeId, target: NodeId },
}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::DuplicateNodeId { .. }
            | ValidationIssue::DanglingConnection { .. }
            | ValidationIssue::DanglingTransition { .. }
            | ValidationIssue::TransitionWithoutTarget { .. }
            | ValidationIssue::FloorMismatch { .. } => Severity::Error,
            ValidationIssue::OneSidedTransition { .. }
            | ValidationIssue::OneSidedConnection { .. }
            | ValidationIssue::CrossFloorConnection { .. }
            | ValidationIssue::TransitionOnSameFloor { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::DuplicateNodeId { node } => {
                write!(f, "node id {node} is declared more than once")
            }
            ValidationIssue::DanglingConnection { node, target } => {
                write!(f, "node {node} connects to unknown node {target}")
            }
            ValidationIssue::DanglingTransition { node, target } => {
                write!(f, "node {node} transitions to unknown node {target}")
            }
            ValidationIssue::TransitionWithoutTarget { node } => {
                write!(f, "node {node} is a transition without a target")
            }
            ValidationIssue::FloorMismatch {
                node,
                declared,
                listed_on,
            } => write!(
                f,
                "node {node} declares floor {declared} but is listed on floor {listed_on}"
            ),
            ValidationIssue::OneSidedTransition { node, target } => write!(
                f,
                "node {node} transitions to {target} but {target} does not transition back"
            ),
            ValidationIssue::OneSidedConnection { node, target } => write!(
                f,
                "node {node} connects to {target} but {target} does not list {node}"
            ),
            ValidationIssue::CrossFloorConnection { node, target } => write!(
                f,
                "node {node} connects to {target} on another floor; use a transition instead"
            ),
            ValidationIssue::TransitionOnSameFloor { node, target } => {
                write!(f, "node {node} transitions to {target} on the same floor")
            }
        }
    }
}

/// Outcome of [`validate_building`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity() == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Warning)
    }
}

/// Check every floor's path nodes for dangling, duplicated or asymmetric
/// references. Issues are reported in floor order, then node order.
pub fn validate_building(building: &BuildingData) -> ValidationReport {
    let mut issues = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut nodes: HashMap<&str, &PathNode> = HashMap::new();
    for floor in &building.floors {
        for node in &floor.path_nodes {
            if !seen.insert(node.id.as_str()) {
                issues.push(ValidationIssue::DuplicateNodeId {
                    node: node.id.clone(),
                });
            }
            nodes.entry(node.id.as_str()).or_insert(node);

            if node.floor != floor.floor {
                issues.push(ValidationIssue::FloorMismatch {
                    node: node.id.clone(),
                    declared: node.floor,
                    listed_on: floor.floor,
                });
            }
        }
    }

    for node in building.nodes() {
        check_connections(node, &nodes, &mut issues);
        check_transition(node, &nodes, &mut issues);
    }

    let report = ValidationReport { issues };
    for issue in report.warnings() {
        warn!(%issue, "building validation warning");
    }
    report
}

fn check_connections(
    node: &PathNode,
    nodes: &HashMap<&str, &PathNode>,
    issues: &mut Vec<ValidationIssue>,
) {
    for target_id in &node.connections {
        let Some(target) = nodes.get(target_id.as_str()) else {
            issues.push(ValidationIssue::DanglingConnection {
                node: node.id.clone(),
                target: target_id.clone(),
            });
            continue;
        };

        if target.floor != node.floor {
            issues.push(ValidationIssue::CrossFloorConnection {
                node: node.id.clone(),
                target: target_id.clone(),
            });
        }

        if !target.connections.iter().any(|back| *back == node.id) {
            issues.push(ValidationIssue::OneSidedConnection {
                node: node.id.clone(),
                target: target_id.clone(),
            });
        }
    }
}

fn check_transition(
    node: &PathNode,
    nodes: &HashMap<&str, &PathNode>,
    issues: &mut Vec<ValidationIssue>,
) {
    if !node.is_transition {
        return;
    }

    let Some(target_id) = node.transition_to.as_deref() else {
        issues.push(ValidationIssue::TransitionWithoutTarget {
            node: node.id.clone(),
        });
        return;
    };

    let Some(target) = nodes.get(target_id) else {
        issues.push(ValidationIssue::DanglingTransition {
            node: node.id.clone(),
            target: target_id.to_string(),
        });
        return;
    };

    if target.floor == node.floor {
        issues.push(ValidationIssue::TransitionOnSameFloor {
            node: node.id.clone(),
            target: target_id.to_string(),
        });
    }

    if target.transition_target() != Some(node.id.as_str()) {
        issues.push(ValidationIssue::OneSidedTransition {
            node: node.id.clone(),
            target: target_id.to_string(),
        });
    }
}
