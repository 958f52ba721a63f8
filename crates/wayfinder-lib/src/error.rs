use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationIssue;

/// Convenient result alias for the wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Building description could not be located at the resolved path.
    #[error("building description not found at {path}")]
    BuildingNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default building file")]
    ProjectDirsUnavailable,

    /// Raised when a location id or name could not be found in the building.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no origin was supplied and the building has no kiosk.
    #[error("no start location given and the building has no kiosk location")]
    MissingOrigin,

    /// Raised when a location sits on a floor without any path nodes.
    #[error("location {location} on floor {floor} has no path nodes to snap to")]
    UnresolvableLocation { location: String, floor: i32 },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised in strict mode when the building fails validation.
    #[error("building failed validation with {} error(s): {}", .issues.len(), format_issues(.issues))]
    InvalidBuilding { issues: Vec<ValidationIssue> },

    /// Raised when a routing option is out of range.
    #[error("invalid routing option {option}: {reason}")]
    InvalidOption { option: String, reason: String },

    /// Raised when a computed route lacks any steps.
    #[error("route was empty")]
    EmptyRoute,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parse and serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
