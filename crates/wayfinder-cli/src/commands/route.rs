//! Route command handler for computing paths between locations.

use std::path::Path;

use anyhow::{Context, Result};

use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::{plan_route, Error as RouteError, RouteRequest, RouteSummary, RoutingOptions};

use super::load_building_for;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting location; `None` starts at the kiosk.
    pub from: Option<String>,
    /// Destination location.
    pub to: String,
    pub transition_penalty: f64,
    pub strict: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library [`RouteRequest`].
    pub fn to_request(&self) -> RouteRequest {
        let options = RoutingOptions {
            transition_penalty: self.transition_penalty,
            strict: self.strict,
        };
        let request = match &self.from {
            Some(from) => RouteRequest::between(from.clone(), self.to.clone()),
            None => RouteRequest::new(self.to.clone()),
        };
        request.with_options(options)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    target: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let building = load_building_for(target)?;
    let request = args.to_request();

    let plan = plan_route(&building, &request).map_err(handle_route_failure)?;
    let summary = RouteSummary::from_plan(&building, &plan)
        .context("failed to build route summary for display")?;

    print!("{}", format.render_route(&summary)?);
    Ok(())
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownLocation { name, suggestions } => {
            anyhow::anyhow!(format_unknown_location_message(&name, &suggestions))
        }
        RouteError::RouteNotFound { start, goal } => anyhow::anyhow!(
            "No route found between {start} and {goal}. The floors may not be linked by an elevator or stairs."
        ),
        RouteError::MissingOrigin => {
            anyhow::anyhow!("This building has no kiosk; pass --from to choose a starting location.")
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_location_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown location '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}
