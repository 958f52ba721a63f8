//! Output formatting for the CLI subcommands.
//!
//! Every renderer returns the full text to print so commands stay free of
//! formatting decisions and the renderers can be tested without a process.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use wayfinder_lib::{BuildingData, Location, RouteRenderMode, RouteSummary, ValidationReport};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Minimal listing: one id per line.
    Basic,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Serialize)]
struct FloorListing<'a> {
    floor: i32,
    name: &'a str,
    locations: &'a [&'a Location],
}

#[derive(Serialize)]
struct FingerprintOutput<'a> {
    building: &'a str,
    fingerprint: &'a str,
}

impl OutputFormat {
    /// Render a planned route.
    pub fn render_route(self, summary: &RouteSummary) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(summary.render(RouteRenderMode::PlainText)),
            OutputFormat::Basic => Ok(summary.render(RouteRenderMode::Basic)),
            OutputFormat::Json => to_json(summary),
        }
    }

    /// Render locations grouped by floor, as returned by
    /// [`BuildingData::search_locations`].
    pub fn render_locations(
        self,
        building: &BuildingData,
        groups: &[(i32, Vec<&Location>)],
    ) -> Result<String> {
        let floor_name = |number: i32| {
            building
                .floor(number)
                .map(|plan| plan.name.as_str())
                .unwrap_or("")
        };

        match self {
            OutputFormat::Json => {
                let listing: Vec<FloorListing<'_>> = groups
                    .iter()
                    .map(|(floor, locations)| FloorListing {
                        floor: *floor,
                        name: floor_name(*floor),
                        locations,
                    })
                    .collect();
                to_json(&listing)
            }
            OutputFormat::Basic => {
                let mut buffer = String::new();
                for location in groups.iter().flat_map(|(_, locations)| locations) {
                    let _ = writeln!(buffer, "{}", location.id);
                }
                Ok(buffer)
            }
            OutputFormat::Text => {
                if groups.is_empty() {
                    return Ok("No matching locations.\n".to_string());
                }
                let mut buffer = String::new();
                let _ = writeln!(buffer, "{}", building.name);
                for (floor, locations) in groups {
                    let _ = writeln!(buffer, "Floor {}: {}", floor, floor_name(*floor));
                    for location in locations {
                        let _ = writeln!(
                            buffer,
                            "  {:<16} {} [{}]",
                            location.id, location.name, location.location_type
                        );
                    }
                }
                Ok(buffer)
            }
        }
    }

    /// Render a validation report. Basic output omits the closing tally.
    pub fn render_validation(self, report: &ValidationReport) -> Result<String> {
        if self == OutputFormat::Json {
            return to_json(report);
        }

        let mut buffer = String::new();
        for issue in &report.issues {
            let _ = writeln!(buffer, "{}: {}", issue.severity(), issue);
        }
        if self == OutputFormat::Text {
            if report.is_clean() {
                buffer.push_str("No issues found.\n");
            } else {
                let _ = writeln!(
                    buffer,
                    "{} error(s), {} warning(s)",
                    report.errors().count(),
                    report.warnings().count()
                );
            }
        }
        Ok(buffer)
    }

    /// Render a building fingerprint.
    pub fn render_fingerprint(self, building: &BuildingData, fingerprint: &str) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(format!("{fingerprint}  {}\n", building.name)),
            OutputFormat::Basic => Ok(format!("{fingerprint}\n")),
            OutputFormat::Json => to_json(&FingerprintOutput {
                building: &building.name,
                fingerprint,
            }),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    json.push('\n');
    Ok(json)
}
