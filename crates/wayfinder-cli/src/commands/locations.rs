//! Location listing and search.

use std::path::Path;

use anyhow::Result;

use wayfinder_cli::output::OutputFormat;

use super::load_building_for;

/// Handle the locations subcommand.
pub fn handle_locations_command(
    target: Option<&Path>,
    format: OutputFormat,
    search: Option<&str>,
) -> Result<()> {
    let building = load_building_for(target)?;
    let groups = building.search_locations(search.unwrap_or(""));
    print!("{}", format.render_locations(&building, &groups)?);
    Ok(())
}
