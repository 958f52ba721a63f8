use std::path::Path;

use anyhow::{bail, Result};

use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::validate_building;

use super::load_building_for;

/// Handle the validate subcommand. Fails when the report contains errors so
/// scripts can gate on the exit status.
pub fn handle_validate_command(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let building = load_building_for(target)?;
    let report = validate_building(&building);
    print!("{}", format.render_validation(&report)?);

    if report.has_errors() {
        bail!(
            "building {} failed validation with {} error(s)",
            building.name,
            report.errors().count()
        );
    }
    Ok(())
}
