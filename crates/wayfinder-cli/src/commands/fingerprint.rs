use std::path::Path;

use anyhow::{Context, Result};

use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::fingerprint;

use super::load_building_for;

/// Handle the fingerprint subcommand.
pub fn handle_fingerprint_command(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let building = load_building_for(target)?;
    let digest = fingerprint(&building).context("failed to fingerprint building")?;
    print!("{}", format.render_fingerprint(&building, &digest)?);
    Ok(())
}
