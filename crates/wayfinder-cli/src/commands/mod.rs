// One module per subcommand; main.rs only parses arguments and dispatches.

pub mod fingerprint;
pub mod locations;
pub mod route;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use wayfinder_lib::{load_building, resolve_building_path, BuildingData};

/// Resolve and load the building description for a command.
pub fn load_building_for(target: Option<&Path>) -> Result<BuildingData> {
    let path = resolve_building_path(target)
        .context("failed to resolve the building description path")?;
    load_building(&path)
        .with_context(|| format!("failed to load building from {}", path.display()))
}
