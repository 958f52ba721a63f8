use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::BuildingData;

/// Default filename for the building description inside the data directory.
const BUILDING_FILENAME: &str = "building.json";

/// Environment variable overriding the building description location.
pub const BUILDING_ENV_VAR: &str = "WAYFINDER_BUILDING";

/// Resolve the default building location using platform-specific project directories.
pub fn default_building_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "wayfinder", "wayfinder").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(BUILDING_FILENAME))
}

/// Resolve which building file to load.
///
/// An explicit path wins, then [`BUILDING_ENV_VAR`], then the platform data
/// directory. Directories are expanded to `building.json` inside them.
pub fn resolve_building_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(canonical_building_path(path));
    }

    if let Some(env_path) = env::var_os(BUILDING_ENV_VAR) {
        debug!(variable = BUILDING_ENV_VAR, "using building path from environment");
        return Ok(canonical_building_path(Path::new(&env_path)));
    }

    default_building_path()
}

/// Load and parse a building description from a JSON file.
pub fn load_building(path: &Path) -> Result<BuildingData> {
    if !path.exists() {
        return Err(Error::BuildingNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let building = BuildingData::from_json_str(&contents)?;
    info!(
        building = %building.name,
        floors = building.floors.len(),
        nodes = building.nodes().count(),
        "loaded building from {}",
        path.display()
    );
    Ok(building)
}

/// Resolve the building path and load it in one step.
pub fn ensure_building(explicit: Option<&Path>) -> Result<BuildingData> {
    let path = resolve_building_path(explicit)?;
    load_building(&path)
}

fn canonical_building_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.join(BUILDING_FILENAME);
    }
    path.to_path_buf()
}
