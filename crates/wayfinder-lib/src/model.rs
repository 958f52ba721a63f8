use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Identifier for a routing-graph vertex. Unique across every floor.
pub type NodeId = String;

/// Floor-local coordinate in floor-plan units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Straight-line distance in the floor plane. Height is presentation-only
    /// and never contributes to routing weights.
    pub fn planar_distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Category of a named point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Room,
    Office,
    Meeting,
    Restroom,
    Elevator,
    Stairs,
    Exit,
    Kiosk,
    Accessible,
}

impl LocationType {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationType::Room => "room",
            LocationType::Office => "office",
            LocationType::Meeting => "meeting",
            LocationType::Restroom => "restroom",
            LocationType::Elevator => "elevator",
            LocationType::Stairs => "stairs",
            LocationType::Exit => "exit",
            LocationType::Kiosk => "kiosk",
            LocationType::Accessible => "accessible",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "room" => Ok(LocationType::Room),
            "office" => Ok(LocationType::Office),
            "meeting" => Ok(LocationType::Meeting),
            "restroom" => Ok(LocationType::Restroom),
            "elevator" => Ok(LocationType::Elevator),
            "stairs" => Ok(LocationType::Stairs),
            "exit" => Ok(LocationType::Exit),
            "kiosk" => Ok(LocationType::Kiosk),
            "accessible" => Ok(LocationType::Accessible),
            other => Err(format!("unknown location type '{other}'")),
        }
    }
}

/// Named, typed destination within the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub floor: i32,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Vertex of the routing graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathNode {
    pub id: NodeId,
    pub position: Position,
    #[serde(default)]
    pub connections: Vec<NodeId>,
    pub floor: i32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_transition: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_to: Option<NodeId>,
}

impl PathNode {
    /// Counterpart on another floor, only when the node is flagged as a transition.
    pub fn transition_target(&self) -> Option<&str> {
        if self.is_transition {
            self.transition_to.as_deref()
        } else {
            None
        }
    }
}

/// One floor's locations and path nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub floor: i32,
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub path_nodes: Vec<PathNode>,
}

/// Root description of a building: an ordered list of floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingData {
    pub name: String,
    pub floors: Vec<FloorPlan>,
}

/// Similarity threshold below which fuzzy suggestions are discarded.
const FUZZY_THRESHOLD: f64 = 0.8;

impl BuildingData {
    /// Parse a building description from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Floor plan with the given floor number.
    pub fn floor(&self, number: i32) -> Option<&FloorPlan> {
        self.floors.iter().find(|floor| floor.floor == number)
    }

    /// Every path node, in floor order and then insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &PathNode> {
        self.floors.iter().flat_map(|floor| floor.path_nodes.iter())
    }

    /// Lookup a path node by identifier.
    pub fn node(&self, id: &str) -> Option<&PathNode> {
        self.nodes().find(|node| node.id == id)
    }

    /// Every location, in floor order and then insertion order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.floors.iter().flat_map(|floor| floor.locations.iter())
    }

    pub fn location_by_id(&self, id: &str) -> Option<&Location> {
        self.locations().find(|location| location.id == id)
    }

    /// Case-insensitive lookup by display name. The first match wins.
    pub fn location_by_name(&self, name: &str) -> Option<&Location> {
        let needle = name.trim().to_lowercase();
        self.locations()
            .find(|location| location.name.to_lowercase() == needle)
    }

    /// Resolve a user-supplied reference, trying the id before the display name.
    pub fn find_location(&self, reference: &str) -> Option<&Location> {
        self.location_by_id(reference)
            .or_else(|| self.location_by_name(reference))
    }

    /// The "You Are Here" kiosk, if the building declares one.
    pub fn kiosk(&self) -> Option<&Location> {
        self.locations()
            .find(|location| location.location_type == LocationType::Kiosk)
    }

    /// Case-insensitive substring search on location name or type, grouped by
    /// ascending floor number. An empty term returns every location.
    pub fn search_locations(&self, term: &str) -> Vec<(i32, Vec<&Location>)> {
        let needle = term.trim().to_lowercase();
        let mut floors: Vec<i32> = self.floors.iter().map(|floor| floor.floor).collect();
        floors.sort_unstable();
        floors.dedup();

        floors
            .into_iter()
            .filter_map(|number| {
                let matches: Vec<&Location> = self
                    .locations()
                    .filter(|location| location.floor == number)
                    .filter(|location| {
                        needle.is_empty()
                            || location.name.to_lowercase().contains(&needle)
                            || location.location_type.as_str().contains(&needle)
                    })
                    .collect();
                if matches.is_empty() {
                    None
                } else {
                    Some((number, matches))
                }
            })
            .collect()
    }

    /// Suggest location names similar to `name`, best match first.
    pub fn fuzzy_location_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations()
            .map(|location| {
                let by_name = strsim::jaro_winkler(&needle, &location.name.to_lowercase());
                let by_id = strsim::jaro_winkler(&needle, &location.id.to_lowercase());
                (by_name.max(by_id), location.name.as_str())
            })
            .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut suggestions: Vec<String> = Vec::new();
        for (_, candidate) in scored {
            if suggestions.iter().any(|existing| existing == candidate) {
                continue;
            }
            suggestions.push(candidate.to_string());
            if suggestions.len() == limit {
                break;
            }
        }
        suggestions
    }
}
