//! Snap arbitrary locations onto the routing graph.

use crate::model::{BuildingData, Location, PathNode};

/// Return the path node on `location`'s floor closest to its position.
///
/// Distance is planar Euclidean with no obstacle awareness. When several nodes
/// share the minimum distance the first one in floor order wins. Returns `None`
/// when the floor is missing or has no path nodes.
pub fn nearest_node<'a>(building: &'a BuildingData, location: &Location) -> Option<&'a PathNode> {
    let floor = building.floor(location.floor)?;

    let mut closest: Option<(&PathNode, f64)> = None;
    for node in &floor.path_nodes {
        let distance = node.position.planar_distance_to(&location.position);
        match closest {
            Some((_, best)) if distance >= best => {}
            _ => closest = Some((node, distance)),
        }
    }

    closest.map(|(node, _)| node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FloorPlan, LocationType, Position};

    fn node(id: &str, x: f64, y: f64) -> PathNode {
        PathNode {
            id: id.to_string(),
            position: Position::new(x, y),
            connections: Vec::new(),
            floor: 1,
            is_transition: false,
            transition_to: None,
        }
    }

    fn location(floor: i32, x: f64, y: f64) -> Location {
        Location {
            id: "here".to_string(),
            name: "Here".to_string(),
            location_type: LocationType::Room,
            floor,
            position: Position::new(x, y),
            description: None,
        }
    }

    fn building(nodes: Vec<PathNode>) -> BuildingData {
        BuildingData {
            name: "Test".to_string(),
            floors: vec![
                FloorPlan {
                    floor: 1,
                    name: "One".to_string(),
                    width: 100.0,
                    height: 100.0,
                    background_image: None,
                    locations: Vec::new(),
                    path_nodes: nodes,
                },
                FloorPlan {
                    floor: 2,
                    name: "Empty".to_string(),
                    width: 100.0,
                    height: 100.0,
                    background_image: None,
                    locations: Vec::new(),
                    path_nodes: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn picks_closest_node() {
        let building = building(vec![node("a", 0.0, 0.0), node("b", 10.0, 0.0)]);
        let found = nearest_node(&building, &location(1, 7.0, 1.0)).expect("node");
        assert_eq!(found.id, "b");
    }

    #[test]
    fn ties_resolve_to_first_node() {
        let building = building(vec![node("a", 0.0, 0.0), node("b", 10.0, 0.0)]);
        let found = nearest_node(&building, &location(1, 5.0, 0.0)).expect("node");
        assert_eq!(found.id, "a");
    }

    #[test]
    fn empty_floor_yields_none() {
        let building = building(vec![node("a", 0.0, 0.0)]);
        assert!(nearest_node(&building, &location(2, 0.0, 0.0)).is_none());
    }

    #[test]
    fn unknown_floor_yields_none() {
        let building = building(vec![node("a", 0.0, 0.0)]);
        assert!(nearest_node(&building, &location(7, 0.0, 0.0)).is_none());
    }
}
