//! Per-floor view of a route for map presentation.
//!
//! A route crosses floors, while a map shows one floor at a time. The overlay
//! keeps the route ids that sit on the displayed floor, pairs consecutive
//! survivors into drawable segments, and lists the transition nodes on that
//! floor the route passes through so the viewer can mark where the route
//! continues elsewhere.

use serde::Serialize;

use crate::model::{BuildingData, NodeId};

/// Drawable portion of a route on a single floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FloorOverlay {
    pub floor: i32,
    pub segments: Vec<(NodeId, NodeId)>,
    pub transition_markers: Vec<NodeId>,
}

impl FloorOverlay {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.transition_markers.is_empty()
    }
}

/// Build the overlay of `steps` for `floor`.
pub fn floor_overlay(building: &BuildingData, steps: &[NodeId], floor: i32) -> FloorOverlay {
    let Some(plan) = building.floor(floor) else {
        return FloorOverlay {
            floor,
            ..FloorOverlay::default()
        };
    };

    let on_floor: Vec<&NodeId> = steps
        .iter()
        .filter(|id| {
            plan.path_nodes
                .iter()
                .any(|node| node.id == **id && node.floor == floor)
        })
        .collect();

    let segments = on_floor
        .windows(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();

    let transition_markers = plan
        .path_nodes
        .iter()
        .filter(|node| node.is_transition && steps.contains(&node.id))
        .map(|node| node.id.clone())
        .collect();

    FloorOverlay {
        floor,
        segments,
        transition_markers,
    }
}

/// Floors the route visits, in first-visit order.
pub fn floors_visited(building: &BuildingData, steps: &[NodeId]) -> Vec<i32> {
    let mut floors = Vec::new();
    for id in steps {
        if let Some(node) = building.node(id) {
            if !floors.contains(&node.floor) {
                floors.push(node.floor);
            }
        }
    }
    floors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FloorPlan, PathNode, Position};

    fn node(id: &str, floor: i32, transition_to: Option<&str>) -> PathNode {
        PathNode {
            id: id.to_string(),
            position: Position::new(0.0, 0.0),
            connections: Vec::new(),
            floor,
            is_transition: transition_to.is_some(),
            transition_to: transition_to.map(str::to_string),
        }
    }

    fn building() -> BuildingData {
        let floor = |number: i32, path_nodes: Vec<PathNode>| FloorPlan {
            floor: number,
            name: format!("Floor {number}"),
            width: 10.0,
            height: 10.0,
            background_image: None,
            locations: Vec::new(),
            path_nodes,
        };
        BuildingData {
            name: "Overlay".to_string(),
            floors: vec![
                floor(
                    1,
                    vec![node("a", 1, None), node("b", 1, None), node("lift-1", 1, Some("lift-2"))],
                ),
                floor(
                    2,
                    vec![node("lift-2", 2, Some("lift-1")), node("c", 2, None), node("d", 2, None)],
                ),
            ],
        }
    }

    fn ids(values: &[&str]) -> Vec<NodeId> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn segments_follow_route_order_per_floor() {
        let building = building();
        let steps = ids(&["a", "b", "lift-1", "lift-2", "c", "d"]);

        let ground = floor_overlay(&building, &steps, 1);
        assert_eq!(
            ground.segments,
            vec![
                ("a".to_string(), "b".to_string()),
                ("b".to_string(), "lift-1".to_string())
            ]
        );
        assert_eq!(ground.transition_markers, ids(&["lift-1"]));

        let upper = floor_overlay(&building, &steps, 2);
        assert_eq!(upper.segments.len(), 2);
        assert_eq!(upper.transition_markers, ids(&["lift-2"]));
    }

    #[test]
    fn unvisited_floor_is_empty() {
        let building = building();
        let overlay = floor_overlay(&building, &ids(&["a", "b"]), 2);
        assert!(overlay.is_empty());
        assert!(floor_overlay(&building, &ids(&["a", "b"]), 9).is_empty());
    }

    #[test]
    fn single_node_on_floor_draws_no_segment() {
        let building = building();
        let overlay = floor_overlay(&building, &ids(&["b", "lift-1", "lift-2"]), 2);
        assert!(overlay.segments.is_empty());
        assert_eq!(overlay.transition_markers, ids(&["lift-2"]));
    }

    #[test]
    fn floors_visited_in_route_order() {
        let building = building();
        let steps = ids(&["c", "lift-2", "lift-1", "a"]);
        assert_eq!(floors_visited(&building, &steps), vec![2, 1]);
    }
}
