mod common;

use std::collections::HashSet;

use common::fixture_building;
use wayfinder_lib::{build_graph, find_route, nearest_node, Graph, RouteOutcome};

/// Cheapest simple path by exhaustive search; the fixture graph is small enough.
fn brute_force(graph: &Graph, current: &str, goal: &str, visited: &mut HashSet<String>) -> Option<f64> {
    if current == goal {
        return Some(0.0);
    }
    visited.insert(current.to_string());
    let mut best: Option<f64> = None;
    for edge in graph.neighbours(current) {
        if visited.contains(&edge.target) {
            continue;
        }
        if let Some(rest) = brute_force(graph, &edge.target, goal, visited) {
            let candidate = edge.weight + rest;
            best = Some(best.map_or(candidate, |b: f64| b.min(candidate)));
        }
    }
    visited.remove(current);
    best
}

#[test]
fn every_location_pair_gets_the_cheapest_route() {
    let building = fixture_building();
    let graph = build_graph(&building);
    let locations: Vec<_> = building.locations().cloned().collect();

    for start in &locations {
        for end in &locations {
            let start_node = nearest_node(&building, start).expect("fixture floors have nodes");
            let goal_node = nearest_node(&building, end).expect("fixture floors have nodes");
            let expected = brute_force(&graph, &start_node.id, &goal_node.id, &mut HashSet::new())
                .expect("fixture is connected");

            let RouteOutcome::Found(route) = find_route(&building, start, end) else {
                panic!("no route between {} and {}", start.id, end.id);
            };

            assert!(
                (route.total_weight - expected).abs() < 1e-6,
                "{} -> {}: got {}, cheapest is {}",
                start.id,
                end.id,
                route.total_weight,
                expected
            );
            assert_eq!(route.start(), Some(start_node.id.as_str()));
            assert_eq!(route.goal(), Some(goal_node.id.as_str()));

            let walked = graph.route_weight(&route.steps).expect("consecutive steps are adjacent");
            assert!((walked - route.total_weight).abs() < 1e-6);
            assert!(route
                .cumulative_weights
                .windows(2)
                .all(|pair| pair[0] <= pair[1]));
        }
    }
}

#[test]
fn routes_never_revisit_a_node() {
    let building = fixture_building();
    let locations: Vec<_> = building.locations().cloned().collect();

    for start in &locations {
        for end in &locations {
            let steps = find_route(&building, start, end).into_steps();
            let unique: HashSet<&String> = steps.iter().collect();
            assert_eq!(unique.len(), steps.len(), "{} -> {}", start.id, end.id);
        }
    }
}
