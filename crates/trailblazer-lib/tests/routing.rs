mod common;

use std::sync::Arc;

use common::{diamond, grid, split, A, B, C, D};
use trailblazer_lib::{
    plan_route, plan_route_observed, AlternativeConfig, Error, Graph, NodeState,
    RecordingObserver, RoadGraph, RouteAlgorithm, RouteRequest, SearchConfig,
};

#[test]
fn bfs_route_plan_succeeds() {
    let graph = diamond();
    let plan = plan_route(&graph, &RouteRequest::bfs(A, D)).expect("route planned");

    assert_eq!(plan.algorithm, RouteAlgorithm::Bfs);
    assert_eq!(plan.start, A);
    assert_eq!(plan.goal, D);
    assert_eq!(plan.hop_count(), 2);
    assert!(plan.explored >= 3);
}

#[test]
fn weighted_route_plans_agree() {
    let graph = grid(5, 5, 21);
    let dijkstra = plan_route(&graph, &RouteRequest::dijkstra(0, 24)).expect("route planned");
    let a_star = plan_route(&graph, &RouteRequest::a_star(0, 24)).expect("route planned");

    assert_eq!(dijkstra.algorithm, RouteAlgorithm::Dijkstra);
    assert_eq!(a_star.algorithm, RouteAlgorithm::AStar);
    assert_eq!(dijkstra.cost, a_star.cost);
    assert!(a_star.explored <= dijkstra.explored);
}

#[test]
fn alternative_route_plan_reports_detour() {
    let graph = diamond();
    let plan = plan_route(&graph, &RouteRequest::alternative(A, D)).expect("route planned");
    assert_eq!(plan.steps, vec![A, C, D]);
    assert_eq!(plan.cost, 6.0);
}

#[test]
fn avoided_nodes_are_skipped() {
    let graph = diamond();
    for request in [
        RouteRequest::bfs(A, D),
        RouteRequest::dijkstra(A, D),
        RouteRequest::a_star(A, D),
    ] {
        let plan = plan_route(&graph, &request.avoiding([B])).expect("route planned");
        assert_eq!(plan.steps, vec![A, C, D]);
    }
}

#[test]
fn avoided_goal_yields_empty_plan() {
    let graph = diamond();
    let plan = plan_route(&graph, &RouteRequest::dijkstra(A, D).avoiding([D])).expect("planned");
    assert!(!plan.is_found());
    assert_eq!(plan.hop_count(), 0);
}

#[test]
fn avoid_is_rejected_for_alternative_routes() {
    let graph = diamond();
    let request = RouteRequest::alternative(A, D).avoiding([B]);
    let error = plan_route(&graph, &request).expect_err("unsupported combination");
    assert!(matches!(error, Error::UnsupportedRouteOption { .. }));
    assert!(format!("{error}").contains("not supported"));
}

#[test]
fn disconnected_plan_is_empty_not_an_error() {
    let graph = split();
    for algorithm in [
        RouteAlgorithm::Bfs,
        RouteAlgorithm::Dijkstra,
        RouteAlgorithm::AStar,
        RouteAlgorithm::Alternative,
    ] {
        let plan = plan_route(&graph, &RouteRequest::new(1, 3, algorithm)).expect("planned");
        assert!(!plan.is_found(), "{algorithm}");
    }
}

#[test]
fn unknown_start_is_rejected() {
    let graph = diamond();
    let error = plan_route(&graph, &RouteRequest::a_star(77, D)).expect_err("unknown start");
    assert!(format!("{error}").contains("start node 77"));
}

#[test]
fn observed_plan_reports_transitions() {
    let graph = diamond();
    let mut observer = RecordingObserver::new();
    let plan = plan_route_observed(&graph, &RouteRequest::a_star(A, D), &mut observer)
        .expect("route planned");

    assert_eq!(plan.explored, observer.finalized().len());
    assert_eq!(observer.state_of(D), NodeState::Finalized);
    assert_eq!(observer.state_of(C), NodeState::Frontier);
}

#[test]
fn configured_defaults_drive_the_request() {
    let graph = diamond();
    let config = SearchConfig {
        default_algorithm: RouteAlgorithm::Alternative,
        alternative: AlternativeConfig::sufficiently_different(),
    };
    let plan = plan_route(&graph, &RouteRequest::from_config(A, D, &config)).expect("planned");
    // [A, C, D] has one node (C) off the primary route: 1/3 >= 0.2.
    assert_eq!(plan.algorithm, RouteAlgorithm::Alternative);
    assert_eq!(plan.steps, vec![A, C, D]);
}

#[test]
fn route_plan_serializes_to_json() {
    let graph = diamond();
    let plan = plan_route(&graph, &RouteRequest::a_star(A, D)).expect("route planned");
    let json = serde_json::to_value(&plan).expect("serializes");
    assert_eq!(json["algorithm"], "a-star");
    assert_eq!(json["steps"], serde_json::json!([A, B, D]));
    assert_eq!(json["cost"], 2.0);
}

#[test]
fn plans_through_trait_objects_and_shared_graphs() {
    let shared: Arc<Graph> = Arc::new(diamond());
    let dynamic: &dyn RoadGraph = shared.as_ref();

    let from_dyn = plan_route(dynamic, &RouteRequest::dijkstra(A, D)).expect("route planned");
    let from_arc = plan_route(&*shared, &RouteRequest::dijkstra(A, D)).expect("route planned");
    assert_eq!(from_dyn, from_arc);
    assert_eq!(from_dyn.steps, vec![A, B, D]);
}
