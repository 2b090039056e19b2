use std::sync::Arc;
use std::thread;

use trailblazer_lib::{
    find_route_a_star, find_route_dijkstra, Error, Graph, GraphBuilder, NodeId, Position,
    RoadGraph,
};

fn town() -> GraphBuilder {
    GraphBuilder::new()
        .node(10, "Depot", Position::new(0.0, 0.0))
        .node(20, "Market", Position::new(4.0, 0.0))
        .node(30, "Harbour", Position::new(4.0, 3.0))
        .edge(10, 20, 2.0)
        .edge(20, 30, 3.0)
}

#[test]
fn builder_exposes_nodes_and_edges() {
    let graph = town().build().expect("graph builds");
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(!graph.is_empty());
    assert_eq!(graph.node_id_by_name("Harbour"), Some(30));
    assert_eq!(graph.node(20).map(|n| n.name.as_str()), Some("Market"));
    assert_eq!(graph.neighbours(20), &[10, 30]);
    assert!(graph.contains(10));
    assert!(!graph.contains(40));
}

#[test]
fn derived_speed_keeps_heuristic_below_true_cost() {
    let graph = town().build().expect("graph builds");
    // Depot-Market: 4 units in cost 2 -> speed 2; Market-Harbour: 3 in 3 -> 1.
    assert_eq!(graph.max_road_speed(), 2.0);

    let ids: Vec<NodeId> = graph.nodes().map(|n| n.id).collect();
    for &from in &ids {
        for &to in &ids {
            let lower_bound = graph.crow_fly_distance(from, to) / graph.max_road_speed();
            let actual = find_route_dijkstra(&graph, from, to).expect("valid").cost;
            assert!(lower_bound <= actual + 1e-12, "{from}->{to}");
        }
    }
}

#[test]
fn explicit_speed_overrides_derivation() {
    let graph = town().max_road_speed(50.0).build().expect("graph builds");
    assert_eq!(graph.max_road_speed(), 50.0);

    let err = town().max_road_speed(-1.0).build().expect_err("negative speed");
    assert!(matches!(err, Error::InvalidRoadSpeed { .. }));
}

/// Direct road 1-2 (length 10, cost 10) next to a fast detour 1-3-2.
fn bypass() -> GraphBuilder {
    GraphBuilder::new()
        .node(1, "west", Position::new(0.0, 0.0))
        .node(2, "east", Position::new(10.0, 0.0))
        .node(3, "ring", Position::new(5.0, 0.0))
        .edge(1, 2, 10.0)
        .edge(1, 3, 1.0)
        .edge(3, 2, 1.0)
}

#[test]
fn explicit_speed_slower_than_an_edge_is_rejected() {
    let err = bypass().max_road_speed(0.1).build().expect_err("speed too low");
    match err {
        Error::RoadSpeedBelowFastestEdge { speed, fastest } => {
            assert_eq!(speed, 0.1);
            assert_eq!(fastest, 5.0);
        }
        other => panic!("unexpected error: {other}"),
    }

    let graph = bypass().build().expect("graph builds");
    let dijkstra = find_route_dijkstra(&graph, 1, 2).expect("valid");
    let a_star = find_route_a_star(&graph, 1, 2).expect("valid");
    assert_eq!(dijkstra.nodes, vec![1, 3, 2]);
    assert_eq!(a_star, dijkstra);
}

#[test]
fn invalid_costs_are_rejected() {
    let err = town().edge(10, 30, f64::NAN).build().expect_err("nan cost");
    assert!(format!("{err}").contains("invalid cost"));
}

#[test]
fn empty_graph_is_valid() {
    let graph = GraphBuilder::new().build().expect("empty graph builds");
    assert!(graph.is_empty());
    assert!(graph.max_road_speed().is_infinite());
    assert_eq!(graph.edges().count(), 0);
}

#[test]
fn graph_can_be_searched_from_many_threads() {
    let graph = Arc::new(town().build().expect("graph builds"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph: Arc<Graph> = Arc::clone(&graph);
            thread::spawn(move || find_route_dijkstra(graph.as_ref(), 10, 30).expect("valid"))
        })
        .collect();

    for handle in handles {
        let path = handle.join().expect("thread completes");
        assert_eq!(path.nodes, vec![10, 20, 30]);
        assert_eq!(path.cost, 5.0);
    }
}
