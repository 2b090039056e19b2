#![allow(dead_code)]

use std::collections::HashSet;

use trailblazer_lib::{Graph, GraphBuilder, NodeId, Position, RoadGraph};

pub const A: NodeId = 1;
pub const B: NodeId = 2;
pub const C: NodeId = 3;
pub const D: NodeId = 4;

/// A-B(1), B-D(1), A-C(5), C-D(1).
pub fn diamond() -> Graph {
    GraphBuilder::new()
        .node(A, "A", Position::new(0.0, 0.0))
        .node(B, "B", Position::new(1.0, 0.0))
        .node(C, "C", Position::new(0.0, 1.0))
        .node(D, "D", Position::new(1.0, 1.0))
        .edge(A, B, 1.0)
        .edge(B, D, 1.0)
        .edge(A, C, 5.0)
        .edge(C, D, 1.0)
        .build()
        .expect("diamond builds")
}

/// Two components: {1, 2} and {3, 4}.
pub fn split() -> Graph {
    GraphBuilder::new()
        .node(1, "north-a", Position::new(0.0, 0.0))
        .node(2, "north-b", Position::new(1.0, 0.0))
        .node(3, "south-a", Position::new(0.0, 5.0))
        .node(4, "south-b", Position::new(1.0, 5.0))
        .edge(1, 2, 1.0)
        .edge(3, 4, 1.0)
        .build()
        .expect("split graph builds")
}

/// Rectangular grid with pseudo-random integer costs between 1 and 9.
///
/// Node `r * cols + c` sits at `(c, r)`; every edge has length 1, so the
/// derived maximum road speed is 1 / (cheapest edge cost).
pub fn grid(rows: i64, cols: i64, seed: u64) -> Graph {
    let mut builder = GraphBuilder::new();
    for r in 0..rows {
        for c in 0..cols {
            builder = builder.node(
                r * cols + c,
                format!("r{r}c{c}"),
                Position::new(c as f64, r as f64),
            );
        }
    }

    let mut state = seed;
    let mut next_cost = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % 9 + 1) as f64
    };

    for r in 0..rows {
        for c in 0..cols {
            let id = r * cols + c;
            if c + 1 < cols {
                builder = builder.edge(id, id + 1, next_cost());
            }
            if r + 1 < rows {
                builder = builder.edge(id, id + cols, next_cost());
            }
        }
    }
    builder.build().expect("grid builds")
}

/// Every simple path from `start` to `end`, by exhaustive depth-first search.
pub fn all_simple_paths<G: RoadGraph>(graph: &G, start: NodeId, end: NodeId) -> Vec<Vec<NodeId>> {
    fn walk<G: RoadGraph>(
        graph: &G,
        end: NodeId,
        current: &mut Vec<NodeId>,
        on_path: &mut HashSet<NodeId>,
        found: &mut Vec<Vec<NodeId>>,
    ) {
        let Some(&tip) = current.last() else {
            return;
        };
        if tip == end {
            found.push(current.clone());
            return;
        }
        for &next in graph.neighbours(tip) {
            if on_path.insert(next) {
                current.push(next);
                walk(graph, end, current, on_path, found);
                current.pop();
                on_path.remove(&next);
            }
        }
    }

    let mut found = Vec::new();
    let mut current = vec![start];
    let mut on_path = HashSet::from([start]);
    walk(graph, end, &mut current, &mut on_path, &mut found);
    found
}

pub fn path_cost<G: RoadGraph>(graph: &G, nodes: &[NodeId]) -> f64 {
    nodes
        .windows(2)
        .map(|pair| {
            graph
                .edge_between(pair[0], pair[1])
                .expect("consecutive nodes share an edge")
                .cost()
        })
        .sum()
}
