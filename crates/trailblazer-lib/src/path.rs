use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Endpoint, Error, Result};
use crate::frontier::{FifoFrontier, Frontier, PriorityFrontier};
use crate::graph::{EdgeKey, NodeId, RoadGraph};
use crate::observer::{NoopObserver, SearchObserver};
use crate::visited::VisitedSet;

/// Ordered sequence of nodes returned by a search, with its total edge cost.
///
/// An empty path means no route exists between the requested endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

impl Path {
    /// The "no route" result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zero-cost path consisting of `node` alone.
    pub fn single(node: NodeId) -> Self {
        Self {
            nodes: vec![node],
            cost: 0.0,
        }
    }

    /// Build a path from explicit nodes, summing edge costs from `graph`.
    ///
    /// Returns `None` if two consecutive nodes are not joined by an edge.
    pub fn from_nodes<G: RoadGraph + ?Sized>(graph: &G, nodes: Vec<NodeId>) -> Option<Self> {
        let cost = total_cost(graph, &nodes)?;
        Some(Self { nodes, cost })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Edges traversed by the path, in travel order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.nodes.windows(2).map(|pair| EdgeKey::new(pair[0], pair[1]))
    }

    /// Sum of edge costs recomputed from the graph.
    ///
    /// `None` if the path uses a pair of nodes that is not an edge.
    pub fn total_cost<G: RoadGraph + ?Sized>(&self, graph: &G) -> Option<f64> {
        total_cost(graph, &self.nodes)
    }

    /// Whether every consecutive pair of nodes is joined by an edge of `graph`.
    pub fn is_valid_in<G: RoadGraph + ?Sized>(&self, graph: &G) -> bool {
        self.nodes.iter().all(|&node| graph.contains(node))
            && self
                .nodes
                .windows(2)
                .all(|pair| graph.edge_between(pair[0], pair[1]).is_some())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return f.write_str("<no path>");
        }
        let mut first = true;
        for node in &self.nodes {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
            first = false;
        }
        write!(f, " (cost {})", self.cost)
    }
}

fn total_cost<G: RoadGraph + ?Sized>(graph: &G, nodes: &[NodeId]) -> Option<f64> {
    nodes.windows(2).try_fold(0.0, |sum, pair| {
        graph
            .edge_between(pair[0], pair[1])
            .map(|edge| sum + edge.cost())
    })
}

/// How the frontier orders partial paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierOrder {
    /// Strict arrival order (breadth-first).
    Fifo,
    /// Accumulated path cost (Dijkstra).
    Cost,
    /// Accumulated cost plus the straight-line lower bound to the goal (A*).
    CostPlusHeuristic,
}

impl FrontierOrder {
    fn priority<G: RoadGraph + ?Sized>(
        self,
        graph: &G,
        tip: NodeId,
        goal: NodeId,
        cost: f64,
    ) -> f64 {
        match self {
            FrontierOrder::Fifo => 0.0,
            FrontierOrder::Cost => cost,
            FrontierOrder::CostPlusHeuristic => cost + heuristic(graph, tip, goal),
        }
    }
}

/// Lower bound on the remaining cost from `from` to `goal`: straight-line
/// distance travelled at the fastest speed the graph allows.
pub fn heuristic<G: RoadGraph + ?Sized>(graph: &G, from: NodeId, goal: NodeId) -> f64 {
    let speed = graph.max_road_speed();
    if speed.is_nan() || speed <= 0.0 || speed.is_infinite() {
        return 0.0;
    }
    graph.crow_fly_distance(from, goal) / speed
}

/// Fail with [`Error::InvalidEndpoint`] unless both endpoints are in the graph.
pub fn validate_endpoints<G: RoadGraph + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
) -> Result<()> {
    if !graph.contains(start) {
        return Err(Error::InvalidEndpoint {
            role: Endpoint::Start,
            node: start,
        });
    }
    if !graph.contains(end) {
        return Err(Error::InvalidEndpoint {
            role: Endpoint::End,
            node: end,
        });
    }
    Ok(())
}

/// Find the path with the fewest edges using breadth-first search.
pub fn find_route_bfs<G: RoadGraph + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
) -> Result<Path> {
    search(
        graph,
        start,
        end,
        FrontierOrder::Fifo,
        &HashSet::new(),
        &mut NoopObserver,
    )
}

/// Find the lowest-cost path using Dijkstra's algorithm.
pub fn find_route_dijkstra<G: RoadGraph + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
) -> Result<Path> {
    search(
        graph,
        start,
        end,
        FrontierOrder::Cost,
        &HashSet::new(),
        &mut NoopObserver,
    )
}

/// Find the lowest-cost path using A* with the crow-fly time heuristic.
pub fn find_route_a_star<G: RoadGraph + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
) -> Result<Path> {
    find_route_a_star_excluding(graph, start, end, &HashSet::new())
}

/// A* search that treats every node in `excluded` as impassable.
///
/// `start` is exempt from the exclusion; an excluded `end` can never be
/// reached, so the result is an empty path.
pub fn find_route_a_star_excluding<G: RoadGraph + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
    excluded: &HashSet<NodeId>,
) -> Result<Path> {
    search(
        graph,
        start,
        end,
        FrontierOrder::CostPlusHeuristic,
        excluded,
        &mut NoopObserver,
    )
}

/// Run one search with the given frontier ordering and exclusions, reporting
/// node state transitions to `observer`.
///
/// Every call owns its frontier and finalized set; nothing is shared between
/// calls, so independent searches over the same graph may run concurrently.
pub fn search<G: RoadGraph + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
    order: FrontierOrder,
    excluded: &HashSet<NodeId>,
    observer: &mut dyn SearchObserver,
) -> Result<Path> {
    validate_endpoints(graph, start, end)?;

    let path = match order {
        FrontierOrder::Fifo => run(
            graph,
            start,
            end,
            order,
            excluded,
            FifoFrontier::new(),
            observer,
        ),
        FrontierOrder::Cost | FrontierOrder::CostPlusHeuristic => run(
            graph,
            start,
            end,
            order,
            excluded,
            PriorityFrontier::new(),
            observer,
        ),
    };

    debug!(
        ?order,
        start,
        end,
        excluded = excluded.len(),
        hops = path.hop_count(),
        cost = path.cost,
        found = !path.is_empty(),
        "search finished"
    );

    Ok(path)
}

struct PartialPath {
    nodes: Vec<NodeId>,
    cost: f64,
}

impl PartialPath {
    fn tip(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    fn extended(&self, next: NodeId, edge_cost: f64) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(next);
        Self {
            nodes,
            cost: self.cost + edge_cost,
        }
    }
}

fn run<G, F>(
    graph: &G,
    start: NodeId,
    end: NodeId,
    order: FrontierOrder,
    excluded: &HashSet<NodeId>,
    mut frontier: F,
    observer: &mut dyn SearchObserver,
) -> Path
where
    G: RoadGraph + ?Sized,
    F: Frontier<PartialPath>,
{
    let mut visited = VisitedSet::new();

    let seed = PartialPath {
        nodes: vec![start],
        cost: 0.0,
    };
    let priority = order.priority(graph, start, end, 0.0);
    observer.on_frontier(start);
    frontier.push(seed, priority);

    while let Some(current) = frontier.pop() {
        let Some(tip) = current.tip() else {
            continue;
        };
        // A node may sit on the frontier under several partial paths; only
        // the first one popped is expanded.
        if !visited.finalize(tip) {
            continue;
        }
        observer.on_finalized(tip);

        if tip == end {
            return Path {
                nodes: current.nodes,
                cost: current.cost,
            };
        }

        for &next in graph.neighbours(tip) {
            if visited.contains(next) || excluded.contains(&next) {
                continue;
            }
            let Some(edge) = graph.edge_between(tip, next) else {
                continue;
            };
            let extended = current.extended(next, edge.cost());
            let priority = order.priority(graph, next, end, extended.cost);
            observer.on_frontier(next);
            frontier.push(extended, priority);
        }
    }

    Path::empty()
}
