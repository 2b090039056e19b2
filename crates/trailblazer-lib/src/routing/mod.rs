//! Route planning module.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (BFS, Dijkstra, A*, alternative)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! The routing module uses the Strategy pattern via the [`RoutePlanner`] trait.
//! Each algorithm is encapsulated in its own planner struct, allowing new
//! algorithms to be added without modifying the orchestration logic.
//!
//! # Example
//!
//! ```
//! use trailblazer_lib::{plan_route, GraphBuilder, Position, RouteRequest};
//!
//! let graph = GraphBuilder::new()
//!     .node(1, "A", Position::new(0.0, 0.0))
//!     .node(2, "B", Position::new(1.0, 0.0))
//!     .edge(1, 2, 1.0)
//!     .build()?;
//! let plan = plan_route(&graph, &RouteRequest::a_star(1, 2))?;
//! assert_eq!(plan.steps, vec![1, 2]);
//! # Ok::<(), trailblazer_lib::Error>(())
//! ```

pub mod alternative;
mod planner;

pub use alternative::{find_alternative_route, find_alternative_route_with, AlternativeRoute};
pub use planner::{
    select_planner, AStarPlanner, AlternativePlanner, BfsPlanner, DijkstraPlanner, RoutePlanner,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{AlternativeConfig, SearchConfig};
use crate::error::{Error, Result};
use crate::graph::{NodeId, RoadGraph};
use crate::observer::{CountingObserver, NoopObserver, SearchObserver};
use crate::path::validate_endpoints;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (unweighted graph).
    Bfs,
    /// Dijkstra's algorithm (weighted graph).
    Dijkstra,
    /// A* search (heuristic guided).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Best route avoiding part of the A* route.
    Alternative,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Alternative => "alternative",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(RouteAlgorithm::Bfs),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "a_star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            "alternative" | "alt" => Ok(RouteAlgorithm::Alternative),
            other => Err(Error::InvalidConfig {
                message: format!("unknown route algorithm: {other}"),
            }),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: NodeId,
    pub goal: NodeId,
    pub algorithm: RouteAlgorithm,
    /// Nodes that must not appear in the route. Not supported together with
    /// [`RouteAlgorithm::Alternative`].
    pub avoid: Vec<NodeId>,
    /// Tuning for [`RouteAlgorithm::Alternative`].
    pub alternative: AlternativeConfig,
}

impl RouteRequest {
    pub fn new(start: NodeId, goal: NodeId, algorithm: RouteAlgorithm) -> Self {
        Self {
            start,
            goal,
            algorithm,
            avoid: Vec::new(),
            alternative: AlternativeConfig::default(),
        }
    }

    /// Convenience constructor for BFS routes without extra constraints.
    pub fn bfs(start: NodeId, goal: NodeId) -> Self {
        Self::new(start, goal, RouteAlgorithm::Bfs)
    }

    pub fn dijkstra(start: NodeId, goal: NodeId) -> Self {
        Self::new(start, goal, RouteAlgorithm::Dijkstra)
    }

    pub fn a_star(start: NodeId, goal: NodeId) -> Self {
        Self::new(start, goal, RouteAlgorithm::AStar)
    }

    pub fn alternative(start: NodeId, goal: NodeId) -> Self {
        Self::new(start, goal, RouteAlgorithm::Alternative)
    }

    /// Request using the configured default algorithm and alternative tuning.
    pub fn from_config(start: NodeId, goal: NodeId, config: &SearchConfig) -> Self {
        Self {
            alternative: config.alternative,
            ..Self::new(start, goal, config.default_algorithm)
        }
    }

    /// Avoid the given nodes.
    pub fn avoiding(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.avoid.extend(nodes);
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: NodeId,
    pub goal: NodeId,
    /// Nodes from start to goal; empty when no route exists.
    pub steps: Vec<NodeId>,
    pub cost: f64,
    /// Nodes finalized across every search the planner ran.
    pub explored: usize,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_found(&self) -> bool {
        !self.steps.is_empty()
    }
}

/// Compute a route using the requested algorithm.
///
/// Planners are chosen at runtime, so the graph is taken as a trait object;
/// any `&impl RoadGraph` coerces.
pub fn plan_route(graph: &dyn RoadGraph, request: &RouteRequest) -> Result<RoutePlan> {
    plan_route_observed(graph, request, &mut NoopObserver)
}

/// Compute a route, reporting node state transitions to `observer`.
///
/// This is the main entry point for route planning. It:
/// 1. Validates the endpoints and options
/// 2. Selects the planner strategy for the requested algorithm
/// 3. Executes the search and summarises it as a [`RoutePlan`]
pub fn plan_route_observed(
    graph: &dyn RoadGraph,
    request: &RouteRequest,
    observer: &mut dyn SearchObserver,
) -> Result<RoutePlan> {
    // Step 1: Validate the request
    validate_endpoints(graph, request.start, request.goal)?;
    if request.algorithm == RouteAlgorithm::Alternative && !request.avoid.is_empty() {
        return Err(Error::UnsupportedRouteOption {
            option: format!("avoid with algorithm {}", request.algorithm),
        });
    }

    // Step 2: Select planner
    let planner = select_planner(request);

    // Step 3: Execute pathfinding
    let mut counter = CountingObserver::new(observer);
    let path = planner.find_path(graph, request.start, request.goal, &mut counter)?;
    let explored = counter.finalized();

    info!(
        algorithm = %request.algorithm,
        start = request.start,
        goal = request.goal,
        hops = path.hop_count(),
        cost = path.cost,
        explored,
        found = !path.is_empty(),
        "route planned"
    );

    Ok(RoutePlan {
        algorithm: request.algorithm,
        start: request.start,
        goal: request.goal,
        steps: path.nodes,
        cost: path.cost,
        explored,
    })
}
