//! Route planning strategies implementing the Strategy pattern.
//!
//! Each algorithm is wrapped in a planner implementing [`RoutePlanner`], so
//! `plan_route` can dispatch on [`RouteAlgorithm`] without knowing how any
//! particular search is configured.

use std::collections::HashSet;

use crate::config::AlternativeConfig;
use crate::error::Result;
use crate::graph::{NodeId, RoadGraph};
use crate::observer::SearchObserver;
use crate::path::{search, FrontierOrder, Path};

use super::alternative::find_alternative_route_with;
use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search on the given graph.
    ///
    /// Returns an empty path if no route exists and an error only when the
    /// request itself is malformed.
    fn find_path(
        &self,
        graph: &dyn RoadGraph,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<Path>;
}

/// Breadth-first search planner; minimises hop count and ignores edge costs.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner {
    excluded: HashSet<NodeId>,
}

impl BfsPlanner {
    /// BFS planner that treats `excluded` nodes as impassable.
    pub fn excluding(excluded: HashSet<NodeId>) -> Self {
        Self { excluded }
    }
}

impl RoutePlanner for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn find_path(
        &self,
        graph: &dyn RoadGraph,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<Path> {
        search(graph, start, goal, FrontierOrder::Fifo, &self.excluded, observer)
    }
}

/// Dijkstra's algorithm planner; minimises total edge cost.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner {
    excluded: HashSet<NodeId>,
}

impl DijkstraPlanner {
    /// Dijkstra planner that treats `excluded` nodes as impassable.
    pub fn excluding(excluded: HashSet<NodeId>) -> Self {
        Self { excluded }
    }
}

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &dyn RoadGraph,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<Path> {
        search(graph, start, goal, FrontierOrder::Cost, &self.excluded, observer)
    }
}

/// A* planner using crow-fly distance over the maximum road speed.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    excluded: HashSet<NodeId>,
}

impl AStarPlanner {
    /// A* planner that treats `excluded` nodes as impassable.
    pub fn excluding(excluded: HashSet<NodeId>) -> Self {
        Self { excluded }
    }
}

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &dyn RoadGraph,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<Path> {
        search(
            graph,
            start,
            goal,
            FrontierOrder::CostPlusHeuristic,
            &self.excluded,
            observer,
        )
    }
}

/// Planner returning the best route that avoids part of the optimal one.
#[derive(Debug, Clone, Default)]
pub struct AlternativePlanner {
    config: AlternativeConfig,
}

impl AlternativePlanner {
    pub fn new(config: AlternativeConfig) -> Self {
        Self { config }
    }
}

impl RoutePlanner for AlternativePlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Alternative
    }

    fn find_path(
        &self,
        graph: &dyn RoadGraph,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<Path> {
        find_alternative_route_with(graph, start, goal, &self.config, observer)
            .map(|route| route.path)
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    let excluded: HashSet<NodeId> = request.avoid.iter().copied().collect();
    match request.algorithm {
        RouteAlgorithm::Bfs => Box::new(BfsPlanner::excluding(excluded)),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner::excluding(excluded)),
        RouteAlgorithm::AStar => Box::new(AStarPlanner::excluding(excluded)),
        RouteAlgorithm::Alternative => Box::new(AlternativePlanner::new(request.alternative)),
    }
}
