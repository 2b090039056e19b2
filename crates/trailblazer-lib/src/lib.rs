//! Trailblazer library entry points.
//!
//! This crate finds routes through weighted, undirected road graphs using
//! breadth-first search, Dijkstra's algorithm, A*, and an "alternative route"
//! search that avoids part of the best route. Graph loading and display are
//! left to the host: it supplies a [`RoadGraph`] implementation (or builds a
//! [`Graph`] in memory) and consumes the returned [`Path`] or [`RoutePlan`].
//!

pub mod config;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod logging;
pub mod observer;
pub mod path;
pub mod routing;
pub mod visited;

pub use config::{AlternativeConfig, SearchConfig};
pub use error::{Endpoint, Error, Result};
pub use graph::{Edge, EdgeKey, Graph, GraphBuilder, Node, NodeId, Position, RoadGraph};
pub use observer::{
    NodeEvent, NodeState, NoopObserver, RecordingObserver, SearchObserver, TracingObserver,
};
pub use path::{
    find_route_a_star, find_route_a_star_excluding, find_route_bfs, find_route_dijkstra, search,
    FrontierOrder, Path,
};
pub use routing::{
    find_alternative_route, find_alternative_route_with, plan_route, plan_route_observed,
    AlternativeRoute, RouteAlgorithm, RoutePlan, RoutePlanner, RouteRequest,
};
