use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Numeric identifier for a node in the road graph.
pub type NodeId = i64;

/// Planar coordinates for a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A vertex of the road graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub position: Position,
}

/// Order-independent identity of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both endpoints, smallest identifier first.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.low == node || self.high == node
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Undirected road segment with a non-negative traversal cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
}

impl Edge {
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from, self.to)
    }

    /// The endpoint opposite to `node`, if `node` is one of the endpoints.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Read-only view of a road network consumed by the search routines.
///
/// Implementations must be static for the duration of a search call. The
/// crate ships [`Graph`] as a ready-made in-memory implementation; hosts with
/// their own network representation can implement this trait instead.
pub trait RoadGraph {
    /// Whether `node` is part of the graph.
    fn contains(&self, node: NodeId) -> bool;

    /// Nodes directly connected to `node`, in ascending identifier order.
    fn neighbours(&self, node: NodeId) -> &[NodeId];

    /// The edge joining two adjacent nodes.
    fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge>;

    /// Straight-line distance between two nodes.
    fn crow_fly_distance(&self, a: NodeId, b: NodeId) -> f64;

    /// Upper bound on traversal speed anywhere in the graph, in distance
    /// units per cost unit. May be infinite.
    fn max_road_speed(&self) -> f64;
}

/// In-memory road graph.
///
/// Clones are cheap: node, adjacency and edge tables are shared behind
/// [`Arc`], so one graph can back any number of concurrent searches.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Arc<HashMap<NodeId, Node>>,
    name_to_id: Arc<HashMap<String, NodeId>>,
    adjacency: Arc<HashMap<NodeId, Vec<NodeId>>>,
    edges: Arc<HashMap<EdgeKey, Edge>>,
    max_road_speed: f64,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Lookup a node identifier by its case-sensitive name.
    pub fn node_id_by_name(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            nodes: Arc::new(HashMap::new()),
            name_to_id: Arc::new(HashMap::new()),
            adjacency: Arc::new(HashMap::new()),
            edges: Arc::new(HashMap::new()),
            max_road_speed: f64::INFINITY,
        }
    }
}

impl RoadGraph for Graph {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn neighbours(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    fn crow_fly_distance(&self, a: NodeId, b: NodeId) -> f64 {
        match (self.nodes.get(&a), self.nodes.get(&b)) {
            (Some(a), Some(b)) => a.position.distance_to(&b.position),
            _ => 0.0,
        }
    }

    fn max_road_speed(&self) -> f64 {
        self.max_road_speed
    }
}

/// Incrementally assembles and validates a [`Graph`].
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    max_road_speed: Option<f64>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, id: NodeId, name: impl Into<String>, position: Position) -> Self {
        self.nodes.push(Node {
            id,
            name: name.into(),
            position,
        });
        self
    }

    pub fn edge(mut self, from: NodeId, to: NodeId, cost: f64) -> Self {
        self.edges.push(Edge { from, to, cost });
        self
    }

    /// Fix the maximum road speed instead of deriving it from the edges.
    ///
    /// The value must be at least the speed implied by the fastest edge,
    /// otherwise [`build`](Self::build) fails with
    /// [`Error::RoadSpeedBelowFastestEdge`].
    pub fn max_road_speed(mut self, speed: f64) -> Self {
        self.max_road_speed = Some(speed);
        self
    }

    pub fn build(self) -> Result<Graph> {
        let mut nodes: HashMap<NodeId, Node> = HashMap::with_capacity(self.nodes.len());
        let mut name_to_id: HashMap<String, NodeId> = HashMap::with_capacity(self.nodes.len());
        for node in self.nodes {
            if nodes.contains_key(&node.id) {
                return Err(Error::DuplicateNode { node: node.id });
            }
            name_to_id.entry(node.name.clone()).or_insert(node.id);
            nodes.insert(node.id, node);
        }

        let mut edges: HashMap<EdgeKey, Edge> = HashMap::with_capacity(self.edges.len());
        for edge in self.edges {
            validate_edge(&nodes, &edge)?;
            match edges.entry(edge.key()) {
                Entry::Occupied(mut existing) => {
                    debug!(
                        edge = %edge.key(),
                        kept = existing.get().cost.min(edge.cost),
                        "collapsing parallel edge"
                    );
                    if edge.cost < existing.get().cost {
                        existing.insert(edge);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(edge);
                }
            }
        }

        let mut adjacency: HashMap<NodeId, Vec<NodeId>> =
            nodes.keys().map(|&id| (id, Vec::new())).collect();
        for edge in edges.values() {
            adjacency.entry(edge.from).or_default().push(edge.to);
            adjacency.entry(edge.to).or_default().push(edge.from);
        }
        for targets in adjacency.values_mut() {
            targets.sort_unstable();
        }

        let fastest = derive_max_road_speed(&nodes, &edges);
        let max_road_speed = match (self.max_road_speed, fastest) {
            (Some(speed), _) if speed.is_nan() || speed <= 0.0 => {
                return Err(Error::InvalidRoadSpeed { speed });
            }
            (Some(speed), Some(fastest)) if speed < fastest => {
                return Err(Error::RoadSpeedBelowFastestEdge { speed, fastest });
            }
            (Some(speed), _) => speed,
            (None, fastest) => fastest.unwrap_or(f64::INFINITY),
        };

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            max_road_speed,
            "built road graph"
        );

        Ok(Graph {
            nodes: Arc::new(nodes),
            name_to_id: Arc::new(name_to_id),
            adjacency: Arc::new(adjacency),
            edges: Arc::new(edges),
            max_road_speed,
        })
    }
}

fn validate_edge(nodes: &HashMap<NodeId, Node>, edge: &Edge) -> Result<()> {
    for endpoint in [edge.from, edge.to] {
        if !nodes.contains_key(&endpoint) {
            return Err(Error::UnknownNode { node: endpoint });
        }
    }
    if edge.from == edge.to {
        return Err(Error::SelfLoop { node: edge.from });
    }
    if !edge.cost.is_finite() || edge.cost < 0.0 {
        return Err(Error::InvalidEdgeCost {
            from: edge.from,
            to: edge.to,
            cost: edge.cost,
        });
    }
    Ok(())
}

/// Fastest speed implied by any single edge: crow-fly length over cost.
///
/// Using the maximum keeps `distance / speed` a lower bound on the remaining
/// cost of every route, so the A* heuristic stays admissible. `None` when no
/// edge has a non-zero length.
fn derive_max_road_speed(
    nodes: &HashMap<NodeId, Node>,
    edges: &HashMap<EdgeKey, Edge>,
) -> Option<f64> {
    let mut fastest: Option<f64> = None;
    for edge in edges.values() {
        let (Some(a), Some(b)) = (nodes.get(&edge.from), nodes.get(&edge.to)) else {
            continue;
        };
        let length = a.position.distance_to(&b.position);
        if length == 0.0 {
            continue;
        }
        let speed = if edge.cost == 0.0 {
            warn!(
                edge = %edge.key(),
                "zero-cost edge with non-zero length; A* heuristic disabled"
            );
            f64::INFINITY
        } else {
            length / edge.cost
        };
        fastest = Some(fastest.map_or(speed, |current| current.max(speed)));
    }
    fastest
}
