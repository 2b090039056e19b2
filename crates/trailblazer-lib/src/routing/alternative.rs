//! Alternative route search.
//!
//! The primary route is found with A*. Then, for every edge on that route,
//! A* runs again with both endpoints of the edge marked impassable, and the
//! cheapest of the resulting candidates is returned. Endpoints are excluded
//! rather than the bare edge, so an edge ending at the goal yields no
//! candidate at all. The start node is always exempt from exclusion.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::config::AlternativeConfig;
use crate::error::Result;
use crate::graph::{EdgeKey, NodeId, RoadGraph};
use crate::observer::{NoopObserver, SearchObserver};
use crate::path::{search, FrontierOrder, Path};

/// Outcome of an alternative route search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeRoute {
    /// Cheapest qualifying alternative, or empty when none exists.
    pub path: Path,
    /// Best route, whose edges the alternatives avoid.
    pub primary: Path,
    /// Number of exclusion searches that were run.
    pub candidates: usize,
}

/// Best route that avoids at least one edge of the optimal route.
///
/// Returns an empty path when no route exists at all or when every
/// exclusion leaves the goal unreachable.
pub fn find_alternative_route<G: RoadGraph + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
) -> Result<Path> {
    let route = find_alternative_route_with(
        graph,
        start,
        end,
        &AlternativeConfig::default(),
        &mut NoopObserver,
    )?;
    Ok(route.path)
}

/// Alternative route search with explicit configuration and observer.
///
/// The observer receives the events of every underlying A* run in sequence.
pub fn find_alternative_route_with<G: RoadGraph + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
    config: &AlternativeConfig,
    observer: &mut dyn SearchObserver,
) -> Result<AlternativeRoute> {
    config.validate()?;

    let no_exclusions = HashSet::new();
    let primary = search(
        graph,
        start,
        end,
        FrontierOrder::CostPlusHeuristic,
        &no_exclusions,
        observer,
    )?;

    let edges = distinct_edges(&primary);
    if edges.is_empty() {
        debug!(start, end, "primary route has no edges; no alternative exists");
        return Ok(AlternativeRoute {
            path: Path::empty(),
            primary,
            candidates: 0,
        });
    }

    let primary_nodes: HashSet<NodeId> = primary.nodes.iter().copied().collect();
    let mut best: Option<Path> = None;

    for edge in &edges {
        let (a, b) = edge.endpoints();
        let excluded = HashSet::from([a, b]);
        let candidate = search(
            graph,
            start,
            end,
            FrontierOrder::CostPlusHeuristic,
            &excluded,
            observer,
        )?;

        if candidate.is_empty() {
            debug!(%edge, "no route avoids edge endpoints");
            continue;
        }

        let Some(cost) = candidate.total_cost(graph) else {
            continue;
        };

        let difference = difference_from(&primary_nodes, &candidate);
        if difference < config.min_difference {
            debug!(
                %edge,
                difference,
                required = config.min_difference,
                "candidate too similar to primary route"
            );
            continue;
        }

        if best.as_ref().is_none_or(|current| cost < current.cost) {
            best = Some(Path {
                nodes: candidate.nodes,
                cost,
            });
        }
    }

    let path = best.unwrap_or_default();
    debug!(
        start,
        end,
        candidates = edges.len(),
        primary_cost = primary.cost,
        alternative_cost = path.cost,
        found = !path.is_empty(),
        "alternative route search finished"
    );

    Ok(AlternativeRoute {
        path,
        primary,
        candidates: edges.len(),
    })
}

/// Edges of `path` in travel order, without repeats.
fn distinct_edges(path: &Path) -> Vec<EdgeKey> {
    let mut seen = HashSet::new();
    path.edges().filter(|edge| seen.insert(*edge)).collect()
}

/// Share of the candidate's nodes that are not on the primary route.
fn difference_from(primary: &HashSet<NodeId>, candidate: &Path) -> f64 {
    if candidate.is_empty() {
        return 0.0;
    }
    let fresh = candidate
        .nodes
        .iter()
        .filter(|&node| !primary.contains(node))
        .count();
    fresh as f64 / candidate.len() as f64
}
