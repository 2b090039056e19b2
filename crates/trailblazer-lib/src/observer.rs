//! Search progress callbacks.
//!
//! Searches report each node state transition to a [`SearchObserver`] instead
//! of mutating shared node state, so a display layer can colour nodes while
//! the search itself stays a pure function of its inputs. Observers are owned
//! by the caller of a single search and never feed back into its result.

use serde::Serialize;
use tracing::trace;

use crate::graph::NodeId;

/// Visitation state of a node within one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Unvisited,
    /// Queued on the frontier as the tip of some partial path.
    Frontier,
    /// Popped and settled; will not be expanded again.
    Finalized,
}

/// A single recorded state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeEvent {
    pub node: NodeId,
    pub state: NodeState,
}

/// Callbacks invoked by the search engine.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SearchObserver {
    /// A path ending at `node` was pushed onto the frontier.
    fn on_frontier(&mut self, _node: NodeId) {}

    /// `node` was popped and finalized.
    fn on_finalized(&mut self, _node: NodeId) {}
}

/// A [`SearchObserver`] that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Collects every transition in the order it happened.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Vec<NodeEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[NodeEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<NodeEvent> {
        self.events
    }

    /// Nodes in the order they were finalized.
    pub fn finalized(&self) -> Vec<NodeId> {
        self.events
            .iter()
            .filter(|event| event.state == NodeState::Finalized)
            .map(|event| event.node)
            .collect()
    }

    /// Latest state observed for `node`.
    pub fn state_of(&self, node: NodeId) -> NodeState {
        self.events
            .iter()
            .rev()
            .find(|event| event.node == node)
            .map(|event| event.state)
            .unwrap_or(NodeState::Unvisited)
    }
}

impl SearchObserver for RecordingObserver {
    fn on_frontier(&mut self, node: NodeId) {
        self.events.push(NodeEvent {
            node,
            state: NodeState::Frontier,
        });
    }

    fn on_finalized(&mut self, node: NodeId) {
        self.events.push(NodeEvent {
            node,
            state: NodeState::Finalized,
        });
    }
}

/// Emits each transition as a `trace`-level event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_frontier(&mut self, node: NodeId) {
        trace!(node, state = "frontier", "node state changed");
    }

    fn on_finalized(&mut self, node: NodeId) {
        trace!(node, state = "finalized", "node state changed");
    }
}

/// Counts finalized nodes while forwarding every event.
pub(crate) struct CountingObserver<'a> {
    inner: &'a mut dyn SearchObserver,
    finalized: usize,
}

impl<'a> CountingObserver<'a> {
    pub(crate) fn new(inner: &'a mut dyn SearchObserver) -> Self {
        Self {
            inner,
            finalized: 0,
        }
    }

    pub(crate) fn finalized(&self) -> usize {
        self.finalized
    }
}

impl SearchObserver for CountingObserver<'_> {
    fn on_frontier(&mut self, node: NodeId) {
        self.inner.on_frontier(node);
    }

    fn on_finalized(&mut self, node: NodeId) {
        self.finalized += 1;
        self.inner.on_finalized(node);
    }
}
