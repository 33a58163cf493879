use std::collections::HashMap;
use std::fmt;

use super::store::{Generation, PositionStore};
use super::{
    LayoutAlgorithm, LayoutEngine, LayoutEngineError, LayoutRequest, LayoutResponse, NodeSize,
};
use crate::topology::{Position, TopologyError, TopologyGraph, parse_topology};

/// Whether the current graph's positions came from the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    NeedsLayout,
    PositionsKnown,
}

/// User-facing view options that shape the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub show_ports: bool,
    pub algorithm: LayoutAlgorithm,
    pub node_size: NodeSize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            show_ports: true,
            algorithm: LayoutAlgorithm::default(),
            node_size: NodeSize::default(),
        }
    }
}

/// What an update did to node positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// The engine ran and its positions were stored.
    Applied(Generation),
    /// Stored positions were reused; the engine was not called.
    Reused,
    /// A newer request was issued while this one ran; its result was dropped.
    Discarded { stale: Generation, current: Generation },
    /// Nothing is loaded yet; only the option was recorded.
    Idle,
}

/// A layout request that has been issued but not yet completed.
#[derive(Debug, Clone)]
pub struct LayoutTicket {
    pub generation: Generation,
    pub request: LayoutRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Topology(TopologyError),
    Layout(LayoutEngineError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topology(e) => write!(f, "{e}"),
            Self::Layout(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Topology(e) => Some(e),
            Self::Layout(e) => Some(e),
        }
    }
}

impl From<TopologyError> for SessionError {
    fn from(err: TopologyError) -> Self {
        Self::Topology(err)
    }
}

impl From<LayoutEngineError> for SessionError {
    fn from(err: LayoutEngineError) -> Self {
        Self::Layout(err)
    }
}

/// One open topology: its source text, derived graph, and position memory.
///
/// The layout engine is only consulted when the layout identity changes: a new source, a new
/// algorithm, or a cosmetic update whose device/port set differs from what is on screen.
/// Everything else reuses the [`PositionStore`], so manual drags survive.
pub struct TopologySession<E> {
    engine: E,
    options: SessionOptions,
    source: Option<String>,
    graph: TopologyGraph,
    store: PositionStore,
    state: LayoutState,
}

impl<E: LayoutEngine> TopologySession<E> {
    pub fn new(engine: E, options: SessionOptions) -> Self {
        Self {
            engine,
            options,
            source: None,
            graph: TopologyGraph::default(),
            store: PositionStore::new(),
            state: LayoutState::NeedsLayout,
        }
    }

    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    pub fn store(&self) -> &PositionStore {
        &self.store
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Load a new source. Always lays out from scratch.
    ///
    /// Nothing is committed until the engine answers: a parse or layout failure leaves the
    /// previous source, graph and positions exactly as they were.
    pub async fn load_source(
        &mut self,
        text: impl Into<String>,
    ) -> Result<LayoutOutcome, SessionError> {
        let text = text.into();
        let graph = parse_topology(&text, self.options.show_ports)?;

        tracing::info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "loaded topology source"
        );

        let options = self.options;
        self.lay_out(graph, options, Some(text)).await
    }

    /// Toggle port-detail display. Keeps positions when the device/port set is unchanged.
    pub async fn set_show_ports(
        &mut self,
        show_ports: bool,
    ) -> Result<LayoutOutcome, SessionError> {
        let Some(source) = &self.source else {
            self.options.show_ports = show_ports;
            return Ok(LayoutOutcome::Idle);
        };

        let mut graph = parse_topology(source, show_ports)?;
        let options = SessionOptions {
            show_ports,
            ..self.options
        };

        if self.state == LayoutState::PositionsKnown && graph.identity() == self.graph.identity() {
            for node in &mut graph.nodes {
                if let Some(position) = self.store.get(&node.id) {
                    node.position = position;
                }
            }
            self.graph = graph;
            self.options = options;
            tracing::debug!(show_ports, "reused stored positions");
            return Ok(LayoutOutcome::Reused);
        }

        tracing::debug!(
            show_ports,
            state = ?self.state,
            "cosmetic update needs a fresh layout"
        );
        self.lay_out(graph, options, None).await
    }

    /// Switch layout algorithm. Always recomputes and overwrites every stored position.
    ///
    /// The new algorithm only sticks once a layout with it succeeds.
    pub async fn set_algorithm(
        &mut self,
        algorithm: LayoutAlgorithm,
    ) -> Result<LayoutOutcome, SessionError> {
        if self.source.is_none() {
            self.options.algorithm = algorithm;
            return Ok(LayoutOutcome::Idle);
        }
        tracing::debug!(%algorithm, "layout algorithm changed");
        let options = SessionOptions {
            algorithm,
            ..self.options
        };
        let graph = self.graph.clone();
        self.lay_out(graph, options, None).await
    }

    /// True when `text` is the loaded source and its layout is already known.
    pub fn is_up_to_date(&self, text: &str) -> bool {
        self.state == LayoutState::PositionsKnown && self.source.as_deref() == Some(text)
    }

    /// A drag finished: remember where this one node was dropped.
    pub fn node_dragged(&mut self, node_id: &str, position: Position) {
        self.store.record(node_id, position);
        if let Some(node) = self.graph.node_mut(node_id) {
            node.position = position;
        }
        tracing::trace!(node_id, %position, "node dragged");
    }

    /// End the session: forget the source, the graph and every position.
    pub fn close(&mut self) {
        self.store.reset();
        self.source = None;
        self.graph = TopologyGraph::default();
        self.state = LayoutState::NeedsLayout;
    }

    /// Issue a layout request for the current graph, superseding any pending one.
    pub fn begin_layout(&mut self) -> LayoutTicket {
        let (generation, request) = issue(&mut self.store, &self.graph, self.options);
        LayoutTicket {
            generation,
            request,
        }
    }

    /// Apply the result of an earlier [`begin_layout`](Self::begin_layout).
    ///
    /// Stale results are discarded whether they succeeded or failed. A current failure leaves
    /// the store and graph untouched and is returned to the caller.
    pub fn complete_layout(
        &mut self,
        generation: Generation,
        result: Result<LayoutResponse, LayoutEngineError>,
    ) -> Result<LayoutOutcome, SessionError> {
        let graph = self.graph.clone();
        let options = self.options;
        self.commit(generation, graph, options, None, result)
    }

    /// Run the engine over the current graph and apply the result.
    pub async fn relayout(&mut self) -> Result<LayoutOutcome, SessionError> {
        let ticket = self.begin_layout();
        let result = self.engine.layout(ticket.request).await;
        self.complete_layout(ticket.generation, result)
    }

    /// Lay out a candidate graph and commit it only if the engine succeeds.
    async fn lay_out(
        &mut self,
        graph: TopologyGraph,
        options: SessionOptions,
        source: Option<String>,
    ) -> Result<LayoutOutcome, SessionError> {
        let (generation, request) = issue(&mut self.store, &graph, options);
        let result = self.engine.layout(request).await;
        self.commit(generation, graph, options, source, result)
    }

    /// Install a laid-out candidate: graph, options, source and every position at once.
    fn commit(
        &mut self,
        generation: Generation,
        mut graph: TopologyGraph,
        options: SessionOptions,
        source: Option<String>,
        result: Result<LayoutResponse, LayoutEngineError>,
    ) -> Result<LayoutOutcome, SessionError> {
        let current = self.store.generation();
        if !self.store.is_current(generation) {
            tracing::warn!(%generation, %current, "discarding superseded layout result");
            return Ok(LayoutOutcome::Discarded {
                stale: generation,
                current,
            });
        }

        let response = result.inspect_err(|e| {
            tracing::warn!(%generation, error = %e, "layout engine failed");
        })?;
        let positions = placed_positions(&graph, &response)?;

        for (node, (_, position)) in graph.nodes.iter_mut().zip(&positions) {
            node.position = *position;
        }
        self.graph = graph;
        self.options = options;
        if let Some(source) = source {
            self.source = Some(source);
        }
        self.store.overwrite(positions);
        self.state = LayoutState::PositionsKnown;

        tracing::debug!(%generation, nodes = self.store.len(), "layout applied");
        Ok(LayoutOutcome::Applied(generation))
    }
}

/// Advance the generation and build the request for `graph`.
fn issue(
    store: &mut PositionStore,
    graph: &TopologyGraph,
    options: SessionOptions,
) -> (Generation, LayoutRequest) {
    let generation = store.advance();
    let request = LayoutRequest::from_graph(graph, options.algorithm, options.node_size);
    tracing::debug!(
        %generation,
        algorithm = %options.algorithm,
        nodes = request.nodes.len(),
        "layout requested"
    );
    (generation, request)
}

/// Position of every graph node in the engine's answer, in node order.
fn placed_positions(
    graph: &TopologyGraph,
    response: &LayoutResponse,
) -> Result<Vec<(String, Position)>, LayoutEngineError> {
    let placed: HashMap<&str, Position> = response
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), Position::new(n.x, n.y)))
        .collect();

    graph
        .nodes
        .iter()
        .map(|node| {
            placed
                .get(node.id.as_str())
                .map(|p| (node.id.clone(), *p))
                .ok_or_else(|| LayoutEngineError::MissingNode(node.id.clone()))
        })
        .collect()
}
