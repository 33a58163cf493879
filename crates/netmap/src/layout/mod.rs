//! Deciding when to run the layout engine, and remembering where nodes are.
//!
//! The engine itself is external: an [`engine::ElkHttpEngine`] talks to an ELK layout
//! service, [`engine::ScatterEngine`] is the offline fallback. A [`session::TopologySession`]
//! owns the [`store::PositionStore`] and calls the engine only when the layout identity
//! changes (new source, new algorithm).

pub mod engine;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::topology::TopologyGraph;

/// Layout algorithm offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAlgorithm {
    #[default]
    Tree,
    Layered,
    Radial,
}

impl LayoutAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Layered => "layered",
            Self::Radial => "radial",
        }
    }

    /// Algorithm id understood by ELK (`elk.algorithm`).
    pub fn elk_id(&self) -> &'static str {
        match self {
            Self::Tree => "mrtree",
            Self::Layered => "layered",
            Self::Radial => "radial",
        }
    }

    pub fn all() -> &'static [LayoutAlgorithm] {
        &[
            LayoutAlgorithm::Tree,
            LayoutAlgorithm::Layered,
            LayoutAlgorithm::Radial,
        ]
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LayoutAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" | "mrtree" => Ok(Self::Tree),
            "layered" => Ok(Self::Layered),
            "radial" => Ok(Self::Radial),
            _ => Err(format!(
                "Invalid layout algorithm: {s}. Must be 'tree', 'layered', or 'radial'."
            )),
        }
    }
}

/// Abstract size every node is laid out with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
}

impl Default for NodeSize {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub id: String,
    pub sources: Vec<String>,
    pub targets: Vec<String>,
}

/// Everything the engine needs: sizes, endpoints, algorithm. No positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRequest {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub algorithm: LayoutAlgorithm,
}

impl LayoutRequest {
    pub fn from_graph(graph: &TopologyGraph, algorithm: LayoutAlgorithm, size: NodeSize) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|n| LayoutNode {
                id: n.id.clone(),
                width: size.width,
                height: size.height,
            })
            .collect();
        let edges = graph
            .edges
            .iter()
            .map(|e| LayoutEdge {
                id: e.id.clone(),
                sources: vec![e.source.clone()],
                targets: vec![e.target.clone()],
            })
            .collect();
        Self {
            nodes,
            edges,
            algorithm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlacedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResponse {
    pub nodes: Vec<PlacedNode>,
}

/// Why a layout request failed. Only the pending request is affected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEngineError {
    /// The engine could not be reached or rejected the request.
    Transport(String),
    /// The engine answered with something that is not a layout.
    Protocol(String),
    /// The engine's answer has no position for a requested node.
    MissingNode(String),
    /// The background task running the request died.
    Join(String),
}

impl fmt::Display for LayoutEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Layout engine request failed: {msg}"),
            Self::Protocol(msg) => write!(f, "Invalid layout engine response: {msg}"),
            Self::MissingNode(id) => write!(f, "Node with id {id} not found in layout"),
            Self::Join(msg) => write!(f, "Layout task failed: {msg}"),
        }
    }
}

impl std::error::Error for LayoutEngineError {}

/// An automatic graph layout engine, treated as an opaque pure function.
pub trait LayoutEngine {
    fn layout(
        &self,
        request: LayoutRequest,
    ) -> BoxFuture<'_, Result<LayoutResponse, LayoutEngineError>>;
}

impl<E: LayoutEngine + ?Sized> LayoutEngine for Box<E> {
    fn layout(
        &self,
        request: LayoutRequest,
    ) -> BoxFuture<'_, Result<LayoutResponse, LayoutEngineError>> {
        (**self).layout(request)
    }
}
