use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use super::{LayoutEngine, LayoutEngineError, LayoutRequest, LayoutResponse, PlacedNode};
use crate::topology::nodes::placeholder_position;

/// Layout engine reached over HTTP: posts an ELK JSON graph, reads back `children[].x/y`.
///
/// Works with any service that accepts an ELK graph and answers with the laid-out graph
/// (e.g. an elkjs wrapper).
#[derive(Debug, Clone)]
pub struct ElkHttpEngine {
    endpoint: String,
}

impl ElkHttpEngine {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl LayoutEngine for ElkHttpEngine {
    fn layout(
        &self,
        request: LayoutRequest,
    ) -> BoxFuture<'_, Result<LayoutResponse, LayoutEngineError>> {
        let endpoint = self.endpoint.clone();
        async move {
            tokio::task::spawn_blocking(move || post_elk_graph(&endpoint, &request))
                .await
                .map_err(|e| LayoutEngineError::Join(e.to_string()))?
        }
        .boxed()
    }
}

fn post_elk_graph(
    endpoint: &str,
    request: &LayoutRequest,
) -> Result<LayoutResponse, LayoutEngineError> {
    let body = elk_graph(request);

    let response: Value = ureq::post(endpoint)
        .header("Content-Type", "application/json")
        .send_json(&body)
        .map_err(|e| LayoutEngineError::Transport(e.to_string()))?
        .body_mut()
        .read_json()
        .map_err(|e| LayoutEngineError::Protocol(e.to_string()))?;

    parse_elk_response(&response)
}

/// Build the ELK graph document for a request.
pub fn elk_graph(request: &LayoutRequest) -> Value {
    serde_json::json!({
        "id": "root",
        "layoutOptions": {
            "elk.algorithm": request.algorithm.elk_id(),
        },
        "children": request.nodes,
        "edges": request.edges,
    })
}

/// Read node positions from a laid-out ELK graph. Missing coordinates count as `0`.
pub fn parse_elk_response(response: &Value) -> Result<LayoutResponse, LayoutEngineError> {
    let children = response["children"]
        .as_array()
        .ok_or_else(|| LayoutEngineError::Protocol("No children in layout response".into()))?;

    let nodes = children
        .iter()
        .map(|child| {
            let id = child["id"].as_str().ok_or_else(|| {
                LayoutEngineError::Protocol("Layout child without an id".into())
            })?;
            Ok(PlacedNode {
                id: id.to_string(),
                x: child["x"].as_f64().unwrap_or(0.0),
                y: child["y"].as_f64().unwrap_or(0.0),
            })
        })
        .collect::<Result<Vec<_>, LayoutEngineError>>()?;

    Ok(LayoutResponse { nodes })
}

/// Offline fallback: places nodes on the deterministic placeholder scatter.
///
/// Ignores the algorithm and edges. Used when no layout service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterEngine;

impl LayoutEngine for ScatterEngine {
    fn layout(
        &self,
        request: LayoutRequest,
    ) -> BoxFuture<'_, Result<LayoutResponse, LayoutEngineError>> {
        let total = request.nodes.len();
        let nodes = request
            .nodes
            .into_iter()
            .enumerate()
            .map(|(i, node)| {
                let p = placeholder_position(i, total);
                PlacedNode {
                    id: node.id,
                    x: p.x,
                    y: p.y,
                }
            })
            .collect();
        future::ready(Ok(LayoutResponse { nodes })).boxed()
    }
}
