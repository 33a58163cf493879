mod continuity;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use futures::future::{self, BoxFuture, FutureExt};

use super::session::{SessionOptions, TopologySession};
use super::{
    LayoutAlgorithm, LayoutEngine, LayoutEngineError, LayoutRequest, LayoutResponse, PlacedNode,
};
use crate::topology::Position;

const CAMPUS: &str = "\
source,target,type,localPort,remotePort,localPortName,remotePortName,bandwidth,label
R1,S1,router,1,1,Gi0/1,Eth1/1,1Gbps,
R1,FW1,firewall,2,1,Gi0/2,WAN1,1Gbps,WAN Link
S1,PC1,switch,2,,Eth1/2,,100Mbps,
";

/// Deterministic engine: node `i` lands at `(base + 100 * i, 10 * i)`, where `base`
/// depends on the algorithm. Counts calls and can be switched into failure.
#[derive(Clone, Default)]
struct FakeEngine {
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    drop_last: bool,
}

impl FakeEngine {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// An engine whose answers omit the last requested node.
    fn dropping_last() -> Self {
        Self {
            drop_last: true,
            ..Self::default()
        }
    }
}

impl LayoutEngine for FakeEngine {
    fn layout(
        &self,
        request: LayoutRequest,
    ) -> BoxFuture<'_, Result<LayoutResponse, LayoutEngineError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return future::ready(Err(LayoutEngineError::Transport(
                "connection refused".into(),
            )))
            .boxed();
        }
        let mut response = respond(&request, algorithm_base(request.algorithm));
        if self.drop_last {
            response.nodes.pop();
        }
        future::ready(Ok(response)).boxed()
    }
}

fn algorithm_base(algorithm: LayoutAlgorithm) -> f64 {
    match algorithm {
        LayoutAlgorithm::Tree => 0.0,
        LayoutAlgorithm::Layered => 1000.0,
        LayoutAlgorithm::Radial => 2000.0,
    }
}

/// Answer a request the way [`FakeEngine`] would, shifted by `base`.
fn respond(request: &LayoutRequest, base: f64) -> LayoutResponse {
    LayoutResponse {
        nodes: request
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| PlacedNode {
                id: n.id.clone(),
                x: base + 100.0 * i as f64,
                y: 10.0 * i as f64,
            })
            .collect(),
    }
}

fn session(engine: &FakeEngine) -> TopologySession<FakeEngine> {
    TopologySession::new(engine.clone(), SessionOptions::default())
}

fn stored(session: &TopologySession<FakeEngine>) -> HashMap<String, Position> {
    session
        .store()
        .iter()
        .map(|(id, p)| (id.to_string(), p))
        .collect()
}

fn graph_positions(session: &TopologySession<FakeEngine>) -> HashMap<String, Position> {
    session.graph().positions().into_iter().collect()
}
