//! Turning a connection table into a node/edge model.
//!
//! ```text
//! CSV text
//!   → decode     (header-keyed rows)
//!   → validate   (typed ConnectionRecords, all-or-nothing)
//!   → ports      (per-device ports in first-occurrence order)
//!   → nodes      (one DeviceNode per device, placeholder positions)
//!   → edges      (one ConnectionEdge per record)
//! ```

pub mod decode;
pub mod edges;
pub mod error;
pub mod nodes;
pub mod ports;
pub mod types;
pub mod validate;

#[cfg(test)]
mod tests;

pub use error::TopologyError;
pub use types::{
    ConnectionEdge, ConnectionRecord, DeviceNode, DeviceType, PortHandle, Position,
    TopologyGraph,
};

use ports::PortRegistry;

/// Parse CSV text into a graph with placeholder positions.
///
/// Fails without producing anything if the header or any row is invalid.
pub fn parse_topology(text: &str, show_ports: bool) -> Result<TopologyGraph, TopologyError> {
    let table = decode::decode(text)?;
    let records = validate::validate(&table)?;
    Ok(build_graph(&records, show_ports))
}

/// Build the graph for already-validated records.
pub fn build_graph(records: &[ConnectionRecord], show_ports: bool) -> TopologyGraph {
    let registry = PortRegistry::from_records(records);
    let nodes = nodes::synthesize_nodes(&registry, show_ports);
    let edges = edges::synthesize_edges(records, show_ports);

    tracing::debug!(
        records = records.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        show_ports,
        "built topology graph"
    );

    TopologyGraph { nodes, edges }
}
