mod scenario;

use std::collections::BTreeSet;

use super::{TopologyGraph, parse_topology};

const FULL_HEADER: &str =
    "source,target,type,localPort,remotePort,localPortName,remotePortName,bandwidth,label";

/// Helper to build CSV text from a header and rows.
fn csv_text(header: &str, rows: &[&str]) -> String {
    let mut text = String::from(header);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

/// Parse and panic with the error on failure.
fn parse_ok(text: &str, show_ports: bool) -> TopologyGraph {
    match parse_topology(text, show_ports) {
        Ok(graph) => graph,
        Err(e) => panic!("expected valid topology, got: {e}"),
    }
}

fn node_ids(graph: &TopologyGraph) -> Vec<&str> {
    graph.nodes.iter().map(|n| n.id.as_str()).collect()
}

/// Assert every edge handle resolves to a handle on the matching node.
fn assert_handles_resolve(graph: &TopologyGraph) {
    for edge in &graph.edges {
        let source = graph
            .node(&edge.source)
            .unwrap_or_else(|| panic!("missing source node {}", edge.source));
        assert!(
            source.port(&edge.source_handle).is_some(),
            "handle {} not on {}",
            edge.source_handle,
            edge.source
        );
        let target = graph
            .node(&edge.target)
            .unwrap_or_else(|| panic!("missing target node {}", edge.target));
        assert!(
            target.port(&edge.target_handle).is_some(),
            "handle {} not on {}",
            edge.target_handle,
            edge.target
        );
    }
}

/// Assert port ids are unique within every node.
fn assert_unique_ports(graph: &TopologyGraph) {
    for node in &graph.nodes {
        let ids: BTreeSet<&str> = node.data.ports.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), node.data.ports.len(), "duplicate port on {}", node.id);
    }
}
