use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{ConnectionEdge, ConnectionRecord, EdgeKind, EdgeStyle, LabelStyle};

static NEXT_EDGE_ID: AtomicU64 = AtomicU64::new(1);

/// Fresh edge id, unique for the lifetime of the process.
fn next_edge_id() -> String {
    format!("edge-{}", NEXT_EDGE_ID.fetch_add(1, Ordering::Relaxed))
}

/// Describe one end of a link: `name - Port n - bandwidth`, skipping empty parts.
///
/// `Port n` is omitted when the declared name already contains the port number.
pub fn port_info(port: Option<&str>, name: Option<&str>, bandwidth: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(name) = name {
        parts.push(name.to_string());
    }
    if let Some(port) = port {
        if name.is_none_or(|n| !n.contains(port)) {
            parts.push(format!("Port {port}"));
        }
    }
    if let Some(bandwidth) = bandwidth {
        parts.push(bandwidth.to_string());
    }

    parts.join(" - ")
}

/// Edge label for a record.
///
/// An explicit label always wins. Otherwise port details are composed when shown,
/// and the label is empty when they are hidden.
pub fn compose_label(record: &ConnectionRecord, show_ports: bool) -> String {
    if let Some(label) = &record.label {
        return label.clone();
    }
    if !show_ports {
        return String::new();
    }

    let bandwidth = record.bandwidth.as_deref();
    let source_info = port_info(
        record.local_port.as_deref(),
        record.local_port_name.as_deref(),
        bandwidth,
    );
    let target_info = port_info(
        record.remote_port.as_deref(),
        record.remote_port_name.as_deref(),
        bandwidth,
    );

    if source_info.is_empty() && target_info.is_empty() {
        return String::new();
    }
    format!("{source_info} ↔ {target_info}")
}

/// One edge per record, in record order.
pub fn synthesize_edges(records: &[ConnectionRecord], show_ports: bool) -> Vec<ConnectionEdge> {
    records
        .iter()
        .map(|record| ConnectionEdge {
            id: next_edge_id(),
            source: record.source.clone(),
            target: record.target.clone(),
            source_handle: record.source_handle(),
            target_handle: record.target_handle(),
            label: compose_label(record, show_ports),
            kind: EdgeKind::SmoothStep,
            animated: true,
            style: EdgeStyle::default(),
            label_style: LabelStyle::default(),
        })
        .collect()
}
