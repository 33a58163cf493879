use std::f64::consts::PI;

use super::ports::{DevicePorts, PortRegistry};
use super::types::{
    DeviceNode, DeviceType, HandleSide, NodeData, NodeKind, PortHandle, Position, handle_id,
};

/// Substring tokens checked against a device's type hint, most specific first.
///
/// `clientwin` and `clientmac` must precede `client`, otherwise they can never match.
pub const CLASSIFICATION: [(&str, DeviceType); 7] = [
    ("router", DeviceType::Router),
    ("switch", DeviceType::Switch),
    ("firewall", DeviceType::Firewall),
    ("server", DeviceType::Server),
    ("clientwin", DeviceType::ClientWin),
    ("clientmac", DeviceType::ClientMac),
    ("client", DeviceType::Client),
];

/// Classify a free-text type hint (case-insensitive substring match).
pub fn classify(type_hint: &str) -> DeviceType {
    let lowered = type_hint.to_lowercase();
    CLASSIFICATION
        .iter()
        .find(|(token, _)| lowered.contains(token))
        .map_or(DeviceType::Default, |&(_, kind)| kind)
}

/// Offset percentage for the port at `index` of `total` ports.
pub fn port_offset(index: usize, total: usize) -> f64 {
    if total == 1 {
        return 50.0;
    }
    let spacing = 100.0 / (total + 1) as f64;
    spacing * (index + 1) as f64
}

/// Deterministic polar scatter used before any real layout exists.
pub fn placeholder_position(index: usize, total: usize) -> Position {
    // TODO: review the 50/300 radius constants; large topologies all land on the 300 ring.
    let radius = (total as f64 * 50.0).min(300.0);
    let angle = (index as f64 / total as f64) * 2.0 * PI;
    Position {
        x: radius * angle.cos() + radius,
        y: radius * angle.sin() + radius,
    }
}

/// Build one node per registered device, in registry order.
pub fn synthesize_nodes(registry: &PortRegistry, show_ports: bool) -> Vec<DeviceNode> {
    let total = registry.len();
    registry
        .devices()
        .iter()
        .enumerate()
        .map(|(index, device)| DeviceNode {
            id: device.device_id.clone(),
            kind: NodeKind::NetworkNode,
            position: placeholder_position(index, total),
            data: NodeData {
                label: device.device_id.clone(),
                device_type: classify(&device.type_hint),
                ports: port_handles(device),
                show_ports,
            },
            draggable: true,
        })
        .collect()
}

fn port_handles(device: &DevicePorts) -> Vec<PortHandle> {
    let total = device.ports.len();
    device
        .ports
        .iter()
        .enumerate()
        .map(|(index, usage)| PortHandle {
            id: handle_id(&device.device_id, &usage.port_id),
            name: usage.name.clone(),
            offset: port_offset(index, total),
            position: HandleSide::Bottom,
        })
        .collect()
}
