use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Port id used when a row does not declare a port for one side of a link.
pub const DEFAULT_PORT: &str = "default";

/// Handle id for a port on a device: `{device}-{port}`.
pub fn handle_id(device_id: &str, port_id: &str) -> String {
    format!("{device_id}-{port_id}")
}

/// A point on the rendering canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// One validated input row describing a link between two devices.
///
/// Optional columns that were empty in the input are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    /// 1-based data row the record came from.
    pub row: usize,
    pub source: String,
    pub target: String,
    pub device_type: String,
    pub local_port: Option<String>,
    pub remote_port: Option<String>,
    pub local_port_name: Option<String>,
    pub remote_port_name: Option<String>,
    pub bandwidth: Option<String>,
    pub label: Option<String>,
}

impl ConnectionRecord {
    pub fn source_port_id(&self) -> &str {
        self.local_port.as_deref().unwrap_or(DEFAULT_PORT)
    }

    pub fn target_port_id(&self) -> &str {
        self.remote_port.as_deref().unwrap_or(DEFAULT_PORT)
    }

    pub fn source_handle(&self) -> String {
        handle_id(&self.source, self.source_port_id())
    }

    pub fn target_handle(&self) -> String {
        handle_id(&self.target, self.target_port_id())
    }
}

/// Classified device kind, shown as the node's icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Router,
    Switch,
    Firewall,
    Server,
    ClientWin,
    ClientMac,
    Client,
    Default,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Router => "router",
            Self::Switch => "switch",
            Self::Firewall => "firewall",
            Self::Server => "server",
            Self::ClientWin => "clientwin",
            Self::ClientMac => "clientmac",
            Self::Client => "client",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of the device box a handle is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    #[default]
    Bottom,
}

/// An addressable connection point on a device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortHandle {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Position along the device edge, as a percentage in `(0, 100)`.
    pub offset: f64,
    pub position: HandleSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NodeKind {
    #[default]
    #[serde(rename = "networkNode")]
    NetworkNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub ports: Vec<PortHandle>,
    pub show_ports: bool,
}

/// One node per distinct device id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
    pub draggable: bool,
}

impl DeviceNode {
    pub fn port(&self, handle_id: &str) -> Option<&PortHandle> {
        self.data.ports.iter().find(|p| p.id == handle_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EdgeKind {
    #[default]
    #[serde(rename = "smoothstep")]
    SmoothStep,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: u32,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: "#64748b".to_string(),
            stroke_width: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    pub fill: String,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            fill: "#475569".to_string(),
            font_family: "monospace".to_string(),
            font_size: 12,
        }
    }
}

/// One edge per connection record. Parallel links are never merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub animated: bool,
    pub style: EdgeStyle,
    pub label_style: LabelStyle,
}

/// Device ids mapped to their ordered port handle ids.
///
/// Two graphs with equal identities can share stored positions.
pub type GraphIdentity = BTreeMap<String, Vec<String>>;

/// The node/edge model handed to the rendering surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopologyGraph {
    pub nodes: Vec<DeviceNode>,
    pub edges: Vec<ConnectionEdge>,
}

impl TopologyGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&DeviceNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut DeviceNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn identity(&self) -> GraphIdentity {
        self.nodes
            .iter()
            .map(|n| {
                let ports = n.data.ports.iter().map(|p| p.id.clone()).collect();
                (n.id.clone(), ports)
            })
            .collect()
    }

    /// Current position of every node, in node order.
    pub fn positions(&self) -> Vec<(String, Position)> {
        self.nodes
            .iter()
            .map(|n| (n.id.clone(), n.position))
            .collect()
    }
}
