use super::*;
use crate::topology::types::DeviceType;

fn core_and_wan() -> String {
    csv_text(
        FULL_HEADER,
        &[
            "R1,S1,router,1,1,Gi0/1,Eth1/1,1Gbps,Core Link",
            "R1,FW1,router,2,1,Gi0/2,WAN1,1Gbps,WAN Link",
        ],
    )
}

#[test]
fn core_and_wan_counts() {
    let graph = parse_ok(&core_and_wan(), false);
    assert_eq!(node_ids(&graph), vec!["R1", "S1", "FW1"]);
    assert_eq!(graph.edges.len(), 2);
    assert_handles_resolve(&graph);
}

#[test]
fn core_and_wan_offsets() {
    let graph = parse_ok(&core_and_wan(), false);

    let r1 = graph.node("R1").unwrap();
    let offsets: Vec<f64> = r1.data.ports.iter().map(|p| p.offset).collect();
    assert_eq!(offsets.len(), 2);
    assert!((offsets[0] - 33.33).abs() < 0.01);
    assert!((offsets[1] - 66.67).abs() < 0.01);

    assert_eq!(graph.node("S1").unwrap().data.ports[0].offset, 50.0);
    assert_eq!(graph.node("FW1").unwrap().data.ports[0].offset, 50.0);
}

#[test]
fn core_and_wan_labels_are_literal() {
    for show_ports in [false, true] {
        let graph = parse_ok(&core_and_wan(), show_ports);
        let labels: Vec<&str> = graph.edges.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Core Link", "WAN Link"]);
    }
}

#[test]
fn core_and_wan_handles() {
    let graph = parse_ok(&core_and_wan(), false);
    assert_eq!(graph.edges[0].source_handle, "R1-1");
    assert_eq!(graph.edges[0].target_handle, "S1-1");
    assert_eq!(graph.edges[1].source_handle, "R1-2");
    assert_eq!(graph.edges[1].target_handle, "FW1-1");
    assert_eq!(
        graph.node("R1").unwrap().data.ports[1].name.as_deref(),
        Some("Gi0/2")
    );
}

#[test]
fn type_comes_from_first_mention() {
    // FW1 only ever appears in a row typed "router".
    let graph = parse_ok(&core_and_wan(), false);
    assert_eq!(graph.node("R1").unwrap().data.device_type, DeviceType::Router);
    assert_eq!(graph.node("FW1").unwrap().data.device_type, DeviceType::Router);
}

#[test]
fn show_ports_flag_on_every_node() {
    let graph = parse_ok(&core_and_wan(), true);
    assert!(graph.nodes.iter().all(|n| n.data.show_ports));
    let graph = parse_ok(&core_and_wan(), false);
    assert!(graph.nodes.iter().all(|n| !n.data.show_ports));
}

#[test]
fn port_details_compose_without_labels() {
    let text = csv_text(
        FULL_HEADER,
        &[
            "R1,S1,router,1,24,Gi0/1,Eth1/1,10Gbps,",
            "S1,PC1,switch,,,,,,",
        ],
    );
    let graph = parse_ok(&text, true);
    assert_eq!(
        graph.edges[0].label,
        "Gi0/1 - 10Gbps ↔ Eth1/1 - Port 24 - 10Gbps"
    );
    assert_eq!(graph.edges[1].label, "");
    assert_eq!(graph.edges[1].source_handle, "S1-default");
    assert_eq!(graph.edges[1].target_handle, "PC1-default");
    assert_handles_resolve(&graph);
}

#[test]
fn parallel_links_kept_separate() {
    let text = csv_text(
        "source,target,type,localPort,remotePort",
        &["A,B,switch,1,1", "A,B,switch,2,2", "A,B,switch,1,1"],
    );
    let graph = parse_ok(&text, false);
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 3);
    assert_eq!(graph.node("A").unwrap().data.ports.len(), 2);
    assert_ne!(graph.edges[0].id, graph.edges[2].id);
    assert_unique_ports(&graph);
}

#[test]
fn mixed_device_types() {
    let text = csv_text(
        "source,target,type",
        &[
            "fw,core,Firewall",
            "core,srv,Core Router",
            "core,win,clientwin",
            "core,mac,ClientMac",
            "core,thin,client",
            "core,ups,UPS",
        ],
    );
    let graph = parse_ok(&text, false);
    let kinds: Vec<DeviceType> = graph.nodes.iter().map(|n| n.data.device_type).collect();
    assert_eq!(
        kinds,
        vec![
            DeviceType::Firewall,
            DeviceType::Firewall,
            DeviceType::Router,
            DeviceType::ClientWin,
            DeviceType::ClientMac,
            DeviceType::Client,
            DeviceType::Default,
        ]
    );
}

#[test]
fn serialized_model_shape() {
    let graph = parse_ok(&core_and_wan(), false);
    let json = serde_json::to_value(&graph).unwrap();

    let node = &json["nodes"][0];
    assert_eq!(node["id"], "R1");
    assert_eq!(node["type"], "networkNode");
    assert_eq!(node["draggable"], true);
    assert_eq!(node["data"]["label"], "R1");
    assert_eq!(node["data"]["type"], "router");
    assert_eq!(node["data"]["showPorts"], false);
    assert_eq!(node["data"]["ports"][0]["id"], "R1-1");
    assert_eq!(node["data"]["ports"][0]["name"], "Gi0/1");
    assert_eq!(node["data"]["ports"][0]["position"], "bottom");
    assert!(node["position"]["x"].is_number());

    let edge = &json["edges"][0];
    assert_eq!(edge["source"], "R1");
    assert_eq!(edge["sourceHandle"], "R1-1");
    assert_eq!(edge["targetHandle"], "S1-1");
    assert_eq!(edge["label"], "Core Link");
    assert_eq!(edge["type"], "smoothstep");
    assert_eq!(edge["style"]["stroke"], "#64748b");
    assert_eq!(edge["style"]["strokeWidth"], 2);
    assert_eq!(edge["labelStyle"]["fontFamily"], "monospace");
}

#[test]
fn unnamed_port_omits_name_key() {
    let text = csv_text("source,target,type", &["A,B,router"]);
    let graph = parse_ok(&text, false);
    let json = serde_json::to_value(&graph).unwrap();
    assert!(json["nodes"][0]["data"]["ports"][0].get("name").is_none());
}
