use super::*;
use crate::layout::session::{LayoutOutcome, LayoutState};

#[tokio::test]
async fn load_runs_engine_once() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);

    let outcome = session.load_source(CAMPUS).await.unwrap();
    assert!(matches!(outcome, LayoutOutcome::Applied(_)));
    assert_eq!(engine.calls(), 1);
    assert_eq!(session.state(), LayoutState::PositionsKnown);
    assert_eq!(session.store().len(), 4);
    assert_eq!(stored(&session), graph_positions(&session));
    assert_eq!(session.store().get("FW1"), Some(Position::new(200.0, 20.0)));
}

#[tokio::test]
async fn port_toggle_keeps_positions_bit_identical() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);
    session.load_source(CAMPUS).await.unwrap();
    let before = graph_positions(&session);

    for show_ports in [false, true, false] {
        let outcome = session.set_show_ports(show_ports).await.unwrap();
        assert_eq!(outcome, LayoutOutcome::Reused);
        let after = graph_positions(&session);
        for (id, p) in &before {
            assert_eq!(after[id].x.to_bits(), p.x.to_bits(), "{id} x moved");
            assert_eq!(after[id].y.to_bits(), p.y.to_bits(), "{id} y moved");
        }
    }
    assert_eq!(engine.calls(), 1);
}

#[tokio::test]
async fn port_toggle_updates_labels_and_node_flags() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);
    session.load_source(CAMPUS).await.unwrap();
    assert_eq!(
        session.graph().edges[0].label,
        "Gi0/1 - 1Gbps ↔ Eth1/1 - 1Gbps"
    );

    session.set_show_ports(false).await.unwrap();
    assert!(!session.options().show_ports);
    assert_eq!(session.graph().edges[0].label, "");
    assert_eq!(session.graph().edges[1].label, "WAN Link");
    assert!(session.graph().nodes.iter().all(|n| !n.data.show_ports));
}

#[tokio::test]
async fn drag_survives_port_toggle() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);
    session.load_source(CAMPUS).await.unwrap();

    let dropped = Position::new(640.5, -12.25);
    session.node_dragged("S1", dropped);
    session.set_show_ports(false).await.unwrap();

    assert_eq!(session.graph().node("S1").unwrap().position, dropped);
    assert_eq!(session.store().get("S1"), Some(dropped));
    assert_eq!(engine.calls(), 1);
}

#[tokio::test]
async fn drag_touches_only_that_node() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);
    session.load_source(CAMPUS).await.unwrap();
    let before = stored(&session);

    session.node_dragged("PC1", Position::new(5.0, 5.0));

    let after = stored(&session);
    assert_eq!(after.len(), before.len());
    for (id, p) in &before {
        if id == "PC1" {
            assert_eq!(after[id], Position::new(5.0, 5.0));
        } else {
            assert_eq!(after[id], *p);
        }
    }
}

#[tokio::test]
async fn algorithm_change_overwrites_every_position() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);
    session.load_source(CAMPUS).await.unwrap();
    session.node_dragged("R1", Position::new(-50.0, -50.0));

    let outcome = session.set_algorithm(LayoutAlgorithm::Layered).await.unwrap();
    assert!(matches!(outcome, LayoutOutcome::Applied(_)));
    assert_eq!(engine.calls(), 2);
    assert_eq!(session.store().get("R1"), Some(Position::new(1000.0, 0.0)));
    assert_eq!(session.store().get("PC1"), Some(Position::new(1300.0, 30.0)));
    assert_eq!(stored(&session), graph_positions(&session));
}

#[tokio::test]
async fn new_source_forgets_old_positions() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);
    session.load_source(CAMPUS).await.unwrap();
    session.node_dragged("S1", Position::new(1.0, 1.0));

    session
        .load_source("source,target,type\nA,B,switch\n")
        .await
        .unwrap();
    assert_eq!(engine.calls(), 2);
    assert_eq!(session.store().len(), 2);
    assert_eq!(session.store().get("S1"), None);
    assert_eq!(session.store().get("B"), Some(Position::new(100.0, 10.0)));
}

#[tokio::test]
async fn updates_before_any_source_are_idle() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);

    let outcome = session.set_algorithm(LayoutAlgorithm::Radial).await.unwrap();
    assert_eq!(outcome, LayoutOutcome::Idle);
    let outcome = session.set_show_ports(false).await.unwrap();
    assert_eq!(outcome, LayoutOutcome::Idle);
    assert_eq!(engine.calls(), 0);

    // The recorded options apply to the first load.
    session.load_source(CAMPUS).await.unwrap();
    assert_eq!(session.store().get("R1"), Some(Position::new(2000.0, 0.0)));
    assert_eq!(session.graph().edges[0].label, "");
}

#[tokio::test]
async fn close_forgets_everything() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);
    session.load_source(CAMPUS).await.unwrap();

    session.close();
    assert!(session.graph().is_empty());
    assert!(session.store().is_empty());
    assert!(session.source().is_none());
    assert_eq!(session.state(), LayoutState::NeedsLayout);
}

#[tokio::test]
async fn laid_out_source_is_up_to_date() {
    let engine = FakeEngine::default();
    let mut session = session(&engine);
    assert!(!session.is_up_to_date(CAMPUS));

    session.load_source(CAMPUS).await.unwrap();
    session.node_dragged("R1", Position::new(3.0, 4.0));
    assert!(session.is_up_to_date(CAMPUS));
    assert!(!session.is_up_to_date("source,target,type\nA,B,switch\n"));
}
