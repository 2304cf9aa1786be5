//! Integration Tests for the Diagram Core
//!
//! These tests drive `GraphView` through its public entry points and check
//! that the model, adjacency index, painted bookkeeping, selection and the
//! display list stay consistent with each other.

use std::collections::HashSet;

use tessera_core::render::SurfaceOp;
use tessera_core::{
    Bounds, Color, DisplayList, Endpoint, GraphError, GraphView, Node, NodeId, Shape, ShapeId,
    UpdateMessage, UpdateRecord, ViewConfig, VisualStyle,
};

fn view_with(records: Vec<UpdateRecord>) -> GraphView<DisplayList> {
    let mut view = GraphView::new(ViewConfig::default(), DisplayList::with_journal());
    view.repaint_graph(&UpdateMessage::new(records));
    view
}

fn star() -> Vec<UpdateRecord> {
    vec![
        UpdateRecord::edge("e1", "hub", "a").at(Endpoint::First, 0.0, 0.0),
        UpdateRecord::edge("e2", "hub", "b"),
        UpdateRecord::edge("e3", "c", "hub"),
        UpdateRecord::edge("e4", "a", "b"),
    ]
}

/// Test that every edge sits in exactly its two endpoints' adjacency entries.
#[test]
fn adjacency_is_symmetric_after_snapshot() {
    let view = view_with(star());
    let model = view.model();

    for edge in model.edges() {
        for (node, set) in model.adjacency().iter() {
            let expected = edge.touches(node);
            assert_eq!(set.contains(edge.id()), expected, "{} under {}", edge.id(), node);
        }
    }
    assert!(model.is_consistent());
}

/// Test the snapshot-then-remove scenario end to end.
#[test]
fn remove_node_scenario() {
    let mut view = view_with(vec![UpdateRecord::edge("e1", "A", "B")]);
    let (a, b) = (NodeId::from("A"), NodeId::from("B"));

    let model = view.model();
    assert_eq!(model.node_count(), 2);
    assert_eq!(model.edge_count(), 1);
    assert_eq!(model.adjacency().incident(&a).map(|s| s.len()), Some(1));
    assert_eq!(model.adjacency().incident(&b).map(|s| s.len()), Some(1));

    view.remove_node(&a).unwrap();

    let model = view.model();
    let nodes: Vec<_> = model.node_ids().cloned().collect();
    assert_eq!(nodes, vec![b.clone()]);
    assert_eq!(model.edge_count(), 0);
    assert!(model.adjacency().is_empty());
    assert!(model.adjacency().incident(&b).is_none());
    assert!(!view.viewport().is_node_painted(&a));
    assert!(!view.viewport().is_edge_painted(&"e1".into()));
    assert!(!view.surface().contains(&ShapeId::Node(a)));
    assert!(!view.surface().contains(&ShapeId::Edge("e1".into())));
}

/// Test that removing a node clears every incident edge everywhere.
#[test]
fn cascade_removes_edges_from_selection_and_adjacency() {
    let mut view = view_with(star());
    let hub = NodeId::from("hub");
    view.set_node_selected(&hub, true).unwrap();
    view.set_edge_selected(&"e1".into(), true).unwrap();
    view.set_edge_selected(&"e4".into(), true).unwrap();

    let removal = view.remove_node(&hub).unwrap();
    assert_eq!(removal.edges.len(), 3);

    let model = view.model();
    let remaining: Vec<_> = model.edge_ids().map(|e| e.to_string()).collect();
    assert_eq!(remaining, ["e4"]);
    assert!(model.is_consistent());
    assert!(!model.adjacency().contains(&"c".into(), &"e3".into()));
    assert!(model.adjacency().is_singleton(&"c".into()));

    let selected_edges: Vec<_> = view.selection().selected_edges().map(|e| e.to_string()).collect();
    assert_eq!(selected_edges, ["e4"]);
    assert!(!view.selection().is_node_selected(&hub));
}

/// Test that repeated mentions of a node produce a single node.
#[test]
fn re_mention_is_idempotent() {
    let view = view_with(vec![
        UpdateRecord::edge("e1", "A", "B"),
        UpdateRecord::edge("e2", "A", "C"),
        UpdateRecord::edge("e3", "C", "A"),
    ]);

    let names: HashSet<_> = view.model().node_ids().map(|n| n.to_string()).collect();
    assert_eq!(view.model().node_count(), 3);
    assert_eq!(names, HashSet::from(["A", "B", "C"].map(String::from)));
}

/// Test that an edge exists only if both of its endpoints do.
#[test]
fn edges_are_never_half_created() {
    let view = view_with(vec![
        UpdateRecord {
            node2: None,
            ..UpdateRecord::edge("dangling", "A", "B")
        },
        UpdateRecord {
            node1: Some(String::new()),
            ..UpdateRecord::edge("blank", "X", "Y")
        },
        UpdateRecord::edge("ok", "A", "C"),
    ]);
    let model = view.model();

    assert!(!model.contains_edge(&"dangling".into()));
    assert!(!model.contains_edge(&"blank".into()));
    assert!(model.contains_edge(&"ok".into()));
    for edge in model.edges() {
        assert!(model.contains_node(edge.first()));
        assert!(model.contains_node(edge.second()));
    }
    assert!(model.is_consistent());
}

/// Test that a full repaint paints every node and edge exactly once.
#[test]
fn full_repaint_covers_everything_once() {
    let mut view = view_with(star());
    view.add_node(Node::new("lonely", 100.0, 100.0, view.style())).unwrap();
    view.paint_all();

    let viewport = view.viewport();
    let model = view.model();
    assert_eq!(viewport.painted_node_count(), model.node_count());
    assert_eq!(viewport.painted_edge_count(), model.edge_count());
    for id in model.node_ids() {
        assert!(viewport.is_node_painted(id));
    }

    let mut seen = HashSet::new();
    for shape in view.surface().shapes() {
        assert!(seen.insert(shape.id()), "{:?} painted twice", shape.id());
    }
    // Background + edges + labels + nodes.
    assert_eq!(seen.len(), 1 + 2 * model.edge_count() + model.node_count());
}

/// Test that every edge is drawn beneath both of its endpoints.
#[test]
fn full_repaint_draws_edges_beneath_nodes() {
    let view = view_with(star());
    let list = view.surface();

    for edge in view.model().edges() {
        let edge_z = list.z_index(&ShapeId::Edge(edge.id().clone()));
        for node in [edge.first(), edge.second()] {
            assert!(edge_z < list.z_index(&ShapeId::Node(node.clone())));
        }
    }
    assert_eq!(list.z_index(&ShapeId::Background), Some(0));
}

/// Test that deselection restores the exact pre-selection fill.
#[test]
fn selection_restores_fill_byte_for_byte() {
    let mut view = view_with(vec![UpdateRecord {
        node1_fill: Some(Color::from("rgba(12, 34, 56, 0.5)")),
        ..UpdateRecord::edge("e1", "A", "B")
    }]);
    let a = NodeId::from("A");
    let before = view.model().node(&a).unwrap().fill().clone();

    view.set_node_selected(&a, true).unwrap();
    view.move_node(&a, 3.0, 3.0).unwrap();
    assert_eq!(view.model().node(&a).unwrap().fill(), &view.style().node_selection_color);

    view.set_node_selected(&a, false).unwrap();
    let after = view.model().node(&a).unwrap().fill();
    assert_eq!(after.as_str().as_bytes(), before.as_str().as_bytes());
}

/// Test the move scenario: the driven endpoint and the label follow the node.
#[test]
fn move_node_scenario() {
    let mut view = view_with(vec![UpdateRecord::edge("e1", "A", "B")
        .at(Endpoint::First, 0.0, 0.0)
        .at(Endpoint::Second, 10.0, 10.0)]);

    view.move_node(&"A".into(), 5.0, 3.0).unwrap();

    let edge = view.model().edge(&"e1".into()).unwrap();
    assert_eq!((edge.line().x1, edge.line().y1), (5, 3));
    assert_eq!((edge.line().x2, edge.line().y2), (10, 10));
    assert_eq!((edge.label().x, edge.label().y), (7, 6));
}

/// Test that a plain move redraws the node and its edge at the new position.
#[test]
fn move_node_redraws_surface_shapes() {
    let mut view = view_with(vec![UpdateRecord::edge("e1", "A", "B")
        .at(Endpoint::First, 0.0, 0.0)
        .at(Endpoint::Second, 10.0, 10.0)]);

    view.move_node(&"A".into(), 5.0, 3.0).unwrap();

    let list = view.surface();
    let Some(Shape::Node(a)) = list.get(&ShapeId::Node("A".into())) else {
        panic!("expected node A on the surface");
    };
    assert_eq!((a.x, a.y), (5.0, 3.0));
    let Some(Shape::Edge(edge)) = list.get(&ShapeId::Edge("e1".into())) else {
        panic!("expected edge e1 on the surface");
    };
    assert_eq!((edge.line.x1, edge.line.y1), (5, 3));
    let Some(Shape::Label(label)) = list.get(&ShapeId::Label("e1".into())) else {
        panic!("expected label e1 on the surface");
    };
    assert_eq!((label.x, label.y), (7, 6));
    assert!(list.z_index(&ShapeId::Node("A".into())) > list.z_index(&ShapeId::Edge("e1".into())));
}

/// Test that a drag only touches the dragged node's edges on the surface.
#[test]
fn drag_resyncs_only_incident_shapes() {
    let mut view = view_with(star());
    let c = NodeId::from("c");
    view.begin_move(&c).unwrap();
    view.surface_mut().take_journal();

    view.move_node(&c, 4.0, 4.0).unwrap();

    let ops = view.surface_mut().take_journal();
    let touched: HashSet<_> = ops
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::Add(id) | SurfaceOp::Remove(id) => Some(id.clone()),
            SurfaceOp::Clear => None,
        })
        .collect();

    assert_eq!(
        touched,
        HashSet::from([
            ShapeId::Edge("e3".into()),
            ShapeId::Label("e3".into()),
            ShapeId::Node("hub".into()),
            ShapeId::Node(c.clone()),
        ])
    );
    assert!(!ops.contains(&SurfaceOp::Clear));
}

/// Test that the dragged node ends up above everything else.
#[test]
fn dragged_node_renders_topmost() {
    let mut view = view_with(star());
    let hub = NodeId::from("hub");
    view.begin_move(&hub).unwrap();
    view.move_node(&hub, 1.0, 1.0).unwrap();

    assert_eq!(view.surface().top().map(|s| s.id()), Some(ShapeId::Node(hub.clone())));
    view.end_move();
    assert!(view.surface().top().is_some());
}

/// Test that a partial update refreshes in place and keeps topology.
#[test]
fn partial_refresh_keeps_topology() {
    let mut view = view_with(star());
    let record = UpdateRecord {
        color: Some(Color::from("#00aa00")),
        ..UpdateRecord::edge("e3", "c", "hub").at(Endpoint::First, 30.0, 40.0)
    };
    view.refresh_graph(&UpdateMessage::new(vec![record])).unwrap();

    let model = view.model();
    assert_eq!(model.edge_count(), 4);
    assert!(model.is_consistent());
    let edge = model.edge(&"e3".into()).unwrap();
    assert_eq!(edge.stroke().as_str(), "#00aa00");
    assert_eq!((edge.line().x1, edge.line().y1), (30, 40));
}

/// Test that a partial update naming an unknown edge is rejected.
#[test]
fn partial_refresh_with_unknown_edge_fails() {
    let mut view = view_with(star());
    let message = UpdateMessage::new(vec![UpdateRecord::edge("nope", "hub", "a")]);

    let err = view.refresh_graph(&message).unwrap_err();
    assert!(matches!(err, GraphError::UnknownEdge(id) if id.as_str() == "nope"));
}

/// Test that a bounded viewport culls nodes without affecting the model.
#[test]
fn bounded_viewport_culls_offscreen_nodes() {
    let mut view = GraphView::new(ViewConfig::default(), DisplayList::new());
    view.set_painted_area(Bounds::new(0.0, 0.0, 50.0, 50.0));
    view.repaint_graph(&UpdateMessage::new(vec![UpdateRecord::edge("e1", "in", "out")
        .at(Endpoint::First, 10.0, 10.0)
        .at(Endpoint::Second, 500.0, 500.0)]));

    assert!(view.viewport().is_node_painted(&"in".into()));
    assert!(!view.viewport().is_node_painted(&"out".into()));
    assert_eq!(view.model().node_count(), 2);
}

/// Test that dragging next to a culled node leaves it off the surface.
#[test]
fn drag_beside_culled_node_keeps_it_culled() {
    let mut view = GraphView::new(ViewConfig::default(), DisplayList::new());
    view.set_painted_area(Bounds::new(0.0, 0.0, 50.0, 50.0));
    view.repaint_graph(&UpdateMessage::new(vec![UpdateRecord::edge("e1", "in", "out")
        .at(Endpoint::First, 10.0, 10.0)
        .at(Endpoint::Second, 500.0, 500.0)]));
    let out = NodeId::from("out");

    view.move_node(&"in".into(), 1.0, 1.0).unwrap();
    view.set_edge_selected(&"e1".into(), true).unwrap();

    assert!(!view.viewport().is_node_painted(&out));
    assert!(!view.surface().contains(&ShapeId::Node(out)));
    let Some(Shape::Node(shape)) = view.surface().get(&ShapeId::Node("in".into())) else {
        panic!("expected node in on the surface");
    };
    assert_eq!((shape.x, shape.y), (11.0, 11.0));
}

/// Test that scrolling a bounded view keeps the diagram's shape.
#[test]
fn translate_bounded_view_moves_culled_nodes() {
    let mut view = GraphView::new(ViewConfig::default(), DisplayList::new());
    view.set_painted_area(Bounds::new(0.0, 0.0, 50.0, 50.0));
    view.repaint_graph(&UpdateMessage::new(vec![UpdateRecord::edge("e1", "in", "out")
        .at(Endpoint::First, 10.0, 10.0)
        .at(Endpoint::Second, 60.0, 10.0)]));
    assert!(!view.viewport().is_node_painted(&"out".into()));

    view.translate_graph(20.0, 0.0);

    let model = view.model();
    assert_eq!(model.node(&"in".into()).unwrap().position(), (-10.0, 10.0));
    assert_eq!(model.node(&"out".into()).unwrap().position(), (40.0, 10.0));
    assert!(view.viewport().is_node_painted(&"out".into()));
    assert!(!view.viewport().is_node_painted(&"in".into()));
    let edge = model.edge(&"e1".into()).unwrap();
    assert_eq!((edge.line().x1, edge.line().x2), (-10, 40));
}

/// Test that selecting an edge redraws it in the selection color and back.
#[test]
fn edge_selection_redraws_stroke() {
    let mut view = view_with(star());
    let e2 = ShapeId::Edge("e2".into());
    let base = view.model().edge(&"e2".into()).unwrap().stroke().clone();

    view.set_edge_selected(&"e2".into(), true).unwrap();
    let Some(Shape::Edge(shape)) = view.surface().get(&e2) else {
        panic!("expected edge e2 on the surface");
    };
    assert_eq!(shape.stroke, view.style().edge_selection_color);

    view.set_edge_selected(&"e2".into(), false).unwrap();
    let Some(Shape::Edge(shape)) = view.surface().get(&e2) else {
        panic!("expected edge e2 on the surface");
    };
    assert_eq!(shape.stroke, base);
}

/// Test that new graph properties reach the drawn shapes.
#[test]
fn graph_properties_redraw_shapes() {
    let mut view = view_with(star());
    view.update_graph_properties(VisualStyle {
        node_size: 4.0,
        texts_visible: false,
        ..VisualStyle::default()
    });

    let list = view.surface();
    for name in ["hub", "a", "b", "c"] {
        let Some(Shape::Node(shape)) = list.get(&ShapeId::Node(name.into())) else {
            panic!("expected node {name} on the surface");
        };
        assert_eq!(shape.radius, 4.0);
        assert_eq!(shape.text, None);
    }
    for name in ["e1", "e2", "e3", "e4"] {
        assert!(list.contains(&ShapeId::Edge(name.into())));
        assert!(!list.contains(&ShapeId::Label(name.into())));
    }
}

/// Test that scrolling the graph shifts every painted node the other way.
#[test]
fn translate_graph_scrolls_view() {
    let mut view = view_with(vec![UpdateRecord::edge("e1", "A", "B")
        .at(Endpoint::First, 0.0, 0.0)
        .at(Endpoint::Second, 10.0, 10.0)]);

    view.translate_graph(2.0, 4.0);

    assert_eq!(view.model().node(&"A".into()).unwrap().position(), (-2.0, -4.0));
    assert_eq!(view.model().node(&"B".into()).unwrap().position(), (8.0, 6.0));
    let edge = view.model().edge(&"e1".into()).unwrap();
    assert_eq!((edge.label().x, edge.label().y), (3, 1));
}

/// Test that messages decoded from JSON feed the snapshot path.
#[test]
fn json_snapshot_round_trip() {
    let message = UpdateMessage::from_json(
        r##"{"records": [
            {"name": "e1", "node1": "A", "node2": "B", "label": "calls", "node2_x": 8, "node2_y": 2},
            {"name": "", "node1": "Z", "node2": "Y"}
        ]}"##,
    )
    .unwrap();
    let mut view = GraphView::new(ViewConfig::default(), DisplayList::new());
    view.repaint_graph(&message);

    assert_eq!(view.model().node_count(), 2);
    let edge = view.model().edge(&"e1".into()).unwrap();
    assert_eq!(edge.label().text, "calls");
    assert_eq!((edge.label().x, edge.label().y), (4, 1));
}
