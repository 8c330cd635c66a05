//! Level 4: Selection & Render Order Tests
//!
//! Tests edge selection and raising, node moves with their edges following,
//! edge labels and the background surface.

mod common;

use common::harness::EditorHarness;
use slint::{Model, SharedString, VecModel};
use slint_digraph_editor::{
    Background, EdgeDescriptor, EditorConfig, EditorHooks, EditorMode, ElementId, LayoutEngine,
    MovedDescriptor, NodeDescriptor, NodesMap, Point, PointerEvent, SnapToGrid,
};

fn click_edge(harness: &EditorHarness, element_id: &str) {
    harness.editor.dispatch_pointer_down(
        &ElementId::EdgeOverlay(element_id.into()),
        &PointerEvent::at(0.0, 0.0),
    );
}

// ============================================================================
// Edge selection
// ============================================================================

#[test]
fn test_clicking_edge_selects_and_raises_it() {
    let harness = EditorHarness::new();
    click_edge(&harness, "edge-A-B");

    assert_eq!(harness.edge_ids(), vec!["edge-A-C", "edge-A-B"]);
    let rows: Vec<bool> = harness.edges.iter().map(|row| row.selected).collect();
    assert_eq!(rows, vec![false, true]);
    assert_eq!(
        *harness.tracker.edge_mouse_down.borrow(),
        vec![("A".to_string(), Some("B".to_string()))]
    );
    assert_eq!(harness.editor.edge_glyph("edge-A-B").unwrap().class_name, "edge selected");
}

#[test]
fn test_selecting_another_edge_deselects_previous() {
    let harness = EditorHarness::new();
    click_edge(&harness, "edge-A-B");
    click_edge(&harness, "edge-A-C");

    assert_eq!(harness.editor.selected_edge().as_deref(), Some("edge-A-C"));
    assert!(!harness.editor.edge_glyph("edge-A-B").unwrap().selected);
    assert_eq!(harness.edge_ids().last().map(String::as_str), Some("edge-A-C"));
}

#[test]
fn test_background_click_clears_selection() {
    let harness = EditorHarness::new();
    click_edge(&harness, "edge-A-B");

    let background = harness.editor.render_background();
    assert!(background.contains(Point::new(-500.0, -500.0)));
    harness.editor.handle_background_mouse_down(&PointerEvent::at(-500.0, -500.0));

    assert_eq!(harness.editor.selected_edge(), None);
    assert!(harness.edges.iter().all(|row| !row.selected));
    assert_eq!(*harness.tracker.background_mouse_down.borrow(), 1);
}

#[test]
fn test_selection_syncs_to_model() {
    let harness = EditorHarness::new();
    click_edge(&harness, "edge-A-C");

    let model = VecModel::<SharedString>::default();
    harness.editor.sync_selection(&model);
    assert_eq!(model.row_count(), 1);
    assert_eq!(model.row_data(0).unwrap(), "edge-A-C");

    harness.editor.handle_background_mouse_down(&PointerEvent::at(0.0, 0.0));
    harness.editor.sync_selection(&model);
    assert_eq!(model.row_count(), 0);
}

#[test]
fn test_node_click_reports_mouse_down() {
    let harness = EditorHarness::new();
    harness
        .editor
        .dispatch_pointer_down(&ElementId::Node("C".into()), &PointerEvent::at(0.0, 300.0));
    assert_eq!(*harness.tracker.node_mouse_down.borrow(), vec!["C"]);
}

// ============================================================================
// Node moves
// ============================================================================

#[test]
fn test_node_move_redraws_connected_edges() {
    let harness = EditorHarness::new();
    harness.editor.node_drag_move("B", Point::new(600.0, 0.0), false);

    let b = harness.node_row("B").unwrap();
    assert_eq!((b.x, b.y), (600.0, 0.0));
    // len 600 is capped at 0.75 * 150
    assert_eq!(
        harness.editor.edge_glyph("edge-A-B").unwrap().path_commands,
        "M 112.5 0 L 487.5 0"
    );
    // Unconnected edge untouched
    assert_eq!(
        harness.editor.edge_glyph("edge-A-C").unwrap().path_commands,
        "M 0 110 L 0 190"
    );
}

#[test]
fn test_drag_end_commits_and_selects() {
    let harness = EditorHarness::new();
    harness.editor.node_drag_move("C", Point::new(0.0, 400.0), false);
    harness.editor.node_drag_end("C", Point::new(0.0, 400.0), false);

    assert_eq!(
        *harness.tracker.node_update.borrow(),
        vec![("C".to_string(), 0.0, 400.0, false)]
    );
    assert_eq!(*harness.tracker.node_selected.borrow(), vec!["C"]);
    assert!(harness.editor.node_glyph("C").unwrap().selected);
    assert_eq!(
        harness.editor.state().selected_node_for_move.as_deref(),
        Some("C")
    );
}

#[test]
fn test_labels_hidden_while_moving() {
    let harness = EditorHarness::with_config(
        EditorConfig::default(),
        |hooks: EditorHooks| {
            hooks.with_render_edge_text(|ctx| {
                SharedString::from(format!("{} {}", ctx.data.handle_text, ctx.transform))
            })
        },
        vec![NodeDescriptor::new("A", 0.0, 0.0), NodeDescriptor::new("B", 300.0, 0.0)],
        vec![EdgeDescriptor::new("A", "B").with_handle_text("flows")],
    );

    let label = harness.editor.edge_glyph("edge-A-B").unwrap().label.unwrap();
    assert_eq!(label.text, "flows translate(150, 0)");

    harness.editor.node_drag_move("B", Point::new(500.0, 0.0), false);
    assert!(harness.editor.edge_glyph("edge-A-B").unwrap().label.is_none());

    harness.editor.node_drag_end("B", Point::new(500.0, 0.0), false);
    let label = harness.editor.edge_glyph("edge-A-B").unwrap().label.unwrap();
    assert_eq!(label.anchor, Point::new(250.0, 0.0));
}

// ============================================================================
// Extension points
// ============================================================================

#[test]
fn test_custom_background_renderer() {
    let harness = EditorHarness::with_config(
        EditorConfig::default().with_background_fill_id("dots"),
        |hooks: EditorHooks| {
            hooks.with_render_background(|ctx| Background {
                width: ctx.grid_size / 2.0,
                height: ctx.grid_size / 2.0,
                fill: format!("custom-{}", ctx.background_fill_id).into(),
                ..Default::default()
            })
        },
        vec![],
        vec![],
    );
    let background = harness.editor.render_background();
    assert_eq!(background.fill, "custom-dots");
    assert_eq!(background.width, 20480.0);
}

#[test]
fn test_background_context_routes_mouse_down() {
    let harness = EditorHarness::with_config(
        EditorConfig::default(),
        |hooks: EditorHooks| {
            hooks.with_render_background(|ctx| {
                ctx.mouse_down(&PointerEvent::at(0.0, 0.0));
                Background::default()
            })
        },
        vec![],
        vec![],
    );
    harness.editor.render_background();
    assert_eq!(*harness.tracker.background_mouse_down.borrow(), 1);
}

#[test]
fn test_layout_engine_runs_on_scene() {
    let harness = EditorHarness::with_config(
        EditorConfig::default(),
        |hooks: EditorHooks| hooks.with_layout_engine(SnapToGrid::new(36.0)),
        vec![NodeDescriptor::new("A", 10.0, 50.0)],
        vec![],
    );
    let a = harness.node_row("A").unwrap();
    assert_eq!((a.x, a.y), (0.0, 36.0));
}

/// Lays out only the first node.
struct FirstOnly;

impl LayoutEngine<()> for FirstOnly {
    fn adjust_nodes(&self, nodes: Vec<NodeDescriptor>, _map: &NodesMap) -> Vec<NodeDescriptor> {
        nodes.into_iter().take(1).collect()
    }
}

#[test]
fn test_nodes_dropped_by_layout_are_not_mounted() {
    let harness = EditorHarness::with_config(
        EditorConfig::default(),
        |hooks: EditorHooks| hooks.with_layout_engine(FirstOnly),
        vec![NodeDescriptor::new("A", 0.0, 0.0), NodeDescriptor::new("B", 300.0, 0.0)],
        vec![EdgeDescriptor::new("A", "B")],
    );

    assert_eq!(harness.nodes.row_count(), 1);
    assert!(harness.editor.node("B").is_none());
    assert_eq!(harness.editor.node("A").map(|n| n.id), Some("A".into()));

    // Moving the dropped node is a no-op
    harness.editor.handle_node_move(Point::new(10.0, 10.0), "B", false);
    assert!(harness.editor.node("B").is_none());

    // No drag onto a node that is not in the scene
    harness.editor.update(
        Some(MovedDescriptor::new("A", Some("B"), 290.0, 0.0)),
        Some(NodeDescriptor::new("B", 300.0, 0.0)),
    );
    assert_eq!(harness.editor.mode(), EditorMode::Idle);
}
