//! Test harness for a small three-node scene.
//!
//! ```text
//!   A (0,0) ──────▶ B (300,0)
//!     │
//!     ▼
//!   C (0,300)
//! ```
//!
//! Provides the editor with every host callback tracked, plus helpers for
//! simulating what the Scene Host does during a drag.

#![allow(dead_code)]

use super::CallbackTracker;
use slint::{Model, SharedString, VecModel};
use slint_digraph_editor::{
    EdgeDescriptor, EditorConfig, EditorHooks, GraphEditor, MovedDescriptor, NodeDescriptor,
    Point, PointerEvent, PRIMARY_BUTTON,
};
use std::rc::Rc;

/// Drawn edge as a Slint model row.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRow {
    pub id: SharedString,
    pub path: SharedString,
    pub selected: bool,
}

/// Drawn node as a Slint model row.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRow {
    pub id: SharedString,
    pub x: f32,
    pub y: f32,
    pub targeted: bool,
}

pub struct EditorHarness {
    pub editor: GraphEditor,
    pub tracker: CallbackTracker,
    pub edges: Rc<VecModel<EdgeRow>>,
    pub nodes: Rc<VecModel<NodeRow>>,
}

impl EditorHarness {
    /// Nodes A, B, C with edges A→B and A→C.
    pub fn new() -> Self {
        Self::with_scene(
            vec![
                NodeDescriptor::new("A", 0.0, 0.0),
                NodeDescriptor::new("B", 300.0, 0.0),
                NodeDescriptor::new("C", 0.0, 300.0),
            ],
            vec![EdgeDescriptor::new("A", "B"), EdgeDescriptor::new("A", "C")],
        )
    }

    pub fn with_scene(nodes: Vec<NodeDescriptor>, edges: Vec<EdgeDescriptor>) -> Self {
        Self::with_config(EditorConfig::default(), |hooks| hooks, nodes, edges)
    }

    /// Build with a custom config and extra hooks layered over the tracked ones.
    pub fn with_config(
        config: EditorConfig,
        extend: impl FnOnce(EditorHooks) -> EditorHooks,
        nodes: Vec<NodeDescriptor>,
        edges: Vec<EdgeDescriptor>,
    ) -> Self {
        let tracker = CallbackTracker::new();
        let editor = GraphEditor::new(config, extend(tracker.hooks()));

        let edge_rows = Rc::new(VecModel::<EdgeRow>::default());
        editor.bind_edge_model(edge_rows.clone(), |glyph| EdgeRow {
            id: glyph.element_id.clone(),
            path: glyph.path_commands.clone(),
            selected: glyph.selected,
        });
        let node_rows = Rc::new(VecModel::<NodeRow>::default());
        editor.bind_node_model(node_rows.clone(), |glyph, targeted| NodeRow {
            id: glyph.key.clone(),
            x: glyph.x,
            y: glyph.y,
            targeted,
        });

        editor
            .set_scene(nodes, edges)
            .expect("harness scene should be valid");

        Self {
            editor,
            tracker,
            edges: edge_rows,
            nodes: node_rows,
        }
    }

    /// Host pass: an edge from `source` to `target` is dragged with the
    /// pointer at `(x, y)` while `selected` is under it.
    pub fn drag_over(&self, source: &str, target: &str, x: f32, y: f32, selected: Option<&str>) -> bool {
        let selected = selected.and_then(|id| self.editor.node(id));
        self.editor
            .update(Some(MovedDescriptor::new(source, Some(target), x, y)), selected)
    }

    /// Host pass: the drag is over.
    pub fn release(&self) -> bool {
        self.editor.update(None, None)
    }

    /// Pointer enters a node with no button held.
    pub fn hover(&self, id: &str) {
        self.editor.node_pointer_enter(id, &PointerEvent::at(0.0, 0.0));
    }

    /// Pointer enters a node while dragging.
    pub fn drag_enter(&self, id: &str) {
        self.editor
            .node_pointer_enter(id, &PointerEvent::at(0.0, 0.0).with_buttons(PRIMARY_BUTTON));
    }

    pub fn leave(&self, id: &str) {
        self.editor.node_pointer_leave(id, &PointerEvent::at(0.0, 0.0));
    }

    /// Shift-drag from `source` to `to` and release there.
    pub fn shift_drag(&self, source: &str, to: Point, over: Option<&str>) {
        self.editor.node_drag_move(source, to, true);
        if let Some(over) = over {
            self.drag_enter(over);
        }
        self.editor.node_drag_end(source, to, true);
    }

    pub fn edge_ids(&self) -> Vec<String> {
        self.edges.iter().map(|row| row.id.to_string()).collect()
    }

    pub fn targeted_rows(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|row| row.targeted)
            .map(|row| row.id.to_string())
            .collect()
    }

    pub fn node_row(&self, id: &str) -> Option<NodeRow> {
        self.nodes.iter().find(|row| row.id.as_str() == id)
    }
}
