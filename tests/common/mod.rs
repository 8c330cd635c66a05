//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint_digraph_editor::EditorHooks;
use std::cell::RefCell;
use std::rc::Rc;

/// Tracks host callback invocations for testing.
///
/// Each field records calls to the corresponding hook with their arguments.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// node id
    pub node_mouse_down: Rc<RefCell<Vec<String>>>,
    /// (node id, genuine)
    pub node_mouse_enter: Rc<RefCell<Vec<(String, bool)>>>,
    /// node id
    pub node_mouse_leave: Rc<RefCell<Vec<String>>>,
    /// (node id, x, y, shift)
    pub node_move: Rc<RefCell<Vec<(String, f32, f32, bool)>>>,
    /// (node id, x, y, shift)
    pub node_update: Rc<RefCell<Vec<(String, f32, f32, bool)>>>,
    /// node id
    pub node_selected: Rc<RefCell<Vec<String>>>,
    /// (source, target)
    pub edge_mouse_down: Rc<RefCell<Vec<(String, Option<String>)>>>,
    /// Count of background_mouse_down calls
    pub background_mouse_down: Rc<RefCell<usize>>,
    /// (source, target)
    pub create_edge: Rc<RefCell<Vec<(String, String)>>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks recording into this tracker.
    pub fn hooks(&self) -> EditorHooks {
        let t = self.clone();
        EditorHooks::new()
            .on_node_mouse_down({
                let t = t.clone();
                move |_, node| t.node_mouse_down.borrow_mut().push(node.id.to_string())
            })
            .on_node_mouse_enter({
                let t = t.clone();
                move |_, node, genuine| {
                    t.node_mouse_enter
                        .borrow_mut()
                        .push((node.id.to_string(), genuine))
                }
            })
            .on_node_mouse_leave({
                let t = t.clone();
                move |_, node| t.node_mouse_leave.borrow_mut().push(node.id.to_string())
            })
            .on_node_move({
                let t = t.clone();
                move |p, id, shift| t.node_move.borrow_mut().push((id.to_string(), p.x, p.y, shift))
            })
            .on_node_update({
                let t = t.clone();
                move |p, id, shift| {
                    t.node_update
                        .borrow_mut()
                        .push((id.to_string(), p.x, p.y, shift))
                }
            })
            .on_node_selected({
                let t = t.clone();
                move |_, id, _| t.node_selected.borrow_mut().push(id.to_string())
            })
            .on_edge_mouse_down({
                let t = t.clone();
                move |_, edge| {
                    t.edge_mouse_down.borrow_mut().push((
                        edge.source.to_string(),
                        edge.target.as_ref().map(|s| s.to_string()),
                    ))
                }
            })
            .on_background_mouse_down({
                let t = t.clone();
                move |_| *t.background_mouse_down.borrow_mut() += 1
            })
            .on_create_edge({
                let t = t.clone();
                move |source, target| {
                    t.create_edge
                        .borrow_mut()
                        .push((source.id.to_string(), target.id.to_string()))
                }
            })
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        self.node_mouse_down.borrow_mut().clear();
        self.node_mouse_enter.borrow_mut().clear();
        self.node_mouse_leave.borrow_mut().clear();
        self.node_move.borrow_mut().clear();
        self.node_update.borrow_mut().clear();
        self.node_selected.borrow_mut().clear();
        self.edge_mouse_down.borrow_mut().clear();
        *self.background_mouse_down.borrow_mut() = 0;
        self.create_edge.borrow_mut().clear();
    }
}
