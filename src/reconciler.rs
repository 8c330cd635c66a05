//! Editing State Reconciler.
//!
//! Interaction state is never mutated from outside. It is derived from the
//! previous state and the two host inputs, `moved` and `selected`, by the pure
//! reducer [`derive_state`], and changed by hover handling. Side effects on the
//! drawn scene are planned separately by [`plan_effects`] so the reducer stays
//! testable without a rendering surface.
//!
//! ```text
//!            moved + selected resolve          moved cleared
//!   Idle ───────────────────────────▶ DraggingEdgeOverTarget ──────▶ Idle
//!    │ ▲                                        ▲
//!    │ │ leave                                  │ enter while dragging
//!    ▼ │                                        │
//!   HoveringNode                           DraggingEdge
//! ```

use crate::geometry::Point;
use crate::model::{EdgeDescriptor, MovedDescriptor, NodeDescriptor, NodeKey};
use crate::scene::SceneMaps;

/// Interaction state, owned by the reconciler.
///
/// `dragging_edge` is true exactly when `dragged_edge` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionState<P = ()> {
    pub dragging_edge: bool,
    pub dragged_edge: Option<EdgeDescriptor>,
    /// Node that would receive the edge if it were released now
    pub edge_end_node: Option<NodeDescriptor<P>>,
    pub hovered_node: bool,
    pub hovered_node_data: Option<NodeDescriptor<P>>,
    /// Last `moved` seen when a drag started
    pub previous_moved: Option<MovedDescriptor>,
    /// Node picked up for repositioning
    pub selected_node_for_move: Option<NodeKey>,
}

impl<P> Default for InteractionState<P> {
    fn default() -> Self {
        Self {
            dragging_edge: false,
            dragged_edge: None,
            edge_end_node: None,
            hovered_node: false,
            hovered_node_data: None,
            previous_moved: None,
            selected_node_for_move: None,
        }
    }
}

impl<P> InteractionState<P> {
    pub fn edge_end_key(&self) -> Option<&NodeKey> {
        self.edge_end_node.as_ref().map(|n| &n.id)
    }

    pub fn hovered_key(&self) -> Option<&NodeKey> {
        self.hovered_node_data.as_ref().map(|n| &n.id)
    }

    /// Start or extend a free-floating edge drag.
    pub fn begin_edge_drag(&mut self, edge: EdgeDescriptor) {
        self.dragging_edge = true;
        self.dragged_edge = Some(edge);
    }

    /// Finish an edge drag on release, keeping `previous_moved` so the
    /// host clearing `moved` still ends the drag on the next pass.
    pub fn end_edge_drag(&mut self) {
        self.dragging_edge = false;
        self.dragged_edge = None;
        self.edge_end_node = None;
    }

    /// Drop every drag-related field.
    pub fn reset_drag(&mut self) {
        self.previous_moved = None;
        self.dragging_edge = false;
        self.dragged_edge = None;
        self.edge_end_node = None;
        self.hovered_node = false;
        self.hovered_node_data = None;
    }
}

/// What the user is doing, as seen from the interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    HoveringNode,
    DraggingEdge,
    DraggingEdgeOverTarget,
}

impl EditorMode {
    pub fn of<P>(state: &InteractionState<P>) -> Self {
        match (state.dragging_edge, state.edge_end_node.is_some(), state.hovered_node) {
            (true, true, _) => EditorMode::DraggingEdgeOverTarget,
            (true, false, _) => EditorMode::DraggingEdge,
            (false, _, true) => EditorMode::HoveringNode,
            (false, _, false) => EditorMode::Idle,
        }
    }
}

/// The two inputs the host pushes on every pass.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorInputs<P = ()> {
    pub moved: Option<MovedDescriptor>,
    pub selected: Option<NodeDescriptor<P>>,
}

impl<P> Default for EditorInputs<P> {
    fn default() -> Self {
        Self {
            moved: None,
            selected: None,
        }
    }
}

impl<P> EditorInputs<P> {
    pub fn new(moved: Option<MovedDescriptor>, selected: Option<NodeDescriptor<P>>) -> Self {
        Self { moved, selected }
    }
}

/// Derive the next interaction state.
///
/// A drag starts when `moved` names an edge present in the scene and
/// `selected` names a present node; it ends when `moved` goes away after a
/// drag was recorded. Anything else carries the state over.
pub fn derive_state<P: Clone>(
    prev: &InteractionState<P>,
    moved: Option<&MovedDescriptor>,
    selected: Option<&NodeDescriptor<P>>,
    scene: &SceneMaps<P>,
) -> InteractionState<P> {
    let mut next = prev.clone();

    match (moved, selected) {
        (Some(moved), Some(selected)) => {
            let edge_known = moved
                .edge_map_key()
                .is_some_and(|key| scene.contains_edge(&key));
            if edge_known && scene.contains_node(&selected.id) {
                if prev.previous_moved.is_none() {
                    tracing::debug!(
                        source = %moved.source,
                        target = %selected.id,
                        "edge drag over target"
                    );
                }
                next.previous_moved = Some(moved.clone());
                next.begin_edge_drag(EdgeDescriptor::from(moved));
                next.edge_end_node = Some(selected.clone());
                next.hovered_node = true;
                next.hovered_node_data = Some(selected.clone());
                next.selected_node_for_move = None;
            }
        }
        (None, _) if prev.previous_moved.is_some() => {
            tracing::debug!("edge drag ended");
            next.reset_drag();
        }
        _ => {}
    }

    tracing::trace!(mode = ?EditorMode::of(&next), "derived interaction state");
    next
}

/// Whether a pass needs re-rendering.
///
/// A change of `edge_end_node` always forces one, even when the generic
/// comparison of inputs and the rest of the state finds nothing.
pub fn should_update<P: PartialEq>(
    prev_inputs: &EditorInputs<P>,
    next_inputs: &EditorInputs<P>,
    prev_state: &InteractionState<P>,
    next_state: &InteractionState<P>,
) -> bool {
    prev_inputs != next_inputs
        || prev_state.edge_end_key() != next_state.edge_end_key()
        || prev_state.dragging_edge != next_state.dragging_edge
        || prev_state.hovered_node != next_state.hovered_node
}

/// Hover-enter handling.
///
/// - genuine hover with nothing hovered: hover the node
/// - synthetic hover during a drag: the node becomes the drop target
/// - genuine re-hover while not dragging: hover the node
/// - otherwise (genuine hover over another node mid-drag): unchanged
pub fn handle_node_mouse_enter<P: Clone>(
    state: &mut InteractionState<P>,
    node: &NodeDescriptor<P>,
    genuine: bool,
) {
    if genuine && !state.hovered_node {
        state.hovered_node = true;
        state.hovered_node_data = Some(node.clone());
    } else if !genuine && state.dragging_edge {
        state.edge_end_node = Some(node.clone());
    } else if !state.dragging_edge {
        state.hovered_node = true;
        state.hovered_node_data = Some(node.clone());
    }
}

/// Hover-leave handling.
///
/// Leaving clears the hover and the drop target, unless the pointer moved
/// straight into the hovered node itself (e.g. its label).
pub fn handle_node_mouse_leave<P>(
    state: &mut InteractionState<P>,
    node: &NodeDescriptor<P>,
    related_node: Option<&str>,
) {
    if related_node.is_some() && related_node == state.hovered_key().map(|k| k.as_str()) {
        return;
    }
    if state.hovered_key() == Some(&node.id) || state.hovered_node_data.is_none() {
        state.hovered_node = false;
        state.hovered_node_data = None;
    }
    if state.edge_end_key() == Some(&node.id) {
        state.edge_end_node = None;
    }
}

/// Side effect on the drawn scene, in the order it must be applied.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderEffect {
    /// Move the targeted marker between nodes
    RetargetMarker {
        previous: Option<NodeKey>,
        next: Option<NodeKey>,
    },
    /// A drag started: drop the stale element drawn for the pair
    RemoveEdgeElement {
        source: NodeKey,
        target: Option<NodeKey>,
    },
    /// A drag ended: drop the free-floating drag-edge container
    RemoveCustomContainer,
    /// Redraw the in-flight edge
    DragEdge,
}

/// Plan the render effects of one pass.
pub fn plan_effects<P: PartialEq>(
    prev_inputs: &EditorInputs<P>,
    next_inputs: &EditorInputs<P>,
    prev_state: &InteractionState<P>,
    next_state: &InteractionState<P>,
) -> Vec<RenderEffect> {
    let mut effects = Vec::new();

    let previous_target = prev_state.edge_end_key();
    let next_target = next_state.edge_end_key();
    if previous_target != next_target {
        effects.push(RenderEffect::RetargetMarker {
            previous: previous_target.cloned(),
            next: next_target.cloned(),
        });
    }

    match (&prev_inputs.moved, &next_inputs.moved) {
        (None, Some(moved)) => effects.push(RenderEffect::RemoveEdgeElement {
            source: moved.source.clone(),
            target: moved.target.clone(),
        }),
        (Some(_), None) => effects.push(RenderEffect::RemoveCustomContainer),
        _ => {}
    }

    let both_present = next_inputs.selected.is_some() && next_inputs.moved.is_some();
    let changed = prev_inputs.selected != next_inputs.selected || prev_inputs.moved != next_inputs.moved;
    if both_present && changed && next_state.dragged_edge.is_some() {
        effects.push(RenderEffect::DragEdge);
    }

    effects
}

/// Pointer coordinate used for drag geometry.
///
/// While both inputs are present this is the selected node's position, which
/// snaps the in-flight edge to the candidate target.
pub fn mouse_coordinates<P>(inputs: &EditorInputs<P>, last_pointer: Point) -> Point {
    match (&inputs.selected, &inputs.moved) {
        (Some(selected), Some(_)) => selected.position(),
        _ => last_pointer,
    }
}
