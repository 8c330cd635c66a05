//! The graph editor: reconciler, element registry, components and hooks in one place.
//!
//! [`GraphEditor`] is the object the Scene Host talks to. The host
//!
//! - hands over the scene with [`set_scene`](GraphEditor::set_scene),
//! - forwards low-level pointer input (`dispatch_pointer_down`,
//!   `node_pointer_enter`, `node_drag_move`, ...),
//! - pushes the `moved`/`selected` inputs every pass with
//!   [`update`](GraphEditor::update),
//! - and reads back what to draw from the registry (or binds Slint models
//!   to it).
//!
//! # Example
//!
//! ```ignore
//! use slint_digraph_editor::{EditorConfig, EditorHooks, GraphEditor, NodeDescriptor, EdgeDescriptor};
//!
//! let editor: GraphEditor = GraphEditor::new(
//!     EditorConfig::default(),
//!     EditorHooks::new().on_create_edge(|source, target| {
//!         println!("connect {} -> {}", source.id, target.id);
//!     }),
//! );
//! editor.set_scene(
//!     vec![NodeDescriptor::new("A", 0.0, 0.0), NodeDescriptor::new("B", 300.0, 0.0)],
//!     vec![EdgeDescriptor::new("A", "B")],
//! )?;
//!
//! let edge_model = Rc::new(VecModel::<EdgePath>::default());
//! editor.bind_edge_model(edge_model.clone(), |glyph| EdgePath {
//!     path: glyph.path_commands.clone(),
//!     selected: glyph.selected,
//! });
//! window.set_edges(ModelRc::from(edge_model));
//!
//! window.on_node_hover({
//!     let editor = editor.clone();
//!     move |id, buttons| editor.node_pointer_enter(&id, &PointerEvent::at(0.0, 0.0).with_buttons(buttons as u8))
//! });
//! ```
//!
//! No borrow of editor state is held while a host callback runs, so
//! callbacks may call back into the editor.

use crate::background::{default_background, Background, BackgroundContext};
use crate::config::EditorConfig;
use crate::edge::{EdgeComponent, EdgeEnd, EdgeGlyph, EdgeHandlers};
use crate::error::EditorError;
use crate::events::{ElementId, PointerEvent, PointerListeners};
use crate::geometry::{calculate_offset, Point};
use crate::hooks::EditorHooks;
use crate::model::{edge_element_id, edge_map_key, EdgeDescriptor, MovedDescriptor, NodeDescriptor, NodeKey};
use crate::node::{NodeComponent, NodeGlyph, NodeHandlers};
use crate::reconciler::{
    self, derive_state, mouse_coordinates, plan_effects, should_update, EditorInputs,
    EditorMode, InteractionState, RenderEffect,
};
use crate::registry::ElementRegistry;
use crate::scene::SceneMaps;
use crate::selection::SelectionManager;
use slint::{SharedString, VecModel};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

struct EditorInner<P> {
    core: RefCell<EditorCore<P>>,
    listeners: PointerListeners,
}

struct EditorCore<P> {
    this: Weak<EditorInner<P>>,
    listeners: PointerListeners,
    config: Rc<EditorConfig>,
    hooks: EditorHooks<P>,
    scene: SceneMaps<P>,
    state: InteractionState<P>,
    inputs: EditorInputs<P>,
    last_pointer: Point,
    selection: SelectionManager,
    registry: ElementRegistry,
    nodes: HashMap<NodeKey, NodeComponent<P>>,
    edges: HashMap<SharedString, EdgeComponent>,
}

/// Interactive editing overlay for a node/edge graph.
///
/// Clone this to share it across callbacks.
pub struct GraphEditor<P = ()> {
    inner: Rc<EditorInner<P>>,
}

impl<P> Clone for GraphEditor<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// What releasing a node drag turned out to be.
enum Release<P> {
    CreateEdge(Option<(NodeDescriptor<P>, NodeDescriptor<P>)>),
    Update,
}

impl<P: Clone + PartialEq + 'static> Default for GraphEditor<P> {
    fn default() -> Self {
        Self::new(EditorConfig::default(), EditorHooks::default())
    }
}

impl<P: Clone + PartialEq + 'static> GraphEditor<P> {
    pub fn new(config: EditorConfig, hooks: EditorHooks<P>) -> Self {
        let listeners = PointerListeners::new();
        let inner = Rc::new_cyclic(|this| EditorInner {
            core: RefCell::new(EditorCore {
                this: this.clone(),
                listeners: listeners.clone(),
                config: Rc::new(config),
                hooks,
                scene: SceneMaps::default(),
                state: InteractionState::default(),
                inputs: EditorInputs::default(),
                last_pointer: Point::ORIGIN,
                selection: SelectionManager::new(),
                registry: ElementRegistry::new(),
                nodes: HashMap::new(),
                edges: HashMap::new(),
            }),
            listeners,
        });
        Self { inner }
    }

    fn upgrade(this: &Weak<EditorInner<P>>) -> Option<Self> {
        this.upgrade().map(|inner| Self { inner })
    }

    // === Scene ===

    /// Replace the scene, run the layout engine and redraw everything.
    pub fn set_scene(
        &self,
        nodes: Vec<NodeDescriptor<P>>,
        edges: Vec<EdgeDescriptor>,
    ) -> Result<(), EditorError> {
        let mut scene = SceneMaps::new(nodes, edges)?;
        let engine = self.inner.core.borrow().hooks.layout_engine.clone();
        if let Some(engine) = engine {
            scene.apply_layout(engine.as_ref());
        }
        let mut core = self.inner.core.borrow_mut();
        tracing::debug!(
            nodes = scene.nodes().len(),
            edges = scene.edges().len(),
            "scene replaced"
        );
        core.scene = scene;
        core.remount_all();
        Ok(())
    }

    /// Current position and data of a node.
    pub fn node(&self, key: &str) -> Option<NodeDescriptor<P>> {
        self.inner.core.borrow().scene.node(key).cloned()
    }

    pub fn with_scene<R>(&self, f: impl FnOnce(&SceneMaps<P>) -> R) -> R {
        f(&self.inner.core.borrow().scene)
    }

    // === Moved / selected channel ===

    /// Push the host inputs for this pass.
    ///
    /// Returns whether the pass re-rendered.
    pub fn update(&self, moved: Option<MovedDescriptor>, selected: Option<NodeDescriptor<P>>) -> bool {
        let mut core = self.inner.core.borrow_mut();
        let next_inputs = EditorInputs::new(moved, selected);
        let prev_inputs = std::mem::replace(&mut core.inputs, next_inputs.clone());
        let prev_state = core.state.clone();
        let next_state = derive_state(
            &prev_state,
            next_inputs.moved.as_ref(),
            next_inputs.selected.as_ref(),
            &core.scene,
        );

        let update = should_update(&prev_inputs, &next_inputs, &prev_state, &next_state);
        let effects = plan_effects(&prev_inputs, &next_inputs, &prev_state, &next_state);
        core.state = next_state;
        tracing::trace!(update, effects = effects.len(), "editor pass");

        if update {
            core.apply_effects(effects);
            core.refresh_interaction_glyphs(&prev_state);
        }
        update
    }

    pub fn state(&self) -> InteractionState<P> {
        self.inner.core.borrow().state.clone()
    }

    pub fn mode(&self) -> EditorMode {
        EditorMode::of(&self.inner.core.borrow().state)
    }

    pub fn inputs(&self) -> EditorInputs<P> {
        self.inner.core.borrow().inputs.clone()
    }

    /// Record the latest raw pointer position.
    pub fn set_pointer(&self, position: Point) {
        self.inner.core.borrow_mut().last_pointer = position;
    }

    /// Authoritative pointer coordinate for drag geometry.
    pub fn mouse_coordinates(&self) -> Point {
        let core = self.inner.core.borrow();
        mouse_coordinates(&core.inputs, core.last_pointer)
    }

    /// Redraw the in-flight edge at the current pointer coordinate.
    pub fn drag_edge(&self) {
        self.inner.core.borrow_mut().drag_edge();
    }

    /// Redraw one edge; labels are hidden while `node_moving`.
    pub fn sync_render_edge(&self, edge: &EdgeDescriptor, node_moving: bool) {
        self.inner.core.borrow_mut().sync_render_edge(edge, node_moving);
    }

    // === Pointer input from the Scene Host ===

    pub fn listeners(&self) -> PointerListeners {
        self.inner.listeners.clone()
    }

    /// Forward a native pointer-down on an element to its listeners.
    pub fn dispatch_pointer_down(&self, element: &ElementId, event: &PointerEvent) -> bool {
        self.inner.listeners.dispatch(element, event)
    }

    fn node_component(&self, key: &str) -> Option<NodeComponent<P>> {
        let component = self.inner.core.borrow().nodes.get(&NodeKey::from(key)).cloned();
        if component.is_none() {
            tracing::trace!(node = key, "pointer input for unmounted node");
        }
        component
    }

    pub fn node_pointer_enter(&self, key: &str, event: &PointerEvent) {
        if let Some(component) = self.node_component(key) {
            component.pointer_enter(event);
        }
    }

    pub fn node_pointer_leave(&self, key: &str, event: &PointerEvent) {
        if let Some(component) = self.node_component(key) {
            component.pointer_leave(event);
        }
    }

    pub fn node_drag_move(&self, key: &str, position: Point, shift: bool) {
        if let Some(component) = self.node_component(key) {
            component.drag_move(position, shift);
        }
    }

    pub fn node_drag_end(&self, key: &str, position: Point, shift: bool) {
        if let Some(component) = self.node_component(key) {
            component.drag_end(position, shift);
        }
    }

    // === Editor behaviours ===

    pub fn handle_node_mouse_enter(&self, event: &PointerEvent, node: &NodeDescriptor<P>, genuine: bool) {
        let hook = {
            let mut core = self.inner.core.borrow_mut();
            let prev = core.state.clone();
            reconciler::handle_node_mouse_enter(&mut core.state, node, genuine);
            core.commit(&prev);
            core.hooks.on_node_mouse_enter.clone()
        };
        if let Some(f) = hook {
            f(event, node, genuine);
        }
    }

    pub fn handle_node_mouse_leave(&self, event: &PointerEvent, node: &NodeDescriptor<P>) {
        let hook = {
            let mut core = self.inner.core.borrow_mut();
            let prev = core.state.clone();
            reconciler::handle_node_mouse_leave(&mut core.state, node, event.related_node.as_deref());
            core.commit(&prev);
            core.hooks.on_node_mouse_leave.clone()
        };
        if let Some(f) = hook {
            f(event, node);
        }
    }

    /// A node is being dragged.
    ///
    /// With `shift`, or while an edge drag is under way, this draws a
    /// free-floating edge from the node to `position`; otherwise the node
    /// moves and its edges follow without labels.
    pub fn handle_node_move(&self, position: Point, node_id: &str, shift: bool) {
        let hook = {
            let mut core = self.inner.core.borrow_mut();
            core.last_pointer = position;
            if shift || core.state.dragging_edge {
                core.drag_free_edge(node_id, position);
            } else {
                core.move_node(node_id, position, true);
            }
            core.hooks.on_node_move.clone()
        };
        if let Some(f) = hook {
            f(position, node_id, shift);
        }
    }

    /// A node drag was released.
    ///
    /// Ends an edge drag, asking the host to create the edge when it was
    /// dropped on another node not yet connected; otherwise commits the move.
    pub fn handle_node_update(&self, position: Point, node_id: &str, shift: bool) {
        let (release, hooks) = {
            let mut core = self.inner.core.borrow_mut();
            let release = if core.state.dragging_edge {
                Release::CreateEdge(core.finish_edge_drag(node_id))
            } else {
                core.move_node(node_id, position, false);
                Release::Update
            };
            (release, core.hooks.clone())
        };

        match release {
            Release::CreateEdge(Some((source, target))) => {
                tracing::debug!(source = %source.id, target = %target.id, "create edge");
                if let Some(f) = &hooks.on_create_edge {
                    f(&source, &target);
                }
            }
            Release::CreateEdge(None) => {}
            Release::Update => {
                if let Some(f) = &hooks.on_node_update {
                    f(position, node_id, shift);
                }
            }
        }
    }

    /// A node was clicked or released; `creating_edge` suppresses the host callback.
    pub fn handle_node_selected(&self, node: &NodeDescriptor<P>, creating_edge: bool) {
        let hook = {
            let mut core = self.inner.core.borrow_mut();
            let prev = core.state.clone();
            core.state.selected_node_for_move = Some(node.id.clone());
            core.clear_edge_selection();
            core.commit(&prev);
            core.hooks.on_node_selected.clone()
        };
        if creating_edge {
            return;
        }
        if let Some(f) = hook {
            f(node, &node.id, creating_edge);
        }
    }

    /// An edge overlay was pressed: select the edge and paint it on top.
    pub fn handle_edge_mouse_down(&self, event: &PointerEvent, edge: &EdgeDescriptor) {
        let hook = {
            let mut core = self.inner.core.borrow_mut();
            let prev = core.state.clone();
            core.state.selected_node_for_move = None;
            core.clear_edge_selection();
            core.selection.select_edge(edge);
            core.sync_render_edge(edge, false);
            core.commit(&prev);
            core.hooks.on_edge_mouse_down.clone()
        };
        if let Some(f) = hook {
            f(event, edge);
        }
    }

    /// The background was pressed: drop every selection.
    pub fn handle_background_mouse_down(&self, event: &PointerEvent) {
        let hook = {
            let mut core = self.inner.core.borrow_mut();
            let prev = core.state.clone();
            core.state.selected_node_for_move = None;
            core.clear_edge_selection();
            core.commit(&prev);
            core.hooks.on_background_mouse_down.clone()
        };
        if let Some(f) = hook {
            f(event);
        }
    }

    /// Background to draw, through `render_background` when one is set.
    pub fn render_background(&self) -> Background {
        let (ctx, render) = {
            let core = self.inner.core.borrow();
            let this = core.this.clone();
            let ctx = BackgroundContext {
                grid_size: core.config.grid_size,
                background_fill_id: core.config.background_fill_id.clone(),
                on_mouse_down: Some(Rc::new(move |event: &PointerEvent| {
                    if let Some(editor) = Self::upgrade(&this) {
                        editor.handle_background_mouse_down(event);
                    }
                })),
            };
            (ctx, core.hooks.render_background.clone())
        };
        match render {
            Some(f) => f(&ctx),
            None => default_background(&ctx),
        }
    }

    // === Drawn elements ===

    pub fn with_registry<R>(&self, f: impl FnOnce(&ElementRegistry) -> R) -> R {
        f(&self.inner.core.borrow().registry)
    }

    pub fn node_glyph(&self, key: &str) -> Option<NodeGlyph> {
        self.inner.core.borrow().registry.node(key).cloned()
    }

    pub fn edge_glyph(&self, element_id: &str) -> Option<EdgeGlyph> {
        self.inner.core.borrow().registry.edge(element_id).cloned()
    }

    /// Edge element ids in draw order.
    pub fn edge_order(&self) -> Vec<SharedString> {
        self.inner.core.borrow().registry.edge_order()
    }

    /// Node carrying the targeted marker.
    pub fn targeted(&self) -> Option<NodeKey> {
        self.inner.core.borrow().registry.targeted().cloned()
    }

    /// Element id of the selected edge.
    pub fn selected_edge(&self) -> Option<SharedString> {
        self.inner.core.borrow().selection.selected_element_id()
    }

    /// Write the selected edge's element id into `model`.
    pub fn sync_selection(&self, model: &VecModel<SharedString>) {
        self.inner.core.borrow().selection.sync_to_model(model);
    }

    pub fn bind_edge_model<M, F>(&self, model: Rc<VecModel<M>>, constructor: F)
    where
        M: Clone + 'static,
        F: Fn(&EdgeGlyph) -> M + 'static,
    {
        self.inner
            .core
            .borrow_mut()
            .registry
            .bind_edge_model(model, constructor);
    }

    pub fn bind_node_model<M, F>(&self, model: Rc<VecModel<M>>, constructor: F)
    where
        M: Clone + 'static,
        F: Fn(&NodeGlyph, bool) -> M + 'static,
    {
        self.inner
            .core
            .borrow_mut()
            .registry
            .bind_node_model(model, constructor);
    }
}

impl<P: Clone + PartialEq + 'static> EditorCore<P> {
    fn node_handlers(&self) -> NodeHandlers<P> {
        let this = &self.this;
        NodeHandlers {
            mouse_down: self.hooks.on_node_mouse_down.clone(),
            mouse_enter: Some(Rc::new({
                let this = this.clone();
                move |event: &PointerEvent, node: &NodeDescriptor<P>, genuine: bool| {
                    if let Some(editor) = GraphEditor::upgrade(&this) {
                        editor.handle_node_mouse_enter(event, node, genuine);
                    }
                }
            })),
            mouse_leave: Some(Rc::new({
                let this = this.clone();
                move |event: &PointerEvent, node: &NodeDescriptor<P>| {
                    if let Some(editor) = GraphEditor::upgrade(&this) {
                        editor.handle_node_mouse_leave(event, node);
                    }
                }
            })),
            node_move: Some(Rc::new({
                let this = this.clone();
                move |position: Point, node_id: &str, shift: bool| {
                    if let Some(editor) = GraphEditor::upgrade(&this) {
                        editor.handle_node_move(position, node_id, shift);
                    }
                }
            })),
            node_update: Some(Rc::new({
                let this = this.clone();
                move |position: Point, node_id: &str, shift: bool| {
                    if let Some(editor) = GraphEditor::upgrade(&this) {
                        editor.handle_node_update(position, node_id, shift);
                    }
                }
            })),
            node_selected: Some(Rc::new({
                let this = this.clone();
                move |node: &NodeDescriptor<P>, _id: &str, shift: bool| {
                    if let Some(editor) = GraphEditor::upgrade(&this) {
                        editor.handle_node_selected(node, shift);
                    }
                }
            })),
        }
    }

    fn edge_handlers(&self) -> EdgeHandlers {
        let this = self.this.clone();
        EdgeHandlers {
            mouse_down: Some(Rc::new(move |event: &PointerEvent, edge: &EdgeDescriptor| {
                if let Some(editor) = GraphEditor::upgrade(&this) {
                    editor.handle_edge_mouse_down(event, edge);
                }
            })),
            render_edge: self.hooks.render_edge.clone(),
            render_edge_text: self.hooks.render_edge_text.clone(),
        }
    }

    // === Mounting ===

    fn remount_all(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.registry.clear();

        let nodes = self.scene.nodes().to_vec();
        for node in nodes {
            self.mount_node(node);
        }
        // The pair being dragged is drawn only as the in-flight edge
        let hidden = self
            .state
            .previous_moved
            .as_ref()
            .filter(|_| self.state.dragging_edge)
            .map(EdgeDescriptor::from);
        let edges = self.scene.edges().to_vec();
        for edge in &edges {
            if let Some(hidden) = &hidden {
                if edge.connects(&hidden.source, hidden.target.as_deref()) {
                    continue;
                }
            }
            self.sync_render_edge(edge, false);
        }

        if self.state.dragged_edge.is_some() {
            self.drag_edge();
        }
        let targeted = self.state.edge_end_key().cloned();
        self.registry.retarget(None, targeted.as_deref());
    }

    fn mount_node(&mut self, node: NodeDescriptor<P>) {
        let component = NodeComponent::new(
            node,
            self.config.clone(),
            self.node_handlers(),
            self.hooks.render_node.clone(),
            &self.listeners,
        );
        let key = component.key().clone();
        self.nodes.insert(key.clone(), component);
        self.refresh_node(&key);
    }

    fn refresh_node(&mut self, key: &str) {
        let Some(component) = self.nodes.get(&NodeKey::from(key)) else {
            return;
        };
        let selected = self.state.selected_node_for_move.as_deref() == Some(key);
        let hovered = self.state.hovered_key().map(|k| k.as_str()) == Some(key);
        let glyph = component.glyph(selected, hovered);
        self.registry.mount_node(glyph);
    }

    fn refresh_interaction_glyphs(&mut self, prev: &InteractionState<P>) {
        let mut keys: Vec<NodeKey> = [
            prev.hovered_key(),
            self.state.hovered_key(),
            prev.selected_node_for_move.as_ref(),
            self.state.selected_node_for_move.as_ref(),
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
        keys.dedup();
        for key in keys {
            self.refresh_node(&key);
        }
    }

    // === Edges ===

    fn sync_render_edge(&mut self, edge: &EdgeDescriptor, node_moving: bool) {
        if edge.source.is_empty() {
            return;
        }
        let source = self
            .scene
            .node(&edge.source)
            .map(|n| n.position())
            .unwrap_or(Point::ORIGIN);
        let target_node = edge
            .target
            .as_ref()
            .and_then(|target| self.scene.node(target))
            .map(|n| n.position());
        let Some(end) = EdgeEnd::resolve(edge, target_node) else {
            tracing::warn!(
                source = %edge.source,
                target = ?edge.target,
                "edge has no resolvable end, not drawn"
            );
            return;
        };

        let selected = self.selection.contains(edge);
        let component = EdgeComponent::new(
            edge.clone(),
            source,
            end,
            selected,
            node_moving,
            &self.config,
            &self.edge_handlers(),
            &self.listeners,
        );
        let glyph = component.glyph().clone();
        let element_id = glyph.element_id.clone();

        self.edges.insert(element_id.clone(), component);
        self.registry.render_edge(glyph);
        if selected {
            self.registry.raise_edge(&element_id);
        }
    }

    fn remove_custom_edge(&mut self) {
        self.edges.remove(&edge_element_id("", None));
        self.registry.remove_custom_container();
    }

    fn render_connected_edges(&mut self, node_id: &str, node_moving: bool) {
        let edges: Vec<EdgeDescriptor> = self.scene.connected_edges(node_id).cloned().collect();
        for edge in &edges {
            self.sync_render_edge(edge, node_moving);
        }
    }

    fn clear_edge_selection(&mut self) {
        let Some(previous) = self.selection.selected_element_id() else {
            return;
        };
        self.selection.clear();
        let edge = self.edges.get(&previous).map(|c| c.data().clone());
        if let Some(edge) = edge {
            self.sync_render_edge(&edge, false);
        }
    }

    fn move_node(&mut self, node_id: &str, position: Point, node_moving: bool) {
        if let Err(err) = self.scene.set_node_position(node_id, position) {
            tracing::warn!(%err, "node move ignored");
            return;
        }
        if let Some(node) = self.scene.node(node_id).cloned() {
            self.mount_node(node);
        }
        self.render_connected_edges(node_id, node_moving);
    }

    /// Draw the free-floating edge from `node_id` toward `position`.
    fn drag_free_edge(&mut self, node_id: &str, position: Point) {
        let source = match &self.state.dragged_edge {
            Some(edge) if edge.target.is_some() => {
                // Host-driven drag between known nodes; drawn from `update`
                return;
            }
            Some(edge) => edge.source.clone(),
            None => NodeKey::from(node_id),
        };
        if !self.state.dragging_edge {
            tracing::debug!(source = %source, "free edge drag started");
        }
        self.state
            .begin_edge_drag(EdgeDescriptor::to_position(source, position));
        self.drag_edge();
    }

    /// Tear down the in-flight edge and pick the pair to connect, if any.
    fn finish_edge_drag(&mut self, node_id: &str) -> Option<(NodeDescriptor<P>, NodeDescriptor<P>)> {
        let prev = self.state.clone();
        let target = self.state.edge_end_node.clone();
        let source_id = self
            .state
            .dragged_edge
            .as_ref()
            .map_or_else(|| NodeKey::from(node_id), |edge| edge.source.clone());
        self.state.end_edge_drag();
        self.remove_custom_edge();
        self.commit(&prev);

        let target = target?;
        if target.id == source_id
            || self.scene.contains_edge(&edge_map_key(&source_id, &target.id))
            || self.scene.contains_edge(&edge_map_key(&target.id, &source_id))
        {
            tracing::trace!(source = %source_id, target = %target.id, "edge not created");
            return None;
        }
        let source = self.scene.node(&source_id).cloned()?;
        Some((source, target))
    }

    fn drag_edge(&mut self) {
        let Some(dragged) = self.state.dragged_edge.clone() else {
            return;
        };
        let Some(source) = self.scene.node(&dragged.source).map(|n| n.position()) else {
            tracing::warn!(source = %dragged.source, "dragged edge source not in scene");
            return;
        };
        let mouse = mouse_coordinates(&self.inputs, self.last_pointer);
        let off = calculate_offset(self.config.node_size, source, mouse);
        let target = Point::new(mouse.x + off.x_off, mouse.y + off.y_off);

        let edge = EdgeDescriptor::to_position(dragged.source, target);
        self.sync_render_edge(&edge, false);
        self.state.dragging_edge = true;
    }

    // === Effects ===

    /// Apply marker changes caused by a direct state mutation.
    fn commit(&mut self, prev: &InteractionState<P>) {
        let effects = plan_effects(&self.inputs, &self.inputs, prev, &self.state);
        self.apply_effects(effects);
        self.refresh_interaction_glyphs(prev);
    }

    fn apply_effects(&mut self, effects: Vec<RenderEffect>) {
        for effect in effects {
            match effect {
                RenderEffect::RetargetMarker { previous, next } => {
                    tracing::debug!(?previous, ?next, "retarget marker");
                    self.registry.retarget(previous.as_deref(), next.as_deref());
                }
                RenderEffect::RemoveEdgeElement { source, target } => {
                    self.edges.remove(&edge_element_id(&source, target.as_ref()));
                    self.registry.remove_edge_element(&source, target.as_ref());
                }
                RenderEffect::RemoveCustomContainer => self.remove_custom_edge(),
                RenderEffect::DragEdge => self.drag_edge(),
            }
        }
    }
}
