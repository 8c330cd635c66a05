//! Extension points: optional strategy functions and host callbacks.
//!
//! Every field is optional. A missing renderer falls back to the matching
//! default (`default_background`, `NodeComponent::default_glyph`,
//! `EdgeComponent::default_glyph`); a missing callback is skipped.
//!
//! # Example
//!
//! ```ignore
//! let hooks = EditorHooks::new()
//!     .on_node_move(|position, node_id, shift| {
//!         println!("{} moved to {:?} (shift: {})", node_id, position, shift);
//!     })
//!     .on_create_edge(|source, target| {
//!         graph.borrow_mut().connect(&source.id, &target.id);
//!     })
//!     .with_layout_engine(SnapToGrid::new(36.0));
//! ```

use crate::background::{Background, BackgroundContext};
use crate::edge::{EdgeContext, EdgeGlyph, EdgeTextContext};
use crate::events::PointerEvent;
use crate::geometry::Point;
use crate::layout::LayoutEngine;
use crate::model::{EdgeDescriptor, NodeDescriptor};
use crate::node::{NodeContext, NodeGlyph};
use slint::SharedString;
use std::rc::Rc;

pub type NodeMouseDownFn<P> = Rc<dyn Fn(&PointerEvent, &NodeDescriptor<P>)>;
/// `(event, node, is_genuine_hover)`
pub type NodeMouseEnterFn<P> = Rc<dyn Fn(&PointerEvent, &NodeDescriptor<P>, bool)>;
pub type NodeMouseLeaveFn<P> = Rc<dyn Fn(&PointerEvent, &NodeDescriptor<P>)>;
/// `(position, node_id, modifier)`
pub type NodeMoveFn = Rc<dyn Fn(Point, &str, bool)>;
/// `(position, node_id, modifier)`
pub type NodeUpdateFn = Rc<dyn Fn(Point, &str, bool)>;
/// `(node, node_id, modifier)`
pub type NodeSelectedFn<P> = Rc<dyn Fn(&NodeDescriptor<P>, &str, bool)>;
pub type EdgeMouseDownFn = Rc<dyn Fn(&PointerEvent, &EdgeDescriptor)>;
pub type BackgroundMouseDownFn = Rc<dyn Fn(&PointerEvent)>;
/// `(source, target)`
pub type CreateEdgeFn<P> = Rc<dyn Fn(&NodeDescriptor<P>, &NodeDescriptor<P>)>;

pub type RenderBackgroundFn = Rc<dyn Fn(&BackgroundContext) -> Background>;
pub type RenderNodeFn<P> = Rc<dyn Fn(&NodeContext<'_, P>) -> NodeGlyph>;
pub type RenderEdgeFn = Rc<dyn Fn(&EdgeContext<'_>) -> EdgeGlyph>;
pub type RenderEdgeTextFn = Rc<dyn Fn(&EdgeTextContext<'_>) -> SharedString>;

/// Record of optional strategies and callbacks supplied by the Scene Host.
pub struct EditorHooks<P = ()> {
    pub render_background: Option<RenderBackgroundFn>,
    pub render_node: Option<RenderNodeFn<P>>,
    pub render_edge: Option<RenderEdgeFn>,
    pub render_edge_text: Option<RenderEdgeTextFn>,
    pub layout_engine: Option<Rc<dyn LayoutEngine<P>>>,

    pub on_node_mouse_down: Option<NodeMouseDownFn<P>>,
    pub on_node_mouse_enter: Option<NodeMouseEnterFn<P>>,
    pub on_node_mouse_leave: Option<NodeMouseLeaveFn<P>>,
    pub on_node_move: Option<NodeMoveFn>,
    pub on_node_update: Option<NodeUpdateFn>,
    pub on_node_selected: Option<NodeSelectedFn<P>>,
    pub on_edge_mouse_down: Option<EdgeMouseDownFn>,
    pub on_background_mouse_down: Option<BackgroundMouseDownFn>,
    pub on_create_edge: Option<CreateEdgeFn<P>>,
}

impl<P> Default for EditorHooks<P> {
    fn default() -> Self {
        Self {
            render_background: None,
            render_node: None,
            render_edge: None,
            render_edge_text: None,
            layout_engine: None,
            on_node_mouse_down: None,
            on_node_mouse_enter: None,
            on_node_mouse_leave: None,
            on_node_move: None,
            on_node_update: None,
            on_node_selected: None,
            on_edge_mouse_down: None,
            on_background_mouse_down: None,
            on_create_edge: None,
        }
    }
}

impl<P> Clone for EditorHooks<P> {
    fn clone(&self) -> Self {
        Self {
            render_background: self.render_background.clone(),
            render_node: self.render_node.clone(),
            render_edge: self.render_edge.clone(),
            render_edge_text: self.render_edge_text.clone(),
            layout_engine: self.layout_engine.clone(),
            on_node_mouse_down: self.on_node_mouse_down.clone(),
            on_node_mouse_enter: self.on_node_mouse_enter.clone(),
            on_node_mouse_leave: self.on_node_mouse_leave.clone(),
            on_node_move: self.on_node_move.clone(),
            on_node_update: self.on_node_update.clone(),
            on_node_selected: self.on_node_selected.clone(),
            on_edge_mouse_down: self.on_edge_mouse_down.clone(),
            on_background_mouse_down: self.on_background_mouse_down.clone(),
            on_create_edge: self.on_create_edge.clone(),
        }
    }
}

impl<P> EditorHooks<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render_background(
        mut self,
        f: impl Fn(&BackgroundContext) -> Background + 'static,
    ) -> Self {
        self.render_background = Some(Rc::new(f));
        self
    }

    pub fn with_render_node(mut self, f: impl Fn(&NodeContext<'_, P>) -> NodeGlyph + 'static) -> Self {
        self.render_node = Some(Rc::new(f));
        self
    }

    pub fn with_render_edge(mut self, f: impl Fn(&EdgeContext<'_>) -> EdgeGlyph + 'static) -> Self {
        self.render_edge = Some(Rc::new(f));
        self
    }

    pub fn with_render_edge_text(
        mut self,
        f: impl Fn(&EdgeTextContext<'_>) -> SharedString + 'static,
    ) -> Self {
        self.render_edge_text = Some(Rc::new(f));
        self
    }

    pub fn with_layout_engine(mut self, engine: impl LayoutEngine<P> + 'static) -> Self {
        self.layout_engine = Some(Rc::new(engine));
        self
    }

    pub fn on_node_mouse_down(mut self, f: impl Fn(&PointerEvent, &NodeDescriptor<P>) + 'static) -> Self {
        self.on_node_mouse_down = Some(Rc::new(f));
        self
    }

    pub fn on_node_mouse_enter(
        mut self,
        f: impl Fn(&PointerEvent, &NodeDescriptor<P>, bool) + 'static,
    ) -> Self {
        self.on_node_mouse_enter = Some(Rc::new(f));
        self
    }

    pub fn on_node_mouse_leave(mut self, f: impl Fn(&PointerEvent, &NodeDescriptor<P>) + 'static) -> Self {
        self.on_node_mouse_leave = Some(Rc::new(f));
        self
    }

    pub fn on_node_move(mut self, f: impl Fn(Point, &str, bool) + 'static) -> Self {
        self.on_node_move = Some(Rc::new(f));
        self
    }

    pub fn on_node_update(mut self, f: impl Fn(Point, &str, bool) + 'static) -> Self {
        self.on_node_update = Some(Rc::new(f));
        self
    }

    pub fn on_node_selected(mut self, f: impl Fn(&NodeDescriptor<P>, &str, bool) + 'static) -> Self {
        self.on_node_selected = Some(Rc::new(f));
        self
    }

    pub fn on_edge_mouse_down(mut self, f: impl Fn(&PointerEvent, &EdgeDescriptor) + 'static) -> Self {
        self.on_edge_mouse_down = Some(Rc::new(f));
        self
    }

    pub fn on_background_mouse_down(mut self, f: impl Fn(&PointerEvent) + 'static) -> Self {
        self.on_background_mouse_down = Some(Rc::new(f));
        self
    }

    pub fn on_create_edge(
        mut self,
        f: impl Fn(&NodeDescriptor<P>, &NodeDescriptor<P>) + 'static,
    ) -> Self {
        self.on_create_edge = Some(Rc::new(f));
        self
    }
}
