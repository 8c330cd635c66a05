//! Node Interaction Component.
//!
//! A [`NodeComponent`] renders one node glyph and turns pointer input into
//! semantic callbacks. It keeps no interaction state of its own; every
//! decision about hover or targeting is made by the editor.
//!
//! On construction the component attaches a native pointer-down listener to
//! its root element ([`ElementId::Node`]). The listener is released when the
//! last clone of the component is dropped.

use crate::config::{EditorConfig, TypeStyle};
use crate::events::{ElementId, ListenerGuard, PointerEvent, PointerListeners};
use crate::geometry::Point;
use crate::hooks::{
    NodeMouseDownFn, NodeMouseEnterFn, NodeMouseLeaveFn, NodeMoveFn, NodeSelectedFn,
    NodeUpdateFn, RenderNodeFn,
};
use crate::model::{NodeDescriptor, NodeKey};
use slint::{Color, SharedString};
use std::rc::Rc;

/// Drawn representation of a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeGlyph {
    pub key: NodeKey,
    /// `"node-<id>"`
    pub element_id: SharedString,
    /// Center of the glyph
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub shape_id: SharedString,
    pub color: Color,
    pub subtype_shape_id: Option<SharedString>,
    pub title: SharedString,
    pub selected: bool,
    pub hovered: bool,
}

/// Everything a node renderer gets to work with.
pub struct NodeContext<'a, P> {
    pub data: &'a NodeDescriptor<P>,
    pub config: &'a EditorConfig,
    pub selected: bool,
    pub hovered: bool,
}

/// Callbacks a node component emits.
pub struct NodeHandlers<P> {
    pub mouse_down: Option<NodeMouseDownFn<P>>,
    pub mouse_enter: Option<NodeMouseEnterFn<P>>,
    pub mouse_leave: Option<NodeMouseLeaveFn<P>>,
    pub node_move: Option<NodeMoveFn>,
    pub node_update: Option<NodeUpdateFn>,
    pub node_selected: Option<NodeSelectedFn<P>>,
}

impl<P> Default for NodeHandlers<P> {
    fn default() -> Self {
        Self {
            mouse_down: None,
            mouse_enter: None,
            mouse_leave: None,
            node_move: None,
            node_update: None,
            node_selected: None,
        }
    }
}

impl<P> Clone for NodeHandlers<P> {
    fn clone(&self) -> Self {
        Self {
            mouse_down: self.mouse_down.clone(),
            mouse_enter: self.mouse_enter.clone(),
            mouse_leave: self.mouse_leave.clone(),
            node_move: self.node_move.clone(),
            node_update: self.node_update.clone(),
            node_selected: self.node_selected.clone(),
        }
    }
}

/// One mounted node.
pub struct NodeComponent<P = ()> {
    data: NodeDescriptor<P>,
    config: Rc<EditorConfig>,
    handlers: NodeHandlers<P>,
    render_node: Option<RenderNodeFn<P>>,
    listener: Rc<ListenerGuard>,
}

impl<P: Clone> Clone for NodeComponent<P> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            config: self.config.clone(),
            handlers: self.handlers.clone(),
            render_node: self.render_node.clone(),
            listener: self.listener.clone(),
        }
    }
}

impl<P: Clone + 'static> NodeComponent<P> {
    /// Create the component and attach its pointer-down listener.
    pub fn new(
        data: NodeDescriptor<P>,
        config: Rc<EditorConfig>,
        handlers: NodeHandlers<P>,
        render_node: Option<RenderNodeFn<P>>,
        listeners: &PointerListeners,
    ) -> Self {
        let listener = listeners.subscribe(ElementId::Node(data.id.clone()), {
            let mouse_down = handlers.mouse_down.clone();
            let data = data.clone();
            move |event| {
                if let Some(f) = &mouse_down {
                    f(event, &data);
                }
            }
        });

        Self {
            data,
            config,
            handlers,
            render_node,
            listener: Rc::new(listener),
        }
    }
}

impl<P> NodeComponent<P> {
    pub fn data(&self) -> &NodeDescriptor<P> {
        &self.data
    }

    pub fn key(&self) -> &NodeKey {
        &self.data.id
    }

    /// Element the native listener is attached to.
    pub fn element(&self) -> &ElementId {
        self.listener.element()
    }

    /// Build the glyph, through `render_node` when one is set.
    pub fn glyph(&self, selected: bool, hovered: bool) -> NodeGlyph {
        let ctx = NodeContext {
            data: &self.data,
            config: &self.config,
            selected,
            hovered,
        };
        match &self.render_node {
            Some(render) => render(&ctx),
            None => Self::default_glyph(&ctx),
        }
    }

    /// Default glyph: a `node_size` square styled from the type tables.
    pub fn default_glyph(ctx: &NodeContext<'_, P>) -> NodeGlyph {
        let style = ctx
            .config
            .node_types
            .get(&ctx.data.node_type)
            .cloned()
            .unwrap_or_default();
        let subtype_shape_id = ctx
            .data
            .node_subtype
            .as_ref()
            .and_then(|subtype| ctx.config.node_subtypes.get(subtype))
            .map(|s: &TypeStyle| s.shape_id.clone());

        NodeGlyph {
            key: ctx.data.id.clone(),
            element_id: ctx.data.element_id(),
            x: ctx.data.x,
            y: ctx.data.y,
            size: ctx.config.node_size,
            shape_id: style.shape_id,
            color: style.color,
            subtype_shape_id,
            title: ctx.data.title.clone(),
            selected: ctx.selected,
            hovered: ctx.hovered,
        }
    }

    /// Pointer entered the glyph.
    ///
    /// A held primary button means an edge drag is passing over the node,
    /// so the hover is not genuine.
    pub fn pointer_enter(&self, event: &PointerEvent) {
        let genuine = !event.primary_held();
        if let Some(f) = &self.handlers.mouse_enter {
            f(event, &self.data, genuine);
        }
    }

    pub fn pointer_leave(&self, event: &PointerEvent) {
        if let Some(f) = &self.handlers.mouse_leave {
            f(event, &self.data);
        }
    }

    /// Drag tick; `shift` asks for an edge instead of a move.
    pub fn drag_move(&self, position: Point, shift: bool) {
        if let Some(f) = &self.handlers.node_move {
            f(position, &self.data.id, shift);
        }
    }

    /// Drag released: report the final position, then the selection.
    pub fn drag_end(&self, position: Point, shift: bool) {
        if let Some(f) = &self.handlers.node_update {
            f(position, &self.data.id, shift);
        }
        if let Some(f) = &self.handlers.node_selected {
            f(&self.data, &self.data.id, shift);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypeTable;
    use crate::events::PRIMARY_BUTTON;
    use std::cell::RefCell;

    fn setup_component(
        handlers: NodeHandlers<()>,
        listeners: &PointerListeners,
    ) -> NodeComponent<()> {
        let config = EditorConfig::default().with_node_types(
            TypeTable::new().with("task", TypeStyle::new("#task", Color::from_rgb_u8(10, 20, 30))),
        );
        NodeComponent::new(
            NodeDescriptor::new("A", 100.0, 50.0).with_type("task"),
            Rc::new(config),
            handlers,
            None,
            listeners,
        )
    }

    // ========================================================================
    // Listener lifetime
    // ========================================================================

    #[test]
    fn test_listener_attached_on_construction() {
        let listeners = PointerListeners::new();
        let downs = Rc::new(RefCell::new(Vec::new()));
        let handlers = NodeHandlers {
            mouse_down: Some(Rc::new({
                let downs = downs.clone();
                move |_: &PointerEvent, node: &NodeDescriptor| downs.borrow_mut().push(node.id.clone())
            })),
            ..Default::default()
        };
        let component = setup_component(handlers, &listeners);

        assert_eq!(component.element(), &ElementId::Node("A".into()));
        listeners.dispatch(&ElementId::Node("A".into()), &PointerEvent::at(0.0, 0.0));
        assert_eq!(*downs.borrow(), vec![NodeKey::from("A")]);
    }

    #[test]
    fn test_listener_released_with_last_clone() {
        let listeners = PointerListeners::new();
        let component = setup_component(NodeHandlers::default(), &listeners);
        let copy = component.clone();
        assert_eq!(listeners.len(), 1);

        drop(component);
        assert_eq!(listeners.len(), 1);
        drop(copy);
        assert!(listeners.is_empty());
    }

    // ========================================================================
    // Semantic callbacks
    // ========================================================================

    #[test]
    fn test_pointer_enter_reports_genuine_hover() {
        let listeners = PointerListeners::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handlers = NodeHandlers {
            mouse_enter: Some(Rc::new({
                let seen = seen.clone();
                move |_: &PointerEvent, _: &NodeDescriptor, genuine: bool| seen.borrow_mut().push(genuine)
            })),
            ..Default::default()
        };
        let component = setup_component(handlers, &listeners);

        component.pointer_enter(&PointerEvent::at(0.0, 0.0));
        component.pointer_enter(&PointerEvent::at(0.0, 0.0).with_buttons(PRIMARY_BUTTON));
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_drag_end_updates_then_selects() {
        let listeners = PointerListeners::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let handlers = NodeHandlers {
            node_update: Some(Rc::new({
                let log = log.clone();
                move |_: Point, id: &str, _: bool| log.borrow_mut().push(format!("update {}", id))
            })),
            node_selected: Some(Rc::new({
                let log = log.clone();
                move |_: &NodeDescriptor, id: &str, _: bool| log.borrow_mut().push(format!("select {}", id))
            })),
            ..Default::default()
        };
        let component = setup_component(handlers, &listeners);

        component.drag_end(Point::new(1.0, 2.0), false);
        assert_eq!(*log.borrow(), vec!["update A", "select A"]);
    }

    #[test]
    fn test_missing_handlers_are_skipped() {
        let listeners = PointerListeners::new();
        let component = setup_component(NodeHandlers::default(), &listeners);
        component.pointer_enter(&PointerEvent::at(0.0, 0.0));
        component.pointer_leave(&PointerEvent::at(0.0, 0.0));
        component.drag_move(Point::ORIGIN, true);
        component.drag_end(Point::ORIGIN, false);
    }

    // ========================================================================
    // Glyph
    // ========================================================================

    #[test]
    fn test_default_glyph_uses_type_style() {
        let listeners = PointerListeners::new();
        let component = setup_component(NodeHandlers::default(), &listeners);
        let glyph = component.glyph(false, true);

        assert_eq!(glyph.element_id, "node-A");
        assert_eq!(glyph.shape_id, "#task");
        assert_eq!(glyph.color, Color::from_rgb_u8(10, 20, 30));
        assert_eq!(glyph.size, 150.0);
        assert!(glyph.hovered);
        assert!(!glyph.selected);
        assert_eq!((glyph.x, glyph.y), (100.0, 50.0));
    }

    #[test]
    fn test_render_node_override() {
        let listeners = PointerListeners::new();
        let render: RenderNodeFn<()> = Rc::new(|ctx: &NodeContext<'_, ()>| NodeGlyph {
            key: ctx.data.id.clone(),
            title: "custom".into(),
            ..Default::default()
        });
        let component = NodeComponent::new(
            NodeDescriptor::new("A", 0.0, 0.0),
            Rc::new(EditorConfig::default()),
            NodeHandlers::default(),
            Some(render),
            &listeners,
        );
        assert_eq!(component.glyph(true, false).title, "custom");
    }
}
