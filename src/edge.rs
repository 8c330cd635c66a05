//! Edge Interaction Component.
//!
//! An [`EdgeComponent`] turns an [`EdgeDescriptor`] plus resolved endpoint
//! positions into an [`EdgeGlyph`]: a visible path, a wider invisible overlay
//! path that carries the pointer-down listener, and an optional label at the
//! path's midpoint.

use crate::config::EditorConfig;
use crate::events::{ElementId, ListenerGuard, PointerListeners};
use crate::geometry::{
    edge_handle_translation, generate_edge_path, translate_transform, trimmed_endpoints, Point,
};
use crate::hooks::{EdgeMouseDownFn, RenderEdgeFn, RenderEdgeTextFn};
use crate::model::{edge_container_id, EdgeDescriptor, NodeKey};
use slint::{Color, SharedString};

/// Where an edge ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeEnd {
    /// Center of the target node
    Node(Point),
    /// Raw coordinates, while no target node resolves
    Position(Point),
}

impl EdgeEnd {
    /// Resolve the end from the target node position, falling back to the
    /// edge's raw `target_position`. `None` when neither is known.
    pub fn resolve(edge: &EdgeDescriptor, target_node: Option<Point>) -> Option<Self> {
        match (target_node, edge.target_position) {
            (Some(p), _) => Some(EdgeEnd::Node(p)),
            (None, Some(p)) => Some(EdgeEnd::Position(p)),
            (None, None) => None,
        }
    }

    pub fn point(&self) -> Point {
        match *self {
            EdgeEnd::Node(p) | EdgeEnd::Position(p) => p,
        }
    }
}

/// Label drawn at the middle of an edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeLabel {
    pub text: SharedString,
    pub anchor: Point,
    /// `"translate(x, y)"`
    pub transform: SharedString,
    pub selected: bool,
}

/// Drawn representation of an edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeGlyph {
    /// `"edge-<source>-<target>"` or `"edge-custom"`
    pub element_id: SharedString,
    pub container_id: SharedString,
    /// Id of the overlay path: `"<source>_<target>"`
    pub overlay_id: SharedString,
    pub source: NodeKey,
    pub target: Option<NodeKey>,
    /// `"edge"` or `"edge selected"`
    pub class_name: SharedString,
    pub path_commands: SharedString,
    pub overlay_path_commands: SharedString,
    /// Width of the overlay hit area
    pub overlay_width: f32,
    pub start: Point,
    pub end: Point,
    pub shape_id: SharedString,
    pub color: Color,
    pub selected: bool,
    pub label: Option<EdgeLabel>,
}

/// Everything an edge renderer gets to work with.
pub struct EdgeContext<'a> {
    pub data: &'a EdgeDescriptor,
    pub source: Point,
    pub target: EdgeEnd,
    pub config: &'a EditorConfig,
    pub selected: bool,
    pub node_moving: bool,
    pub render_edge_text: Option<&'a RenderEdgeTextFn>,
}

/// Arguments of the label renderer.
pub struct EdgeTextContext<'a> {
    pub data: &'a EdgeDescriptor,
    pub transform: &'a str,
    pub selected: bool,
}

/// Optional collaborators of an edge component.
#[derive(Clone, Default)]
pub struct EdgeHandlers {
    pub mouse_down: Option<EdgeMouseDownFn>,
    pub render_edge: Option<RenderEdgeFn>,
    pub render_edge_text: Option<RenderEdgeTextFn>,
}

/// One drawn edge. Dropping it detaches the overlay listener.
pub struct EdgeComponent {
    data: EdgeDescriptor,
    glyph: EdgeGlyph,
    _listener: ListenerGuard,
}

impl EdgeComponent {
    /// Render the edge and attach the overlay listener.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        data: EdgeDescriptor,
        source: Point,
        target: EdgeEnd,
        selected: bool,
        node_moving: bool,
        config: &EditorConfig,
        handlers: &EdgeHandlers,
        listeners: &PointerListeners,
    ) -> Self {
        let ctx = EdgeContext {
            data: &data,
            source,
            target,
            config,
            selected,
            node_moving,
            render_edge_text: handlers.render_edge_text.as_ref(),
        };
        let glyph = match &handlers.render_edge {
            Some(render) => render(&ctx),
            None => Self::default_glyph(&ctx),
        };

        let listener = listeners.subscribe(ElementId::EdgeOverlay(glyph.element_id.clone()), {
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
            glyph,
            _listener: listener,
        }
    }

    pub fn data(&self) -> &EdgeDescriptor {
        &self.data
    }

    pub fn glyph(&self) -> &EdgeGlyph {
        &self.glyph
    }

    /// Default glyph: trimmed straight path styled from `edge_types`.
    pub fn default_glyph(ctx: &EdgeContext<'_>) -> EdgeGlyph {
        let data = ctx.data;
        let (start, end) = trimmed_endpoints(ctx.config.node_size, ctx.source, ctx.target.point());
        let path: SharedString = generate_edge_path(start, end).into();
        let element_id = data.element_id();
        let style = data
            .edge_type
            .as_ref()
            .and_then(|t| ctx.config.edge_types.get(t))
            .cloned()
            .unwrap_or_default();

        let label = match ctx.render_edge_text {
            Some(render) if !ctx.node_moving => {
                let anchor = edge_handle_translation(start, end);
                let transform = translate_transform(anchor);
                let text = render(&EdgeTextContext {
                    data,
                    transform: &transform,
                    selected: ctx.selected,
                });
                Some(EdgeLabel {
                    text,
                    anchor,
                    transform: transform.into(),
                    selected: ctx.selected,
                })
            }
            _ => None,
        };

        EdgeGlyph {
            container_id: edge_container_id(&element_id),
            element_id,
            overlay_id: overlay_id(data),
            source: data.source.clone(),
            target: data.target.clone(),
            class_name: if ctx.selected { "edge selected" } else { "edge" }.into(),
            path_commands: path.clone(),
            overlay_path_commands: path,
            overlay_width: ctx.config.edge_handle_size,
            start,
            end,
            shape_id: style.shape_id,
            color: style.color,
            selected: ctx.selected,
            label,
        }
    }
}

/// `"<source>_<target>"`, with an empty target for free edges.
pub fn overlay_id(edge: &EdgeDescriptor) -> SharedString {
    SharedString::from(format!(
        "{}_{}",
        edge.source,
        edge.target.as_deref().unwrap_or("")
    ))
}
