//! Node, edge and drag descriptors exchanged between the Scene Host and the editor.

use crate::error::EditorError;
use crate::geometry::Point;
use slint::SharedString;

/// Identity key of a node, unique within the graph.
pub type NodeKey = SharedString;

/// Key of an edge in the scene's edge map (`"<source>_<target>"`).
pub type EdgeKey = SharedString;

/// Element id suffix used for an edge that has no target node yet.
pub const CUSTOM_EDGE_SUFFIX: &str = "custom";

/// A node as owned by the Scene Host.
///
/// `P` is an arbitrary application payload; the editor only clones it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeDescriptor<P = ()> {
    pub id: NodeKey,
    pub x: f32,
    pub y: f32,
    /// Glyph variant, looked up in `node_types`
    pub node_type: SharedString,
    /// Optional second glyph layer, looked up in `node_subtypes`
    pub node_subtype: Option<SharedString>,
    pub title: SharedString,
    pub payload: P,
}

impl<P: Default> NodeDescriptor<P> {
    /// Create a node with a default payload.
    pub fn new(id: impl Into<NodeKey>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            ..Default::default()
        }
    }
}

impl<P> NodeDescriptor<P> {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn with_type(mut self, node_type: impl Into<SharedString>) -> Self {
        self.node_type = node_type.into();
        self
    }

    pub fn with_subtype(mut self, node_subtype: impl Into<SharedString>) -> Self {
        self.node_subtype = Some(node_subtype.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = title.into();
        self
    }

    /// Element id of the node glyph (`"node-<id>"`)
    pub fn element_id(&self) -> SharedString {
        node_element_id(&self.id)
    }
}

/// An edge as owned by the Scene Host, or an edge still being dragged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeDescriptor {
    pub source: NodeKey,
    /// Target node, absent while the edge is dragged over free space
    pub target: Option<NodeKey>,
    /// Raw target coordinates, used when no target node resolves
    pub target_position: Option<Point>,
    /// Style variant, looked up in `edge_types`
    pub edge_type: Option<SharedString>,
    pub handle_text: SharedString,
}

impl EdgeDescriptor {
    /// Edge between two nodes.
    pub fn new(source: impl Into<NodeKey>, target: impl Into<NodeKey>) -> Self {
        Self {
            source: source.into(),
            target: Some(target.into()),
            ..Default::default()
        }
    }

    /// Edge from a node to a free-space position.
    pub fn to_position(source: impl Into<NodeKey>, position: Point) -> Self {
        Self {
            source: source.into(),
            target_position: Some(position),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, edge_type: impl Into<SharedString>) -> Self {
        self.edge_type = Some(edge_type.into());
        self
    }

    pub fn with_handle_text(mut self, text: impl Into<SharedString>) -> Self {
        self.handle_text = text.into();
        self
    }

    /// Check that the edge has somewhere to end.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.target.is_none() && self.target_position.is_none() {
            return Err(EditorError::MissingTargetPosition {
                source_key: self.source.clone(),
            });
        }
        Ok(())
    }

    /// Key in the scene's edge map, if the edge has a target node.
    pub fn map_key(&self) -> Option<EdgeKey> {
        self.target
            .as_ref()
            .map(|target| edge_map_key(&self.source, target))
    }

    /// Element id (`"edge-<source>-<target>"` or `"edge-custom"`).
    pub fn element_id(&self) -> SharedString {
        edge_element_id(&self.source, self.target.as_ref())
    }

    /// Whether this edge connects the given pair.
    pub fn connects(&self, source: &str, target: Option<&str>) -> bool {
        self.source.as_str() == source && self.target.as_deref() == target
    }
}

/// Transient description of an edge being dragged into existence.
///
/// Pushed by the hosting application on every pointer-move tick and cleared
/// when the drag ends or is cancelled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovedDescriptor {
    pub source: NodeKey,
    pub target: Option<NodeKey>,
    pub x: f32,
    pub y: f32,
}

impl MovedDescriptor {
    pub fn new(source: impl Into<NodeKey>, target: Option<&str>, x: f32, y: f32) -> Self {
        Self {
            source: source.into(),
            target: target.map(NodeKey::from),
            x,
            y,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Key of the scene edge this drag corresponds to.
    pub fn edge_map_key(&self) -> Option<EdgeKey> {
        self.target
            .as_ref()
            .map(|target| edge_map_key(&self.source, target))
    }
}

impl From<&MovedDescriptor> for EdgeDescriptor {
    fn from(moved: &MovedDescriptor) -> Self {
        Self {
            source: moved.source.clone(),
            target: moved.target.clone(),
            target_position: Some(moved.position()),
            ..Default::default()
        }
    }
}

/// Scene edge map key: `"<source>_<target>"`.
pub fn edge_map_key(source: &str, target: &str) -> EdgeKey {
    SharedString::from(format!("{}_{}", source, target))
}

/// Edge element id: `"edge-<source>-<target>"`, or `"edge-custom"` without a target.
pub fn edge_element_id(source: &str, target: Option<&NodeKey>) -> SharedString {
    match target {
        Some(target) => SharedString::from(format!("edge-{}-{}", source, target)),
        None => SharedString::from(format!("edge-{}", CUSTOM_EDGE_SUFFIX)),
    }
}

/// Id of the container wrapping an edge element.
pub fn edge_container_id(element_id: &str) -> SharedString {
    SharedString::from(format!("{}-container", element_id))
}

/// Node element id: `"node-<id>"`.
pub fn node_element_id(id: &str) -> SharedString {
    SharedString::from(format!("node-{}", id))
}
