//! Registry of mounted visual elements, addressed by key.
//!
//! The registry is the editor's view of what is currently drawn: one handle
//! per mounted node, the edge elements in draw order (last paints on top) and
//! the single node carrying the "targeted" marker.
//!
//! Lookups of elements that are not mounted are no-ops; the Scene Host may
//! unmount nodes between passes.
//!
//! # Auto-Sync Mode
//!
//! [`bind_edge_model`](ElementRegistry::bind_edge_model) and
//! [`bind_node_model`](ElementRegistry::bind_node_model) attach Slint
//! `VecModel`s that are re-synced after every mutation:
//!
//! ```ignore
//! let model = Rc::new(VecModel::<EdgePath>::default());
//! registry.bind_edge_model(model.clone(), |glyph| EdgePath {
//!     id: glyph.element_id.clone(),
//!     path: glyph.path_commands.clone(),
//!     selected: glyph.selected,
//! });
//! window.set_edge_paths(ModelRc::from(model));
//! ```

use crate::edge::EdgeGlyph;
use crate::model::{edge_element_id, NodeKey};
use crate::node::NodeGlyph;
use slint::{Model, SharedString, VecModel};
use std::collections::HashMap;
use std::rc::Rc;

trait EdgeModelSyncer {
    fn sync(&self, edges: &[EdgeGlyph]);
}

trait NodeModelSyncer {
    fn sync(&self, nodes: &[(&NodeGlyph, bool)]);
}

struct ConcreteEdgeSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> EdgeModelSyncer for ConcreteEdgeSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&EdgeGlyph) -> P,
{
    fn sync(&self, edges: &[EdgeGlyph]) {
        sync_rows(&self.model, edges.iter().map(&self.constructor));
    }
}

struct ConcreteNodeSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> NodeModelSyncer for ConcreteNodeSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&NodeGlyph, bool) -> P,
{
    fn sync(&self, nodes: &[(&NodeGlyph, bool)]) {
        sync_rows(
            &self.model,
            nodes.iter().map(|(glyph, targeted)| (self.constructor)(glyph, *targeted)),
        );
    }
}

/// Update rows in place, append new ones and drop the excess.
fn sync_rows<P: Clone + 'static>(model: &VecModel<P>, items: impl Iterator<Item = P>) {
    let mut len = 0;
    for (i, item) in items.enumerate() {
        if i < model.row_count() {
            model.set_row_data(i, item);
        } else {
            model.push(item);
        }
        len = i + 1;
    }
    while model.row_count() > len {
        model.remove(model.row_count() - 1);
    }
}

/// Mounted node and edge elements.
#[derive(Default)]
pub struct ElementRegistry {
    nodes: HashMap<NodeKey, NodeGlyph>,
    node_order: Vec<NodeKey>,
    targeted: Option<NodeKey>,
    edges: Vec<EdgeGlyph>,
    node_syncer: Option<Box<dyn NodeModelSyncer>>,
    edge_syncer: Option<Box<dyn EdgeModelSyncer>>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a Slint model that mirrors the edge elements in draw order.
    pub fn bind_edge_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&EdgeGlyph) -> P + 'static,
    {
        self.edge_syncer = Some(Box::new(ConcreteEdgeSyncer { model, constructor }));
        self.sync_edges();
    }

    /// Bind a Slint model that mirrors the mounted nodes; the flag is the targeted marker.
    pub fn bind_node_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&NodeGlyph, bool) -> P + 'static,
    {
        self.node_syncer = Some(Box::new(ConcreteNodeSyncer { model, constructor }));
        self.sync_nodes();
    }

    // === Nodes ===

    /// Mount or refresh a node element.
    pub fn mount_node(&mut self, glyph: NodeGlyph) {
        let key = glyph.key.clone();
        if self.nodes.insert(key.clone(), glyph).is_none() {
            self.node_order.push(key);
        }
        self.sync_nodes();
    }

    /// Unmount a node element. A fresh mount never carries the marker.
    pub fn unmount_node(&mut self, key: &str) -> bool {
        let key = NodeKey::from(key);
        if self.nodes.remove(&key).is_none() {
            return false;
        }
        self.node_order.retain(|k| *k != key);
        if self.targeted.as_ref() == Some(&key) {
            self.targeted = None;
        }
        self.sync_nodes();
        true
    }

    pub fn node(&self, key: &str) -> Option<&NodeGlyph> {
        self.nodes.get(&NodeKey::from(key))
    }

    pub fn is_mounted(&self, key: &str) -> bool {
        self.nodes.contains_key(&NodeKey::from(key))
    }

    /// Mounted nodes in mount order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeGlyph> + '_ {
        self.node_order.iter().filter_map(move |k| self.nodes.get(k))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // === Targeted marker ===

    /// Move the targeted marker from `previous` to `next`.
    ///
    /// At most one node carries the marker. A `next` node that is not
    /// mounted is skipped, leaving no node marked.
    pub fn retarget(&mut self, previous: Option<&str>, next: Option<&str>) {
        if let Some(previous) = previous {
            if self.targeted.as_deref() == Some(previous) {
                self.targeted = None;
            } else {
                tracing::trace!(node = previous, "previous target not marked");
            }
        }
        if let Some(next) = next {
            if self.is_mounted(next) {
                self.targeted = Some(next.into());
            } else {
                tracing::trace!(node = next, "target node not mounted");
                self.targeted = None;
            }
        }
        self.sync_nodes();
    }

    pub fn targeted(&self) -> Option<&NodeKey> {
        self.targeted.as_ref()
    }

    pub fn is_targeted(&self, key: &str) -> bool {
        self.targeted.as_deref() == Some(key)
    }

    /// Number of nodes carrying the marker (0 or 1).
    pub fn targeted_count(&self) -> usize {
        self.nodes().filter(|n| self.is_targeted(&n.key)).count()
    }

    // === Edges ===

    /// Draw an edge element, replacing one with the same id in place.
    pub fn render_edge(&mut self, glyph: EdgeGlyph) {
        match self
            .edges
            .iter_mut()
            .find(|e| e.element_id == glyph.element_id)
        {
            Some(existing) => *existing = glyph,
            None => self.edges.push(glyph),
        }
        self.sync_edges();
    }

    /// Remove an edge element by id.
    pub fn remove_edge(&mut self, element_id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.element_id.as_str() != element_id);
        let removed = self.edges.len() != before;
        if removed {
            self.sync_edges();
        }
        removed
    }

    /// Remove the element drawn for a source/target pair.
    pub fn remove_edge_element(&mut self, source: &str, target: Option<&NodeKey>) -> bool {
        self.remove_edge(&edge_element_id(source, target))
    }

    /// Remove the free-floating drag-edge container.
    pub fn remove_custom_container(&mut self) -> bool {
        self.remove_edge(&edge_element_id("", None))
    }

    /// Move an edge container to the top of the draw order.
    pub fn raise_edge(&mut self, element_id: &str) -> bool {
        let Some(pos) = self
            .edges
            .iter()
            .position(|e| e.element_id.as_str() == element_id)
        else {
            return false;
        };
        let glyph = self.edges.remove(pos);
        self.edges.push(glyph);
        self.sync_edges();
        true
    }

    pub fn edge(&self, element_id: &str) -> Option<&EdgeGlyph> {
        self.edges.iter().find(|e| e.element_id.as_str() == element_id)
    }

    /// Edge elements in draw order.
    pub fn edges(&self) -> &[EdgeGlyph] {
        &self.edges
    }

    /// Element ids in draw order.
    pub fn edge_order(&self) -> Vec<SharedString> {
        self.edges.iter().map(|e| e.element_id.clone()).collect()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.node_order.clear();
        self.targeted = None;
        self.edges.clear();
        self.sync_nodes();
        self.sync_edges();
    }

    fn sync_edges(&self) {
        if let Some(syncer) = &self.edge_syncer {
            syncer.sync(&self.edges);
        }
    }

    fn sync_nodes(&self) {
        if let Some(syncer) = &self.node_syncer {
            let rows: Vec<(&NodeGlyph, bool)> =
                self.nodes().map(|n| (n, self.is_targeted(&n.key))).collect();
            syncer.sync(&rows);
        }
    }
}
