use crate::model::{edge_element_id, EdgeDescriptor, NodeKey};
use slint::{Model, SharedString, VecModel};

/// Tracks the selected edge.
///
/// Edges are identified by their source/target pair, so the in-flight custom
/// edge (no target) is selected when the selection has the same source and
/// no target either.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionManager {
    edge: Option<(NodeKey, Option<NodeKey>)>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an edge, replacing any previous selection.
    pub fn select_edge(&mut self, edge: &EdgeDescriptor) {
        self.edge = Some((edge.source.clone(), edge.target.clone()));
    }

    /// Clear the current selection
    pub fn clear(&mut self) {
        self.edge = None;
    }

    /// Check if an edge is selected
    pub fn contains(&self, edge: &EdgeDescriptor) -> bool {
        self.edge
            .as_ref()
            .is_some_and(|(source, target)| edge.connects(source, target.as_deref()))
    }

    /// Element id of the selected edge
    pub fn selected_element_id(&self) -> Option<SharedString> {
        self.edge
            .as_ref()
            .map(|(source, target)| edge_element_id(source, target.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.edge.is_none()
    }

    /// Sync the selection to a Slint VecModel of element ids
    pub fn sync_to_model(&self, model: &VecModel<SharedString>) {
        while model.row_count() > 0 {
            model.remove(0);
        }
        if let Some(id) = self.selected_element_id() {
            model.push(id);
        }
    }
}
