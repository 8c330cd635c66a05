//! Key → node and key → edge maps for the current scene.
//!
//! The Scene Host owns and mutates these; the editor only reads them during a
//! derivation pass.

use crate::error::EditorError;
use crate::geometry::Point;
use crate::layout::LayoutEngine;
use crate::model::{EdgeDescriptor, EdgeKey, NodeDescriptor, NodeKey};
use std::collections::{HashMap, HashSet};

/// Entry of the nodes map: where the node lives and how it is connected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMapEntry {
    /// Index into [`SceneMaps::nodes`]
    pub index: usize,
    /// Targets of edges leaving this node
    pub children: Vec<NodeKey>,
    /// Sources of edges entering this node
    pub parents: Vec<NodeKey>,
}

pub type NodesMap = HashMap<NodeKey, NodeMapEntry>;

/// Nodes and edges of the scene, indexed by key.
#[derive(Clone, Debug)]
pub struct SceneMaps<P = ()> {
    nodes: Vec<NodeDescriptor<P>>,
    edges: Vec<EdgeDescriptor>,
    nodes_map: NodesMap,
    edges_map: HashMap<EdgeKey, usize>,
}

impl<P> Default for SceneMaps<P> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            nodes_map: HashMap::new(),
            edges_map: HashMap::new(),
        }
    }
}

impl<P> SceneMaps<P> {
    /// Build the maps, rejecting duplicate node keys and edges with no end.
    ///
    /// Edges whose nodes are missing are kept; rendering substitutes their
    /// raw target position.
    pub fn new(
        nodes: Vec<NodeDescriptor<P>>,
        edges: Vec<EdgeDescriptor>,
    ) -> Result<Self, EditorError> {
        let mut nodes_map = NodesMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if nodes_map.contains_key(&node.id) {
                return Err(EditorError::DuplicateNode(node.id.clone()));
            }
            nodes_map.insert(
                node.id.clone(),
                NodeMapEntry {
                    index,
                    ..Default::default()
                },
            );
        }

        let mut edges_map = HashMap::with_capacity(edges.len());
        for (index, edge) in edges.iter().enumerate() {
            edge.validate()?;
            let Some(target) = &edge.target else {
                continue;
            };
            if let Some(key) = edge.map_key() {
                edges_map.insert(key, index);
            }
            if let Some(entry) = nodes_map.get_mut(&edge.source) {
                entry.children.push(target.clone());
            }
            if let Some(entry) = nodes_map.get_mut(target) {
                entry.parents.push(edge.source.clone());
            }
        }

        Ok(Self {
            nodes,
            edges,
            nodes_map,
            edges_map,
        })
    }

    pub fn nodes(&self) -> &[NodeDescriptor<P>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeDescriptor] {
        &self.edges
    }

    pub fn nodes_map(&self) -> &NodesMap {
        &self.nodes_map
    }

    pub fn node(&self, key: &str) -> Option<&NodeDescriptor<P>> {
        let entry = self.nodes_map.get(&NodeKey::from(key))?;
        self.nodes.get(entry.index)
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.nodes_map.contains_key(&NodeKey::from(key))
    }

    /// Look up an edge by its map key (`"<source>_<target>"`).
    pub fn edge(&self, key: &str) -> Option<&EdgeDescriptor> {
        let index = *self.edges_map.get(&EdgeKey::from(key))?;
        self.edges.get(index)
    }

    pub fn contains_edge(&self, key: &str) -> bool {
        self.edges_map.contains_key(&EdgeKey::from(key))
    }

    /// Edges that start or end at the given node.
    pub fn connected_edges<'a>(
        &'a self,
        key: &'a str,
    ) -> impl Iterator<Item = &'a EdgeDescriptor> + 'a {
        self.edges.iter().filter(move |edge| {
            edge.source.as_str() == key || edge.target.as_deref() == Some(key)
        })
    }

    /// Move a node.
    pub fn set_node_position(&mut self, key: &str, position: Point) -> Result<(), EditorError> {
        let index = self
            .nodes_map
            .get(&NodeKey::from(key))
            .map(|entry| entry.index)
            .ok_or_else(|| EditorError::UnknownNode(key.into()))?;
        let node = self
            .nodes
            .get_mut(index)
            .ok_or_else(|| EditorError::UnknownNode(key.into()))?;
        node.x = position.x;
        node.y = position.y;
        Ok(())
    }

    /// Let a layout engine reposition the nodes.
    ///
    /// Nodes the engine invents are ignored, repeated keys keep their first
    /// occurrence and dropped nodes leave the scene with their adjacency.
    pub fn apply_layout(&mut self, engine: &dyn LayoutEngine<P>) {
        let nodes = std::mem::take(&mut self.nodes);
        let original_len = nodes.len();
        let mut adjusted = engine.adjust_nodes(nodes, &self.nodes_map);

        let mut seen = HashSet::with_capacity(adjusted.len());
        adjusted.retain(|node| self.nodes_map.contains_key(&node.id) && seen.insert(node.id.clone()));
        if adjusted.len() != original_len {
            tracing::warn!(
                expected = original_len,
                got = adjusted.len(),
                "layout engine changed the node set"
            );
            self.nodes_map.retain(|key, _| seen.contains(key));
            for entry in self.nodes_map.values_mut() {
                entry.children.retain(|key| seen.contains(key));
                entry.parents.retain(|key| seen.contains(key));
            }
        }
        for (index, node) in adjusted.iter().enumerate() {
            if let Some(entry) = self.nodes_map.get_mut(&node.id) {
                entry.index = index;
            }
        }
        self.nodes = adjusted;
    }
}
