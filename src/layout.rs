//! Pluggable layout engines.
//!
//! The editor never computes layout itself. When a [`LayoutEngine`] is set on
//! the editor hooks, the scene's nodes are passed through
//! [`LayoutEngine::adjust_nodes`] every time the scene is replaced.
//!
//! [`SugiyamaLayout`] requires the `layout` feature. The underlying
//! `rust-sugiyama` crate operates in `f64`; positions are converted back to
//! `f32` when applied to nodes.

use crate::model::NodeDescriptor;
use crate::scene::NodesMap;

/// Strategy that repositions nodes before they are drawn.
pub trait LayoutEngine<P> {
    /// Return the nodes with adjusted positions.
    ///
    /// `nodes_map` carries each node's index and its parents/children.
    fn adjust_nodes(&self, nodes: Vec<NodeDescriptor<P>>, nodes_map: &NodesMap)
        -> Vec<NodeDescriptor<P>>;
}

/// Leaves positions untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLayout;

impl<P> LayoutEngine<P> for NoLayout {
    fn adjust_nodes(&self, nodes: Vec<NodeDescriptor<P>>, _nodes_map: &NodesMap) -> Vec<NodeDescriptor<P>> {
        nodes
    }
}

/// Rounds node positions to the nearest grid intersection.
#[derive(Clone, Copy, Debug)]
pub struct SnapToGrid {
    pub grid_spacing: f32,
}

impl Default for SnapToGrid {
    fn default() -> Self {
        Self { grid_spacing: 10.0 }
    }
}

impl SnapToGrid {
    pub fn new(grid_spacing: f32) -> Self {
        Self { grid_spacing }
    }

    fn snap(&self, v: f32) -> f32 {
        // Non-positive spacing falls back to the default grid
        let spacing = if self.grid_spacing > 0.0 {
            self.grid_spacing
        } else {
            10.0
        };
        (v / spacing).round() * spacing
    }
}

impl<P> LayoutEngine<P> for SnapToGrid {
    fn adjust_nodes(&self, mut nodes: Vec<NodeDescriptor<P>>, _nodes_map: &NodesMap) -> Vec<NodeDescriptor<P>> {
        for node in &mut nodes {
            node.x = self.snap(node.x);
            node.y = self.snap(node.y);
        }
        nodes
    }
}

#[cfg(feature = "layout")]
pub use sugiyama::*;

#[cfg(feature = "layout")]
mod sugiyama {
    use super::LayoutEngine;
    use crate::model::{NodeDescriptor, NodeKey};
    use crate::scene::NodesMap;
    use std::collections::HashMap;

    /// Direction in which layers are stacked.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[non_exhaustive]
    pub enum Direction {
        /// Parents above children
        #[default]
        TopToBottom,
        /// Parents left of children
        LeftToRight,
    }

    /// Layered position of one node key.
    #[derive(Debug, Clone, PartialEq)]
    pub struct NodePosition {
        pub id: NodeKey,
        /// Top-left corner
        pub x: f64,
        pub y: f64,
    }

    /// Tuning knobs passed through to `rust-sugiyama`.
    #[derive(Debug, Clone, Copy, Default)]
    #[non_exhaustive]
    pub struct SugiyamaConfig {
        /// Minimum spacing between vertices (0.0 keeps the `rust-sugiyama` default).
        pub vertex_spacing: f64,
        /// Minimum edge length between layers (0 keeps the `rust-sugiyama` default).
        pub minimum_length: u32,
        pub dummy_vertices: bool,
        pub direction: Direction,
    }

    /// Compute hierarchical layer positions.
    ///
    /// Takes edges as `(source, target)` key pairs and node sizes as
    /// `(key, (width, height))`. Keys are mapped to sequential `u32` indices
    /// for `rust-sugiyama` and translated back. Duplicate keys in
    /// `node_sizes` are ignored (first occurrence wins); edges naming unknown
    /// keys are skipped.
    pub fn sugiyama_layout(
        edges: &[(NodeKey, NodeKey)],
        node_sizes: &[(NodeKey, (f64, f64))],
        config: &SugiyamaConfig,
    ) -> Vec<NodePosition> {
        if node_sizes.is_empty() {
            return Vec::new();
        }

        let horizontal = config.direction == Direction::LeftToRight;

        let mut key_to_idx: HashMap<NodeKey, u32> = HashMap::new();
        let mut vertices: Vec<(u32, (f64, f64))> = Vec::with_capacity(node_sizes.len());
        let mut idx_to_key: Vec<NodeKey> = Vec::with_capacity(node_sizes.len());

        for (key, (w, h)) in node_sizes {
            if key_to_idx.contains_key(key) {
                continue;
            }
            let idx = idx_to_key.len() as u32;
            key_to_idx.insert(key.clone(), idx);
            idx_to_key.push(key.clone());
            // Swap for horizontal layout so layers are spaced along x
            let size = if horizontal { (*h, *w) } else { (*w, *h) };
            vertices.push((idx, size));
        }

        let mapped_edges: Vec<(u32, u32)> = edges
            .iter()
            .filter(|(src, dst)| src != dst)
            .filter_map(|(src, dst)| Some((*key_to_idx.get(src)?, *key_to_idx.get(dst)?)))
            .collect();

        let mut sg_config = rust_sugiyama::configure::Config {
            dummy_vertices: config.dummy_vertices,
            ..Default::default()
        };
        if config.vertex_spacing > 0.0 {
            sg_config.vertex_spacing = config.vertex_spacing;
        }
        if config.minimum_length > 0 {
            sg_config.minimum_length = config.minimum_length;
        }

        let subgraphs =
            rust_sugiyama::from_vertices_and_edges(&vertices, &mapped_edges, &sg_config);

        let mut results = Vec::with_capacity(idx_to_key.len());
        for (layout, _width, _height) in &subgraphs {
            for &(idx, (x, y)) in layout {
                if let Some(key) = idx_to_key.get(idx) {
                    let (px, py) = if horizontal { (y, x) } else { (x, y) };
                    results.push(NodePosition {
                        id: key.clone(),
                        x: px,
                        y: py,
                    });
                }
            }
        }

        results
    }

    /// Layout engine placing every node (a `node_size` square) in hierarchical layers.
    #[derive(Debug, Clone, Copy)]
    pub struct SugiyamaLayout {
        pub node_size: f32,
        pub config: SugiyamaConfig,
    }

    impl SugiyamaLayout {
        pub fn new(node_size: f32) -> Self {
            Self {
                node_size,
                config: SugiyamaConfig::default(),
            }
        }

        pub fn with_direction(mut self, direction: Direction) -> Self {
            self.config.direction = direction;
            self
        }
    }

    impl<P> LayoutEngine<P> for SugiyamaLayout {
        fn adjust_nodes(
            &self,
            mut nodes: Vec<NodeDescriptor<P>>,
            nodes_map: &NodesMap,
        ) -> Vec<NodeDescriptor<P>> {
            let size = self.node_size as f64;
            let node_sizes: Vec<(NodeKey, (f64, f64))> =
                nodes.iter().map(|n| (n.id.clone(), (size, size))).collect();
            let edges: Vec<(NodeKey, NodeKey)> = nodes_map
                .iter()
                .flat_map(|(key, entry)| {
                    entry
                        .children
                        .iter()
                        .map(move |child| (key.clone(), child.clone()))
                })
                .collect();

            let positions: HashMap<NodeKey, (f64, f64)> =
                sugiyama_layout(&edges, &node_sizes, &self.config)
                    .into_iter()
                    .map(|p| (p.id, (p.x, p.y)))
                    .collect();

            // Node positions are centers; layout positions are top-left corners
            let half = self.node_size / 2.0;
            for node in &mut nodes {
                if let Some(&(x, y)) = positions.get(&node.id) {
                    node.x = x as f32 + half;
                    node.y = y as f32 + half;
                }
            }
            nodes
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::model::EdgeDescriptor;
        use crate::scene::SceneMaps;

        fn key(s: &str) -> NodeKey {
            NodeKey::from(s)
        }

        fn pos_map(positions: Vec<NodePosition>) -> HashMap<NodeKey, (f64, f64)> {
            positions.into_iter().map(|p| (p.id, (p.x, p.y))).collect()
        }

        #[test]
        fn test_empty_input() {
            let result = sugiyama_layout(&[], &[], &SugiyamaConfig::default());
            assert!(result.is_empty());
        }

        #[test]
        fn test_two_nodes_one_edge() {
            let sizes = vec![(key("A"), (100.0, 50.0)), (key("B"), (100.0, 50.0))];
            let edges = vec![(key("A"), key("B"))];
            let pos = pos_map(sugiyama_layout(&edges, &sizes, &SugiyamaConfig::default()));

            assert_eq!(pos.len(), 2);
            assert!(pos[&key("A")].1 < pos[&key("B")].1, "source should be in an earlier layer");
        }

        #[test]
        fn test_left_to_right_separates_layers_in_x() {
            let sizes = vec![(key("A"), (100.0, 50.0)), (key("B"), (100.0, 50.0))];
            let edges = vec![(key("A"), key("B"))];
            let config = SugiyamaConfig {
                direction: Direction::LeftToRight,
                ..Default::default()
            };
            let pos = pos_map(sugiyama_layout(&edges, &sizes, &config));
            assert!(pos[&key("A")].0 < pos[&key("B")].0);
        }

        #[test]
        fn test_unknown_edges_and_duplicates_are_skipped() {
            let sizes = vec![(key("A"), (100.0, 50.0)), (key("A"), (10.0, 10.0))];
            let edges = vec![(key("A"), key("ghost")), (key("A"), key("A"))];
            let result = sugiyama_layout(&edges, &sizes, &SugiyamaConfig::default());
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].id, "A");
        }

        #[test]
        fn test_engine_moves_children_below_parents() {
            let scene: SceneMaps = SceneMaps::new(
                vec![
                    NodeDescriptor::new("A", 0.0, 0.0),
                    NodeDescriptor::new("B", 0.0, 0.0),
                    NodeDescriptor::new("C", 0.0, 0.0),
                ],
                vec![EdgeDescriptor::new("A", "B"), EdgeDescriptor::new("B", "C")],
            )
            .unwrap();
            let engine = SugiyamaLayout::new(100.0);
            let nodes = engine.adjust_nodes(scene.nodes().to_vec(), scene.nodes_map());

            assert!(nodes[0].y < nodes[1].y);
            assert!(nodes[1].y < nodes[2].y);
            assert!(nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
        }
    }
}
