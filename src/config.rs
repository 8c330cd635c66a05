//! Editor configuration and style lookup tables.

use slint::{Color, SharedString};
use std::collections::HashMap;

/// Style entry for a node type, node subtype or edge type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeStyle {
    /// Id of the shape definition the glyph references (e.g. `"#emptyNode"`)
    pub shape_id: SharedString,
    pub color: Color,
}

impl TypeStyle {
    pub fn new(shape_id: impl Into<SharedString>, color: Color) -> Self {
        Self {
            shape_id: shape_id.into(),
            color,
        }
    }
}

impl Default for TypeStyle {
    fn default() -> Self {
        Self::new("", Color::from_rgb_u8(255, 255, 255))
    }
}

/// Lookup table from a type name to its style.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    entries: HashMap<SharedString, TypeStyle>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry (builder style).
    pub fn with(mut self, name: impl Into<SharedString>, style: TypeStyle) -> Self {
        self.insert(name, style);
        self
    }

    pub fn insert(&mut self, name: impl Into<SharedString>, style: TypeStyle) {
        self.entries.insert(name.into(), style);
    }

    pub fn get(&self, name: &str) -> Option<&TypeStyle> {
        self.entries.get(&SharedString::from(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sizes, grid settings and style tables supplied by the Scene Host.
#[derive(Clone, Debug)]
pub struct EditorConfig {
    /// Node glyph size bound; also bounds edge endpoint trimming
    pub node_size: f32,
    /// Size of the edge handle glyph at the path midpoint
    pub edge_handle_size: f32,
    /// Extent of the background square
    pub grid_size: f32,
    /// Distance between grid lines (also used by [`SnapToGrid`](crate::layout::SnapToGrid))
    pub grid_spacing: f32,
    /// Id of the pattern filling the background
    pub background_fill_id: SharedString,
    pub node_types: TypeTable,
    pub node_subtypes: TypeTable,
    pub edge_types: TypeTable,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_size: 150.0,
            edge_handle_size: 50.0,
            grid_size: 40960.0,
            grid_spacing: 36.0,
            background_fill_id: SharedString::from("grid"),
            node_types: TypeTable::new(),
            node_subtypes: TypeTable::new(),
            edge_types: TypeTable::new(),
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_size(mut self, node_size: f32) -> Self {
        self.node_size = node_size;
        self
    }

    pub fn with_edge_handle_size(mut self, size: f32) -> Self {
        self.edge_handle_size = size;
        self
    }

    pub fn with_grid(mut self, grid_size: f32, grid_spacing: f32) -> Self {
        self.grid_size = grid_size;
        self.grid_spacing = grid_spacing;
        self
    }

    pub fn with_background_fill_id(mut self, id: impl Into<SharedString>) -> Self {
        self.background_fill_id = id.into();
        self
    }

    pub fn with_node_types(mut self, table: TypeTable) -> Self {
        self.node_types = table;
        self
    }

    pub fn with_node_subtypes(mut self, table: TypeTable) -> Self {
        self.node_subtypes = table;
        self
    }

    pub fn with_edge_types(mut self, table: TypeTable) -> Self {
        self.edge_types = table;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.node_size, 150.0);
        assert_eq!(config.edge_handle_size, 50.0);
        assert_eq!(config.grid_spacing, 36.0);
        assert_eq!(config.background_fill_id, "grid");
        assert!(config.node_types.is_empty());
    }

    #[test]
    fn test_builder_overrides() {
        let config = EditorConfig::new()
            .with_node_size(100.0)
            .with_grid(1000.0, 20.0)
            .with_background_fill_id("dots");
        assert_eq!(config.node_size, 100.0);
        assert_eq!(config.grid_size, 1000.0);
        assert_eq!(config.grid_spacing, 20.0);
        assert_eq!(config.background_fill_id, "dots");
    }

    #[test]
    fn test_type_table_lookup() {
        let red = Color::from_rgb_u8(255, 0, 0);
        let table = TypeTable::new().with("task", TypeStyle::new("#task", red));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("task").map(|s| s.color), Some(red));
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_type_table_replaces_entry() {
        let mut table = TypeTable::new();
        table.insert("task", TypeStyle::new("#a", Color::from_rgb_u8(0, 0, 0)));
        table.insert("task", TypeStyle::new("#b", Color::from_rgb_u8(0, 0, 0)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("task").map(|s| s.shape_id.as_str()), Some("#b"));
    }
}
