//! # Slint Digraph Editor
//!
//! Interactive editing overlay for node/edge diagrams drawn with Slint.
//! The host owns the graph; this crate decides what the user is doing with it
//! (hovering, dragging a new edge, dropping it onto a node) and what has to
//! be drawn for that.
//!
//! ## Features
//!
//! - **Derived interaction state** - Drag and hover state is recomputed from
//!   the host's `moved`/`selected` inputs, never mutated from outside
//! - **Edge geometry** - Edges stop short of node glyphs so arrowheads stay visible
//! - **Targeted marker** - At most one node is marked as the drop target
//! - **Pluggable rendering** - Replace the background, node, edge or label renderer
//! - **Model binding** - Drawn elements sync into Slint `VecModel`s
//!
//! ## Quick Start
//!
//! ```ignore
//! use slint_digraph_editor::{EdgeDescriptor, EditorConfig, EditorHooks, GraphEditor, NodeDescriptor};
//!
//! let editor: GraphEditor = GraphEditor::new(EditorConfig::default(), EditorHooks::new());
//! editor.set_scene(
//!     vec![NodeDescriptor::new("A", 0.0, 0.0), NodeDescriptor::new("B", 300.0, 0.0)],
//!     vec![EdgeDescriptor::new("A", "B")],
//! )?;
//! ```
//!
//! ## Core Pieces
//!
//! - [`GraphEditor`] - Reconciler, components and element registry wired together
//! - [`NodeComponent`] / [`EdgeComponent`] - One drawn node or edge with its listener
//! - [`derive_state`] / [`plan_effects`] - The pure reducer and its render effects
//! - [`calculate_offset`] - Arrow clearance between an edge end and a node glyph
//! - [`ElementRegistry`] - Drawn elements, draw order and the targeted marker
//!
//! ## Rust Helpers
//!
//! - [`grid_commands`] - Grid line path for the background
//! - [`find_node_at`] / [`find_drop_target`] - Hit-test nodes under the pointer
//! - [`find_edge_at`] - Hit-test edges
//! - [`SugiyamaLayout`] - Layered layout engine (feature `layout`)

pub mod background;
pub mod config;
pub mod edge;
pub mod editor;
pub mod error;
pub mod events;
pub mod geometry;
pub mod hooks;
pub mod layout;
pub mod model;
pub mod node;
pub mod reconciler;
pub mod registry;
pub mod scene;
pub mod selection;

pub use background::{default_background, grid_commands, Background, BackgroundContext};
pub use config::{EditorConfig, TypeStyle, TypeTable};
pub use edge::{EdgeComponent, EdgeContext, EdgeEnd, EdgeGlyph, EdgeHandlers, EdgeLabel, EdgeTextContext};
pub use editor::GraphEditor;
pub use error::EditorError;
pub use events::{ElementId, ListenerGuard, PointerEvent, PointerListeners, PRIMARY_BUTTON};
pub use geometry::{
    calculate_offset, edge_handle_translation, generate_edge_path, translate_transform,
    trimmed_endpoints, EdgeOffset, Point, ARROW_CLEARANCE,
};
pub use hit_test::{find_drop_target, find_edge_at, find_node_at, EdgeGeometry, NodeGeometry};
pub use hooks::EditorHooks;
pub use layout::{LayoutEngine, NoLayout, SnapToGrid};
#[cfg(feature = "layout")]
pub use layout::{sugiyama_layout, Direction, NodePosition, SugiyamaConfig, SugiyamaLayout};
pub use model::{EdgeDescriptor, EdgeKey, MovedDescriptor, NodeDescriptor, NodeKey};
pub use node::{NodeComponent, NodeContext, NodeGlyph, NodeHandlers};
pub use reconciler::{
    derive_state, handle_node_mouse_enter, handle_node_mouse_leave, mouse_coordinates,
    plan_effects, should_update, EditorInputs, EditorMode, InteractionState, RenderEffect,
};
pub use registry::ElementRegistry;
pub use scene::{NodeMapEntry, NodesMap, SceneMaps};
pub use selection::SelectionManager;
