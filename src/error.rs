use crate::model::NodeKey;
use thiserror::Error;

/// Errors raised while building the scene handed to the editor.
///
/// Interaction paths never return these; a missing element during a pass is
/// a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// Edge has neither a target node nor a raw target position
    #[error("edge from {source_key} has neither a target nor a target position")]
    MissingTargetPosition { source_key: NodeKey },
    /// Edge references a node that is not in the scene
    #[error("node {0} not found")]
    UnknownNode(NodeKey),
    /// Two nodes share the same identity key
    #[error("duplicate node key {0}")]
    DuplicateNode(NodeKey),
}
