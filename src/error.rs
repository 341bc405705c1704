//! Error taxonomy for graph authoring and code generation.

use crate::graph::NodeId;
use crate::types::TypeTag;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("cycle detected in material graph at node '{node}'")]
    CycleDetected { node: String },

    #[error("type mismatch on {node}.{socket}: expected {expected}, got {found}")]
    TypeMismatch {
        node: String,
        socket: String,
        expected: TypeTag,
        found: TypeTag,
    },

    #[error("socket {node}.{socket} has no value and no connection")]
    MissingSocketBinding { node: String, socket: String },

    #[error("unknown {kind} mode '{mode}'")]
    UnknownOperationMode { kind: &'static str, mode: String },

    #[error("node '{node}' has no socket named '{socket}'")]
    UnknownSocket { node: String, socket: String },

    #[error("node {0} does not belong to this graph")]
    UnknownNode(NodeId),

    #[error("material graph has no output node")]
    MissingRoot,

    #[error("node '{node}' reads '{producer}' before it was generated")]
    UnresolvedSymbol { node: String, producer: String },
}

impl GraphError {
    pub fn type_mismatch(
        node: impl Into<String>,
        socket: impl Into<String>,
        expected: TypeTag,
        found: TypeTag,
    ) -> Self {
        Self::TypeMismatch {
            node: node.into(),
            socket: socket.into(),
            expected,
            found,
        }
    }

    pub fn unknown_socket(node: impl Into<String>, socket: impl Into<String>) -> Self {
        Self::UnknownSocket {
            node: node.into(),
            socket: socket.into(),
        }
    }

    pub fn unknown_mode(kind: &'static str, mode: impl Into<String>) -> Self {
        Self::UnknownOperationMode {
            kind,
            mode: mode.into(),
        }
    }

    /// Whether the current compile pass may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownOperationMode { .. })
    }
}
