// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for graph mutation, documents and preset parameters.

use crate::node::NodeId;
use crate::port::{PortDirection, PortType};
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a graph mutation or validation is rejected.
///
/// A rejected mutation leaves the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A referenced node is not in the graph
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// A referenced port is not on the node
    #[error("Port not found: {0}")]
    PortNotFound(String),

    /// Source and target port types differ
    #[error("Port type mismatch: cannot connect {from} to {to}")]
    PortTypeMismatch {
        /// Source port type
        from: PortType,
        /// Target port type
        to: PortType,
    },

    /// An edge between the same ports already exists
    #[error("An identical connection already exists")]
    DuplicateEdge,

    /// Source and target are the same node
    #[error("A node cannot be connected to itself")]
    SelfConnection,

    /// The edge would close a loop
    #[error("Connection would create a cycle")]
    CycleDetected,
}

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    /// Stable numeric code
    pub fn code(&self) -> u32 {
        match self {
            Self::NodeNotFound(_) => 1001,
            Self::PortNotFound(_) => 1002,
            Self::PortTypeMismatch { .. } => 1003,
            Self::DuplicateEdge => 1004,
            Self::SelfConnection => 1005,
            Self::CycleDetected => 1006,
        }
    }

    /// Short title for display
    pub fn title(&self) -> &'static str {
        match self {
            Self::NodeNotFound(_) => "Node Not Found",
            Self::PortNotFound(_) => "Port Not Found",
            Self::PortTypeMismatch { .. } => "Port Type Mismatch",
            Self::DuplicateEdge => "Duplicate Connection",
            Self::SelfConnection => "Self Connection",
            Self::CycleDetected => "Cycle Detected",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> String {
        self.to_string()
    }
}

/// Errors while reading or writing graph and preset documents
#[derive(Debug, Error)]
pub enum DocumentError {
    /// IO error
    #[error("IO error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON decode error
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// RON encode error
    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    /// File extension is not a known document format
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A node is stored under a key that is not its id
    #[error("Node stored under key {key} has id {id}")]
    MismatchedNodeKey {
        /// Map key
        key: NodeId,
        /// Id inside the node
        id: NodeId,
    },

    /// A node lists the same port id twice in one direction
    #[error("Node {node} has duplicate {direction:?} port '{port}'")]
    DuplicatePort {
        /// Offending node
        node: NodeId,
        /// Direction of the duplicated id
        direction: PortDirection,
        /// Duplicated port id
        port: String,
    },

    /// The decoded graph violates an invariant
    #[error("Invalid graph: {0}")]
    Invalid(#[from] GraphError),
}

/// Errors while resolving an exposed preset parameter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// No exposed parameter with this name
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Path is not of the form `node.property`
    #[error("Malformed parameter path: {0}")]
    MalformedPath(String),

    /// No node with this name in the internal graph
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Several nodes share this name
    #[error("Node name is ambiguous: {0}")]
    AmbiguousNode(String),

    /// The node has no such property
    #[error("Property '{property}' not found on node '{node}'")]
    PropertyNotFound {
        /// Node name
        node: String,
        /// Property name
        property: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            GraphError::NodeNotFound(NodeId::new()),
            GraphError::PortNotFound("o1".to_string()),
            GraphError::PortTypeMismatch { from: PortType::Image, to: PortType::Audio },
            GraphError::DuplicateEdge,
            GraphError::SelfConnection,
            GraphError::CycleDetected,
        ];
        let codes: Vec<u32> = errors.iter().map(GraphError::code).collect();
        assert_eq!(codes, vec![1001, 1002, 1003, 1004, 1005, 1006]);
    }

    #[test]
    fn test_description_names_types() {
        let err = GraphError::PortTypeMismatch { from: PortType::Image, to: PortType::Depth };
        assert_eq!(err.title(), "Port Type Mismatch");
        assert!(err.description().contains("Image"));
        assert!(err.description().contains("Depth"));
    }

    #[test]
    fn test_document_error_wraps_graph_error() {
        let err = DocumentError::from(GraphError::CycleDetected);
        assert!(err.to_string().contains("cycle"));
    }
}
