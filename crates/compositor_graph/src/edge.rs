// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    /// Create a new random edge ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A directed connection from an output port to an input port.
///
/// Endpoints are ids; the graph owns both nodes and edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Unique edge ID
    pub id: EdgeId,
    /// Source node ID
    pub from_node: NodeId,
    /// Source output port
    pub from_port: String,
    /// Target node ID
    pub to_node: NodeId,
    /// Target input port
    pub to_port: String,
}

impl Edge {
    /// Create a new edge with a fresh id
    pub fn new(
        from_node: NodeId,
        from_port: impl Into<String>,
        to_node: NodeId,
        to_port: impl Into<String>,
    ) -> Self {
        Self {
            id: EdgeId::new(),
            from_node,
            from_port: from_port.into(),
            to_node,
            to_port: to_port.into(),
        }
    }

    /// Check if this edge touches a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from_node == node_id || self.to_node == node_id
    }

    /// Whether two edges join the same ports, ignoring their ids
    pub fn same_endpoints(&self, other: &Edge) -> bool {
        self.connects(other.from_node, &other.from_port, other.to_node, &other.to_port)
    }

    /// Whether this edge joins the given ports
    pub fn connects(&self, from_node: NodeId, from_port: &str, to_node: NodeId, to_port: &str) -> bool {
        self.from_node == from_node
            && self.from_port == from_port
            && self.to_node == to_node
            && self.to_port == to_port
    }
}
