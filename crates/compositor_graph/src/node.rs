// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph framework.

use crate::graph::GraphId;
use crate::port::{NodePort, PortDirection};
use crate::value::NodeValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operation category, used by hosts to group the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationCategory {
    /// Media and generator sources
    Source,
    /// Geometric transforms
    Transform,
    /// Filters and effects
    Effect,
    /// Multi-input composites
    Composite,
    /// Audio processing
    Audio,
    /// Final outputs
    Output,
    /// Custom/user-defined
    Custom,
}

/// Template describing one kind of operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationType {
    /// Unique type key, stored on nodes as `operation_type`
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: OperationCategory,
    /// Description
    pub description: String,
    /// Default input ports
    pub inputs: Vec<NodePort>,
    /// Default output ports
    pub outputs: Vec<NodePort>,
    /// Default property values
    pub properties: IndexMap<String, NodeValue>,
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Operation type key, resolved against an external catalog
    pub operation_type: String,
    /// Authoring position
    #[serde(serialize_with = "crate::value::finite::array")]
    pub position: [f64; 2],
    /// Properties by name
    #[serde(default)]
    pub properties: IndexMap<String, NodeValue>,
    /// Input ports
    #[serde(default)]
    pub inputs: Vec<NodePort>,
    /// Output ports
    #[serde(default)]
    pub outputs: Vec<NodePort>,
    /// Internal graph of the preset this node instantiates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_graph_id: Option<GraphId>,
}

impl Node {
    /// Create a new node without ports
    pub fn new(name: impl Into<String>, operation_type: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            operation_type: operation_type.into(),
            position: [0.0, 0.0],
            properties: IndexMap::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            sub_graph_id: None,
        }
    }

    /// Create a new node from an operation template
    pub fn from_operation(operation: &OperationType) -> Self {
        Self {
            id: NodeId::new(),
            name: operation.name.clone(),
            operation_type: operation.id.clone(),
            position: [0.0, 0.0],
            properties: operation.properties.clone(),
            inputs: operation.inputs.clone(),
            outputs: operation.outputs.clone(),
            sub_graph_id: None,
        }
    }

    /// Use a specific id
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    /// Set the position
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = [x, y];
        self
    }

    /// Add an input port, replacing any input with the same id
    pub fn with_input(mut self, port: NodePort) -> Self {
        upsert_port(&mut self.inputs, port);
        self
    }

    /// Add an output port, replacing any output with the same id
    pub fn with_output(mut self, port: NodePort) -> Self {
        upsert_port(&mut self.outputs, port);
        self
    }

    /// Set a property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Mark this node as an instance of a preset's internal graph
    pub fn with_sub_graph(mut self, graph_id: GraphId) -> Self {
        self.sub_graph_id = Some(graph_id);
        self
    }

    /// Get an input port by id
    pub fn input(&self, port_id: &str) -> Option<&NodePort> {
        self.inputs.iter().find(|p| p.id == port_id)
    }

    /// Get an output port by id
    pub fn output(&self, port_id: &str) -> Option<&NodePort> {
        self.outputs.iter().find(|p| p.id == port_id)
    }

    /// Get a port by direction and id
    pub fn port(&self, direction: PortDirection, port_id: &str) -> Option<&NodePort> {
        match direction {
            PortDirection::Input => self.input(port_id),
            PortDirection::Output => self.output(port_id),
        }
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&NodeValue> {
        self.properties.get(key)
    }

    /// First port id that appears twice within the same direction
    pub fn duplicate_port(&self) -> Option<(PortDirection, &str)> {
        fn first_duplicate(ports: &[NodePort]) -> Option<&str> {
            let mut seen = HashSet::new();
            ports.iter().map(|p| p.id.as_str()).find(|id| !seen.insert(*id))
        }

        first_duplicate(&self.inputs)
            .map(|id| (PortDirection::Input, id))
            .or_else(|| first_duplicate(&self.outputs).map(|id| (PortDirection::Output, id)))
    }
}

fn upsert_port(ports: &mut Vec<NodePort>, port: NodePort) {
    match ports.iter_mut().find(|p| p.id == port.id) {
        Some(existing) => *existing = port,
        None => ports.push(port),
    }
}

/// Registry of available operation types.
///
/// The graph itself never consults this; operation types stay open strings.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    /// Registered types by key
    types: IndexMap<String, OperationType>,
}

impl OperationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation type, replacing any type with the same key
    pub fn register(&mut self, operation: OperationType) {
        self.types.insert(operation.id.clone(), operation);
    }

    /// Get an operation type by key
    pub fn get(&self, id: &str) -> Option<&OperationType> {
        self.types.get(id)
    }

    /// Whether a key is registered
    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &OperationType> {
        self.types.values()
    }

    /// Get types by category
    pub fn types_in_category(
        &self,
        category: OperationCategory,
    ) -> impl Iterator<Item = &OperationType> {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Create a node from a type key
    pub fn create_node(&self, id: &str) -> Option<Node> {
        self.get(id).map(Node::from_operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortType;

    #[test]
    fn test_port_lookup_by_direction() {
        let node = Node::new("Blur", "blur")
            .with_input(NodePort::named("i1", PortType::Image))
            .with_output(NodePort::named("i1", PortType::Image));

        assert!(node.input("i1").is_some());
        assert!(node.output("i1").is_some());
        assert!(node.output("o1").is_none());
        assert_eq!(node.duplicate_port(), None);
    }

    #[test]
    fn test_builder_keeps_port_ids_unique() {
        let node = Node::new("Merge", "merge")
            .with_input(NodePort::named("a", PortType::Image))
            .with_input(NodePort::named("a", PortType::Depth));

        assert_eq!(node.inputs.len(), 1);
        assert_eq!(node.inputs[0].port_type, PortType::Depth);
    }

    #[test]
    fn test_duplicate_port_detection() {
        let mut node = Node::new("Broken", "custom");
        node.outputs.push(NodePort::named("o", PortType::Image));
        node.outputs.push(NodePort::named("o", PortType::Audio));

        assert_eq!(node.duplicate_port(), Some((PortDirection::Output, "o")));
    }

    #[test]
    fn test_node_serialization_field_names() {
        let node = Node::new("Blur", "blur").with_property("radius", 4.0);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["operationType"], "blur");
        assert_eq!(json["properties"]["radius"]["type"], "float");
        assert!(json.get("subGraphId").is_none());

        let loaded: Node = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, node);
    }

    #[test]
    fn test_registry_creates_nodes() {
        let mut registry = OperationRegistry::new();
        registry.register(OperationType {
            id: "blur".to_string(),
            name: "Blur".to_string(),
            category: OperationCategory::Effect,
            description: "Gaussian blur".to_string(),
            inputs: vec![NodePort::named("image", PortType::Image)],
            outputs: vec![NodePort::named("image", PortType::Image)],
            properties: IndexMap::from([("radius".to_string(), NodeValue::Float(2.0))]),
        });

        let node = registry.create_node("blur").unwrap();
        assert_eq!(node.operation_type, "blur");
        assert_eq!(node.property("radius"), Some(&NodeValue::Float(2.0)));
        assert!(registry.create_node("missing").is_none());
        assert_eq!(registry.types_in_category(OperationCategory::Effect).count(), 1);
    }
}
