// SPDX-License-Identifier: MIT OR Apache-2.0
//! Presets: reusable subgraphs with a simplified parameter surface.
//!
//! A preset wraps a finished [`NodeGraph`] and republishes some of its node
//! properties under external names, e.g. `"Softness"` for
//! `"BlurNode.radius"`. The mapping is not checked when the preset is built;
//! consumers resolve it at use time through [`ParameterPath::resolve`].

use crate::error::ParameterError;
use crate::graph::{GraphId, NodeGraph};
use crate::node::{Node, NodeId};
use crate::value::NodeValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(pub Uuid);

impl PresetId {
    /// Create a new random preset ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PresetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operation type given to nodes that instantiate a preset
pub const PRESET_OPERATION_TYPE: &str = "preset";

/// A named, reusable subgraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Unique identifier
    pub id: PresetId,
    /// Display name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// The encapsulated graph
    pub internal_graph: NodeGraph,
    /// External parameter name to `node.property` path
    #[serde(default)]
    pub exposed_parameters: IndexMap<String, String>,
}

impl Preset {
    /// Create a preset around a graph
    pub fn new(name: impl Into<String>, internal_graph: NodeGraph) -> Self {
        Self {
            id: PresetId::new(),
            name: name.into(),
            description: String::new(),
            internal_graph,
            exposed_parameters: IndexMap::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Expose an internal property under an external name
    pub fn expose(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.exposed_parameters.insert(name.into(), path.into());
        self
    }

    /// Parsed path behind an exposed name
    pub fn parameter_path(&self, name: &str) -> Result<ParameterPath, ParameterError> {
        let raw = self.exposed_parameters
            .get(name)
            .ok_or_else(|| ParameterError::UnknownParameter(name.to_string()))?;
        ParameterPath::parse(raw)
    }

    /// Resolve an exposed name to its node and current value
    pub fn resolve_parameter(&self, name: &str) -> Result<(NodeId, &NodeValue), ParameterError> {
        self.parameter_path(name)?.resolve(&self.internal_graph)
    }

    /// Replace the internal property behind an exposed name
    pub fn set_parameter(&mut self, name: &str, value: NodeValue) -> Result<(), ParameterError> {
        let path = self.parameter_path(name)?;
        let (node_id, _) = path.resolve(&self.internal_graph)?;
        self.internal_graph.set_property(node_id, path.property, value);
        Ok(())
    }

    /// Exposed names whose paths do not resolve, with the reason
    pub fn unresolved_parameters(&self) -> Vec<(&str, ParameterError)> {
        self.exposed_parameters
            .keys()
            .filter_map(|name| match self.resolve_parameter(name) {
                Ok(_) => None,
                Err(err) => Some((name.as_str(), err)),
            })
            .collect()
    }

    /// Build a node that instantiates this preset
    pub fn instance_node(&self, position: [f64; 2]) -> Node {
        let mut node = Node::new(self.name.clone(), PRESET_OPERATION_TYPE)
            .with_sub_graph(self.internal_graph.id);
        node.position = position;
        node
    }
}

/// A `node.property` path into a preset's internal graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterPath {
    /// Node display name
    pub node: String,
    /// Property key
    pub property: String,
}

impl ParameterPath {
    /// Parse `"node.property"`, splitting at the first `.`
    pub fn parse(raw: &str) -> Result<Self, ParameterError> {
        match raw.split_once('.') {
            Some((node, property)) if !node.is_empty() && !property.is_empty() => Ok(Self {
                node: node.to_string(),
                property: property.to_string(),
            }),
            _ => Err(ParameterError::MalformedPath(raw.to_string())),
        }
    }

    /// Find the node by exact name and read the property
    pub fn resolve<'g>(&self, graph: &'g NodeGraph) -> Result<(NodeId, &'g NodeValue), ParameterError> {
        let mut matches = graph.nodes().filter(|n| n.name == self.node);
        let node = matches
            .next()
            .ok_or_else(|| ParameterError::NodeNotFound(self.node.clone()))?;
        if matches.next().is_some() {
            return Err(ParameterError::AmbiguousNode(self.node.clone()));
        }

        let value = node.property(&self.property).ok_or_else(|| ParameterError::PropertyNotFound {
            node: self.node.clone(),
            property: self.property.clone(),
        })?;
        Ok((node.id, value))
    }
}

impl fmt::Display for ParameterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.property)
    }
}

/// Presets by id, used to resolve `sub_graph_id` on nodes.
///
/// The lookup is weak: a node may reference a preset that is not loaded.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: IndexMap<PresetId, Preset>,
}

impl PresetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preset, replacing any with the same id
    pub fn register(&mut self, preset: Preset) -> PresetId {
        let id = preset.id;
        self.presets.insert(id, preset);
        id
    }

    /// Remove a preset
    pub fn unregister(&mut self, id: PresetId) -> Option<Preset> {
        self.presets.shift_remove(&id)
    }

    /// Get a preset by id
    pub fn get(&self, id: PresetId) -> Option<&Preset> {
        self.presets.get(&id)
    }

    /// Find the preset owning an internal graph
    pub fn by_graph(&self, graph_id: GraphId) -> Option<&Preset> {
        self.presets.values().find(|p| p.internal_graph.id == graph_id)
    }

    /// Resolve the preset a node instantiates, if it is loaded
    pub fn resolve(&self, node: &Node) -> Option<&Preset> {
        node.sub_graph_id.and_then(|graph_id| self.by_graph(graph_id))
    }

    /// All presets
    pub fn presets(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    /// Number of registered presets
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
