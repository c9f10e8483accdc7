// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Kind of data that flows through a port.
///
/// Connections require exact equality; there is no implicit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortType {
    /// Image / texture frames
    Image,
    /// Audio buffers
    Audio,
    /// Depth maps
    Depth,
    /// Tracked camera pose data
    CameraPose,
    /// Single float
    Scalar,
    /// 3D vector
    Vector3,
    /// String value
    String,
    /// Zero-payload trigger
    Event,
    /// Type not yet resolved
    Unknown,
}

impl PortType {
    /// All port types
    pub fn all() -> &'static [PortType] {
        &[
            PortType::Image,
            PortType::Audio,
            PortType::Depth,
            PortType::CameraPose,
            PortType::Scalar,
            PortType::Vector3,
            PortType::String,
            PortType::Event,
            PortType::Unknown,
        ]
    }

    /// Display name for this type
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Audio => "Audio",
            Self::Depth => "Depth",
            Self::CameraPose => "Camera Pose",
            Self::Scalar => "Scalar",
            Self::Vector3 => "Vector3",
            Self::String => "String",
            Self::Event => "Event",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether a port of this type may feed a port of `other` type.
    ///
    /// `Unknown` never connects, not even to itself.
    pub fn can_connect_to(&self, other: &PortType) -> bool {
        *self != PortType::Unknown && self == other
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A named, typed connection point on a node.
///
/// `id` is unique within the owning node's inputs or outputs, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePort {
    /// Port id, local to the node and direction
    pub id: String,
    /// Display name
    pub name: String,
    /// Data type
    #[serde(rename = "type")]
    pub port_type: PortType,
}

impl NodePort {
    /// Create a new port
    pub fn new(id: impl Into<String>, name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            port_type,
        }
    }

    /// Create a port whose display name equals its id
    pub fn named(id: impl Into<String>, port_type: PortType) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            port_type,
        }
    }

    /// Check if data from this port may flow into `other`
    pub fn can_connect(&self, other: &NodePort) -> bool {
        self.port_type.can_connect_to(&other.port_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_type_matching() {
        for a in PortType::all() {
            for b in PortType::all() {
                let expected = a == b && *a != PortType::Unknown;
                assert_eq!(a.can_connect_to(b), expected, "{a} -> {b}");
            }
        }
    }

    #[test]
    fn test_port_serialization() {
        let port = NodePort::new("o1", "Output", PortType::CameraPose);
        let json = serde_json::to_value(&port).unwrap();
        assert_eq!(json["type"], "cameraPose");

        let loaded: NodePort = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, port);
    }
}
