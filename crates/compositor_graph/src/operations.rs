// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in compositing operations.
//!
//! Hosts are free to register more; the graph only ever sees the type key.

use crate::node::{OperationCategory, OperationRegistry, OperationType};
use crate::port::{NodePort, PortType};
use crate::value::NodeValue;
use indexmap::IndexMap;

fn properties<const N: usize>(entries: [(&str, NodeValue); N]) -> IndexMap<String, NodeValue> {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Create a registry seeded with the common compositing operations
pub fn builtin_registry() -> OperationRegistry {
    let mut registry = OperationRegistry::new();

    // ========================================================================
    // Sources
    // ========================================================================

    registry.register(OperationType {
        id: "media_source".to_string(),
        name: "Media Source".to_string(),
        category: OperationCategory::Source,
        description: "Decoded video or still frames from an asset".to_string(),
        inputs: vec![],
        outputs: vec![
            NodePort::new("image", "Image", PortType::Image),
            NodePort::new("depth", "Depth", PortType::Depth),
            NodePort::new("camera", "Camera", PortType::CameraPose),
        ],
        properties: properties([
            ("time_offset", NodeValue::Float(0.0)),
            ("loop", NodeValue::Bool(false)),
        ]),
    });

    registry.register(OperationType {
        id: "audio_source".to_string(),
        name: "Audio Source".to_string(),
        category: OperationCategory::Source,
        description: "Decoded audio from an asset".to_string(),
        inputs: vec![],
        outputs: vec![
            NodePort::new("audio", "Audio", PortType::Audio),
            NodePort::new("level", "Level", PortType::Scalar),
            NodePort::new("beat", "Beat", PortType::Event),
        ],
        properties: properties([("gain", NodeValue::Float(1.0))]),
    });

    registry.register(OperationType {
        id: "text".to_string(),
        name: "Text".to_string(),
        category: OperationCategory::Source,
        description: "Rendered text layer".to_string(),
        inputs: vec![NodePort::new("content", "Content", PortType::String)],
        outputs: vec![NodePort::new("image", "Image", PortType::Image)],
        properties: properties([
            ("content", NodeValue::String(String::new())),
            ("size", NodeValue::Float(48.0)),
            ("color", NodeValue::Color([1.0, 1.0, 1.0, 1.0])),
        ]),
    });

    // ========================================================================
    // Transforms
    // ========================================================================

    registry.register(OperationType {
        id: "transform".to_string(),
        name: "Transform".to_string(),
        category: OperationCategory::Transform,
        description: "Translate, rotate and scale an image".to_string(),
        inputs: vec![
            NodePort::new("image", "Image", PortType::Image),
            NodePort::new("translation", "Translation", PortType::Vector3),
        ],
        outputs: vec![NodePort::new("image", "Image", PortType::Image)],
        properties: properties([
            ("translation", NodeValue::Vector2([0.0, 0.0])),
            ("rotation", NodeValue::Float(0.0)),
            ("scale", NodeValue::Vector2([1.0, 1.0])),
        ]),
    });

    // ========================================================================
    // Effects
    // ========================================================================

    registry.register(OperationType {
        id: "blur".to_string(),
        name: "Blur".to_string(),
        category: OperationCategory::Effect,
        description: "Gaussian blur".to_string(),
        inputs: vec![
            NodePort::new("image", "Image", PortType::Image),
            NodePort::new("radius", "Radius", PortType::Scalar),
        ],
        outputs: vec![NodePort::new("image", "Image", PortType::Image)],
        properties: properties([("radius", NodeValue::Float(4.0))]),
    });

    registry.register(OperationType {
        id: "color_correct".to_string(),
        name: "Color Correct".to_string(),
        category: OperationCategory::Effect,
        description: "Lift, gamma, gain and saturation".to_string(),
        inputs: vec![NodePort::new("image", "Image", PortType::Image)],
        outputs: vec![NodePort::new("image", "Image", PortType::Image)],
        properties: properties([
            ("lift", NodeValue::Color([0.0, 0.0, 0.0, 0.0])),
            ("gamma", NodeValue::Color([1.0, 1.0, 1.0, 1.0])),
            ("gain", NodeValue::Color([1.0, 1.0, 1.0, 1.0])),
            ("saturation", NodeValue::Float(1.0)),
        ]),
    });

    registry.register(OperationType {
        id: "depth_of_field".to_string(),
        name: "Depth of Field".to_string(),
        category: OperationCategory::Effect,
        description: "Depth-driven lens blur".to_string(),
        inputs: vec![
            NodePort::new("image", "Image", PortType::Image),
            NodePort::new("depth", "Depth", PortType::Depth),
            NodePort::new("focus", "Focus", PortType::Scalar),
        ],
        outputs: vec![NodePort::new("image", "Image", PortType::Image)],
        properties: properties([
            ("focus_distance", NodeValue::Float(2.0)),
            ("aperture", NodeValue::Float(2.8)),
        ]),
    });

    // ========================================================================
    // Composites
    // ========================================================================

    registry.register(OperationType {
        id: "merge".to_string(),
        name: "Merge".to_string(),
        category: OperationCategory::Composite,
        description: "Layer foreground over background".to_string(),
        inputs: vec![
            NodePort::new("background", "Background", PortType::Image),
            NodePort::new("foreground", "Foreground", PortType::Image),
            NodePort::new("mask", "Mask", PortType::Image),
        ],
        outputs: vec![NodePort::new("image", "Image", PortType::Image)],
        properties: properties([
            ("mode", NodeValue::String("over".to_string())),
            ("opacity", NodeValue::Float(1.0)),
        ]),
    });

    // ========================================================================
    // Audio
    // ========================================================================

    registry.register(OperationType {
        id: "audio_mix".to_string(),
        name: "Audio Mix".to_string(),
        category: OperationCategory::Audio,
        description: "Sum two audio streams".to_string(),
        inputs: vec![
            NodePort::new("a", "A", PortType::Audio),
            NodePort::new("b", "B", PortType::Audio),
        ],
        outputs: vec![NodePort::new("audio", "Audio", PortType::Audio)],
        properties: properties([("balance", NodeValue::Float(0.5))]),
    });

    // ========================================================================
    // Output
    // ========================================================================

    registry.register(OperationType {
        id: "output".to_string(),
        name: "Output".to_string(),
        category: OperationCategory::Output,
        description: "Final frame and audio".to_string(),
        inputs: vec![
            NodePort::new("image", "Image", PortType::Image),
            NodePort::new("audio", "Audio", PortType::Audio),
        ],
        outputs: vec![],
        properties: IndexMap::new(),
    });

    registry
}
