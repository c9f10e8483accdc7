// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed property values stored on nodes.
//!
//! Values encode with an explicit tag so a document can be decoded without
//! knowing the operation that owns the property:
//!
//! ```json
//! { "type": "vector3", "value": [0.0, 1.0, 0.0] }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A property value on a node.
///
/// Values are immutable; a node property is always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum NodeValue {
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Double precision float
    Float(#[serde(serialize_with = "finite::float")] f64),
    /// UTF-8 string
    String(String),
    /// 2D vector
    Vector2(#[serde(serialize_with = "finite::array")] [f64; 2]),
    /// 3D vector
    Vector3(#[serde(serialize_with = "finite::array")] [f64; 3]),
    /// RGBA color
    Color(#[serde(serialize_with = "finite::array")] [f64; 4]),
    /// Reference to an asset, node or other external entity
    Uuid(Uuid),
}

/// Encoders that refuse NaN and infinities, which JSON would write as `null`
/// and then fail to read back.
pub(crate) mod finite {
    use serde::ser::SerializeTuple;
    use serde::Serializer;

    fn check<E: serde::ser::Error>(value: f64) -> Result<f64, E> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(E::custom(format_args!("cannot encode non-finite float {value}")))
        }
    }

    pub(crate) fn float<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(check::<S::Error>(*value)?)
    }

    pub(crate) fn array<S: Serializer, const N: usize>(
        values: &[f64; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(N)?;
        for value in values {
            tuple.serialize_element(&check::<S::Error>(*value)?)?;
        }
        tuple.end()
    }
}

impl NodeValue {
    /// The tag this value is encoded with
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Vector2(_) => "vector2",
            Self::Vector3(_) => "vector3",
            Self::Color(_) => "color",
            Self::Uuid(_) => "uuid",
        }
    }

    /// Get the value as a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a float. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get the value as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Get the referenced id
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for NodeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for NodeValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for NodeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for NodeValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Uuid> for NodeValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<NodeValue> {
        vec![
            NodeValue::Bool(true),
            NodeValue::Int(-42),
            NodeValue::Float(0.125),
            NodeValue::String("lens".to_string()),
            NodeValue::Vector2([1.0, -2.5]),
            NodeValue::Vector3([0.0, 1.0, 0.5]),
            NodeValue::Color([1.0, 0.5, 0.25, 1.0]),
            NodeValue::Uuid(Uuid::new_v4()),
        ]
    }

    #[test]
    fn test_every_tag_round_trips() {
        for value in samples() {
            let json = serde_json::to_string(&value).unwrap();
            let decoded: NodeValue = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_encoding_carries_type_tag() {
        for value in samples() {
            let json = serde_json::to_value(&value).unwrap();
            assert_eq!(json["type"], value.type_tag());
            assert!(json.get("value").is_some());
        }

        let json = serde_json::to_value(NodeValue::Vector3([0.0, 1.0, 2.0])).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "vector3", "value": [0.0, 1.0, 2.0] }));
    }

    #[test]
    fn test_unknown_tag_fails() {
        let result = serde_json::from_str::<NodeValue>(r#"{ "type": "matrix", "value": [1.0] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_mismatch_fails() {
        let result = serde_json::from_str::<NodeValue>(r#"{ "type": "vector2", "value": [1.0] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_floats_refuse_to_encode() {
        let values = [
            NodeValue::Float(f64::INFINITY),
            NodeValue::Float(f64::NAN),
            NodeValue::Vector2([0.0, f64::NEG_INFINITY]),
            NodeValue::Vector3([f64::NAN, 0.0, 0.0]),
            NodeValue::Color([1.0, 1.0, 1.0, f64::INFINITY]),
        ];
        for value in values {
            assert!(serde_json::to_string(&value).is_err(), "{value:?}");
        }
        assert!(serde_json::to_string(&NodeValue::Float(f64::MAX)).is_ok());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(NodeValue::Int(3).as_float(), Some(3.0));
        assert_eq!(NodeValue::from("x").as_str(), Some("x"));
        assert_eq!(NodeValue::Bool(false).as_int(), None);
    }
}
