// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reading and writing `.graph` and `.preset` documents.
//!
//! JSON is the canonical format; RON is accepted for `.ron` files. Decoding
//! through [`Document::decode`] always validates, so a loaded graph is
//! ready for execution. Use [`Document::decode_unchecked`] to inspect a
//! broken file.

use crate::error::DocumentError;
use crate::graph::NodeGraph;
use crate::preset::Preset;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Graph file extension
pub const GRAPH_EXTENSION: &str = "graph";

/// Preset file extension
pub const PRESET_EXTENSION: &str = "preset";

/// On-disk encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON (`.graph`, `.preset`, `.json`)
    Json,
    /// RON (`.ron`)
    Ron,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(GRAPH_EXTENSION | PRESET_EXTENSION | "json") => Ok(Self::Json),
            Some("ron") => Ok(Self::Ron),
            _ => Err(DocumentError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// A serializable, self-validating document
pub trait Document: Serialize + DeserializeOwned {
    /// Check every invariant after a bulk load
    fn check(&self) -> Result<(), DocumentError>;

    /// Decode without validation
    fn decode_unchecked(text: &str, format: DocumentFormat) -> Result<Self, DocumentError> {
        Ok(match format {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Ron => ron::from_str(text)?,
        })
    }

    /// Decode and validate
    fn decode(text: &str, format: DocumentFormat) -> Result<Self, DocumentError> {
        let document = Self::decode_unchecked(text, format)?;
        document.check()?;
        Ok(document)
    }

    /// Encode in a human-readable layout
    fn encode(&self, format: DocumentFormat) -> Result<String, DocumentError> {
        Ok(match format {
            DocumentFormat::Json => serde_json::to_string_pretty(self)?,
            DocumentFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?,
        })
    }

    /// Decode and validate JSON
    fn from_json(text: &str) -> Result<Self, DocumentError> {
        Self::decode(text, DocumentFormat::Json)
    }

    /// Encode as JSON
    fn to_json(&self) -> Result<String, DocumentError> {
        self.encode(DocumentFormat::Json)
    }

    /// Decode and validate RON
    fn from_ron(text: &str) -> Result<Self, DocumentError> {
        Self::decode(text, DocumentFormat::Ron)
    }

    /// Encode as RON
    fn to_ron(&self) -> Result<String, DocumentError> {
        self.encode(DocumentFormat::Ron)
    }

    /// Load and validate a file, picking the format from its extension
    fn load(path: &Path) -> Result<Self, DocumentError> {
        let format = DocumentFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::decode(&text, format)?;
        tracing::info!("Loaded {}", path.display());
        Ok(document)
    }

    /// Save to a file, picking the format from its extension
    fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let text = self.encode(DocumentFormat::from_path(path)?)?;
        std::fs::write(path, text).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Saved {}", path.display());
        Ok(())
    }
}

impl Document for NodeGraph {
    fn check(&self) -> Result<(), DocumentError> {
        for (key, node) in self.node_ids().zip(self.nodes()) {
            if key != node.id {
                return Err(DocumentError::MismatchedNodeKey { key, id: node.id });
            }
            if let Some((direction, port)) = node.duplicate_port() {
                return Err(DocumentError::DuplicatePort {
                    node: node.id,
                    direction,
                    port: port.to_string(),
                });
            }
        }
        self.validate()?;
        Ok(())
    }
}

impl Document for Preset {
    fn check(&self) -> Result<(), DocumentError> {
        self.internal_graph.check()
    }
}
