// SPDX-License-Identifier: MIT OR Apache-2.0
//! Preset library configuration.
//!
//! Stored as RON next to a project, e.g.:
//!
//! ```ron
//! (
//!     search_paths: ["presets", "/studio/shared/presets"],
//!     capacity: 64,
//!     validate_on_load: true,
//! )
//! ```

use crate::document::PRESET_EXTENSION;
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "library.ron";

/// Default number of presets kept in memory
pub const DEFAULT_CAPACITY: usize = 128;

/// Settings for the preset library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directories searched for presets by name, in order
    pub search_paths: Vec<PathBuf>,
    /// Maximum number of cached presets; the oldest is evicted first
    pub capacity: usize,
    /// Validate every loaded preset graph
    pub validate_on_load: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![PathBuf::from("presets")],
            capacity: DEFAULT_CAPACITY,
            validate_on_load: true,
        }
    }
}

impl LibraryConfig {
    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ron::from_str(&text)?)
    }

    /// Save to a RON file
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Add a search directory
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Find `<name>.preset` in the search paths
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let file_name = format!("{name}.{PRESET_EXTENSION}");
        self.search_paths
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|path| path.is_file())
    }
}
