//! Render options
//!
//! Options can be built in code, read from the `options` object of an input
//! document, or loaded from a TOML file:
//!
//! ```toml
//! version_aware = true
//! diagnostics = false
//!
//! [fonts]
//! base = 14.0
//! cluster_outer = 20.0
//! cluster_inner = 14.0
//!
//! [image_map]
//! host = "/images/host.png"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Errors that can occur when loading options
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Failed to read options file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse options TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Font sizes used across nesting levels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontScale {
    /// Size for group, node and image views
    pub base: f64,
    /// Size of the outermost cluster in subgraph views
    pub cluster_outer: f64,
    /// Size reached at the deepest level of subgraph views
    pub cluster_inner: f64,
}

impl Default for FontScale {
    fn default() -> Self {
        Self {
            base: 14.0,
            cluster_outer: 20.0,
            cluster_inner: 14.0,
        }
    }
}

/// Options for one render
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Color records by their revision state
    #[serde(alias = "suport_version", deserialize_with = "version_flag")]
    pub version_aware: bool,

    /// CI type → image path
    #[serde(alias = "imagesMap")]
    pub image_map: HashMap<String, String>,

    pub fonts: FontScale,

    /// Collect diagnostics (dropped edges, malformed selectors)
    pub diagnostics: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            version_aware: false,
            image_map: HashMap::new(),
            fonts: FontScale::default(),
            diagnostics: false,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load options from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_version_aware(mut self, enabled: bool) -> Self {
        self.version_aware = enabled;
        self
    }

    /// Register the image shown for a CI type
    pub fn with_image(mut self, ci_type: impl Into<String>, path: impl Into<String>) -> Self {
        self.image_map.insert(ci_type.into(), path.into());
        self
    }

    pub fn with_fonts(mut self, fonts: FontScale) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}

/// Accept a boolean or the CMDB `"yes"` marker
fn version_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => s == "yes",
        None => false,
    })
}
