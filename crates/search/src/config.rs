//! Field search configuration via `vsmfields.toml`
//!
//! Declares how each document field is searched and which fields every
//! query index covers. Field ids are assigned in declaration order.

use crate::searcher::DEFAULT_MAX_FIELD_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vsm_core::{Error, Result};

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "vsmfields.toml";

/// How one field is searched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpecConfig {
    /// Field name (canonical path)
    pub name: String,
    /// Search method, e.g. `"AUTOUTF8"` or `"INT64"`
    pub searchmethod: String,
    /// Match mode for text methods: `"substring"`, `"suffix"`, `"exact"`,
    /// `"prefix"`, or empty for words
    #[serde(default)]
    pub arg1: String,
    /// Bytes scanned per element (default: 0x100000)
    #[serde(default = "default_max_length")]
    pub maxlength: usize,
}

fn default_max_length() -> usize {
    DEFAULT_MAX_FIELD_LENGTH
}

/// Query index covering a set of fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexConfig {
    /// Index name as used in `index:term`
    pub name: String,
    /// Names of the covered fields, in search order
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Field search configuration loaded from `vsmfields.toml`
///
/// # Example
///
/// ```toml
/// [[fieldspec]]
/// name = "title"
/// searchmethod = "AUTOUTF8"
/// arg1 = "substring"
/// maxlength = 1000
///
/// [[fieldspec]]
/// name = "year"
/// searchmethod = "INT32"
///
/// [[index]]
/// name = "default"
/// fields = ["title"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VsmFieldsConfig {
    /// Field specs in field id order
    #[serde(default, rename = "fieldspec")]
    pub field_specs: Vec<FieldSpecConfig>,
    /// Index to field mapping
    #[serde(default, rename = "index")]
    pub indexes: Vec<IndexConfig>,
}

impl VsmFieldsConfig {
    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not a valid config.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse(format!("Failed to parse field config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            Error::parse(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Serialize this config to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::parse(format!("Failed to serialize field config: {}", e)))
    }
}
