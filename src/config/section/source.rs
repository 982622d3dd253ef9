//! `[source]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [source]
//! html = "src/index.html"     # HTML scanned for markers and rewritten by inject
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::FieldPath;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// HTML source file (relative to the project root).
    pub html: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            html: "src/index.html".into(),
        }
    }
}

impl SourceConfig {
    pub const HTML: FieldPath = FieldPath::new("source.html");
}
