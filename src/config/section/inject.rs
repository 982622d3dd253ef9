//! `[inject]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [inject]
//! output = "dist/index.html"          # Rewritten HTML
//! sprite_url = "/icons/icons.svg"     # URL the runtime loader fetches
//! icon_class = "icon"                 # Class always present on the <svg>
//! placeholder_tags = ["span", "i"]    # Elements replaced when they carry a marker
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectConfig {
    pub output: PathBuf,
    pub sprite_url: String,
    pub icon_class: String,
    pub placeholder_tags: Vec<String>,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            output: "dist/index.html".into(),
            sprite_url: "/icons/icons.svg".into(),
            icon_class: "icon".into(),
            placeholder_tags: vec!["span".into(), "i".into()],
        }
    }
}

impl InjectConfig {
    pub const SPRITE_URL: FieldPath = FieldPath::new("inject.sprite_url");
    pub const ICON_CLASS: FieldPath = FieldPath::new("inject.icon_class");
    pub const PLACEHOLDER_TAGS: FieldPath = FieldPath::new("inject.placeholder_tags");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.sprite_url.trim().is_empty() {
            diag.error(Self::SPRITE_URL, "must not be empty");
        }
        if self.icon_class.trim().is_empty() || self.icon_class.contains(char::is_whitespace) {
            diag.error(Self::ICON_CLASS, "must be a single class name");
        }
        if self.placeholder_tags.is_empty() {
            diag.error_with_hint(
                Self::PLACEHOLDER_TAGS,
                "no placeholder tags configured",
                "use [\"span\", \"i\"]",
            );
        }
        for tag in &self.placeholder_tags {
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                diag.error(
                    Self::PLACEHOLDER_TAGS,
                    format!("`{tag}` is not a valid tag name"),
                );
            }
        }
    }
}
