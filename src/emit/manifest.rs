//! Sprite manifest (`icons.json`).
//!
//! ```json
//! {
//!   "i-mdi-home": {
//!     "viewBox": "0 0 24 24",
//!     "body": "<path d=\"...\"/>",
//!     "isDefault": false
//!   }
//! }
//! ```
//!
//! Keys are ordered by id so the file is byte-identical across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::icon::NormalizedIcon;

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "viewBox")]
    pub view_box: String,
    pub body: String,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

/// Map of emitted icon ids to their entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn from_icons(icons: &[NormalizedIcon]) -> Self {
        let entries = icons
            .iter()
            .map(|icon| {
                let entry = ManifestEntry {
                    view_box: icon.view_box.to_string(),
                    body: icon.body.clone(),
                    is_default: icon.is_default,
                };
                (icon.id.clone(), entry)
            })
            .collect();
        Self { entries }
    }

    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ManifestEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
