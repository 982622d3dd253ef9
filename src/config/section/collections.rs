//! `[collections]` section configuration.
//!
//! Where icon data comes from, and what happens when it cannot be found.
//!
//! # Example
//!
//! ```toml
//! [collections]
//! iconify = "node_modules/@iconify-json"   # <dir>/<prefix>/icons.json per set
//! local = "src/icons"                      # <dir>/<name>.svg for `l-` markers
//! default_icon = "src/icons/default.svg"   # Placeholder for unknown icon names
//! missing_collection = "skip"              # skip | default
//! ```
//!
//! # Behavior
//!
//! - Unknown icon name in an available collection: always substituted by the
//!   default icon (built-in placeholder when `default_icon` is unset).
//! - Unavailable collection: `skip` leaves its markers out of the manifest,
//!   `default` substitutes the default icon for each of them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Policy for markers whose collection cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Warn and leave the markers out of the manifest.
    #[default]
    Skip,
    /// Warn and substitute the default icon.
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    /// Directory holding Iconify JSON icon sets.
    pub iconify: PathBuf,

    /// Directory holding local SVG icons.
    pub local: PathBuf,

    /// SVG file used in place of icons that cannot be resolved.
    pub default_icon: Option<PathBuf>,

    /// What to do with markers of an unavailable collection.
    pub missing_collection: MissingPolicy,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            iconify: "node_modules/@iconify-json".into(),
            local: "src/icons".into(),
            default_icon: None,
            missing_collection: MissingPolicy::Skip,
        }
    }
}

impl CollectionsConfig {
    pub const ICONIFY: FieldPath = FieldPath::new("collections.iconify");
    pub const LOCAL: FieldPath = FieldPath::new("collections.local");
    pub const DEFAULT_ICON: FieldPath = FieldPath::new("collections.default_icon");

    /// Validate collection paths.
    ///
    /// Missing directories and a missing default icon are not fatal: their
    /// markers are reported during the build instead.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.iconify.is_dir() {
            diag.hint(
                Self::ICONIFY,
                format!("directory '{}' not found", self.iconify.display()),
            );
        }
        if !self.local.is_dir() {
            crate::debug!("config"; "local icon directory '{}' not found", self.local.display());
        }
        if let Some(path) = &self.default_icon
            && !path.is_file()
        {
            diag.hint(
                Self::DEFAULT_ICON,
                format!(
                    "file '{}' not found, the built-in placeholder is used instead",
                    path.display()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(
            config.collections.iconify,
            PathBuf::from("node_modules/@iconify-json")
        );
        assert_eq!(config.collections.local, PathBuf::from("src/icons"));
        assert!(config.collections.default_icon.is_none());
        assert_eq!(config.collections.missing_collection, MissingPolicy::Skip);
    }

    #[test]
    fn test_missing_policy_parsing() {
        let cases = [("skip", MissingPolicy::Skip), ("default", MissingPolicy::Default)];
        for (input, expected) in cases {
            let config =
                test_parse_config(&format!("[collections]\nmissing_collection = \"{input}\""));
            assert_eq!(
                config.collections.missing_collection, expected,
                "failed for {input}"
            );
        }
    }

    #[test]
    fn test_missing_default_icon_is_not_fatal() {
        let mut config = CollectionsConfig::default();
        config.default_icon = Some(PathBuf::from("/definitely/not/here.svg"));
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
