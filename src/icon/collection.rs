//! Icon collections.
//!
//! Two sources are supported:
//!
//! - **Iconify sets**: the `icons.json` of an `@iconify-json/<prefix>` package
//!   (or a flat `<prefix>.json`), with aliases and set-level dimensions.
//! - **Local directory**: one `<name>.svg` file per icon.
//!
//! Collections are read once and not modified afterwards.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::log;

// ============================================================================
// Iconify JSON
// ============================================================================

/// Optional geometry and transformations shared by icons and aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconProps {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(default)]
    pub h_flip: bool,
    #[serde(default)]
    pub v_flip: bool,
    /// Quarter turns clockwise.
    #[serde(default)]
    pub rotate: u32,
}

/// An icon with markup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IconifyIcon {
    pub body: String,
    #[serde(flatten)]
    pub props: IconProps,
}

/// An alternative name for another icon, possibly transformed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IconifyAlias {
    pub parent: String,
    #[serde(flatten)]
    pub props: IconProps,
}

/// An Iconify icon set.
///
/// Only the fields used for rendering are read; metadata such as `info`,
/// `categories` or `chars` is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IconSet {
    #[serde(default)]
    pub prefix: String,
    pub icons: BTreeMap<String, IconifyIcon>,
    #[serde(default)]
    pub aliases: BTreeMap<String, IconifyAlias>,
    /// Set-level defaults for icons without their own dimensions.
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl IconSet {
    /// Locate the set for `prefix` under the Iconify directory.
    ///
    /// Prefers the package layout `<dir>/<prefix>/icons.json`, then `<dir>/<prefix>.json`.
    pub fn locate(iconify_dir: &Path, prefix: &str) -> Option<PathBuf> {
        [
            iconify_dir.join(prefix).join("icons.json"),
            iconify_dir.join(format!("{prefix}.json")),
        ]
        .into_iter()
        .find(|path| path.is_file())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid icon set {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Whether `name` is an icon or an alias in this set.
    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name) || self.aliases.contains_key(name)
    }
}

// ============================================================================
// Local directory
// ============================================================================

/// SVG sources from the local icon directory, by file stem.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalIcons {
    pub icons: BTreeMap<String, String>,
}

impl LocalIcons {
    /// Read every `*.svg` directly inside `dir`.
    ///
    /// Unreadable files are skipped so their names fall back to the default
    /// icon instead of failing the whole directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let entries =
            fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

        let mut icons = BTreeMap::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "svg") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match fs::read_to_string(&path) {
                Ok(source) => {
                    icons.insert(name.to_string(), source);
                }
                Err(e) => {
                    log!("warning"; "skipping local icon '{}': {}", path.display(), e);
                }
            }
        }

        Ok(Self { icons })
    }
}

// ============================================================================
// IconCollection
// ============================================================================

/// A loaded collection.
#[derive(Debug, Clone, PartialEq)]
pub enum IconCollection {
    Iconify(IconSet),
    Local(LocalIcons),
}

impl IconCollection {
    pub fn len(&self) -> usize {
        match self {
            Self::Iconify(set) => set.icons.len() + set.aliases.len(),
            Self::Local(local) => local.icons.len(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Iconify(set) => set.contains(name),
            Self::Local(local) => local.icons.contains_key(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SET: &str = r#"{
        "prefix": "demo",
        "info": { "name": "Demo" },
        "icons": {
            "arrow": { "body": "<path d=\"M0 0h8\"/>", "width": 16 },
            "square": { "body": "<rect width=\"4\" height=\"4\"/>", "hFlip": true, "rotate": 1 }
        },
        "aliases": {
            "arrow-left": { "parent": "arrow", "hFlip": true }
        },
        "height": 16
    }"#;

    #[test]
    fn test_parse_icon_set() {
        let set = IconSet::parse(SET).unwrap();
        assert_eq!(set.prefix, "demo");
        assert_eq!(set.icons.len(), 2);
        assert_eq!(set.icons["arrow"].props.width, Some(16.0));
        assert!(set.icons["square"].props.h_flip);
        assert_eq!(set.icons["square"].props.rotate, 1);
        assert_eq!(set.aliases["arrow-left"].parent, "arrow");
        assert_eq!(set.height, Some(16.0));
        assert_eq!(set.width, None);
        assert!(set.contains("arrow-left"));
        assert!(!set.contains("missing"));
    }

    #[test]
    fn test_missing_icons_object() {
        assert!(IconSet::parse(r#"{ "prefix": "x" }"#).is_err());
        assert!(IconSet::parse("not json").is_err());
    }

    #[test]
    fn test_locate_prefers_package_layout() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mdi.json"), SET).unwrap();
        assert_eq!(
            IconSet::locate(dir.path(), "mdi"),
            Some(dir.path().join("mdi.json"))
        );

        fs::create_dir(dir.path().join("mdi")).unwrap();
        fs::write(dir.path().join("mdi/icons.json"), SET).unwrap();
        assert_eq!(
            IconSet::locate(dir.path(), "mdi"),
            Some(dir.path().join("mdi").join("icons.json"))
        );

        assert_eq!(IconSet::locate(dir.path(), "foo"), None);
    }

    #[test]
    fn test_load_local_icons() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.svg")).unwrap();

        let local = LocalIcons::load(dir.path()).unwrap();
        assert_eq!(local.icons.keys().collect::<Vec<_>>(), ["logo"]);

        let collection = IconCollection::Local(local);
        assert_eq!(collection.len(), 1);
        assert!(collection.contains("logo"));
    }

    #[test]
    fn test_load_local_skips_unreadable_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("broken.svg"), [0xff, 0xfe, 0x3c, 0x00]).unwrap();

        let local = LocalIcons::load(dir.path()).unwrap();
        assert!(local.icons.contains_key("logo"));
        assert!(!local.icons.contains_key("broken"));
    }

    #[test]
    fn test_load_local_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(LocalIcons::load(&dir.path().join("absent")).is_err());
    }
}
