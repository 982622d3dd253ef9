//! `[build]` section configuration.
//!
//! Controls how resolved icons are written out.
//!
//! # Example
//!
//! ```toml
//! [build]
//! mode = "sprite"              # sprite | individual | both
//! output_dir = "dist/icons"    # Sprite and individual files go here
//! sprite_name = "icons.svg"    # Sprite file name inside output_dir
//! manifest = "dist/icons.json" # id -> { viewBox, body, isDefault }
//! ```
//!
//! The manifest is written in every mode; `inject` depends on it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

/// How icons are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
    /// One sprite document with a `<symbol>` per icon.
    #[default]
    Sprite,
    /// One SVG file per icon.
    Individual,
    /// Sprite and individual files.
    Both,
}

impl EmitMode {
    /// Parse the short and long spellings accepted on the command line.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sprite" => Some(Self::Sprite),
            "i" | "individual" => Some(Self::Individual),
            "a" | "all" | "both" => Some(Self::Both),
            _ => None,
        }
    }

    pub const fn writes_sprite(self) -> bool {
        matches!(self, Self::Sprite | Self::Both)
    }

    pub const fn writes_individual(self) -> bool {
        matches!(self, Self::Individual | Self::Both)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sprite => "sprite",
            Self::Individual => "individual",
            Self::Both => "both",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Emission mode (overridden by the positional CLI argument).
    pub mode: EmitMode,

    /// Directory for the sprite and individual icon files.
    pub output_dir: PathBuf,

    /// Sprite file name inside `output_dir`.
    pub sprite_name: String,

    /// Manifest path.
    pub manifest: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            mode: EmitMode::Sprite,
            output_dir: "dist/icons".into(),
            sprite_name: "icons.svg".into(),
            manifest: "dist/icons.json".into(),
        }
    }
}

impl BuildConfig {
    pub const SPRITE_NAME: FieldPath = FieldPath::new("build.sprite_name");

    /// Full path of the sprite document.
    pub fn sprite_path(&self) -> PathBuf {
        self.output_dir.join(&self.sprite_name)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.sprite_name.trim().is_empty() {
            diag.error(Self::SPRITE_NAME, "must not be empty");
        } else if self.sprite_name.contains(['/', '\\']) {
            diag.error_with_hint(
                Self::SPRITE_NAME,
                "must be a file name, not a path",
                "set the directory with `build.output_dir`",
            );
        }
    }
}
