//! HTML rewriting pipeline.
//!
//! Turns the source HTML into the published page once `build` has written
//! the sprite and manifest.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │          Check Phase (no writes)              │
//! │  source + manifest + sprite exist, manifest   │
//! │  parses, </head> present, sprite has every    │
//! │  manifest symbol                              │
//! └───────────────────────────────────────────────┘
//!
//! ┌───────────────────────────────────────────────┐
//! │          Transform Phase                      │
//! │  IconTransform -> HeadInjector -> output file │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Any check failure aborts before the output is touched.

pub mod transform;


use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::IconConfig;
use crate::emit::Manifest;
use crate::icon::MarkerSyntax;
use crate::utils::html::find_ignore_ascii_case;
use crate::utils::{hash, path::write_file, plural_count};
use crate::{debug, log};

pub use transform::{HeadInjector, IconTransform, Transform};

// =============================================================================
// Types
// =============================================================================

/// Prerequisite failures, all detected before anything is written.
#[derive(Debug, Error)]
pub enum InjectError {
    #[error("source HTML not found: '{}'", .0.display())]
    SourceMissing(PathBuf),

    #[error("manifest not found: '{}', run `build` first", .0.display())]
    ManifestMissing(PathBuf),

    #[error("sprite not found: '{}', run `build` first", .0.display())]
    SpriteMissing(PathBuf),

    #[error("manifest '{}' is not valid", path.display())]
    ManifestInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("sprite '{}' has no symbol `{id}` listed in the manifest, run `build` again", path.display())]
    SpriteStale { path: PathBuf, id: String },

    #[error("no </head> in '{}', cannot inject the sprite loader", .0.display())]
    NoHeadClose(PathBuf),
}

/// Everything `inject` reads and writes.
#[derive(Debug, Clone)]
pub struct InjectInputs {
    pub source: PathBuf,
    pub manifest: PathBuf,
    pub sprite: PathBuf,
    pub output: PathBuf,
    pub sprite_url: String,
    pub icon_class: String,
    pub placeholder_tags: Vec<String>,
    pub syntax: MarkerSyntax,
}

impl InjectInputs {
    pub fn from_config(config: &IconConfig) -> Self {
        Self {
            source: config.source.html.clone(),
            manifest: config.build.manifest.clone(),
            sprite: config.build.sprite_path(),
            output: config.inject.output.clone(),
            sprite_url: config.inject.sprite_url.clone(),
            icon_class: config.inject.icon_class.clone(),
            placeholder_tags: config.inject.placeholder_tags.clone(),
            syntax: MarkerSyntax::new(&config.markers),
        }
    }
}

/// Result of a successful rewrite.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectReport {
    /// Placeholder elements replaced.
    pub replaced: usize,
    /// Markers left in place because the manifest lacks them.
    pub unresolved: BTreeSet<String>,
    /// Whether the loader script was added (false when already present).
    pub loader_injected: bool,
    pub output: PathBuf,
}

/// Chains transforms over one document.
struct Pipeline {
    html: String,
}

impl Pipeline {
    fn new(html: String) -> Self {
        Self { html }
    }

    fn pipe(mut self, transform: &mut impl Transform) -> Self {
        self.html = transform.transform(self.html);
        self
    }

    fn finish(self) -> String {
        self.html
    }
}

// =============================================================================
// Inject
// =============================================================================

/// Rewrite the source HTML against the emitted manifest and sprite.
pub fn inject(inputs: &InjectInputs) -> Result<InjectReport> {
    let (html, manifest, sprite_url) = check(inputs)?;

    let mut icons = IconTransform::new(
        &inputs.syntax,
        &manifest,
        &inputs.icon_class,
        &inputs.placeholder_tags,
    )?;
    let mut head = HeadInjector::new(&sprite_url);

    let html = Pipeline::new(html).pipe(&mut icons).pipe(&mut head).finish();
    write_file(&inputs.output, html)?;

    let stats = icons.into_stats();
    for marker in &stats.unresolved {
        log!("warning"; "`{}` is not in the manifest, left unchanged", marker);
    }
    if !head.injected() {
        debug!("inject"; "sprite loader already present");
    }
    log!(
        "inject";
        "replaced {} in '{}'",
        plural_count(stats.replaced, "placeholder"),
        inputs.output.display()
    );

    Ok(InjectReport {
        replaced: stats.replaced,
        unresolved: stats.unresolved,
        loader_injected: head.injected(),
        output: inputs.output.clone(),
    })
}

/// Validate prerequisites and load inputs. Writes nothing.
fn check(inputs: &InjectInputs) -> Result<(String, Manifest, String)> {
    if !inputs.source.is_file() {
        return Err(InjectError::SourceMissing(inputs.source.clone()).into());
    }
    if !inputs.manifest.is_file() {
        return Err(InjectError::ManifestMissing(inputs.manifest.clone()).into());
    }
    if !inputs.sprite.is_file() {
        return Err(InjectError::SpriteMissing(inputs.sprite.clone()).into());
    }

    let html = read(&inputs.source)?;
    let manifest =
        Manifest::parse(&read(&inputs.manifest)?).map_err(|source| InjectError::ManifestInvalid {
            path: inputs.manifest.clone(),
            source,
        })?;
    if find_ignore_ascii_case(&html, "</head>").is_none() {
        return Err(InjectError::NoHeadClose(inputs.source.clone()).into());
    }

    let sprite = read(&inputs.sprite)?;
    if let Some(id) = manifest
        .ids()
        .find(|id| !sprite.contains(&format!(r#"<symbol id="{id}""#)))
    {
        return Err(InjectError::SpriteStale {
            path: inputs.sprite.clone(),
            id: id.to_string(),
        }
        .into());
    }
    let sprite_url = versioned_url(&inputs.sprite_url, &hash::fingerprint(&sprite));
    debug!("inject"; "{} manifest entries, loader url {}", manifest.len(), sprite_url);

    Ok((html, manifest, sprite_url))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Append a `v=<version>` cache-busting query parameter.
fn versioned_url(base_url: &str, version: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}v={version}")
}
