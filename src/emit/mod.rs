//! Sprite, individual file and manifest output.
//!
//! - [`sprite`]: sprite sheet and standalone SVG rendering
//! - [`manifest`]: `icons.json` written in every mode
//!
//! Outputs are written in this order: sprite, individual files, manifest.
//! The manifest goes last so it never lists icons from a failed run.

pub mod manifest;
pub mod sprite;

pub use manifest::Manifest;
pub use sprite::{render_sprite, render_standalone};

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::BuildConfig;
use crate::icon::{BuildWarning, NormalizedIcon, Warnings};
use crate::logger::ProgressLine;
use crate::utils::{path::write_file, plural_count};
use crate::{debug, log};

/// Fatal emission errors.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("no icon output written although {expected} expected")]
    NothingWritten { expected: String },
}

/// What the emitter wrote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmitReport {
    /// Emitted ids, ordered.
    pub ids: Vec<String>,
    /// Sprite path, when a sprite was written.
    pub sprite: Option<PathBuf>,
    /// Symbols in the written sprite.
    pub symbols: usize,
    /// Individual files written.
    pub files: usize,
    pub manifest: PathBuf,
}

impl EmitReport {
    /// Icons that made it to disk in at least one form.
    pub fn emitted(&self) -> usize {
        self.symbols.max(self.files)
    }
}

/// Write the configured outputs for `icons`.
///
/// Per-file failures become warnings. The call fails only when icons were
/// expected and none reached disk, or when the manifest cannot be written.
pub fn emit(
    mut icons: Vec<NormalizedIcon>,
    config: &BuildConfig,
    warnings: &mut Warnings,
) -> Result<EmitReport> {
    icons.sort_by(|a, b| a.id.cmp(&b.id));
    icons.dedup_by(|a, b| a.id == b.id);

    let mut report = EmitReport {
        ids: icons.iter().map(|icon| icon.id.clone()).collect(),
        manifest: config.manifest.clone(),
        ..EmitReport::default()
    };

    if config.mode.writes_sprite() {
        let path = config.sprite_path();
        match write_file(&path, render_sprite(&icons)) {
            Ok(()) => {
                debug!("build"; "sprite written to '{}'", path.display());
                report.symbols = icons.len();
                report.sprite = Some(path);
            }
            Err(e) => {
                warnings.record(BuildWarning::WriteFailed {
                    path: path.clone(),
                    reason: format!("{e:#}"),
                });
                remove_stale_sprite(&path, warnings);
            }
        }
    } else {
        remove_stale_sprite(&config.sprite_path(), warnings);
    }

    if config.mode.writes_individual() {
        report.files = write_individual(&icons, config, warnings);
    }

    if !icons.is_empty() && report.emitted() == 0 {
        return Err(EmitError::NothingWritten {
            expected: plural_count(icons.len(), "icon"),
        }
        .into());
    }

    let json = Manifest::from_icons(&icons)
        .to_json()
        .context("Failed to serialize manifest")?;
    write_file(&config.manifest, json)?;

    log!(
        "build";
        "{} written ({} mode), manifest at '{}'",
        plural_count(report.emitted(), "icon"),
        config.mode.as_str(),
        config.manifest.display()
    );

    Ok(report)
}

/// Drop a sprite left by an earlier run so it is never paired with this
/// run's manifest.
fn remove_stale_sprite(path: &Path, warnings: &mut Warnings) {
    match fs::remove_file(path) {
        Ok(()) => debug!("build"; "removed stale sprite '{}'", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warnings.record(BuildWarning::WriteFailed {
            path: path.to_path_buf(),
            reason: format!("cannot remove stale sprite: {e}"),
        }),
    }
}

/// Write one standalone file per icon, returning how many succeeded.
fn write_individual(
    icons: &[NormalizedIcon],
    config: &BuildConfig,
    warnings: &mut Warnings,
) -> usize {
    let progress = ProgressLine::new(&[("icons", icons.len())]);
    let mut written = 0;

    for icon in icons {
        let path = config.output_dir.join(format!("{}.svg", icon.id));
        match write_file(&path, render_standalone(icon)) {
            Ok(()) => {
                written += 1;
                progress.inc("icons");
            }
            Err(e) => warnings.record(BuildWarning::WriteFailed {
                path,
                reason: format!("{e:#}"),
            }),
        }
    }

    progress.finish();
    written
}
