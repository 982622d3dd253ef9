//! Icon build orchestration.
//!
//! Build phases:
//! - **Scan** - Collect marker classes from the source HTML
//! - **Resolve** - Load collections and normalize each referenced icon
//! - **Optimize** - Clean and recolor icon bodies (when enabled)
//! - **Emit** - Write the sprite and/or individual files, then the manifest

use anyhow::{Context, Result};
use std::fs;

use crate::{
    config::IconConfig,
    debug,
    emit::emit,
    icon::{
        BuildWarning, CollectionResolver, MarkerSyntax, NormalizedIcon, Normalizer, Resolution,
        ScanResult, Warnings, scan_html,
    },
    image::svg::{OptimizeOptions, optimize_body},
    log,
    utils::plural_count,
};

/// Outcome of a successful build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Emitted ids, ordered.
    pub ids: Vec<String>,
    /// Icons written to disk.
    pub written: usize,
    /// Everything the build recovered from, in order.
    pub warnings: Vec<BuildWarning>,
}

/// Run the full build.
///
/// Pipeline: scan -> resolve -> optimize -> emit
pub fn build_icons(config: &IconConfig) -> Result<BuildReport> {
    let source = &config.source.html;
    let html = fs::read_to_string(source)
        .with_context(|| format!("Failed to read source HTML {}", source.display()))?;

    let syntax = MarkerSyntax::new(&config.markers);
    let mut warnings = Warnings::new();

    // Scan
    let scan = scan_html(&html, &syntax);
    for token in &scan.malformed {
        warnings.record(BuildWarning::MalformedMarker {
            token: token.clone(),
        });
    }
    log!(
        "build";
        "found {} in {}",
        plural_count(scan.len(), "icon"),
        config.root_relative(source).display()
    );

    // Resolve
    let mut icons = resolve_icons(&scan, syntax, config, &mut warnings);

    // Optimize
    if config.optimize.enable {
        optimize_icons(&mut icons, &config.optimize.options(), &mut warnings);
    }

    // Emit
    let report = emit(icons, &config.build, &mut warnings)?;

    if !warnings.is_empty() {
        log!("build"; "finished with {}", plural_count(warnings.len(), "warning"));
    }

    Ok(BuildReport {
        written: report.emitted(),
        ids: report.ids,
        warnings: warnings.into_vec(),
    })
}

/// Normalize every scanned ref. Refs of skipped collections are left out.
fn resolve_icons(
    scan: &ScanResult,
    syntax: MarkerSyntax,
    config: &IconConfig,
    warnings: &mut Warnings,
) -> Vec<NormalizedIcon> {
    let mut resolver = CollectionResolver::new(&config.collections);
    let mut normalizer = Normalizer::new(syntax, &config.collections);

    let mut icons = Vec::with_capacity(scan.len());
    let mut skipped = 0;
    for icon in scan.iter() {
        match normalizer.resolve(&icon, &mut resolver, warnings) {
            Resolution::Resolved(icon) => {
                debug!("resolve"; "{} ({})", icon.id, icon.view_box);
                icons.push(icon);
            }
            Resolution::Defaulted(icon) => icons.push(icon),
            Resolution::Missing => skipped += 1,
        }
    }

    if skipped > 0 {
        log!(
            "build";
            "{} skipped from {}",
            plural_count(skipped, "icon"),
            plural_count(resolver.attempted(), "collection")
        );
    }
    icons
}

/// Optimize bodies in place, keeping the original markup on failure.
fn optimize_icons(icons: &mut [NormalizedIcon], options: &OptimizeOptions, warnings: &mut Warnings) {
    for icon in icons {
        match optimize_body(&icon.body, options) {
            Ok(body) => icon.body = body,
            Err(e) => warnings.record(BuildWarning::OptimizerFallback {
                id: icon.id.clone(),
                reason: format!("{e:#}"),
            }),
        }
    }
}
