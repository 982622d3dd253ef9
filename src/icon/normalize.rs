//! Icon normalization.
//!
//! Turns a reference into a body plus bounding box, whatever its source:
//!
//! - Iconify aliases are followed and their flips/rotation composed.
//! - Transformations become a `<g transform>` wrapper around the body.
//! - The box comes from explicit dimensions, then from the drawn geometry,
//!   then from a fixed 24×24 fallback.
//! - Unknown names are replaced by the default icon.

use std::fs;
use std::path::{Path, PathBuf};

use super::collection::{IconCollection, IconProps, IconSet, LocalIcons};
use super::{
    BoundingBox, BuildWarning, COMPUTED_PADDING, CollectionResolver, IconRef, MarkerSyntax,
    NormalizedIcon, Warnings,
};
use crate::config::{CollectionsConfig, MissingPolicy};
use crate::image::svg::{body_bounds, trim_float, unwrap_svg};

/// Longest alias chain followed before giving up.
const MAX_ALIAS_DEPTH: usize = 8;

/// Decimals kept in generated transform values.
const TRANSFORM_PRECISION: usize = 3;

/// Built-in default icon: a rounded square with a question mark.
const PLACEHOLDER_BODY: &str = concat!(
    r#"<rect x="3" y="3" width="18" height="18" rx="3" fill="none" stroke="currentColor" stroke-width="2"/>"#,
    r#"<path d="M9.5 9.5a2.5 2.5 0 1 1 3.5 2.3c-.6.3-1 .8-1 1.5v.7" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round"/>"#,
    r#"<circle cx="12" cy="17" r="1.2" fill="currentColor"/>"#,
);

/// Outcome of resolving one reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Found in its collection.
    Resolved(NormalizedIcon),
    /// Replaced by the default icon.
    Defaulted(NormalizedIcon),
    /// Left out (unavailable collection under the `skip` policy).
    Missing,
}

/// Resolves references into normalized icons.
pub struct Normalizer {
    syntax: MarkerSyntax,
    policy: MissingPolicy,
    default_path: Option<PathBuf>,
    /// Default icon, loaded on first use.
    default_icon: Option<(BoundingBox, String)>,
}

impl Normalizer {
    pub fn new(syntax: MarkerSyntax, config: &CollectionsConfig) -> Self {
        Self {
            syntax,
            policy: config.missing_collection,
            default_path: config.default_icon.clone(),
            default_icon: None,
        }
    }

    /// Resolve `icon` against its collection.
    pub fn resolve(
        &mut self,
        icon: &IconRef,
        resolver: &mut CollectionResolver,
        warnings: &mut Warnings,
    ) -> Resolution {
        let id = self.syntax.id(icon);

        let Some(collection) = resolver.collection(&icon.namespace, warnings) else {
            return match self.policy {
                MissingPolicy::Skip => Resolution::Missing,
                MissingPolicy::Default => {
                    let reason = format!("collection `{}` unavailable", icon.namespace);
                    Resolution::Defaulted(self.substitute(id, reason, warnings))
                }
            };
        };

        let found = match collection {
            IconCollection::Iconify(set) => iconify_icon(set, &icon.name),
            IconCollection::Local(local) => local_icon(local, &icon.name),
        };

        match found {
            Ok((view_box, body)) => Resolution::Resolved(NormalizedIcon {
                id,
                view_box,
                body,
                is_default: false,
            }),
            Err(reason) => Resolution::Defaulted(self.substitute(id, reason, warnings)),
        }
    }

    /// Record a missing icon and return the default icon under its id.
    fn substitute(&mut self, id: String, reason: String, warnings: &mut Warnings) -> NormalizedIcon {
        warnings.record(BuildWarning::MissingIcon {
            id: id.clone(),
            reason,
        });
        let (view_box, body) = self.default_icon(warnings).clone();
        NormalizedIcon {
            id,
            view_box,
            body,
            is_default: true,
        }
    }

    fn default_icon(&mut self, warnings: &mut Warnings) -> &(BoundingBox, String) {
        let path = self.default_path.as_deref();
        self.default_icon.get_or_insert_with(|| {
            path.and_then(|path| match load_default(path) {
                Ok(icon) => Some(icon),
                Err(reason) => {
                    warnings.record(BuildWarning::DefaultIcon {
                        path: path.to_path_buf(),
                        reason,
                    });
                    None
                }
            })
            .unwrap_or_else(|| (BoundingBox::FALLBACK, PLACEHOLDER_BODY.to_string()))
        })
    }
}

fn load_default(path: &Path) -> Result<(BoundingBox, String), String> {
    let source = fs::read_to_string(path).map_err(|e| e.to_string())?;
    svg_icon(&source)
}

// ============================================================================
// Iconify
// ============================================================================

/// Resolve `name` (icon or alias) to a box and a transformed body.
fn iconify_icon(set: &IconSet, name: &str) -> Result<(BoundingBox, String), String> {
    let (body, props) = follow_aliases(set, name)?;

    let width = props.width.or(set.width);
    let height = props.height.or(set.height);
    let view_box = match (width, height) {
        (Some(width), Some(height)) => Some((width, height)),
        (Some(side), None) | (None, Some(side)) => Some((side, side)),
        (None, None) => None,
    }
    .map(|(width, height)| {
        BoundingBox::new(
            props.left.or(set.left).unwrap_or(0.0),
            props.top.or(set.top).unwrap_or(0.0),
            width,
            height,
        )
    })
    .unwrap_or_else(|| computed_box(body));

    Ok(apply_transforms(view_box, body, &props))
}

/// Follow the alias chain of `name` and merge properties along it.
///
/// Dimensions set closer to `name` win; flips are XORed and rotations summed.
fn follow_aliases<'a>(set: &'a IconSet, name: &str) -> Result<(&'a str, IconProps), String> {
    let mut chain: Vec<(&str, &IconProps)> = Vec::new();
    let mut current = name;

    let icon = loop {
        if let Some(icon) = set.icons.get(current) {
            break icon;
        }
        let Some(alias) = set.aliases.get(current) else {
            return Err(if chain.is_empty() {
                format!("no icon `{name}` in set")
            } else {
                format!("alias parent `{current}` of `{name}` not in set")
            });
        };
        if chain.iter().any(|(seen, _)| *seen == current) {
            return Err(format!("alias cycle through `{current}`"));
        }
        if chain.len() == MAX_ALIAS_DEPTH {
            return Err(format!("alias chain of `{name}` deeper than {MAX_ALIAS_DEPTH}"));
        }
        chain.push((current, &alias.props));
        current = &alias.parent;
    };

    let mut props = icon.props.clone();
    for (_, alias) in chain.iter().rev() {
        props.left = alias.left.or(props.left);
        props.top = alias.top.or(props.top);
        props.width = alias.width.or(props.width);
        props.height = alias.height.or(props.height);
        props.h_flip ^= alias.h_flip;
        props.v_flip ^= alias.v_flip;
        props.rotate = (props.rotate % 4 + alias.rotate % 4) % 4;
    }

    Ok((&icon.body, props))
}

/// Wrap `body` in a `<g transform>` for flips and quarter turns.
///
/// Odd quarter turns swap the box's axes.
fn apply_transforms(
    mut view_box: BoundingBox,
    body: &str,
    props: &IconProps,
) -> (BoundingBox, String) {
    let n = |value: f64| trim_float(value, TRANSFORM_PRECISION);
    let mut rotate = props.rotate % 4;
    let mut transforms: Vec<String> = Vec::new();

    match (props.h_flip, props.v_flip) {
        // Both flips are a half turn.
        (true, true) => rotate = (rotate + 2) % 4,
        (true, false) => {
            transforms.push(format!(
                "translate({} {}) scale(-1 1)",
                n(view_box.width + view_box.left),
                n(-view_box.top)
            ));
            view_box.left = 0.0;
            view_box.top = 0.0;
        }
        (false, true) => {
            transforms.push(format!(
                "translate({} {}) scale(1 -1)",
                n(-view_box.left),
                n(view_box.height + view_box.top)
            ));
            view_box.left = 0.0;
            view_box.top = 0.0;
        }
        (false, false) => {}
    }

    let rotation = match rotate {
        1 => {
            let center = n(view_box.height / 2.0 + view_box.top);
            Some(format!("rotate(90 {center} {center})"))
        }
        2 => Some(format!(
            "rotate(180 {} {})",
            n(view_box.width / 2.0 + view_box.left),
            n(view_box.height / 2.0 + view_box.top)
        )),
        3 => {
            let center = n(view_box.width / 2.0 + view_box.left);
            Some(format!("rotate(-90 {center} {center})"))
        }
        _ => None,
    };
    if let Some(rotation) = rotation {
        transforms.insert(0, rotation);
    }

    if rotate % 2 == 1 {
        std::mem::swap(&mut view_box.left, &mut view_box.top);
        std::mem::swap(&mut view_box.width, &mut view_box.height);
    }

    let body = if transforms.is_empty() {
        body.to_string()
    } else {
        format!(r#"<g transform="{}">{body}</g>"#, transforms.join(" "))
    };
    (view_box, body)
}

// ============================================================================
// Local files
// ============================================================================

fn local_icon(local: &LocalIcons, name: &str) -> Result<(BoundingBox, String), String> {
    let source = local
        .icons
        .get(name)
        .ok_or_else(|| format!("no file `{name}.svg` in local icons"))?;
    svg_icon(source)
}

/// Unwrap a standalone SVG and pick its box: `viewBox`, then `width`/`height`,
/// then the drawn geometry.
fn svg_icon(source: &str) -> Result<(BoundingBox, String), String> {
    let doc = unwrap_svg(source).map_err(|e| format!("{e:#}"))?;
    if doc.body.is_empty() {
        return Err("SVG has no content".to_string());
    }

    let view_box = doc
        .view_box
        .as_deref()
        .and_then(BoundingBox::parse)
        .or(match (doc.width, doc.height) {
            (Some(width), Some(height)) => Some(BoundingBox::new(0.0, 0.0, width, height)),
            _ => None,
        })
        .unwrap_or_else(|| computed_box(&doc.body));

    Ok((view_box, doc.body))
}

/// Box from the drawn geometry, padded, or the fixed fallback.
fn computed_box(body: &str) -> BoundingBox {
    body_bounds(body)
        .map(|rect| BoundingBox::from(rect).padded(COMPUTED_PADDING))
        .unwrap_or(BoundingBox::FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkersConfig;
    use tempfile::TempDir;

    const DEMO_SET: &str = r#"{
        "prefix": "demo",
        "icons": {
            "square": { "body": "<path d=\"M0 0h16v16H0z\"/>" },
            "wide": { "body": "<path d=\"M0 0h20v10H0z\"/>", "width": 20, "height": 10 },
            "shifted": { "body": "<path d=\"M2 2h4v4H2z\"/>", "left": 2, "top": 2, "width": 4, "height": 4 },
            "rotated": { "body": "<path d=\"M0 0h16\"/>", "rotate": 1 },
            "spun": { "body": "<path d=\"M0 0h16\"/>", "rotate": 4294967295 }
        },
        "aliases": {
            "square-flip": { "parent": "square", "hFlip": true },
            "square-both": { "parent": "square", "hFlip": true, "vFlip": true },
            "square-back": { "parent": "square-flip", "hFlip": true },
            "square-turn": { "parent": "rotated", "rotate": 3 },
            "spun-back": { "parent": "spun", "rotate": 4294967295 },
            "loop-a": { "parent": "loop-b" },
            "loop-b": { "parent": "loop-a" },
            "orphan": { "parent": "gone" },
            "wide-big": { "parent": "wide", "width": 40, "height": 20 }
        },
        "width": 16,
        "height": 16
    }"#;

    struct Fixture {
        _dir: TempDir,
        resolver: CollectionResolver,
        config: CollectionsConfig,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let iconify = dir.path().join("iconify");
        let local = dir.path().join("icons");
        fs::create_dir_all(iconify.join("demo")).unwrap();
        fs::create_dir_all(&local).unwrap();
        fs::write(iconify.join("demo/icons.json"), DEMO_SET).unwrap();
        fs::write(
            iconify.join("open.json"),
            r#"{"icons":{"dot":{"body":"<rect x=\"2\" y=\"3\" width=\"10\" height=\"5\"/>"}}}"#,
        )
        .unwrap();
        fs::write(
            local.join("logo.svg"),
            r#"<?xml version="1.0"?><svg viewBox="0 0 32 16"><path d="M0 0h32v16z"/></svg>"#,
        )
        .unwrap();
        fs::write(
            local.join("sized.svg"),
            r#"<svg width="20" height="10"><path d="M0 0h20v10z"/></svg>"#,
        )
        .unwrap();
        fs::write(local.join("empty.svg"), r#"<svg viewBox="0 0 4 4"></svg>"#).unwrap();
        fs::write(local.join("broken.svg"), [0xff, 0xfe, 0x3c]).unwrap();

        let config = CollectionsConfig {
            iconify,
            local,
            ..Default::default()
        };
        Fixture {
            resolver: CollectionResolver::new(&config),
            config,
            _dir: dir,
        }
    }

    fn resolve_with(fx: &mut Fixture, icon: IconRef) -> (Resolution, Warnings) {
        let mut normalizer =
            Normalizer::new(MarkerSyntax::new(&MarkersConfig::default()), &fx.config);
        let mut warnings = Warnings::new();
        let resolution = normalizer.resolve(&icon, &mut fx.resolver, &mut warnings);
        (resolution, warnings)
    }

    fn resolved(fx: &mut Fixture, icon: IconRef) -> NormalizedIcon {
        match resolve_with(fx, icon) {
            (Resolution::Resolved(icon), warnings) => {
                assert!(warnings.is_empty());
                icon
            }
            (other, _) => panic!("expected Resolved, got {other:?}"),
        }
    }

    #[test]
    fn test_set_level_dimensions() {
        let mut fx = fixture();
        let icon = resolved(&mut fx, IconRef::collection("demo", "square"));
        assert_eq!(icon.id, "i-demo-square");
        assert_eq!(icon.view_box.to_string(), "0 0 16 16");
        assert_eq!(icon.body, r#"<path d="M0 0h16v16H0z"/>"#);
        assert!(!icon.is_default);
    }

    #[test]
    fn test_icon_level_dimensions() {
        let mut fx = fixture();
        let icon = resolved(&mut fx, IconRef::collection("demo", "shifted"));
        assert_eq!(icon.view_box.to_string(), "2 2 4 4");
    }

    #[test]
    fn test_alias_flip() {
        let mut fx = fixture();
        let icon = resolved(&mut fx, IconRef::collection("demo", "square-flip"));
        assert_eq!(icon.view_box.to_string(), "0 0 16 16");
        assert_eq!(
            icon.body,
            r#"<g transform="translate(16 0) scale(-1 1)"><path d="M0 0h16v16H0z"/></g>"#
        );
    }

    #[test]
    fn test_double_flip_is_half_turn() {
        let mut fx = fixture();
        let icon = resolved(&mut fx, IconRef::collection("demo", "square-both"));
        assert!(icon.body.starts_with(r#"<g transform="rotate(180 8 8)">"#));
    }

    #[test]
    fn test_alias_chain_flips_cancel() {
        let mut fx = fixture();
        let icon = resolved(&mut fx, IconRef::collection("demo", "square-back"));
        assert_eq!(icon.body, r#"<path d="M0 0h16v16H0z"/>"#);
    }

    #[test]
    fn test_rotations_sum_modulo_four() {
        let mut fx = fixture();
        // 1 + 3 quarter turns
        let icon = resolved(&mut fx, IconRef::collection("demo", "square-turn"));
        assert_eq!(icon.body, r#"<path d="M0 0h16"/>"#);

        let icon = resolved(&mut fx, IconRef::collection("demo", "rotated"));
        assert_eq!(icon.body, r#"<g transform="rotate(90 8 8)"><path d="M0 0h16"/></g>"#);
    }

    #[test]
    fn test_huge_rotations_wrap() {
        let mut fx = fixture();
        // u32::MAX is three quarter turns
        let icon = resolved(&mut fx, IconRef::collection("demo", "spun"));
        assert_eq!(icon.body, r#"<g transform="rotate(-90 8 8)"><path d="M0 0h16"/></g>"#);

        let icon = resolved(&mut fx, IconRef::collection("demo", "spun-back"));
        assert_eq!(icon.body, r#"<g transform="rotate(180 8 8)"><path d="M0 0h16"/></g>"#);
    }

    #[test]
    fn test_quarter_turn_swaps_axes() {
        let set = IconSet::parse(
            r#"{"icons":{"wide":{"body":"<path/>","width":20,"height":10,"rotate":1}}}"#,
        )
        .unwrap();
        let (view_box, body) = iconify_icon(&set, "wide").unwrap();
        assert_eq!(view_box.to_string(), "0 0 10 20");
        assert_eq!(body, r#"<g transform="rotate(90 5 5)"><path/></g>"#);
    }

    #[test]
    fn test_alias_overrides_dimensions() {
        let mut fx = fixture();
        let icon = resolved(&mut fx, IconRef::collection("demo", "wide-big"));
        assert_eq!(icon.view_box.to_string(), "0 0 40 20");
    }

    #[test]
    fn test_computed_bounds() {
        let mut fx = fixture();
        let icon = resolved(&mut fx, IconRef::collection("open", "dot"));
        assert_eq!(icon.view_box.to_string(), "1 2 12 7");
    }

    #[test]
    fn test_unknown_name_defaulted() {
        let mut fx = fixture();
        let (resolution, warnings) = resolve_with(&mut fx, IconRef::collection("demo", "nope"));
        let Resolution::Defaulted(icon) = resolution else {
            panic!("expected Defaulted");
        };
        assert_eq!(icon.id, "i-demo-nope");
        assert!(icon.is_default);
        assert_eq!(icon.view_box, BoundingBox::FALLBACK);
        assert_eq!(icon.body, PLACEHOLDER_BODY);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_alias_errors_defaulted() {
        let mut fx = fixture();
        for name in ["loop-a", "orphan"] {
            let (resolution, warnings) = resolve_with(&mut fx, IconRef::collection("demo", name));
            assert!(matches!(resolution, Resolution::Defaulted(_)), "{name}");
            assert_eq!(warnings.len(), 1);
        }
    }

    #[test]
    fn test_alias_depth_limit() {
        let mut aliases = Vec::new();
        for i in 0..9 {
            aliases.push(format!(r#""a{i}":{{"parent":"a{}"}}"#, i + 1));
        }
        let json = format!(
            r#"{{"icons":{{"a9":{{"body":"<path/>"}}}},"aliases":{{{}}}}}"#,
            aliases.join(",")
        );
        let set = IconSet::parse(&json).unwrap();

        // a1 -> ... -> a9 is 8 hops, a0 is 9
        assert!(follow_aliases(&set, "a1").is_ok());
        assert!(follow_aliases(&set, "a0").unwrap_err().contains("deeper"));
    }

    #[test]
    fn test_missing_collection_policies() {
        let mut fx = fixture();
        let (resolution, warnings) = resolve_with(&mut fx, IconRef::collection("foo", "bar"));
        assert_eq!(resolution, Resolution::Missing);
        assert_eq!(warnings.len(), 1);

        let mut fx = fixture();
        fx.config.missing_collection = MissingPolicy::Default;
        let (resolution, warnings) = resolve_with(&mut fx, IconRef::collection("foo", "bar"));
        let Resolution::Defaulted(icon) = resolution else {
            panic!("expected Defaulted");
        };
        assert_eq!(icon.id, "i-foo-bar");
        // collection warning plus the substitution
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_local_view_box() {
        let mut fx = fixture();
        let icon = resolved(&mut fx, IconRef::local("logo"));
        assert_eq!(icon.id, "l-logo");
        assert_eq!(icon.view_box.to_string(), "0 0 32 16");
        assert_eq!(icon.body, r#"<path d="M0 0h32v16z"/>"#);
    }

    #[test]
    fn test_local_width_height() {
        let mut fx = fixture();
        let icon = resolved(&mut fx, IconRef::local("sized"));
        assert_eq!(icon.view_box.to_string(), "0 0 20 10");
    }

    #[test]
    fn test_local_empty_defaulted() {
        let mut fx = fixture();
        let (resolution, _) = resolve_with(&mut fx, IconRef::local("empty"));
        assert!(matches!(resolution, Resolution::Defaulted(_)));
    }

    #[test]
    fn test_local_unreadable_defaulted() {
        let mut fx = fixture();
        let (resolution, _) = resolve_with(&mut fx, IconRef::local("broken"));
        assert!(matches!(resolution, Resolution::Defaulted(_)));

        let icon = resolved(&mut fx, IconRef::local("logo"));
        assert_eq!(icon.id, "l-logo");
    }

    #[test]
    fn test_configured_default_icon() {
        let mut fx = fixture();
        let path = fx.config.local.join("logo.svg");
        fx.config.default_icon = Some(path);
        let (resolution, _) = resolve_with(&mut fx, IconRef::local("absent"));
        let Resolution::Defaulted(icon) = resolution else {
            panic!("expected Defaulted");
        };
        assert!(icon.is_default);
        assert_eq!(icon.view_box.to_string(), "0 0 32 16");
    }

    #[test]
    fn test_unreadable_default_icon_falls_back() {
        let mut fx = fixture();
        fx.config.default_icon = Some(PathBuf::from("/nonexistent/default.svg"));
        let (resolution, warnings) = resolve_with(&mut fx, IconRef::local("absent"));
        let Resolution::Defaulted(icon) = resolution else {
            panic!("expected Defaulted");
        };
        assert_eq!(icon.body, PLACEHOLDER_BODY);
        assert_eq!(warnings.len(), 2);
    }
}
