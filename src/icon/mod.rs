//! Icon references, collections and normalization.
//!
//! # Modules
//!
//! - [`scan`]: marker extraction from HTML class attributes
//! - [`collection`]: Iconify JSON sets and the local SVG directory
//! - [`resolve`]: per-run collection cache
//! - [`normalize`]: alias/transform handling, bounding boxes, default icon
//! - [`warning`]: non-fatal build diagnostics
//!
//! # Flow
//!
//! ```text
//! HTML ──► scan ──► IconRef ──► resolve ──► IconCollection
//!                      │                          │
//!                      └────────► normalize ◄─────┘
//!                                    │
//!                                    ▼
//!                               Resolution
//! ```

pub mod collection;
mod normalize;
mod resolve;
mod scan;
mod warning;

pub use normalize::{Normalizer, Resolution};
pub use resolve::CollectionResolver;
pub use scan::{MarkerSyntax, ScanResult, Token, scan_html};
pub use warning::{BuildWarning, Warnings};

use std::fmt;

use crate::image::svg::trim_float;

/// Padding added on each side of a computed bounding box.
pub const COMPUTED_PADDING: f64 = 1.0;

/// Decimals kept when writing a viewBox.
const VIEW_BOX_PRECISION: usize = 3;

// ============================================================================
// IconRef
// ============================================================================

/// Where an icon comes from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Namespace {
    /// An Iconify set, by prefix (`mdi`, `tabler`, ...).
    Collection(String),
    /// The local SVG directory.
    Local,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection(prefix) => f.write_str(prefix),
            Self::Local => f.write_str("local"),
        }
    }
}

/// One icon named by a marker class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconRef {
    pub namespace: Namespace,
    pub name: String,
}

impl IconRef {
    pub fn collection(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::Collection(prefix.into()),
            name: name.into(),
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::Local,
            name: name.into(),
        }
    }
}

// ============================================================================
// BoundingBox
// ============================================================================

/// Icon extents in user units, written as an SVG `viewBox`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Box used when no dimensions are known.
    pub const FALLBACK: Self = Self::new(0.0, 0.0, 24.0, 24.0);

    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Grow the box by `pad` on each side.
    pub fn padded(self, pad: f64) -> Self {
        Self::new(
            self.left - pad,
            self.top - pad,
            self.width + pad * 2.0,
            self.height + pad * 2.0,
        )
    }

    /// Parse `min-x min-y width height` (whitespace or comma separated).
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(str::parse::<f64>);
        let mut next = || parts.next()?.ok();
        let bbox = Self::new(next()?, next()?, next()?, next()?);
        (parts.next().is_none() && bbox.width > 0.0 && bbox.height > 0.0).then_some(bbox)
    }
}

impl From<usvg::Rect> for BoundingBox {
    fn from(rect: usvg::Rect) -> Self {
        Self::new(
            f64::from(rect.x()),
            f64::from(rect.y()),
            f64::from(rect.width()),
            f64::from(rect.height()),
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            trim_float(self.left, VIEW_BOX_PRECISION),
            trim_float(self.top, VIEW_BOX_PRECISION),
            trim_float(self.width, VIEW_BOX_PRECISION),
            trim_float(self.height, VIEW_BOX_PRECISION),
        )
    }
}

// ============================================================================
// NormalizedIcon
// ============================================================================

/// An icon ready for optimization and emission.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIcon {
    pub id: String,
    pub view_box: BoundingBox,
    pub body: String,
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_ordering() {
        let mut refs = [
            IconRef::local("a"),
            IconRef::collection("mdi", "b"),
            IconRef::collection("fa", "z"),
        ];
        refs.sort();
        assert_eq!(refs[0], IconRef::collection("fa", "z"));
        assert_eq!(refs[2], IconRef::local("a"));
    }

    #[test]
    fn test_bbox_display() {
        assert_eq!(BoundingBox::FALLBACK.to_string(), "0 0 24 24");
        assert_eq!(
            BoundingBox::new(1.5, -0.25, 10.0, 3.1234).to_string(),
            "1.5 -0.25 10 3.123"
        );
    }

    #[test]
    fn test_bbox_padded() {
        let padded = BoundingBox::new(2.0, 3.0, 10.0, 5.0).padded(COMPUTED_PADDING);
        assert_eq!(padded, BoundingBox::new(1.0, 2.0, 12.0, 7.0));
    }

    #[test]
    fn test_bbox_parse() {
        assert_eq!(
            BoundingBox::parse("0 0 24 24"),
            Some(BoundingBox::FALLBACK)
        );
        assert_eq!(
            BoundingBox::parse("-1,-1,26,26"),
            Some(BoundingBox::new(-1.0, -1.0, 26.0, 26.0))
        );
        assert_eq!(BoundingBox::parse("0 0 24"), None);
        assert_eq!(BoundingBox::parse("0 0 0 24"), None);
        assert_eq!(BoundingBox::parse("0 0 24 24 1"), None);
    }
}
