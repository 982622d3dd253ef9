//! SVG processing utilities.
//!
//! Provides icon body optimization, path data minification, bounding box
//! calculation and unwrapping of standalone SVG files.
//!
//! # Modules
//!
//! - [`optimize`]: attribute cleanup, recoloring and minification (quick-xml)
//! - [`path`]: path data tokenizing and compaction
//! - [`bounds`]: stroke-inclusive bounding box calculation (usvg)
//! - [`extract`]: root `<svg>` unwrapping for local icon files
//!
//! # Architecture
//!
//! ```text
//! icon body (from a collection)
//!         │
//!         ▼
//!    ┌──────────┐
//!    │  bounds  │ ──► viewBox when the source has none
//!    └────┬─────┘
//!         │
//!         ▼
//!    ┌──────────┐
//!    │ optimize │ ──► strip attrs, currentColor, path data, minify
//!    └──────────┘
//! ```

mod bounds;
mod extract;
mod optimize;
mod path;

pub use bounds::body_bounds;
pub use extract::unwrap_svg;
pub use optimize::{OptimizeOptions, optimize_body};

/// Format a float with at most `precision` decimals and no trailing zeros.
///
/// `-0` is written as `0` so output does not depend on rounding direction.
pub fn trim_float(value: f64, precision: usize) -> String {
    let mut s = format!("{value:.precision$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_float() {
        assert_eq!(trim_float(24.0, 3), "24");
        assert_eq!(trim_float(1.5000, 3), "1.5");
        assert_eq!(trim_float(0.12345, 3), "0.123");
        assert_eq!(trim_float(-0.0001, 3), "0");
        assert_eq!(trim_float(-2.26, 1), "-2.3");
    }
}
