//! HTML transforms applied by `inject`.
//!
//! Each transform takes the whole document and returns the rewritten one,
//! so they compose in sequence.
//!
//! # Modules
//!
//! - `icon`: Replaces placeholder elements with `<svg><use>` references
//! - `head`: Injects the sprite loader before `</head>`

mod head;
mod icon;

pub use head::HeadInjector;
pub use icon::IconTransform;

/// A whole-document HTML rewrite.
pub trait Transform {
    fn transform(&mut self, html: String) -> String;
}
