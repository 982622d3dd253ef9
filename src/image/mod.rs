//! Image processing utilities.
//!
//! # Modules
//!
//! - [`svg`]: icon body optimization, bounds and standalone file unwrapping

pub mod svg;
