//! Utility modules shared by the build and inject steps.

pub mod hash;
pub mod html;
pub mod path;
mod plural;

pub use plural::plural_count;
