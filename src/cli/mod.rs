//! Command-line interface module.

mod args;
pub mod build;
pub mod inject;

pub use args::{Cli, Commands};
