//! Path utilities.
//!
//! - [`fs`]: Filesystem path normalization and writing (`normalize_path`, `write_file`)

pub mod fs;

pub use fs::{normalize_path, write_file};
