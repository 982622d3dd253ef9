//! Configuration section definitions.
//!
//! Each module corresponds to a section in `iconsprite.toml`:
//!
//! | Module        | TOML Section     | Purpose                                |
//! |---------------|------------------|----------------------------------------|
//! | `source`      | `[source]`       | HTML source to scan                    |
//! | `collections` | `[collections]`  | Iconify sets, local icons, fallback    |
//! | `markers`     | `[markers]`      | Marker class prefixes                  |
//! | `build`       | `[build]`        | Emission mode and output paths         |
//! | `optimize`    | `[optimize]`     | SVG body cleanup and recoloring        |
//! | `inject`      | `[inject]`       | HTML rewriting and loader injection    |

pub mod build;
mod collections;
mod inject;
mod markers;
mod optimize;
mod source;

pub use build::{BuildConfig, EmitMode};
pub use collections::{CollectionsConfig, MissingPolicy};
pub use inject::InjectConfig;
pub use markers::MarkersConfig;
pub use optimize::OptimizeConfig;
pub use source::SourceConfig;
