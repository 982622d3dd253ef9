//! `[optimize]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [optimize]
//! enable = true            # Run the optimizer on every icon body
//! precision = 3            # Decimal places kept in path data
//! recolor = true           # Replace fill/stroke colors with `color`
//! color = "currentColor"   # Theme-controlled color token
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::image::svg::OptimizeOptions;

/// Largest accepted path data precision.
const MAX_PRECISION: u8 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeConfig {
    pub enable: bool,
    pub precision: u8,
    pub recolor: bool,
    pub color: String,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            enable: true,
            precision: 3,
            recolor: true,
            color: "currentColor".into(),
        }
    }
}

impl OptimizeConfig {
    pub const PRECISION: FieldPath = FieldPath::new("optimize.precision");
    pub const COLOR: FieldPath = FieldPath::new("optimize.color");

    /// Optimizer options derived from this section.
    pub fn options(&self) -> OptimizeOptions {
        OptimizeOptions {
            precision: self.precision,
            recolor: self.recolor.then(|| self.color.clone()),
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.precision > MAX_PRECISION {
            diag.error_with_hint(
                Self::PRECISION,
                format!("{} is too large", self.precision),
                format!("use a value between 0 and {MAX_PRECISION}"),
            );
        }
        if self.recolor && self.color.trim().is_empty() {
            diag.error(Self::COLOR, "must not be empty when `optimize.recolor` is set");
        }
    }
}
