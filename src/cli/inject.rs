//! HTML injection command.

use anyhow::Result;

use crate::config::IconConfig;
use crate::pipeline::{InjectInputs, InjectReport, inject};

/// Rewrite the configured HTML against the last build's outputs.
pub fn inject_html(config: &IconConfig) -> Result<InjectReport> {
    inject(&InjectInputs::from_config(config))
}
