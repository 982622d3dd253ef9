//! Non-fatal build diagnostics.
//!
//! Every warning is logged at the moment it is recorded and kept for the
//! final build report.

use std::path::PathBuf;
use thiserror::Error;

use crate::log;

/// A problem the build recovered from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildWarning {
    #[error("malformed icon marker `{token}`")]
    MalformedMarker { token: String },

    #[error("icon collection `{namespace}` unavailable ({reason}), {action}")]
    MissingCollection {
        namespace: String,
        reason: String,
        action: &'static str,
    },

    #[error("icon `{id}` not found ({reason}), using default icon")]
    MissingIcon { id: String, reason: String },

    #[error("default icon '{}' unusable ({reason}), using built-in placeholder", path.display())]
    DefaultIcon { path: PathBuf, reason: String },

    #[error("could not optimize `{id}` ({reason}), keeping original markup")]
    OptimizerFallback { id: String, reason: String },

    #[error("failed to write '{}': {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },
}

/// Ordered list of recorded warnings.
#[derive(Debug, Default)]
pub struct Warnings {
    items: Vec<BuildWarning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and keep a warning.
    pub fn record(&mut self, warning: BuildWarning) {
        log!("warning"; "{}", warning);
        self.items.push(warning);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildWarning> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<BuildWarning> {
        self.items
    }
}
