//! `[markers]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [markers]
//! prefix = "i-"          # i-<collection>-<name>, e.g. i-mdi-home
//! local_prefix = "l-"    # l-<name>, e.g. l-logo (from [collections].local)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkersConfig {
    /// Class prefix for collection icons.
    pub prefix: String,

    /// Class prefix for local icons.
    pub local_prefix: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            prefix: "i-".into(),
            local_prefix: "l-".into(),
        }
    }
}

impl MarkersConfig {
    pub const PREFIX: FieldPath = FieldPath::new("markers.prefix");
    pub const LOCAL_PREFIX: FieldPath = FieldPath::new("markers.local_prefix");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [
            (Self::PREFIX, &self.prefix),
            (Self::LOCAL_PREFIX, &self.local_prefix),
        ] {
            if value.is_empty() {
                diag.error(field, "must not be empty");
            } else if !value.ends_with('-') {
                diag.error_with_hint(
                    field,
                    format!("`{value}` does not end with `-`"),
                    format!("use `{value}-`"),
                );
            } else if !value[..value.len() - 1]
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            {
                diag.error(field, "only lowercase letters and digits may precede `-`");
            }
        }

        if self.prefix == self.local_prefix {
            diag.error(
                Self::LOCAL_PREFIX,
                format!("must differ from {}", Self::PREFIX),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.markers.prefix, "i-");
        assert_eq!(config.markers.local_prefix, "l-");

        let mut diag = ConfigDiagnostics::new();
        config.markers.validate(&mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_invalid_prefixes() {
        let markers = MarkersConfig {
            prefix: "icon".into(),
            local_prefix: String::new(),
        };
        let mut diag = ConfigDiagnostics::new();
        markers.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_equal_prefixes_rejected() {
        let markers = MarkersConfig {
            prefix: "x-".into(),
            local_prefix: "x-".into(),
        };
        let mut diag = ConfigDiagnostics::new();
        markers.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, MarkersConfig::LOCAL_PREFIX);
    }
}
