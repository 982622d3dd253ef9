//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `inject` - Templates written into the rewritten HTML (sprite loader)
//!
//! # Usage
//!
//! ```ignore
//! use embed::inject::{LoaderVars, SPRITE_LOADER};
//!
//! let script = SPRITE_LOADER.render(&LoaderVars { sprite_url: "/icons/icons.svg?v=a1b2c3d4" });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod inject {
    use super::{Template, TemplateVars};

    /// Attribute marking the injected loader script.
    pub const LOADER_MARKER: &str = "data-icon-sprite";

    /// Variables for sprite-loader.html.
    pub struct LoaderVars<'a> {
        /// Sprite URL, fingerprint included.
        pub sprite_url: &'a str,
    }

    impl TemplateVars for LoaderVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace(
                "__SPRITE_URL__",
                &serde_json::to_string(self.sprite_url).unwrap_or_else(|_| "\"\"".into()),
            )
        }
    }

    /// Runtime loader that fetches the sprite and mounts it at the top of `<body>`.
    pub const SPRITE_LOADER: Template<LoaderVars<'static>> =
        Template::new(include_str!("inject/sprite-loader.html"));
}

#[cfg(test)]
mod tests {
    use super::inject::*;

    #[test]
    fn test_loader_embeds_url_as_string_literal() {
        let script = SPRITE_LOADER.render(&LoaderVars {
            sprite_url: "/icons/icons.svg?v=a1b2c3d4",
        });
        assert!(script.starts_with("<script data-icon-sprite>"));
        assert!(script.contains(r#"var url = "/icons/icons.svg?v=a1b2c3d4";"#));
        assert!(!script.contains("__SPRITE_URL__"));
    }

    #[test]
    fn test_loader_escapes_quotes() {
        let script = SPRITE_LOADER.render(&LoaderVars {
            sprite_url: r#"/a"b.svg"#,
        });
        assert!(script.contains(r#""/a\"b.svg""#));
    }
}
