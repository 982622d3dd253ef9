//! Sprite loader injection before `</head>`.

use super::Transform;
use crate::embed::inject::{LOADER_MARKER, LoaderVars, SPRITE_LOADER};
use crate::utils::html::find_ignore_ascii_case;

/// Inserts the sprite loader script at the end of `<head>`.
pub struct HeadInjector {
    script: String,
    injected: bool,
}

impl HeadInjector {
    pub fn new(sprite_url: &str) -> Self {
        Self {
            script: SPRITE_LOADER.render(&LoaderVars { sprite_url }),
            injected: false,
        }
    }

    /// Whether `html` already carries a loader.
    pub fn has_loader(html: &str) -> bool {
        html.contains(LOADER_MARKER)
    }

    /// Whether the last transform inserted the script.
    pub fn injected(&self) -> bool {
        self.injected
    }
}

impl Transform for HeadInjector {
    fn transform(&mut self, mut html: String) -> String {
        self.injected = false;
        if Self::has_loader(&html) {
            return html;
        }
        if let Some(pos) = find_ignore_ascii_case(&html, "</head>") {
            html.insert_str(pos, &self.script);
            self.injected = true;
        }
        html
    }
}
