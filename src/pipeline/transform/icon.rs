//! Placeholder element replacement.
//!
//! ```html
//! <span class="i-mdi-home big" title="Home"></span>
//! ```
//! becomes
//! ```html
//! <svg class="icon big" title="Home" aria-hidden="true"><use href="#i-mdi-home"></use></svg>
//! ```
//!
//! Only markers present in the manifest are replaced, so the output never
//! references a symbol the sprite lacks.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::collections::BTreeSet;

use super::Transform;
use crate::emit::Manifest;
use crate::icon::{MarkerSyntax, Token};
use crate::utils::html::{parse_attributes, quote_attr};

/// Counters collected while rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconStats {
    /// Elements replaced by `<svg><use>`.
    pub replaced: usize,
    /// Markers left in place because the manifest lacks them.
    pub unresolved: BTreeSet<String>,
}

/// Replaces marker-carrying placeholder elements.
pub struct IconTransform<'a> {
    syntax: &'a MarkerSyntax,
    manifest: &'a Manifest,
    icon_class: &'a str,
    /// One pattern per placeholder tag.
    elements: Vec<Regex>,
    stats: IconStats,
}

impl<'a> IconTransform<'a> {
    pub fn new(
        syntax: &'a MarkerSyntax,
        manifest: &'a Manifest,
        icon_class: &'a str,
        tags: &[String],
    ) -> Result<Self> {
        let elements = tags
            .iter()
            .map(|tag| {
                let tag = regex::escape(tag);
                Regex::new(&format!(
                    r"(?is)<{tag}(\s[^>]*?)?(?:/>|>(.*?)</{tag}\s*>)"
                ))
                .with_context(|| format!("Invalid placeholder tag `{tag}`"))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            syntax,
            manifest,
            icon_class,
            elements,
            stats: IconStats::default(),
        })
    }

    pub fn into_stats(self) -> IconStats {
        self.stats
    }

    /// Replacement for one matched element.
    fn rewrite(&self, caps: &Captures<'_>, stats: &mut IconStats) -> String {
        let original = &caps[0];
        let attrs = parse_attributes(caps.get(1).map_or("", |m| m.as_str()));

        let Some((_, class)) = attrs
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("class"))
        else {
            return original.to_string();
        };
        let tokens: Vec<&str> = class.split_ascii_whitespace().collect();

        let mut id = None;
        let mut unresolved = Vec::new();
        for token in &tokens {
            if let Token::Marker(_) = self.syntax.classify(token) {
                if self.manifest.contains(token) {
                    id = Some(*token);
                    break;
                }
                unresolved.push(*token);
            }
        }

        let Some(id) = id else {
            stats
                .unresolved
                .extend(unresolved.into_iter().map(str::to_string));
            return original.to_string();
        };

        let mut classes = vec![self.icon_class];
        for token in tokens {
            if token != id && !classes.contains(&token) {
                classes.push(token);
            }
        }

        let mut out = format!(r#"<svg class="{}""#, quote_attr(&classes.join(" ")));
        let mut has_aria = false;
        for (name, value) in &attrs {
            if name.eq_ignore_ascii_case("class") {
                continue;
            }
            has_aria |= name.to_ascii_lowercase().starts_with("aria-");
            out.push_str(&format!(r#" {name}="{}""#, quote_attr(value)));
        }
        if !has_aria {
            out.push_str(r#" aria-hidden="true""#);
        }
        out.push_str(&format!(r##"><use href="#{id}"></use></svg>"##));

        stats.replaced += 1;
        out
    }
}

impl Transform for IconTransform<'_> {
    fn transform(&mut self, mut html: String) -> String {
        let mut stats = std::mem::take(&mut self.stats);
        for element in &self.elements {
            html = element
                .replace_all(&html, |caps: &Captures<'_>| self.rewrite(caps, &mut stats))
                .into_owned();
        }
        self.stats = stats;
        html
    }
}
