//! Marker extraction from HTML.
//!
//! Icons are requested with marker classes on any element:
//!
//! ```html
//! <span class="icon i-mdi-home"></span>   <!-- collection `mdi`, icon `home` -->
//! <i class='l-logo big'></i>              <!-- local icon `logo` -->
//! ```
//!
//! Only `class` attributes are read; marker-looking text anywhere else in the
//! document is ignored.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use super::{IconRef, Namespace};
use crate::config::MarkersConfig;

/// `class="..."` or `class='...'`, attribute name case-insensitive.
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// `<namespace>-<name>` after the collection prefix.
static COLLECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9]+)-([a-z0-9]+(?:-[a-z0-9]+)*)$").unwrap()
});

/// `<name>` after the local prefix.
static LOCAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

/// Classification of one class token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A well-formed marker.
    Marker(IconRef),
    /// Carries a marker prefix but does not match the grammar.
    Malformed,
    /// Any other class.
    Plain,
}

/// Marker grammar for the configured prefixes.
#[derive(Debug, Clone)]
pub struct MarkerSyntax {
    prefix: String,
    local_prefix: String,
}

impl MarkerSyntax {
    pub fn new(markers: &MarkersConfig) -> Self {
        Self {
            prefix: markers.prefix.clone(),
            local_prefix: markers.local_prefix.clone(),
        }
    }

    /// Classify a single class token.
    pub fn classify(&self, token: &str) -> Token {
        // Longer prefix first when one prefix extends the other.
        let (first, second) = if self.prefix.len() >= self.local_prefix.len() {
            ((&self.prefix, false), (&self.local_prefix, true))
        } else {
            ((&self.local_prefix, true), (&self.prefix, false))
        };

        for (prefix, is_local) in [first, second] {
            let Some(rest) = token.strip_prefix(prefix.as_str()) else {
                continue;
            };
            return if is_local {
                match LOCAL_MARKER.is_match(rest) {
                    true => Token::Marker(IconRef::local(rest)),
                    false => Token::Malformed,
                }
            } else {
                match COLLECTION_MARKER.captures(rest) {
                    Some(caps) => Token::Marker(IconRef::collection(&caps[1], &caps[2])),
                    None => Token::Malformed,
                }
            };
        }
        Token::Plain
    }

    /// Id written for a ref (same as its marker class).
    pub fn id(&self, icon: &IconRef) -> String {
        match &icon.namespace {
            Namespace::Collection(ns) => format!("{}{}-{}", self.prefix, ns, icon.name),
            Namespace::Local => format!("{}{}", self.local_prefix, icon.name),
        }
    }
}

/// Markers found in a document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanResult {
    /// Icon names grouped by namespace.
    pub refs: BTreeMap<Namespace, BTreeSet<String>>,
    /// Tokens with a marker prefix that failed the grammar.
    pub malformed: BTreeSet<String>,
}

impl ScanResult {
    /// Number of distinct icons.
    pub fn len(&self) -> usize {
        self.refs.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// All refs, ordered by namespace then name.
    pub fn iter(&self) -> impl Iterator<Item = IconRef> + '_ {
        self.refs.iter().flat_map(|(namespace, names)| {
            names.iter().map(|name| IconRef {
                namespace: namespace.clone(),
                name: name.clone(),
            })
        })
    }

    fn insert(&mut self, icon: IconRef) {
        self.refs.entry(icon.namespace).or_default().insert(icon.name);
    }
}

/// Collect every marker class in `html`.
///
/// No markers yields an empty result, not an error.
pub fn scan_html(html: &str, syntax: &MarkerSyntax) -> ScanResult {
    let mut result = ScanResult::default();

    for caps in CLASS_ATTR.captures_iter(html) {
        let Some(value) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        for token in value.as_str().split_ascii_whitespace() {
            match syntax.classify(token) {
                Token::Marker(icon) => result.insert(icon),
                Token::Malformed => {
                    result.malformed.insert(token.to_string());
                }
                Token::Plain => {}
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax() -> MarkerSyntax {
        MarkerSyntax::new(&MarkersConfig::default())
    }

    #[test]
    fn test_scan_groups_by_namespace() {
        let html = r#"<body>
            <span class="icon i-mdi-home"></span>
            <i class='i-mdi-account-circle big'></i>
            <span class="i-tabler-x"></span>
            <span CLASS="l-logo"></span>
            <span class="i-mdi-home"></span>
        </body>"#;

        let result = scan_html(html, &syntax());
        assert_eq!(result.len(), 4);
        assert!(result.malformed.is_empty());

        let mdi = &result.refs[&Namespace::Collection("mdi".into())];
        assert_eq!(
            mdi.iter().map(String::as_str).collect::<Vec<_>>(),
            ["account-circle", "home"]
        );
        assert!(result.refs[&Namespace::Local].contains("logo"));
    }

    #[test]
    fn test_iter_is_ordered() {
        let html = r#"<i class="l-b"></i><i class="i-z-a"></i><i class="i-a-z"></i>"#;
        let refs: Vec<_> = scan_html(html, &syntax()).iter().collect();
        assert_eq!(
            refs,
            [
                IconRef::collection("a", "z"),
                IconRef::collection("z", "a"),
                IconRef::local("b"),
            ]
        );
    }

    #[test]
    fn test_no_markers() {
        let result = scan_html("<p class=\"lead\">i-mdi-home</p>", &syntax());
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_other_attributes_ignored() {
        let html = r#"<div data-class="i-mdi-home" title="i-mdi-x"></div>"#;
        assert!(scan_html(html, &syntax()).is_empty());
    }

    #[test]
    fn test_malformed_markers() {
        let html = r#"<i class="i-mdi i-MDI-home i- l-Bad l-ok"></i>"#;
        let result = scan_html(html, &syntax());
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.malformed.iter().map(String::as_str).collect::<Vec<_>>(),
            ["i-", "i-MDI-home", "i-mdi", "l-Bad"]
        );
    }

    #[test]
    fn test_custom_prefixes() {
        let syntax = MarkerSyntax::new(&MarkersConfig {
            prefix: "ico-".into(),
            local_prefix: "my-".into(),
        });
        assert_eq!(
            syntax.classify("ico-mdi-home"),
            Token::Marker(IconRef::collection("mdi", "home"))
        );
        assert_eq!(syntax.classify("my-logo"), Token::Marker(IconRef::local("logo")));
        assert_eq!(syntax.classify("i-mdi-home"), Token::Plain);
    }

    #[test]
    fn test_id_matches_marker() {
        let syntax = syntax();
        for marker in ["i-mdi-home", "l-logo", "i-tabler-arrow-left"] {
            let Token::Marker(icon) = syntax.classify(marker) else {
                panic!("{marker} should be a marker");
            };
            assert_eq!(syntax.id(&icon), marker);
        }
    }
}
