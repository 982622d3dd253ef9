//! Collection loading with a per-run cache.
//!
//! Each namespace is attempted at most once. Failures are cached too, so a
//! missing set produces one warning no matter how many markers reference it.

use rustc_hash::FxHashMap;
use std::path::PathBuf;

use super::collection::{IconCollection, IconSet, LocalIcons};
use super::{BuildWarning, Namespace, Warnings};
use crate::config::{CollectionsConfig, MissingPolicy};
use crate::debug;

/// Loads collections on first use and keeps them until dropped.
#[derive(Debug)]
pub struct CollectionResolver {
    iconify_dir: PathBuf,
    local_dir: PathBuf,
    policy: MissingPolicy,
    cache: FxHashMap<Namespace, Option<IconCollection>>,
}

impl CollectionResolver {
    pub fn new(config: &CollectionsConfig) -> Self {
        Self {
            iconify_dir: config.iconify.clone(),
            local_dir: config.local.clone(),
            policy: config.missing_collection,
            cache: FxHashMap::default(),
        }
    }

    /// Get the collection for `namespace`, loading it on first request.
    ///
    /// Returns `None` when it cannot be loaded; the warning is recorded on the
    /// first attempt only.
    pub fn collection(
        &mut self,
        namespace: &Namespace,
        warnings: &mut Warnings,
    ) -> Option<&IconCollection> {
        if !self.cache.contains_key(namespace) {
            let loaded = self.load(namespace, warnings);
            self.cache.insert(namespace.clone(), loaded);
        }
        self.cache.get(namespace)?.as_ref()
    }

    /// Number of namespaces attempted so far.
    pub fn attempted(&self) -> usize {
        self.cache.len()
    }

    fn load(&self, namespace: &Namespace, warnings: &mut Warnings) -> Option<IconCollection> {
        let result = match namespace {
            Namespace::Collection(prefix) => IconSet::locate(&self.iconify_dir, prefix)
                .ok_or_else(|| {
                    format!(
                        "no icons.json for `{prefix}` in '{}'",
                        self.iconify_dir.display()
                    )
                })
                .and_then(|path| {
                    IconSet::load(&path)
                        .map(IconCollection::Iconify)
                        .map_err(|e| format!("{e:#}"))
                }),
            Namespace::Local => LocalIcons::load(&self.local_dir)
                .map(IconCollection::Local)
                .map_err(|e| format!("{e:#}")),
        };

        match result {
            Ok(collection) => {
                debug!("resolve"; "loaded `{}` ({} icons)", namespace, collection.len());
                Some(collection)
            }
            Err(reason) => {
                let action = match self.policy {
                    MissingPolicy::Skip => "skipping its icons",
                    MissingPolicy::Default => "using default icon",
                };
                warnings.record(BuildWarning::MissingCollection {
                    namespace: namespace.to_string(),
                    reason,
                    action,
                });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn resolver(dir: &TempDir) -> CollectionResolver {
        CollectionResolver::new(&CollectionsConfig {
            iconify: dir.path().join("iconify"),
            local: dir.path().join("icons"),
            ..Default::default()
        })
    }

    #[test]
    fn test_loads_iconify_set() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("iconify/mdi")).unwrap();
        fs::write(
            dir.path().join("iconify/mdi/icons.json"),
            r#"{"prefix":"mdi","icons":{"home":{"body":"<path d=\"M0 0\"/>"}}}"#,
        )
        .unwrap();

        let mut resolver = resolver(&dir);
        let mut warnings = Warnings::new();
        let ns = Namespace::Collection("mdi".into());

        let collection = resolver.collection(&ns, &mut warnings).unwrap();
        assert!(collection.contains("home"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_failure_is_memoized() {
        let dir = TempDir::new().unwrap();
        let mut resolver = resolver(&dir);
        let mut warnings = Warnings::new();
        let ns = Namespace::Collection("foo".into());

        assert!(resolver.collection(&ns, &mut warnings).is_none());
        assert!(resolver.collection(&ns, &mut warnings).is_none());
        assert_eq!(warnings.len(), 1);
        assert_eq!(resolver.attempted(), 1);

        // Appearing later does not matter within one run.
        fs::create_dir_all(dir.path().join("iconify")).unwrap();
        fs::write(dir.path().join("iconify/foo.json"), r#"{"icons":{}}"#).unwrap();
        assert!(resolver.collection(&ns, &mut warnings).is_none());
    }

    #[test]
    fn test_invalid_set_warns() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("iconify")).unwrap();
        fs::write(dir.path().join("iconify/bad.json"), r#"{"prefix":"bad"}"#).unwrap();

        let mut resolver = resolver(&dir);
        let mut warnings = Warnings::new();
        let ns = Namespace::Collection("bad".into());

        assert!(resolver.collection(&ns, &mut warnings).is_none());
        let Some(BuildWarning::MissingCollection { reason, .. }) = warnings.iter().next() else {
            panic!("expected a missing collection warning");
        };
        assert!(reason.contains("icons"), "{reason}");
    }

    #[test]
    fn test_local_collection() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/logo.svg"), "<svg/>").unwrap();

        let mut resolver = resolver(&dir);
        let mut warnings = Warnings::new();
        let collection = resolver.collection(&Namespace::Local, &mut warnings).unwrap();
        assert!(collection.contains("logo"));
    }
}
