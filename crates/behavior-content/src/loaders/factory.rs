//! Content factory for building tree registries from data files.

use std::path::{Path, PathBuf};

use behavior_tree::{Blackboard, BuildConfig, NodeConf, NodeFactories};
use tracing::debug;

use crate::loaders::{BlackboardLoader, ConfigLoader, LoadResult, SubtreeLoader, TreeLoader};
use crate::{BLACKBOARD_FILE, CONFIG_FILE, ContentFormat, SUBTREES_DIR, TREES_DIR};

/// Content factory that loads all behavior content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// ├── blackboard.ron     (optional)
/// ├── trees/
/// │   ├── guard.ron
/// │   └── courier.json
/// └── subtrees/          (optional)
///     └── patrol.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load build settings from `config.toml`, or defaults if it is absent.
    pub fn load_config(&self) -> LoadResult<BuildConfig> {
        let path = self.data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(BuildConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the tree `trees/{name}.ron` or `trees/{name}.json`.
    pub fn load_tree(&self, name: &str) -> LoadResult<NodeConf> {
        let path = self.tree_path(name)?;
        TreeLoader::load(&path)
    }

    /// Names of all tree definitions, sorted.
    ///
    /// A name defined in both formats is listed once; loading it fails.
    pub fn tree_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join(TREES_DIR);
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read tree directory {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| anyhow::anyhow!("Failed to read entry in {}: {}", dir.display(), e))?
                .path();
            if ContentFormat::from_path(&path).is_some()
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Load every subtree in `subtrees/`.
    pub fn load_subtrees(&self) -> LoadResult<Vec<(String, NodeConf)>> {
        SubtreeLoader::load_dir(&self.data_dir.join(SUBTREES_DIR))
    }

    /// Load initial facts from `blackboard.ron`, or an empty blackboard.
    pub fn load_blackboard(&self) -> LoadResult<Blackboard> {
        let path = self.data_dir.join(BLACKBOARD_FILE);
        if !path.exists() {
            return Ok(Blackboard::new());
        }
        BlackboardLoader::load(&path)
    }

    /// Registry with the built-in kinds, the configured build settings and
    /// every subtree from the data directory.
    ///
    /// Callers register their own leaf kinds on the returned registry.
    pub fn build_factories(&self) -> LoadResult<NodeFactories> {
        let config = self.load_config()?;
        let mut factories = NodeFactories::with_builtins().with_config(config);
        for (name, conf) in self.load_subtrees()? {
            factories
                .register_subtree(name, conf)
                .map_err(|e| anyhow::anyhow!("Failed to register subtree: {}", e))?;
        }
        debug!(
            target: "behavior_content::loaders",
            data_dir = %self.data_dir.display(),
            kinds = factories.len(),
            subtrees = factories.subtree_names().len(),
            max_depth = factories.config().max_depth,
            "built node factories"
        );
        Ok(factories)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn tree_path(&self, name: &str) -> LoadResult<PathBuf> {
        let dir = self.data_dir.join(TREES_DIR);
        let mut found = [ContentFormat::Ron, ContentFormat::Json]
            .into_iter()
            .map(|format| dir.join(format!("{}.{}", name, format.extension())))
            .filter(|path| path.exists());

        let path = found
            .next()
            .ok_or_else(|| anyhow::anyhow!("Tree '{}' not found in {}", name, dir.display()))?;
        if let Some(other) = found.next() {
            anyhow::bail!(
                "Tree '{}' is defined twice: {} and {}",
                name,
                path.display(),
                other.display()
            );
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn optional_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), BuildConfig::default());
        assert!(factory.load_blackboard().unwrap().is_empty());
        assert!(factory.load_subtrees().unwrap().is_empty());
    }

    #[test]
    fn missing_tree_names_the_tree() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_tree("ghost").unwrap_err();
        assert!(err.to_string().contains("Tree 'ghost' not found"));
    }

    #[test]
    fn tree_in_both_formats_is_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        let trees = dir.path().join(TREES_DIR);
        std::fs::create_dir(&trees).unwrap();
        std::fs::write(trees.join("scout.ron"), r#"(kind: "Succeed")"#).unwrap();
        std::fs::write(trees.join("scout.json"), r#"{"kind": "Fail"}"#).unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.tree_names().unwrap(), ["scout"]);
        let err = factory.load_tree("scout").unwrap_err();
        assert!(err.to_string().contains("defined twice"));
    }
}
