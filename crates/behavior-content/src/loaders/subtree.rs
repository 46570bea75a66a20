//! Subtree library loader.
//!
//! Every `.ron` or `.json` file in the directory is one subtree, named after
//! its file stem:
//!
//! ```text
//! subtrees/
//!   ├── flee.ron      → "flee"
//!   └── patrol.json   → "patrol"
//! ```

use std::path::Path;

use behavior_tree::NodeConf;
use tracing::debug;

use crate::ContentFormat;
use crate::loaders::{LoadResult, TreeLoader};

/// Loader for a directory of named subtrees.
pub struct SubtreeLoader;

impl SubtreeLoader {
    /// Load all subtrees in `dir`, sorted by name.
    ///
    /// A missing directory yields no subtrees. Files with other extensions are
    /// skipped. Two files with the same stem are an error.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<(String, NodeConf)>> {
        if !dir.is_dir() {
            debug!(
                target: "behavior_content::loaders",
                dir = %dir.display(),
                "no subtree directory"
            );
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| {
            anyhow::anyhow!("Failed to read subtree directory {}: {}", dir.display(), e)
        })?;

        let mut subtrees = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| anyhow::anyhow!("Failed to read entry in {}: {}", dir.display(), e))?
                .path();
            if !path.is_file() || ContentFormat::from_path(&path).is_none() {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            subtrees.push((name.to_owned(), TreeLoader::load(&path)?));
        }

        subtrees.sort_by(|(a, _), (b, _)| a.cmp(b));
        if let Some(pair) = subtrees.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            anyhow::bail!(
                "Subtree '{}' is defined more than once in {}",
                pair[0].0,
                dir.display()
            );
        }

        debug!(
            target: "behavior_content::loaders",
            dir = %dir.display(),
            count = subtrees.len(),
            "loaded subtrees"
        );
        Ok(subtrees)
    }
}
