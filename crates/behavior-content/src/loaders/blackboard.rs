//! Initial blackboard loader.

use std::path::Path;

use behavior_tree::Blackboard;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for initial blackboard facts from RON files.
pub struct BlackboardLoader;

impl BlackboardLoader {
    /// Load a blackboard from a RON map of typed values.
    ///
    /// ```ron
    /// {
    ///     "hp": Int(10),
    ///     "enemy_visible": Bool(false),
    ///     "next_waypoint": Str("gate"),
    /// }
    /// ```
    pub fn load(path: &Path) -> LoadResult<Blackboard> {
        let content = read_file(path)?;
        let blackboard = Self::from_ron_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse blackboard {}: {}", path.display(), e))?;
        debug!(
            target: "behavior_content::loaders",
            path = %path.display(),
            entries = blackboard.len(),
            "loaded blackboard"
        );
        Ok(blackboard)
    }

    pub fn from_ron_str(content: &str) -> LoadResult<Blackboard> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse blackboard RON: {}", e))
    }
}
