//! Content loaders for reading behavior tree data from files.
//!
//! Each loader converts one kind of file into `behavior-tree` values;
//! [`ContentFactory`] ties them together for a whole data directory.

pub mod blackboard;
pub mod config;
pub mod factory;
pub mod subtree;
pub mod tree;

pub use blackboard::BlackboardLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use subtree::SubtreeLoader;
pub use tree::TreeLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
