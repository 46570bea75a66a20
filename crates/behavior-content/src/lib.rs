//! Data-driven behavior tree content and loaders.
//!
//! This crate reads behavior tree definitions from a data directory:
//! - Tree definitions (RON or JSON `NodeConf` documents)
//! - Subtree libraries (one file per named subtree)
//! - Initial blackboard facts (RON map)
//! - Build settings (TOML)
//!
//! All loaders deserialize `behavior-tree` types directly through its `serde`
//! feature; nothing here knows about individual node kinds.

pub mod format;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use format::{BLACKBOARD_FILE, CONFIG_FILE, ContentFormat, SUBTREES_DIR, TREES_DIR};

#[cfg(feature = "loaders")]
pub use loaders::{BlackboardLoader, ConfigLoader, ContentFactory, SubtreeLoader, TreeLoader};
