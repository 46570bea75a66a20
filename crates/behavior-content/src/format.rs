//! Data directory layout and file formats.

use std::path::Path;

/// Build settings, TOML.
pub const CONFIG_FILE: &str = "config.toml";
/// Initial blackboard facts, RON.
pub const BLACKBOARD_FILE: &str = "blackboard.ron";
/// Directory holding one tree definition per file.
pub const TREES_DIR: &str = "trees";
/// Directory holding one named subtree per file.
pub const SUBTREES_DIR: &str = "subtrees";

/// Serialization format of a tree definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ContentFormat {
    Ron,
    Json,
}

impl ContentFormat {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            ContentFormat::Ron => "ron",
            ContentFormat::Json => "json",
        }
    }

    /// Detects the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("ron") {
            Some(ContentFormat::Ron)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(ContentFormat::Json)
        } else {
            None
        }
    }
}
