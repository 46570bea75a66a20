//! Tree definition loader.
//!
//! A tree file holds a single [`NodeConf`] document:
//!
//! ```ron
//! (
//!     kind: "Sequence",
//!     children: [
//!         (kind: "Condition", params: {"key": Str("enemy_visible")}),
//!         (kind: "Wait", params: {"ticks": Int(2)}),
//!     ],
//! )
//! ```
//!
//! Parameters are tagged with their type (`Bool`, `Int`, `Float`, `Str`, or
//! `Key` for a blackboard reference).

use std::path::Path;

use behavior_tree::NodeConf;
use tracing::debug;

use crate::ContentFormat;
use crate::loaders::{LoadResult, read_file};

/// Loader for tree definitions from RON or JSON files.
pub struct TreeLoader;

impl TreeLoader {
    /// Load a tree definition, picking the format from the file extension.
    pub fn load(path: &Path) -> LoadResult<NodeConf> {
        let format = ContentFormat::from_path(path).ok_or_else(|| {
            anyhow::anyhow!(
                "Unsupported tree file {}: expected .ron or .json",
                path.display()
            )
        })?;
        let content = read_file(path)?;
        let conf = Self::parse(&content, format)
            .map_err(|e| anyhow::anyhow!("Failed to parse tree {}: {}", path.display(), e))?;

        debug!(
            target: "behavior_content::loaders",
            path = %path.display(),
            root = conf.kind(),
            "loaded tree definition"
        );
        Ok(conf)
    }

    /// Parse a tree definition in the given format.
    pub fn parse(content: &str, format: ContentFormat) -> LoadResult<NodeConf> {
        match format {
            ContentFormat::Ron => Self::from_ron_str(content),
            ContentFormat::Json => Self::from_json_str(content),
        }
    }

    pub fn from_ron_str(content: &str) -> LoadResult<NodeConf> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse tree RON: {}", e))
    }

    pub fn from_json_str(content: &str) -> LoadResult<NodeConf> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tree JSON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use behavior_tree::Param;

    #[test]
    fn parses_ron_with_defaults() {
        let conf = TreeLoader::from_ron_str(
            r#"(
                kind: "Selector",
                id: Some("root"),
                children: [
                    (kind: "Condition", params: {"key": Str("hp"), "op": Str("lt"), "value": Int(3)}),
                    (kind: "Succeed"),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(conf.kind(), "Selector");
        assert_eq!(conf.id(), Some("root"));
        assert_eq!(conf.children()[0].param("value"), Some(&Param::Int(3)));
        assert!(conf.children()[1].params().is_empty());
    }

    #[test]
    fn parses_json_key_params() {
        let conf = TreeLoader::from_json_str(
            r#"{"kind": "SetValue", "params": {"key": {"Str": "a"}, "value": {"Key": "b"}}}"#,
        )
        .unwrap();
        assert_eq!(conf.param("value"), Some(&Param::key("b")));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(TreeLoader::from_ron_str("(kind: )").is_err());
        assert!(TreeLoader::from_json_str(r#"{"children": []}"#).is_err());
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = TreeLoader::load(Path::new("trees/patrol.yaml")).unwrap_err();
        assert!(err.to_string().contains("expected .ron or .json"));
    }
}
