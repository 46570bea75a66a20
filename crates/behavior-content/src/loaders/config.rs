//! Build settings loader.

use std::path::Path;

use behavior_tree::BuildConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for build settings from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load build settings from a TOML file.
    ///
    /// Omitted keys keep their defaults, so an empty file is valid.
    ///
    /// ```toml
    /// max_depth = 32
    /// ```
    pub fn load(path: &Path) -> LoadResult<BuildConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML at {}: {}", path.display(), e))
    }

    pub fn from_toml_str(content: &str) -> LoadResult<BuildConfig> {
        let config: BuildConfig = toml::from_str(content)?;
        if config.max_depth == 0 {
            anyhow::bail!("max_depth must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(ConfigLoader::from_toml_str("").unwrap(), BuildConfig::default());
    }

    #[test]
    fn reads_max_depth() {
        let config = ConfigLoader::from_toml_str("max_depth = 8").unwrap();
        assert_eq!(config.max_depth, 8);
    }

    #[test]
    fn rejects_zero_depth_and_bad_types() {
        assert!(ConfigLoader::from_toml_str("max_depth = 0").is_err());
        assert!(ConfigLoader::from_toml_str("max_depth = \"deep\"").is_err());
    }
}
