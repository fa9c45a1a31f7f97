//! Game configuration loader.

use std::path::Path;

use valley_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`]; out-of-range values
    /// are clamped by [`GameConfig::validated`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML at {}: {}", path.display(), e))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)?;
        Ok(config.validated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = ConfigLoader::parse("rows = 3\ncols = 4\n").unwrap();
        assert_eq!(config.rows, 3);
        assert_eq!(config.cols, 4);
        assert_eq!(config.objective_threshold, GameConfig::DEFAULT_OBJECTIVE_THRESHOLD);
        assert_eq!(config.starting_money, GameConfig::DEFAULT_STARTING_MONEY);
    }

    #[test]
    fn degenerate_grid_is_clamped() {
        let config = ConfigLoader::parse("rows = 0\ncols = 0\nselection_fee_percent = 400\n").unwrap();
        assert_eq!((config.rows, config.cols), (1, 1));
        assert_eq!(config.selection_fee_percent, 100);
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(ConfigLoader::parse("rows = \"five\"").is_err());
    }
}
