//! Game configuration loader.

use std::path::Path;

use wordsmith_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`GameConfig`] from a TOML file.
    ///
    /// Missing keys keep their defaults, so an empty file is valid.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a [`GameConfig`] from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.starting_technical_points != config.clamped_starting_points() {
            tracing::warn!(
                requested = config.starting_technical_points,
                used = config.clamped_starting_points(),
                "starting technical points out of range, clamping"
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::parse("effect_turns = 3\n").unwrap();
        assert_eq!(config.effect_turns, 3);
        assert_eq!(
            config.starting_technical_points,
            GameConfig::DEFAULT_STARTING_TECHNICAL_POINTS
        );
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(
            &path,
            "starting_technical_points = 4\ntechnical_point_charge = 1\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.starting_technical_points, 4);
        assert_eq!(config.technical_point_charge, 1);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(ConfigLoader::parse("effect_turns = \"five\"").is_err());
        assert!(ConfigLoader::parse("effect_turns = 300").is_err());

        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::load(&dir.path().join("missing.toml")).is_err());
    }
}
