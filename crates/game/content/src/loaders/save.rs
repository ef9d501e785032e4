//! Player save files.

use std::fs;
use std::path::Path;

use wordsmith_core::{Player, save};

use crate::loaders::LoadResult;

/// Reads and writes framed player saves.
pub struct SaveLoader;

impl SaveLoader {
    /// Write `player` to `path`, replacing any previous save.
    ///
    /// The save is written next to `path` first and renamed into place.
    pub fn save(path: &Path, player: &Player) -> LoadResult<()> {
        let bytes = save::encode(player)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, bytes)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", temp_path.display(), e))?;
        fs::rename(&temp_path, path)
            .map_err(|e| anyhow::anyhow!("Failed to replace {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), player = player.username(), "saved player");
        Ok(())
    }

    /// Read a player from `path`. Returns `None` if there is no save yet.
    pub fn load(path: &Path) -> LoadResult<Option<Player>> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))?;
        let player = save::decode(&bytes)?;
        tracing::debug!(path = %path.display(), player = player.username(), "loaded player");
        Ok(Some(player))
    }
}
