//! Loaders that turn files into core types.

pub mod config;
pub mod dictionary;
pub mod save;

pub use config::ConfigLoader;
pub use dictionary::DictionaryLoader;
pub use save::SaveLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
