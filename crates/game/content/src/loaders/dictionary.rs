//! Dictionary word-list loader.

use std::path::Path;

use anyhow::Context;
use wordsmith_core::WordTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for newline-delimited, alphabetically sorted word lists.
pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Read a word list into a loaded [`WordTable`].
    pub fn load(path: &Path) -> LoadResult<WordTable> {
        let content = read_file(path)?;
        let mut table = WordTable::new();
        let count = table
            .load_str(&content)
            .with_context(|| format!("Invalid dictionary {}", path.display()))?;
        tracing::info!(path = %path.display(), words = count, "dictionary loaded");
        Ok(table)
    }
}
