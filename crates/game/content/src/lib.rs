//! File-backed content for `wordsmith-core`.
//!
//! The core crate never touches the filesystem. This crate reads the pieces
//! it needs from disk and hands them over as core types:
//! - the dictionary word list, as a [`WordTable`](wordsmith_core::WordTable)
//! - the tunable battle numbers, as a [`GameConfig`](wordsmith_core::GameConfig) (TOML)
//! - player saves, framed by the core save codec

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, DictionaryLoader, LoadResult, SaveLoader};
