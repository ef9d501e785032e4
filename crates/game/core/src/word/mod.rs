//! Words: generation from text and their runtime state.
//!
//! - [`stats`]: the four stats and the letter-stat table
//! - [`generator`]: text + level → [`WordEntity`]
//! - [`entity`]: HP, level and experience of a generated word

pub mod entity;
pub mod error;
pub mod generator;
pub mod rank;
pub mod stats;

pub use entity::{Moveset, WordEntity, WordText, computed_stats, experience_needed};
pub use error::GenerationError;
pub use generator::{Codon, generate};
pub use rank::Rank;
pub use stats::{Stat, StatBlock, letter_stat};
