//! Word generation errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur while generating a word from text.
///
/// No partial word is ever returned alongside one of these.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenerationError {
    /// The text is shorter or longer than a word may be.
    #[error("word has invalid length {length} (expected {min}..={max} letters)")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },

    /// The requested starting level is out of range.
    #[error("invalid initial word level {level} (expected {min}..={max})")]
    InvalidLevel { level: u32, min: u32, max: u32 },

    /// A character outside `a-z` / `A-Z` was found.
    #[error("invalid letter {letter:?} at position {position}")]
    InvalidLetter { letter: char, position: usize },

    /// The dictionary must be loaded before any word is generated.
    #[error("dictionary table is not loaded")]
    DictionaryNotLoaded,
}

impl GameError for GenerationError {
    fn severity(&self) -> ErrorSeverity {
        use GenerationError::*;
        match self {
            InvalidLength { .. } | InvalidLevel { .. } | InvalidLetter { .. } => {
                ErrorSeverity::Validation
            }
            DictionaryNotLoaded => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use GenerationError::*;
        match self {
            InvalidLength { .. } => "WORD_INVALID_LENGTH",
            InvalidLevel { .. } => "WORD_INVALID_LEVEL",
            InvalidLetter { .. } => "WORD_INVALID_LETTER",
            DictionaryNotLoaded => "WORD_DICTIONARY_NOT_LOADED",
        }
    }
}
