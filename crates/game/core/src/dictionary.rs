//! Dictionary table: the "is this a real word" oracle.
//!
//! The table holds a sorted list of lowercase words and answers membership
//! queries by binary search, narrowed to the range of words sharing the query's
//! first letter. It is loaded exactly once; a failed load leaves it unloaded.

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

/// Read-only membership oracle consumed by the word generator.
pub trait DictionaryOracle {
    /// Returns true once a word list has been loaded.
    fn is_loaded(&self) -> bool;

    /// Returns true if `word` is a known word.
    ///
    /// Implementations must return `false` (not panic) when nothing is loaded.
    fn contains(&self, word: &str) -> bool;
}

/// Errors raised while loading a dictionary table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryError {
    /// The table already holds a word list.
    #[error("dictionary table is already loaded")]
    AlreadyLoaded,

    /// The source contained no words.
    #[error("dictionary source contains no words")]
    Empty,

    /// A line sorts before the line preceding it.
    #[error("dictionary is not sorted: line {line} ({word:?}) sorts before its predecessor")]
    Unsorted { line: usize, word: String },
}

impl GameError for DictionaryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            DictionaryError::AlreadyLoaded => ErrorSeverity::Internal,
            DictionaryError::Empty | DictionaryError::Unsorted { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DictionaryError::AlreadyLoaded => "DICTIONARY_ALREADY_LOADED",
            DictionaryError::Empty => "DICTIONARY_EMPTY",
            DictionaryError::Unsorted { .. } => "DICTIONARY_UNSORTED",
        }
    }
}

/// Half-open range of table indices sharing a first letter.
type LetterRange = Option<(usize, usize)>;

/// Sorted in-memory word list.
#[derive(Clone, Debug, Default)]
pub struct WordTable {
    words: Vec<String>,
    by_first_letter: [LetterRange; GameConfig::N_LETTERS],
    loaded: bool,
}

impl WordTable {
    /// Creates an unloaded table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads newline-delimited, pre-sorted text.
    pub fn load_str(&mut self, contents: &str) -> Result<usize, DictionaryError> {
        self.load_lines(contents.lines())
    }

    /// Loads a pre-sorted sequence of words.
    ///
    /// Each line is trimmed and lowercased; blank lines are skipped. Returns the
    /// number of words loaded. On error the table stays unloaded.
    pub fn load_lines<I, S>(&mut self, lines: I) -> Result<usize, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.loaded {
            return Err(DictionaryError::AlreadyLoaded);
        }

        let mut words: Vec<String> = Vec::new();
        for (number, line) in lines.into_iter().enumerate() {
            let word = line.as_ref().trim().to_ascii_lowercase();
            if word.is_empty() {
                continue;
            }
            if words.last().is_some_and(|previous| *previous > word) {
                return Err(DictionaryError::Unsorted {
                    line: number + 1,
                    word,
                });
            }
            words.push(word);
        }
        if words.is_empty() {
            return Err(DictionaryError::Empty);
        }

        let mut by_first_letter: [LetterRange; GameConfig::N_LETTERS] =
            [None; GameConfig::N_LETTERS];
        for (position, word) in words.iter().enumerate() {
            if let Some(key) = letter_key(word) {
                let range = by_first_letter[key].get_or_insert((position, position));
                range.1 = position + 1;
            }
        }

        words.shrink_to_fit();
        let count = words.len();
        self.words = words;
        self.by_first_letter = by_first_letter;
        self.loaded = true;
        tracing::debug!(words = count, "dictionary table loaded");
        Ok(count)
    }

    /// Drops the loaded word list, returning the table to the unloaded state.
    pub fn unload(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Slice of the table that can contain `word`.
    fn candidates(&self, word: &str) -> &[String] {
        match letter_key(word) {
            Some(key) => match self.by_first_letter[key] {
                Some((start, end)) => &self.words[start..end],
                None => &[],
            },
            None => &self.words,
        }
    }
}

impl DictionaryOracle for WordTable {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn contains(&self, word: &str) -> bool {
        if !self.loaded {
            tracing::warn!(word, "dictionary lookup before the table was loaded");
            return false;
        }
        let word = word.to_ascii_lowercase();
        self.candidates(&word)
            .binary_search_by(|entry| entry.as_str().cmp(word.as_str()))
            .is_ok()
    }
}

/// Index into the first-letter table, if the word starts with `a-z`.
fn letter_key(word: &str) -> Option<usize> {
    match word.as_bytes().first() {
        Some(&byte) if byte.is_ascii_lowercase() => Some((byte - b'a') as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_round_trip() {
        let mut table = WordTable::new();
        let loaded = table.load_str("ant\nbat\ncat\ncow\nzebra\n").unwrap();
        assert_eq!(loaded, 5);
        assert!(table.contains("cat"));
        assert!(table.contains("CAT"));
        assert!(table.contains("zebra"));
        assert!(table.contains("ant"));
        assert!(!table.contains("dog"));
        assert!(!table.contains("ca"));
        assert!(!table.contains("cats"));
        assert!(!table.contains(""));
    }

    #[test]
    fn unloaded_table_answers_false() {
        let table = WordTable::new();
        assert!(!table.is_loaded());
        assert!(!table.contains("cat"));
    }

    #[test]
    fn second_load_is_rejected() {
        let mut table = WordTable::new();
        table.load_lines(["cat"]).unwrap();
        assert_eq!(
            table.load_lines(["dog"]),
            Err(DictionaryError::AlreadyLoaded)
        );
        assert!(table.contains("cat"));
        assert!(!table.contains("dog"));
    }

    #[test]
    fn failed_load_leaves_table_unloaded() {
        let mut table = WordTable::new();
        let err = table.load_lines(["cat", "bat"]).unwrap_err();
        assert_eq!(
            err,
            DictionaryError::Unsorted {
                line: 2,
                word: "bat".into()
            }
        );
        assert!(!table.is_loaded());
        assert_eq!(table.load_str("\n  \n"), Err(DictionaryError::Empty));
        assert!(!table.is_loaded());

        // A later, valid load still succeeds.
        table.load_lines(["bat", "cat"]).unwrap();
        assert!(table.contains("bat"));
    }

    #[test]
    fn lines_are_trimmed_and_lowercased() {
        let mut table = WordTable::new();
        table.load_str("  Apple \r\nbanana\n\ncherry").unwrap();
        assert!(table.contains("apple"));
        assert!(table.contains("cherry"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn non_letter_entries_are_searchable() {
        let mut table = WordTable::new();
        table.load_lines(["1st", "cat"]).unwrap();
        assert!(table.contains("1st"));
        assert!(table.contains("cat"));
    }

    #[test]
    fn unload_resets_state() {
        let mut table = WordTable::new();
        table.load_lines(["cat"]).unwrap();
        table.unload();
        assert!(!table.is_loaded());
        assert!(table.is_empty());
        assert!(!table.contains("cat"));
    }
}
