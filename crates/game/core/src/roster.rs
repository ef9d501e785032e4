//! Arena of owned words addressed by generation-checked handles.
//!
//! A [`WordHandle`] stays valid until the word it points at is removed. After
//! removal the slot may be reused, but the old handle no longer resolves
//! because the slot's generation has moved on.

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::word::WordEntity;

/// Stable reference to a word inside a [`WordRoster`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordHandle {
    index: u16,
    generation: u32,
}

impl WordHandle {
    pub fn index(&self) -> usize {
        usize::from(self.index)
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl core::fmt::Display for WordHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "word#{}v{}", self.index, self.generation)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot {
    generation: u32,
    word: Option<WordEntity>,
}

/// Errors raised by roster bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("roster is full (capacity {capacity})")]
    Full { capacity: usize },

    #[error("{handle} does not refer to a word in this roster")]
    StaleHandle { handle: WordHandle },

    /// Slot bookkeeping disagrees with itself (e.g. after loading bad data).
    #[error("inconsistent roster: {reason}")]
    Inconsistent { reason: &'static str },

    #[error("{handle} holds an inconsistent word: {reason}")]
    InconsistentWord {
        handle: WordHandle,
        reason: &'static str,
    },
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RosterError::Full { .. } => ErrorSeverity::Validation,
            RosterError::StaleHandle { .. } => ErrorSeverity::Internal,
            RosterError::Inconsistent { .. } | RosterError::InconsistentWord { .. } => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RosterError::Full { .. } => "ROSTER_FULL",
            RosterError::StaleHandle { .. } => "ROSTER_STALE_HANDLE",
            RosterError::Inconsistent { .. } => "ROSTER_INCONSISTENT",
            RosterError::InconsistentWord { .. } => "ROSTER_INCONSISTENT_WORD",
        }
    }
}

/// Fixed-capacity owner of [`WordEntity`] values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordRoster {
    slots: Vec<Slot>,
    free: Vec<u16>,
    len: usize,
    capacity: usize,
}

impl Default for WordRoster {
    fn default() -> Self {
        Self::new()
    }
}

impl WordRoster {
    /// Creates an empty roster holding up to [`GameConfig::MAX_ROSTER_SIZE`] words.
    pub fn new() -> Self {
        Self::with_capacity(GameConfig::MAX_ROSTER_SIZE)
    }

    /// Creates an empty roster with a custom capacity (at most `u16::MAX` words).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(usize::from(u16::MAX));
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    /// Moves a word into the roster and returns its handle.
    pub fn insert(&mut self, word: WordEntity) -> Result<WordHandle, RosterError> {
        if self.is_full() {
            return Err(RosterError::Full {
                capacity: self.capacity,
            });
        }

        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[usize::from(index)];
                slot.word = Some(word);
                WordHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                // `len < capacity <= u16::MAX` with no free slot means `slots.len() == len`.
                let index = self.slots.len() as u16;
                self.slots.push(Slot {
                    generation: 0,
                    word: Some(word),
                });
                WordHandle {
                    index,
                    generation: 0,
                }
            }
        };
        self.len += 1;
        Ok(handle)
    }

    /// Removes a word, invalidating its handle.
    pub fn remove(&mut self, handle: WordHandle) -> Result<WordEntity, RosterError> {
        let slot = self
            .slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .ok_or(RosterError::StaleHandle { handle })?;
        let word = slot.word.take().ok_or(RosterError::StaleHandle { handle })?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Ok(word)
    }

    pub fn contains(&self, handle: WordHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: WordHandle) -> Option<&WordEntity> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.word.as_ref())
    }

    pub fn get_mut(&mut self, handle: WordHandle) -> Option<&mut WordEntity> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.word.as_mut())
    }

    /// Like [`get`](Self::get) but reports a stale handle as an error.
    pub fn word(&self, handle: WordHandle) -> Result<&WordEntity, RosterError> {
        self.get(handle).ok_or(RosterError::StaleHandle { handle })
    }

    /// Like [`get_mut`](Self::get_mut) but reports a stale handle as an error.
    pub fn word_mut(&mut self, handle: WordHandle) -> Result<&mut WordEntity, RosterError> {
        self.get_mut(handle).ok_or(RosterError::StaleHandle { handle })
    }

    /// Iterates live words in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (WordHandle, &WordEntity)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.word.as_ref().map(|word| {
                (
                    WordHandle {
                        index: index as u16,
                        generation: slot.generation,
                    },
                    word,
                )
            })
        })
    }

    pub fn handles(&self) -> impl Iterator<Item = WordHandle> + '_ {
        self.iter().map(|(handle, _)| handle)
    }

    /// Checks slot bookkeeping and every stored word. Used after loading saved data.
    ///
    /// A roster that passes can be inserted into and removed from without
    /// indexing outside `slots`.
    pub fn validate(&self) -> Result<(), RosterError> {
        let inconsistent = |reason: &'static str| RosterError::Inconsistent { reason };
        if self.capacity > usize::from(u16::MAX) || self.slots.len() > self.capacity {
            return Err(inconsistent("more slots than the capacity allows"));
        }
        let occupied = self.slots.iter().filter(|slot| slot.word.is_some()).count();
        if occupied != self.len {
            return Err(inconsistent("length does not match the occupied slots"));
        }
        if self.free.len() != self.slots.len() - occupied {
            return Err(inconsistent("free list does not match the empty slots"));
        }
        let mut listed = vec![false; self.slots.len()];
        for &index in &self.free {
            let index = usize::from(index);
            if !self.slots.get(index).is_some_and(|slot| slot.word.is_none()) {
                return Err(inconsistent("free list names a missing or occupied slot"));
            }
            if core::mem::replace(&mut listed[index], true) {
                return Err(inconsistent("free list names a slot twice"));
            }
        }
        for (handle, word) in self.iter() {
            word.validate()
                .map_err(|reason| RosterError::InconsistentWord { handle, reason })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordTable;
    use crate::word::generate;

    fn word(text: &str) -> WordEntity {
        let mut table = WordTable::new();
        table.load_lines(["cat"]).unwrap();
        generate(text, 5, &table).unwrap()
    }

    #[test]
    fn insert_get_remove() {
        let mut roster = WordRoster::new();
        let cat = roster.insert(word("cat")).unwrap();
        let dog = roster.insert(word("dog")).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.word(cat).unwrap().text(), "CAT");
        assert_eq!(roster.word(dog).unwrap().text(), "DOG");

        let removed = roster.remove(cat).unwrap();
        assert_eq!(removed.text(), "CAT");
        assert_eq!(roster.len(), 1);
        assert!(!roster.contains(cat));
        assert_eq!(
            roster.remove(cat),
            Err(RosterError::StaleHandle { handle: cat })
        );
    }

    #[test]
    fn reused_slots_reject_old_handles() {
        let mut roster = WordRoster::new();
        let first = roster.insert(word("cat")).unwrap();
        roster.remove(first).unwrap();
        let second = roster.insert(word("owl")).unwrap();

        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);
        assert!(roster.get(first).is_none());
        assert_eq!(roster.word(second).unwrap().text(), "OWL");
    }

    #[test]
    fn capacity_is_enforced() {
        let mut roster = WordRoster::with_capacity(2);
        roster.insert(word("ab")).unwrap();
        roster.insert(word("cd")).unwrap();
        assert_eq!(
            roster.insert(word("ef")),
            Err(RosterError::Full { capacity: 2 })
        );
    }

    #[test]
    fn validation_accepts_rosters_built_through_the_api() {
        let mut roster = WordRoster::new();
        let ant = roster.insert(word("ant")).unwrap();
        roster.insert(word("bee")).unwrap();
        roster.remove(ant).unwrap();
        assert_eq!(roster.validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_broken_bookkeeping() {
        let dangling = WordRoster {
            slots: Vec::new(),
            free: vec![7],
            len: 0,
            capacity: 100,
        };
        assert!(matches!(
            dangling.validate(),
            Err(RosterError::Inconsistent { .. })
        ));

        let mut occupied_free = WordRoster::new();
        occupied_free.insert(word("cat")).unwrap();
        occupied_free.free.push(0);
        assert!(matches!(
            occupied_free.validate(),
            Err(RosterError::Inconsistent { .. })
        ));

        let mut miscounted = WordRoster::new();
        miscounted.insert(word("cat")).unwrap();
        miscounted.len = 2;
        assert!(matches!(
            miscounted.validate(),
            Err(RosterError::Inconsistent { .. })
        ));

        let mut repeated = WordRoster::new();
        let cat = repeated.insert(word("cat")).unwrap();
        repeated.insert(word("dog")).unwrap();
        repeated.remove(cat).unwrap();
        repeated.slots.push(Slot {
            generation: 0,
            word: None,
        });
        repeated.free.push(0);
        assert!(matches!(
            repeated.validate(),
            Err(RosterError::Inconsistent { .. })
        ));
    }

    #[test]
    fn iteration_skips_removed_words() {
        let mut roster = WordRoster::new();
        let a = roster.insert(word("ant")).unwrap();
        let b = roster.insert(word("bee")).unwrap();
        let c = roster.insert(word("cow")).unwrap();
        roster.remove(b).unwrap();

        let handles: Vec<_> = roster.handles().collect();
        assert_eq!(handles, vec![a, c]);
    }
}
