//! Deterministic word generation.
//!
//! A word's letters decide everything about it:
//!
//! 1. Each letter feeds one stat (see [`letter_stat`]). The per-stat counts are
//!    balanced against the word length to produce base stats.
//! 2. Consecutive letter pairs form *codons* (`first_stat << 2 | second_stat`).
//!    The first time a codon appears it teaches its primary technique, the
//!    second time its advanced technique.
//! 3. Real words (present in the dictionary) start with higher base stats and
//!    convert surplus codons into small stat boosts. Non-words get nothing for
//!    repeats, so spamming letters (`"aaaaaaaa"`) is never rewarded.
//!
//! Identical text, level and dictionary contents always produce an identical
//! [`WordEntity`].

use arrayvec::ArrayVec;

use super::entity::{Moveset, WordEntity, WordText};
use super::error::GenerationError;
use super::stats::{Stat, StatBlock, letter_stat};
use crate::config::GameConfig;
use crate::dictionary::DictionaryOracle;
use crate::technique::Technique;

/// Base stat every word starts from.
const INITIAL_BASE_STAT: u32 = 40;
/// Extra base stat for words found in the dictionary.
const REAL_WORD_BONUS: u32 = 30;
/// Scale applied to each stat's letter count before balancing.
const LETTER_WEIGHT: u32 = 60;
/// Base stat boost granted to a real word for a surplus codon.
const CODON_STAT_BOOST: u32 = 2;

/// Number of distinct codons (4 stats x 4 stats).
pub const N_CODONS: usize = 16;

/// Techniques taught by each codon: `[primary, advanced]`.
const CODON_TECHNIQUES: [[Technique; 2]; N_CODONS] = [
    // Health-dominant
    [Technique::Heal, Technique::Recover],        // HH
    [Technique::Drain, Technique::AntiHeal],      // HA
    [Technique::Cure, Technique::Aura],           // HD
    [Technique::Emergency, Technique::TeamHeal],  // HS
    // Attack-dominant
    [Technique::Smash, Technique::Explosion],     // AH
    [Technique::Charge, Technique::Break],        // AA
    [Technique::Stun, Technique::Blunt],          // AD
    [Technique::Wrap, Technique::Slow],           // AS
    // Defend-dominant
    [Technique::Protect, Technique::SlowSwitch],  // DH
    [Technique::Tank, Technique::Retaliate],      // DA
    [Technique::Bolster, Technique::Screen],      // DD
    [Technique::SlowAttack, Technique::Reflect],  // DS
    // Speed-dominant
    [Technique::Concentrate, Technique::Steal],   // SH
    [Technique::SwitchAttack, Technique::QuickAttack], // SA
    [Technique::Hazard, Technique::Eject],        // SD
    [Technique::Quicken, Technique::Swift],       // SS
];

/// An ordered pair of letter stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Codon {
    pub first: Stat,
    pub second: Stat,
}

impl Codon {
    pub const fn new(first: Stat, second: Stat) -> Self {
        Self { first, second }
    }

    /// Unique 4-bit key of the codon.
    pub const fn key(self) -> usize {
        ((self.first.bits() << 2) | self.second.bits()) as usize
    }

    /// Technique taught by the `occurrence`-th appearance of this codon (0-based).
    ///
    /// Returns [`Technique::None`] once both techniques have been handed out.
    pub fn technique(self, occurrence: u8) -> Technique {
        let Some(slots) = CODON_TECHNIQUES.get(self.key()) else {
            debug_assert!(false, "codon key {} out of range", self.key());
            tracing::error!(codon = self.key(), "codon table lookup out of range");
            return Technique::None;
        };
        slots
            .get(occurrence as usize)
            .copied()
            .unwrap_or(Technique::None)
    }
}

/// Generates a word from `text` at `level`.
///
/// # Errors
///
/// - [`GenerationError::InvalidLength`] unless `2 <= len <= 16`
/// - [`GenerationError::InvalidLevel`] unless `1 <= level <= 100`
/// - [`GenerationError::InvalidLetter`] for any character outside `a-z` / `A-Z`
/// - [`GenerationError::DictionaryNotLoaded`] if the dictionary has not been loaded
pub fn generate(
    text: &str,
    level: u32,
    dictionary: &(impl DictionaryOracle + ?Sized),
) -> Result<WordEntity, GenerationError> {
    let length = text.chars().count();
    if !(GameConfig::MIN_WORD_LENGTH..=GameConfig::MAX_WORD_LENGTH).contains(&length) {
        return Err(GenerationError::InvalidLength {
            length,
            min: GameConfig::MIN_WORD_LENGTH,
            max: GameConfig::MAX_WORD_LENGTH,
        });
    }
    if !(GameConfig::MIN_LEVEL..=GameConfig::MAX_LEVEL).contains(&level) {
        return Err(GenerationError::InvalidLevel {
            level,
            min: GameConfig::MIN_LEVEL,
            max: GameConfig::MAX_LEVEL,
        });
    }

    let mut letters: ArrayVec<Stat, { GameConfig::MAX_WORD_LENGTH }> = ArrayVec::new();
    for (position, letter) in text.chars().enumerate() {
        let stat = letter_stat(letter).ok_or(GenerationError::InvalidLetter { letter, position })?;
        letters.push(stat);
    }

    if !dictionary.is_loaded() {
        return Err(GenerationError::DictionaryNotLoaded);
    }

    // Only ASCII letters remain, so byte length equals letter count.
    let mut display = WordText::new();
    display.push_str(&text.to_ascii_uppercase());
    let is_real = dictionary.contains(&text.to_ascii_lowercase());

    let mut base_stats = balanced_base_stats(&letters, is_real);
    let techniques = read_codons(&letters, is_real, &mut base_stats);
    let base_stats = base_stats.map(|_, value| {
        value.clamp(GameConfig::MIN_BASE_STAT, GameConfig::MAX_BASE_STAT)
    });

    let word = WordEntity::from_generated(display, is_real, level, base_stats, techniques);
    tracing::trace!(
        word = word.text(),
        is_real,
        bst = word.base_stat_total(),
        rank = %word.rank(),
        "generated word"
    );
    Ok(word)
}

/// Turns per-stat letter counts into unclamped base stats.
fn balanced_base_stats(letters: &[Stat], is_real: bool) -> StatBlock {
    // MaxHp alone starts with one count.
    let mut counts = StatBlock::new(1, 0, 0, 0);
    for &stat in letters {
        counts[stat] += 1;
    }

    let stat_average = 1 + (counts.total() + 3) / 4;
    let initial = if is_real {
        INITIAL_BASE_STAT + REAL_WORD_BONUS
    } else {
        INITIAL_BASE_STAT
    };

    // Multiply before dividing to keep precision.
    counts.map(|_, count| initial + count * LETTER_WEIGHT / stat_average)
}

/// Walks the word's codons cyclically, collecting techniques and, for real
/// words, boosting `base_stats` whenever a codon teaches nothing new.
fn read_codons(letters: &[Stat], is_real: bool, base_stats: &mut StatBlock) -> Moveset {
    let mut occurrences = [0u8; N_CODONS];
    let mut techniques = Moveset::new();
    let length = letters.len();

    for i in 1..=length {
        let codon = Codon::new(letters[i - 1], letters[i % length]);
        let seen = &mut occurrences[codon.key()];
        let technique = codon.technique(*seen);
        *seen = seen.saturating_add(1);

        let learned = !technique.is_none()
            && !techniques.is_full()
            && !techniques.contains(&technique);
        if learned {
            techniques.push(technique);
        } else if is_real {
            // Boosting the same stat twice is fine.
            base_stats[codon.first] += CODON_STAT_BOOST;
            base_stats[codon.second] += CODON_STAT_BOOST;
        }
    }

    techniques
}
