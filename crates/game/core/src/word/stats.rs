//! The four word stats and the letter-stat table.
//!
//! Every letter of the alphabet feeds exactly one stat. Vowels (and Y) build
//! health, harsh consonants build attack, plosives build defend and the
//! remaining consonants build speed.

use core::ops::{Index, IndexMut};

use crate::config::GameConfig;

/// One of the four word statistics.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Stat {
    #[strum(serialize = "Max HP")]
    MaxHp = 0,
    Attack = 1,
    Defend = 2,
    Speed = 3,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::MaxHp, Stat::Attack, Stat::Defend, Stat::Speed];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Two-bit key used to build codons.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Maps each letter (a-z) to the stat it feeds.
const LETTER_STATS: [Stat; GameConfig::N_LETTERS] = [
    Stat::MaxHp,  // A
    Stat::Defend, // B
    Stat::Speed,  // C
    Stat::Defend, // D
    Stat::MaxHp,  // E
    Stat::Attack, // F
    Stat::Defend, // G
    Stat::Speed,  // H
    Stat::MaxHp,  // I
    Stat::Attack, // J
    Stat::Attack, // K
    Stat::Speed,  // L
    Stat::Defend, // M
    Stat::Speed,  // N
    Stat::MaxHp,  // O
    Stat::Speed,  // P
    Stat::Speed,  // Q
    Stat::Attack, // R
    Stat::Attack, // S
    Stat::Defend, // T
    Stat::MaxHp,  // U
    Stat::Attack, // V
    Stat::Defend, // W
    Stat::Attack, // X
    Stat::MaxHp,  // Y
    Stat::Speed,  // Z
];

/// Returns the stat associated with a Latin letter of either case.
///
/// Returns `None` for anything outside `a-z` / `A-Z`.
pub fn letter_stat(letter: char) -> Option<Stat> {
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    let index = (letter.to_ascii_lowercase() as u8 - b'a') as usize;
    LETTER_STATS.get(index).copied()
}

/// A value for each of the four stats, indexable by [`Stat`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock([u32; 4]);

impl StatBlock {
    pub const fn new(max_hp: u32, attack: u32, defend: u32, speed: u32) -> Self {
        Self([max_hp, attack, defend, speed])
    }

    pub const fn splat(value: u32) -> Self {
        Self([value; 4])
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        Stat::ALL.iter().map(|&stat| (stat, self[stat]))
    }

    /// Returns true if every stat is at least the matching stat of `other`.
    pub fn dominates(&self, other: &StatBlock) -> bool {
        Stat::ALL.iter().all(|&stat| self[stat] >= other[stat])
    }

    /// Applies `f` to every stat value.
    pub fn map(self, mut f: impl FnMut(Stat, u32) -> u32) -> Self {
        let mut out = self;
        for stat in Stat::ALL {
            out[stat] = f(stat, self[stat]);
        }
        out
    }
}

impl Index<Stat> for StatBlock {
    type Output = u32;

    fn index(&self, stat: Stat) -> &u32 {
        &self.0[stat.index()]
    }
}

impl IndexMut<Stat> for StatBlock {
    fn index_mut(&mut self, stat: Stat) -> &mut u32 {
        &mut self.0[stat.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vowels_feed_health() {
        for letter in ['a', 'e', 'i', 'o', 'u', 'y', 'A', 'Y'] {
            assert_eq!(letter_stat(letter), Some(Stat::MaxHp), "{letter}");
        }
    }

    #[test]
    fn consonant_groups() {
        for letter in "fjkrsvx".chars() {
            assert_eq!(letter_stat(letter), Some(Stat::Attack), "{letter}");
        }
        for letter in "bdgmtw".chars() {
            assert_eq!(letter_stat(letter), Some(Stat::Defend), "{letter}");
        }
        for letter in "chlnpqz".chars() {
            assert_eq!(letter_stat(letter), Some(Stat::Speed), "{letter}");
        }
    }

    #[test]
    fn non_latin_letters_have_no_stat() {
        assert_eq!(letter_stat('é'), None);
        assert_eq!(letter_stat('-'), None);
        assert_eq!(letter_stat('3'), None);
        assert_eq!(letter_stat(' '), None);
    }

    #[test]
    fn stat_block_indexing_and_total() {
        let mut block = StatBlock::new(1, 2, 3, 4);
        block[Stat::Speed] += 6;
        assert_eq!(block[Stat::Speed], 10);
        assert_eq!(block.total(), 16);
        assert!(block.dominates(&StatBlock::new(1, 2, 3, 4)));
        assert!(!StatBlock::splat(1).dominates(&block));
    }
}
