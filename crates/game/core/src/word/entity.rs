//! Runtime state of a generated word.

use arrayvec::{ArrayString, ArrayVec};

use super::{Rank, Stat, StatBlock};
use crate::config::GameConfig;
use crate::technique::Technique;

/// Display text of a word (uppercase, at most 16 letters).
pub type WordText = ArrayString<{ GameConfig::MAX_WORD_LENGTH }>;

/// Techniques learned by a word, in the order they were learned.
pub type Moveset = ArrayVec<Technique, { GameConfig::MAX_TECHNIQUES }>;

/// A combat-ready word.
///
/// # Invariants
///
/// - `base_stats`, `rank`, `techniques`, `text` and `is_real` never change after creation
/// - `stats` always equals `computed_stats(base_stats, level)`
/// - `current_hp <= stats[MaxHp]`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordEntity {
    // === Constant properties ===
    text: WordText,
    is_real: bool,
    base_stats: StatBlock,
    rank: Rank,
    techniques: Moveset,

    // === Level-dependent (recomputed on level up) ===
    level: u32,
    stats: StatBlock,

    // === Mutable ===
    current_hp: u32,
    /// Experience still required before the next level up.
    experience: u32,
    experience_to_next_level: u32,
}

impl WordEntity {
    /// Assembles a freshly generated word at full health.
    pub(crate) fn from_generated(
        text: WordText,
        is_real: bool,
        level: u32,
        base_stats: StatBlock,
        techniques: Moveset,
    ) -> Self {
        let stats = computed_stats(&base_stats, level);
        let needed = experience_needed(level);
        Self {
            text,
            is_real,
            rank: Rank::from_total(base_stats.total()),
            base_stats,
            techniques,
            level,
            stats,
            current_hp: stats[Stat::MaxHp],
            experience: needed,
            experience_to_next_level: needed,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_real(&self) -> bool {
        self.is_real
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn base_stats(&self) -> &StatBlock {
        &self.base_stats
    }

    /// Sum of the four base stats.
    pub fn base_stat_total(&self) -> u32 {
        self.base_stats.total()
    }

    pub fn techniques(&self) -> &[Technique] {
        &self.techniques
    }

    /// Returns true if the word may use `technique` in battle.
    pub fn knows(&self, technique: Technique) -> bool {
        technique.is_basic() || self.techniques.contains(&technique)
    }

    /// Level-scaled stats.
    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn stat(&self, stat: Stat) -> u32 {
        self.stats[stat]
    }

    pub fn max_hp(&self) -> u32 {
        self.stats[Stat::MaxHp]
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn experience_to_next_level(&self) -> u32 {
        self.experience_to_next_level
    }

    /// Heals (`delta > 0`) or damages (`delta < 0`) the word.
    ///
    /// HP is clamped to `[0, max_hp]`. Returns the change that was actually applied.
    pub fn change_current_hp(&mut self, delta: i64) -> i64 {
        let before = i64::from(self.current_hp);
        let after = (before + delta).clamp(0, i64::from(self.max_hp()));
        self.current_hp = after as u32;
        after - before
    }

    /// Awards experience, levelling up as many times as the amount allows.
    ///
    /// Levels stop at [`GameConfig::MAX_LEVEL`]. Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        let start_level = self.level;
        let mut remaining = amount;
        loop {
            if remaining <= self.experience {
                self.experience -= remaining;
                break;
            }
            remaining -= self.experience;
            if self.level >= GameConfig::MAX_LEVEL {
                self.experience = 0;
                break;
            }
            self.level += 1;
            self.experience_to_next_level = experience_needed(self.level);
            self.experience = self.experience_to_next_level;
        }

        if self.level != start_level {
            self.stats = computed_stats(&self.base_stats, self.level);
            self.current_hp = self.current_hp.min(self.max_hp());
            tracing::debug!(word = %self.text, level = self.level, "word levelled up");
        }
        self.level - start_level
    }

    /// Checks the invariants listed on the type. Used after loading saved data.
    ///
    /// Bounds are checked before anything derived from them is recomputed.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        let letters = GameConfig::MIN_WORD_LENGTH..=GameConfig::MAX_WORD_LENGTH;
        if !letters.contains(&self.text.len())
            || !self.text.bytes().all(|byte| byte.is_ascii_uppercase())
        {
            return Err("text is not 2 to 16 uppercase letters");
        }
        if !(GameConfig::MIN_LEVEL..=GameConfig::MAX_LEVEL).contains(&self.level) {
            return Err("level out of range");
        }
        let bounds = GameConfig::MIN_BASE_STAT..=GameConfig::MAX_BASE_STAT;
        if !self.base_stats.iter().all(|(_, value)| bounds.contains(&value)) {
            return Err("base stat out of range");
        }
        if self.rank != Rank::from_total(self.base_stats.total()) {
            return Err("rank does not match base stats");
        }
        let repeated = self.techniques.iter().enumerate().any(|(i, technique)| {
            technique.is_none() || self.techniques[i + 1..].contains(technique)
        });
        if repeated {
            return Err("moveset holds None or a repeated technique");
        }
        if self.stats != computed_stats(&self.base_stats, self.level) {
            return Err("stats do not match base stats and level");
        }
        if self.current_hp > self.max_hp() {
            return Err("current HP above maximum");
        }
        if self.experience_to_next_level != experience_needed(self.level)
            || self.experience > self.experience_to_next_level
        {
            return Err("experience counter out of range");
        }
        Ok(())
    }
}

/// `base * (level + 5) * 3 / 100`, truncating.
pub fn computed_stats(base: &StatBlock, level: u32) -> StatBlock {
    base.map(|_, value| value * (level + 5) * 3 / 100)
}

/// Experience needed to move from level `n` to level `n + 1`.
pub const fn experience_needed(level: u32) -> u32 {
    level * level
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(level: u32) -> WordEntity {
        let mut text = WordText::new();
        text.push_str("SAMPLE");
        WordEntity::from_generated(
            text,
            false,
            level,
            StatBlock::new(100, 80, 60, 40),
            Moveset::new(),
        )
    }

    #[test]
    fn computed_stats_follow_level_formula() {
        let word = sample(50);
        // 100 * 55 * 3 / 100 = 165
        assert_eq!(word.max_hp(), 165);
        // 80 * 55 * 3 / 100 = 132
        assert_eq!(word.stat(Stat::Attack), 132);
        // 40 * 55 * 3 / 100 = 66
        assert_eq!(word.stat(Stat::Speed), 66);
        assert_eq!(word.current_hp(), 165);
        assert_eq!(word.experience_to_next_level(), 2500);
    }

    #[test]
    fn hp_changes_are_clamped() {
        let mut word = sample(10);
        let max = word.max_hp();
        assert_eq!(word.change_current_hp(50), 0);
        assert_eq!(word.current_hp(), max);

        let applied = word.change_current_hp(-10_000);
        assert_eq!(applied, -i64::from(max));
        assert!(word.is_fainted());

        assert_eq!(word.change_current_hp(5), 5);
        assert_eq!(word.current_hp(), 5);
    }

    #[test]
    fn experience_counts_down_then_levels() {
        let mut word = sample(2);
        assert_eq!(word.experience(), 4);

        // Exactly exhausting the counter does not level up.
        assert_eq!(word.gain_experience(4), 0);
        assert_eq!(word.experience(), 0);

        // One more point rolls over into level 3 (needs 9).
        assert_eq!(word.gain_experience(1), 1);
        assert_eq!(word.level(), 3);
        assert_eq!(word.experience(), 8);
        assert_eq!(word.experience_to_next_level(), 9);
        assert_eq!(word.stats(), &computed_stats(word.base_stats(), 3));
    }

    #[test]
    fn large_experience_gains_span_several_levels() {
        let mut word = sample(1);
        // 1 (lv1) + 4 (lv2) + 9 (lv3) = 14 takes the word to level 4 with 1 point to spare.
        assert_eq!(word.gain_experience(15), 3);
        assert_eq!(word.level(), 4);
        assert_eq!(word.experience(), 16 - 1);
    }

    #[test]
    fn levels_cap_at_maximum() {
        let mut word = sample(99);
        word.gain_experience(u32::MAX);
        assert_eq!(word.level(), GameConfig::MAX_LEVEL);
        assert_eq!(word.experience(), 0);
    }

    #[test]
    fn validation_catches_tampered_fields() {
        let word = sample(50);
        assert_eq!(word.validate(), Ok(()));

        let mut overhealed = word.clone();
        overhealed.current_hp = overhealed.max_hp() + 1;
        assert_eq!(overhealed.validate(), Err("current HP above maximum"));

        let mut stale_stats = word.clone();
        stale_stats.level = 51;
        assert_eq!(
            stale_stats.validate(),
            Err("stats do not match base stats and level")
        );

        let mut huge = word.clone();
        huge.base_stats = StatBlock::splat(u32::MAX);
        assert_eq!(huge.validate(), Err("base stat out of range"));

        let mut lowercase = word;
        lowercase.text = WordText::new();
        lowercase.text.push_str("sample");
        assert_eq!(
            lowercase.validate(),
            Err("text is not 2 to 16 uppercase letters")
        );
    }

    #[test]
    fn basic_techniques_are_always_known() {
        let word = sample(5);
        assert!(word.knows(Technique::Attack));
        assert!(word.knows(Technique::Defend));
        assert!(word.knows(Technique::Switch));
        assert!(!word.knows(Technique::Explosion));
        assert!(!word.knows(Technique::None));
    }
}
