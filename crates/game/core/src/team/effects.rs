//! Word and field effects with turn-based durations.
//!
//! Word effects belong to the active word and are wiped when it switches out.
//! Field effects belong to the team and survive switches.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::word::Stat;

/// How long an effect lasts.
///
/// Ordered by strength: a stronger duration replaces a weaker one when the
/// same effect is applied twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDuration {
    /// Cleared at the next timer advance (end of the current turn).
    Ephemeral,
    /// Remaining turns; cleared when the counter reaches zero.
    Turns(u8),
    /// Never expires on its own.
    Permanent,
}

/// Per-word status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordEffect {
    /// Healing has no effect.
    BlockHeal,
    /// Heals 1/8 max HP at the end of each turn.
    AuraHeal,
    /// Loses 1/8 max HP at the end of each turn.
    AuraHurt,
    /// Cannot act.
    Stun,
    /// Takes no damage.
    Protect,
    /// Takes half damage.
    Defend,
    /// Attackers take a quarter of the damage they deal.
    Retaliate,
    /// Damage is redirected to the attacker.
    Reflect,
    /// Technical point charge is doubled.
    DoubleTp,
    /// Cannot switch out.
    NoEscape,
}

impl WordEffect {
    /// Negative effects removed by Cure and Recover.
    pub const CURABLE: [WordEffect; 4] = [
        WordEffect::BlockHeal,
        WordEffect::AuraHurt,
        WordEffect::Stun,
        WordEffect::NoEscape,
    ];
}

/// Team-wide effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldEffect {
    /// Doubles the active word's Attack.
    Attack,
    /// Doubles the active word's Defend.
    Defend,
    /// Doubles the active word's Speed.
    Speed,
    /// Words switching in lose 1/8 max HP.
    Hazard,
}

impl FieldEffect {
    /// Field effect that doubles `stat`, if any.
    pub const fn doubling(stat: Stat) -> Option<FieldEffect> {
        match stat {
            Stat::Attack => Some(FieldEffect::Attack),
            Stat::Defend => Some(FieldEffect::Defend),
            Stat::Speed => Some(FieldEffect::Speed),
            Stat::MaxHp => None,
        }
    }
}

/// A single effect and its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect<K> {
    pub kind: K,
    pub duration: EffectDuration,
}

/// Fixed-capacity set of effects, at most one entry per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSet<K, const N: usize> {
    effects: ArrayVec<ActiveEffect<K>, N>,
}

pub type WordEffects = EffectSet<WordEffect, { GameConfig::MAX_WORD_EFFECTS }>;
pub type FieldEffects = EffectSet<FieldEffect, { GameConfig::MAX_FIELD_EFFECTS }>;

impl<K, const N: usize> Default for EffectSet<K, N> {
    fn default() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }
}

impl<K: Copy + Eq, const N: usize> EffectSet<K, N> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: K) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn duration(&self, kind: K) -> Option<EffectDuration> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.duration)
    }

    /// Applies an effect.
    ///
    /// If the effect is already active, keeps the stronger of the two durations.
    /// A zero-turn duration is ignored.
    pub fn add(&mut self, kind: K, duration: EffectDuration) {
        if duration == EffectDuration::Turns(0) {
            return;
        }
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.duration = existing.duration.max(duration);
            return;
        }
        // One slot per kind, so N >= number of kinds keeps this from failing.
        let _ = self.effects.try_push(ActiveEffect { kind, duration });
    }

    /// Removes an effect, returning true if it was active.
    pub fn remove(&mut self, kind: K) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Ends one turn: ephemeral effects are cleared, timed effects lose a turn
    /// and are cleared at zero. Returns the kinds that expired.
    pub fn advance(&mut self) -> ArrayVec<K, N> {
        let mut expired = ArrayVec::new();
        self.effects.retain(|effect| {
            let keep = match &mut effect.duration {
                EffectDuration::Permanent => true,
                EffectDuration::Ephemeral => false,
                EffectDuration::Turns(turns) => {
                    *turns = turns.saturating_sub(1);
                    *turns > 0
                }
            };
            if !keep {
                expired.push(effect.kind);
            }
            keep
        });
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect<K>> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
