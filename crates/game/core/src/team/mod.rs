//! Battle teams.
//!
//! A [`Team`] references up to three words owned by a [`WordRoster`]. The word
//! in slot 0 is active; the others wait on the bench. Stat boosts and word
//! effects describe the active word and are wiped whenever it changes, while
//! field effects and technical points belong to the team as a whole.

pub mod effects;
mod error;

use arrayvec::ArrayVec;

pub use effects::{
    ActiveEffect, EffectDuration, EffectSet, FieldEffect, FieldEffects, WordEffect, WordEffects,
};
pub use error::TeamError;

use crate::config::GameConfig;
use crate::roster::{WordHandle, WordRoster};
use crate::word::{Stat, WordEntity};

pub type Members = ArrayVec<WordHandle, { GameConfig::MAX_TEAM_SIZE }>;

/// Result of [`Team::change_stat_boost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostChange {
    pub stat: Stat,
    pub previous: i8,
    pub current: i8,
}

impl BoostChange {
    /// False when the boost was already at its limit.
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Effects that expired during [`Team::advance_effect_timers`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpiredEffects {
    pub word: ArrayVec<WordEffect, { GameConfig::MAX_WORD_EFFECTS }>,
    pub field: ArrayVec<FieldEffect, { GameConfig::MAX_FIELD_EFFECTS }>,
}

/// Up to three words fighting together.
///
/// Deserialized teams go through the same checks as [`Team::new`], so the
/// active slot always exists.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TeamState"))]
pub struct Team {
    members: Members,
    stat_boosts: [i8; 4],
    word_effects: WordEffects,
    field_effects: FieldEffects,
    technical_points: u8,
}

impl Team {
    /// Builds a team from 1 to 3 distinct handles; the first becomes active.
    pub fn new(members: impl IntoIterator<Item = WordHandle>) -> Result<Self, TeamError> {
        let mut collected = Members::new();
        let mut count = 0;
        for handle in members {
            count += 1;
            if collected.contains(&handle) {
                return Err(TeamError::DuplicateMember { handle });
            }
            // Keep counting past capacity so the error reports the real size.
            let _ = collected.try_push(handle);
        }
        if !(1..=GameConfig::MAX_TEAM_SIZE).contains(&count) {
            return Err(TeamError::InvalidSize {
                count,
                min: 1,
                max: GameConfig::MAX_TEAM_SIZE,
            });
        }

        Ok(Self {
            members: collected,
            stat_boosts: [0; 4],
            word_effects: WordEffects::empty(),
            field_effects: FieldEffects::empty(),
            technical_points: GameConfig::DEFAULT_STARTING_TECHNICAL_POINTS,
        })
    }

    /// Overrides the starting technical points (clamped to the legal range).
    pub fn with_technical_points(mut self, points: u8) -> Self {
        self.technical_points = points.clamp(
            GameConfig::MIN_TECHNICAL_POINTS,
            GameConfig::MAX_TECHNICAL_POINTS,
        );
        self
    }

    // ===== members =====

    pub fn members(&self) -> &[WordHandle] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn active(&self) -> WordHandle {
        self.members[0]
    }

    pub fn bench(&self) -> &[WordHandle] {
        &self.members[1..]
    }

    /// Resolves the active word.
    pub fn active_word<'r>(&self, roster: &'r WordRoster) -> Result<&'r WordEntity, TeamError> {
        member(roster, self.active())
    }

    pub fn active_word_mut<'r>(
        &self,
        roster: &'r mut WordRoster,
    ) -> Result<&'r mut WordEntity, TeamError> {
        let handle = self.active();
        roster
            .get_mut(handle)
            .ok_or(TeamError::MissingMember { handle })
    }

    /// Index of the first bench member that can still fight.
    pub fn first_living_bench(&self, roster: &WordRoster) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, handle)| roster.get(**handle).is_some_and(|w| !w.is_fainted()))
            .map(|(index, _)| index)
    }

    /// Members that have not fainted.
    pub fn living_members<'r>(
        &'r self,
        roster: &'r WordRoster,
    ) -> impl Iterator<Item = WordHandle> + 'r {
        self.members
            .iter()
            .copied()
            .filter(|handle| roster.get(*handle).is_some_and(|w| !w.is_fainted()))
    }

    /// True when no member can fight. Missing members count as fainted.
    pub fn is_defeated(&self, roster: &WordRoster) -> bool {
        self.living_members(roster).next().is_none()
    }

    /// Checks that `index` is a legal switch target.
    pub fn validate_switch(&self, roster: &WordRoster, index: usize) -> Result<(), TeamError> {
        let len = self.members.len();
        if index >= len {
            return Err(TeamError::SwitchOutOfRange { index, len });
        }
        if index == 0 {
            return Err(TeamError::SwitchToActive { index });
        }
        if member(roster, self.members[index])?.is_fainted() {
            return Err(TeamError::SwitchToFainted { index });
        }
        Ok(())
    }

    /// Brings the member at `index` into the active slot.
    ///
    /// Word effects and stat boosts are cleared; field effects stay.
    pub fn switch_active(&mut self, roster: &WordRoster, index: usize) -> Result<(), TeamError> {
        self.validate_switch(roster, index)?;
        self.members.swap(0, index);
        self.stat_boosts = [0; 4];
        self.word_effects.clear();
        tracing::trace!(active = %self.active(), "switched active word");
        Ok(())
    }

    // ===== stat boosts =====

    pub fn stat_boost(&self, stat: Stat) -> i8 {
        self.stat_boosts[stat.index()]
    }

    /// Adds `delta` to a stat boost, clamped to `[-4, 4]`.
    pub fn change_stat_boost(&mut self, stat: Stat, delta: i8) -> BoostChange {
        let previous = self.stat_boosts[stat.index()];
        let current = previous
            .saturating_add(delta)
            .clamp(GameConfig::MIN_BOOST, GameConfig::MAX_BOOST);
        self.stat_boosts[stat.index()] = current;
        BoostChange {
            stat,
            previous,
            current,
        }
    }

    /// Active word's stat after boosts and field effects, clamped to `[1, 9999]`.
    pub fn boosted_stat(&self, roster: &WordRoster, stat: Stat) -> Result<u32, TeamError> {
        let base = u64::from(self.active_word(roster)?.stat(stat));
        let boost = self.stat_boost(stat);
        let mut value = if boost >= 0 {
            base << boost
        } else {
            base >> boost.unsigned_abs()
        };
        if FieldEffect::doubling(stat).is_some_and(|field| self.field_effects.has(field)) {
            value *= 2;
        }
        let value = value.clamp(
            u64::from(GameConfig::MIN_STAT),
            u64::from(GameConfig::MAX_STAT),
        );
        Ok(value as u32)
    }

    // ===== effects =====

    pub fn word_effects(&self) -> &WordEffects {
        &self.word_effects
    }

    pub fn field_effects(&self) -> &FieldEffects {
        &self.field_effects
    }

    pub fn has_word_effect(&self, kind: WordEffect) -> bool {
        self.word_effects.has(kind)
    }

    pub fn has_field_effect(&self, kind: FieldEffect) -> bool {
        self.field_effects.has(kind)
    }

    pub fn add_word_effect(&mut self, kind: WordEffect, duration: EffectDuration) {
        self.word_effects.add(kind, duration);
    }

    pub fn add_field_effect(&mut self, kind: FieldEffect, duration: EffectDuration) {
        self.field_effects.add(kind, duration);
    }

    pub fn remove_word_effect(&mut self, kind: WordEffect) -> bool {
        self.word_effects.remove(kind)
    }

    pub fn remove_field_effect(&mut self, kind: FieldEffect) -> bool {
        self.field_effects.remove(kind)
    }

    /// Removes every curable word effect, returning how many were active.
    pub fn cure(&mut self) -> usize {
        WordEffect::CURABLE
            .into_iter()
            .filter(|kind| self.word_effects.remove(*kind))
            .count()
    }

    pub fn advance_effect_timers(&mut self) -> ExpiredEffects {
        ExpiredEffects {
            word: self.word_effects.advance(),
            field: self.field_effects.advance(),
        }
    }

    // ===== technical points =====

    pub fn technical_points(&self) -> u8 {
        self.technical_points
    }

    pub fn can_afford(&self, cost: u8) -> bool {
        self.technical_points >= cost
    }

    pub fn spend_technical_points(&mut self, cost: u8) -> Result<(), TeamError> {
        if !self.can_afford(cost) {
            return Err(TeamError::NotEnoughTechnicalPoints {
                cost,
                available: self.technical_points,
            });
        }
        self.technical_points -= cost;
        Ok(())
    }

    /// End-of-turn recharge; doubled while DoubleTp is active. Returns the gain.
    pub fn charge_technical_points(&mut self, amount: u8) -> u8 {
        let amount = if self.word_effects.has(WordEffect::DoubleTp) {
            amount.saturating_mul(2)
        } else {
            amount
        };
        self.gain_technical_points(amount)
    }

    /// Adds points up to the maximum. Returns the gain.
    pub fn gain_technical_points(&mut self, amount: u8) -> u8 {
        let before = self.technical_points;
        self.technical_points = before
            .saturating_add(amount)
            .min(GameConfig::MAX_TECHNICAL_POINTS);
        self.technical_points - before
    }

    /// Removes up to `amount` points. Returns how many were taken.
    pub fn drain_technical_points(&mut self, amount: u8) -> u8 {
        let taken = amount.min(self.technical_points);
        self.technical_points -= taken;
        taken
    }
}

/// Unchecked form of [`Team`] as it appears in serialized data.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TeamState {
    members: Members,
    stat_boosts: [i8; 4],
    word_effects: WordEffects,
    field_effects: FieldEffects,
    technical_points: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<TeamState> for Team {
    type Error = TeamError;

    fn try_from(state: TeamState) -> Result<Self, TeamError> {
        let mut team = Team::new(state.members)?;
        for stat in Stat::ALL {
            let boost = state.stat_boosts[stat.index()];
            if !(GameConfig::MIN_BOOST..=GameConfig::MAX_BOOST).contains(&boost) {
                return Err(TeamError::BoostOutOfRange { stat, boost });
            }
        }
        team.stat_boosts = state.stat_boosts;
        team.word_effects = state.word_effects;
        team.field_effects = state.field_effects;
        Ok(team.with_technical_points(state.technical_points))
    }
}

fn member(roster: &WordRoster, handle: WordHandle) -> Result<&WordEntity, TeamError> {
    roster.get(handle).ok_or(TeamError::MissingMember { handle })
}
