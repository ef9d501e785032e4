//! Turn resolution.
//!
//! A turn runs in four phases:
//!
//! 1. **Selection**: both actions are validated; an illegal one rejects the
//!    whole turn without changing anything.
//! 2. **Ordering**: priority tier, then boosted Speed, then users first.
//! 3. **Execution**: each action runs to completion before the next begins.
//! 4. **End of turn**: auras, effect timers, technical point charge.
//!
//! The battle ends as soon as a team is defeated.

use core::cmp::Ordering;

use super::{
    ActionError, Battle, BattleAction, BattleError, BattleEvent, BattleOutcome, DamageCause, Side,
    SkipReason, TurnReport, fraction_of,
};
use crate::roster::{WordHandle, WordRoster};
use crate::team::{Team, WordEffect};
use crate::technique::Technique;
use crate::word::{Stat, WordEntity};

/// Divisor applied to max HP for auras and hazards.
pub(super) const PASSIVE_DIVISOR: u32 = 8;

/// Mutating view over a [`Battle`] and the rosters owning each side's words.
pub struct BattleEngine<'a> {
    pub(super) battle: &'a mut Battle,
    pub(super) users: &'a mut WordRoster,
    pub(super) enemies: &'a mut WordRoster,
}

impl<'a> BattleEngine<'a> {
    pub fn new(
        battle: &'a mut Battle,
        users: &'a mut WordRoster,
        enemies: &'a mut WordRoster,
    ) -> Self {
        Self {
            battle,
            users,
            enemies,
        }
    }

    pub fn battle(&self) -> &Battle {
        &*self.battle
    }

    pub fn roster(&self, side: Side) -> &WordRoster {
        match side {
            Side::Users => &*self.users,
            Side::Enemies => &*self.enemies,
        }
    }

    pub(super) fn side(&self, side: Side) -> (&Team, &WordRoster) {
        (self.battle.team(side), self.roster(side))
    }

    pub(super) fn side_mut(&mut self, side: Side) -> (&mut Team, &mut WordRoster) {
        match side {
            Side::Users => (&mut self.battle.users, &mut *self.users),
            Side::Enemies => (&mut self.battle.enemies, &mut *self.enemies),
        }
    }

    pub(super) fn active(&self, side: Side) -> Result<&WordEntity, BattleError> {
        let (team, roster) = self.side(side);
        team.active_word(roster).map_err(BattleError::team(side))
    }

    pub(super) fn active_handle(&self, side: Side) -> WordHandle {
        self.battle.team(side).active()
    }

    pub(super) fn boosted(&self, side: Side, stat: Stat) -> Result<u32, BattleError> {
        let (team, roster) = self.side(side);
        team.boosted_stat(roster, stat)
            .map_err(BattleError::team(side))
    }

    /// True when `side` has a fainted active word but can still fight.
    pub fn needs_replacement(&self, side: Side) -> bool {
        if self.battle.is_over() {
            return false;
        }
        let (team, roster) = self.side(side);
        let active_down = roster
            .get(team.active())
            .is_none_or(|word| word.is_fainted());
        active_down && !team.is_defeated(roster)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Checks whether `side` may take `action` right now.
    pub fn validate(&self, side: Side, action: &BattleAction) -> Result<(), BattleError> {
        let illegal = |error| BattleError::IllegalAction { side, error };
        let (team, roster) = self.side(side);
        let word = self.active(side)?;
        if word.is_fainted() {
            return Err(BattleError::NoLivingActiveWord { side });
        }

        let technique = action.technique();
        if technique.is_none() {
            return Err(illegal(ActionError::NoneTechnique));
        }
        match action {
            BattleAction::Technique(technique) if technique.is_switch() => {
                return Err(illegal(ActionError::MissingSwitchTarget {
                    technique: *technique,
                }));
            }
            BattleAction::Switch { technique, .. } if !technique.is_switch() => {
                return Err(illegal(ActionError::NotASwitch {
                    technique: *technique,
                }));
            }
            _ => {}
        }
        if !word.knows(technique) {
            return Err(illegal(ActionError::UnknownTechnique { technique }));
        }
        if !team.can_afford(technique.cost()) {
            return Err(illegal(ActionError::NotEnoughTechnicalPoints {
                technique,
                cost: technique.cost(),
                available: team.technical_points(),
            }));
        }
        if team.has_word_effect(WordEffect::Stun) {
            return Err(illegal(ActionError::Stunned));
        }

        match action {
            BattleAction::Switch { target, .. } => {
                if team.has_word_effect(WordEffect::NoEscape) {
                    return Err(illegal(ActionError::NoEscape));
                }
                team.validate_switch(roster, *target)
                    .map_err(|error| illegal(ActionError::Switch(error)))
            }
            BattleAction::Technique(_) => {
                if self.active(side.opponent())?.is_fainted() {
                    return Err(illegal(ActionError::TargetFainted));
                }
                Ok(())
            }
        }
    }

    // ========================================================================
    // Turn
    // ========================================================================

    /// Resolves one full turn.
    ///
    /// # Errors
    ///
    /// - [`BattleError::BattleOver`] once the battle has an outcome
    /// - [`BattleError::ReplacementRequired`] while a fainted active word awaits replacement
    /// - [`BattleError::IllegalAction`] if either action fails validation
    ///
    /// None of these change any state.
    pub fn resolve_turn(
        &mut self,
        user_action: BattleAction,
        enemy_action: BattleAction,
    ) -> Result<TurnReport, BattleError> {
        if self.battle.is_over() {
            return Err(BattleError::BattleOver {
                outcome: self.battle.outcome,
            });
        }
        for side in Side::BOTH {
            if self.needs_replacement(side) {
                return Err(BattleError::ReplacementRequired { side });
            }
        }
        self.validate(Side::Users, &user_action)?;
        self.validate(Side::Enemies, &enemy_action)?;

        let mut report = TurnReport::new(self.battle.turn);
        let order = self.order(user_action, enemy_action)?;
        let user_word = self.active_handle(Side::Users);
        let enemy_word = self.active_handle(Side::Enemies);
        tracing::debug!(
            turn = self.battle.turn,
            first = %order[0].0,
            "resolving turn"
        );

        for (side, action) in order {
            let chooser = match side {
                Side::Users => user_word,
                Side::Enemies => enemy_word,
            };
            self.execute(side, action, chooser, &mut report)?;
            if self.update_outcome(&mut report) {
                break;
            }
        }

        if !self.battle.is_over() {
            self.end_of_turn(&mut report)?;
            self.update_outcome(&mut report);
        }
        self.battle.turn += 1;
        Ok(report)
    }

    /// Swaps a fainted active word for the bench member at `index`.
    ///
    /// Costs nothing, but a Hazard on the field still hits the newcomer.
    pub fn replace_fainted(&mut self, side: Side, index: usize) -> Result<TurnReport, BattleError> {
        if self.battle.is_over() {
            return Err(BattleError::BattleOver {
                outcome: self.battle.outcome,
            });
        }
        if !self.needs_replacement(side) {
            return Err(BattleError::NoReplacementNeeded { side });
        }
        {
            let (team, roster) = self.side(side);
            team.validate_switch(roster, index)
                .map_err(|error| BattleError::IllegalAction {
                    side,
                    error: ActionError::Switch(error),
                })?;
        }

        let mut report = TurnReport::new(self.battle.turn);
        self.switch_in(side, index, &mut report)?;
        self.update_outcome(&mut report);
        Ok(report)
    }

    /// Execution order: priority, then boosted Speed, then users first.
    fn order(
        &self,
        user_action: BattleAction,
        enemy_action: BattleAction,
    ) -> Result<[(Side, BattleAction); 2], BattleError> {
        let users_first = match user_action.priority().cmp(&enemy_action.priority()) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                self.boosted(Side::Users, Stat::Speed)? >= self.boosted(Side::Enemies, Stat::Speed)?
            }
        };
        let users = (Side::Users, user_action);
        let enemies = (Side::Enemies, enemy_action);
        Ok(if users_first {
            [users, enemies]
        } else {
            [enemies, users]
        })
    }

    /// Runs one side's action, or reports why it was skipped.
    fn execute(
        &mut self,
        side: Side,
        action: BattleAction,
        chooser: WordHandle,
        report: &mut TurnReport,
    ) -> Result<(), BattleError> {
        let skip = |reason| BattleEvent::ActionSkipped {
            side,
            action,
            reason,
        };

        let reason = {
            let (team, roster) = self.side(side);
            let word = self.active(side)?;
            if team.active() != chooser {
                Some(SkipReason::SwitchedOut)
            } else if word.is_fainted() {
                Some(SkipReason::Fainted)
            } else if team.has_word_effect(WordEffect::Stun) {
                Some(SkipReason::Stunned)
            } else if !team.can_afford(action.cost()) {
                Some(SkipReason::NotEnoughTechnicalPoints)
            } else {
                match action {
                    BattleAction::Switch { target, .. } => {
                        let blocked = team.has_word_effect(WordEffect::NoEscape)
                            || team.validate_switch(roster, target).is_err();
                        blocked.then_some(SkipReason::IllegalSwitch)
                    }
                    BattleAction::Technique(technique) => {
                        let needs_target =
                            technique.is_damaging() || technique == Technique::AntiHeal;
                        (needs_target && self.active(side.opponent())?.is_fainted())
                            .then_some(SkipReason::NoTarget)
                    }
                }
            }
        };
        if let Some(reason) = reason {
            tracing::trace!(%side, %action, ?reason, "action skipped");
            report.push(skip(reason));
            return Ok(());
        }

        let (team, _) = self.side_mut(side);
        team.spend_technical_points(action.cost())
            .map_err(BattleError::team(side))?;
        report.push(BattleEvent::ActionUsed {
            side,
            word: chooser,
            action,
        });

        match action {
            BattleAction::Switch { target, .. } => self.switch_in(side, target, report),
            BattleAction::Technique(technique) => self.apply_technique(side, technique, report),
        }
    }

    /// Updates the outcome from the teams' state. Returns true if the battle is over.
    fn update_outcome(&mut self, report: &mut TurnReport) -> bool {
        if self.battle.is_over() {
            return true;
        }
        let outcome = BattleOutcome::from_defeats(
            self.battle.users.is_defeated(&*self.users),
            self.battle.enemies.is_defeated(&*self.enemies),
        );
        if outcome.is_over() {
            self.battle.outcome = outcome;
            tracing::debug!(turn = self.battle.turn, %outcome, "battle over");
            report.push(BattleEvent::BattleEnded { outcome });
            return true;
        }
        false
    }

    fn end_of_turn(&mut self, report: &mut TurnReport) -> Result<(), BattleError> {
        for side in Side::BOTH {
            let word = self.active(side)?;
            if word.is_fainted() {
                continue;
            }
            let aura = fraction_of(word.max_hp(), PASSIVE_DIVISOR);
            let team = self.battle.team(side);
            let heals = team.has_word_effect(WordEffect::AuraHeal);
            let hurts = team.has_word_effect(WordEffect::AuraHurt);
            if heals {
                self.heal(side, self.active_handle(side), aura, report)?;
            }
            if hurts {
                self.hurt(side, aura, DamageCause::Aura, report)?;
            }
        }

        let charge = self.battle.config.technical_point_charge;
        for side in Side::BOTH {
            let (team, _) = self.side_mut(side);
            let expired = team.advance_effect_timers();
            let gained = team.charge_technical_points(charge);
            for effect in expired.word {
                report.push(BattleEvent::WordEffectExpired { side, effect });
            }
            for effect in expired.field {
                report.push(BattleEvent::FieldEffectExpired { side, effect });
            }
            if gained > 0 {
                report.push(BattleEvent::TechnicalPointsCharged {
                    side,
                    amount: gained,
                });
            }
        }
        Ok(())
    }
}
