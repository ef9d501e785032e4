//! Technique effects and the HP/effect primitives they are built from.

use super::engine::PASSIVE_DIVISOR;
use super::{
    BattleEngine, BattleError, BattleEvent, DamageCause, Mitigation, Side, TurnReport,
    fraction_of, technique_damage,
};
use crate::roster::WordHandle;
use crate::team::{EffectDuration, FieldEffect, TeamError, WordEffect};
use crate::technique::Technique;
use crate::word::Stat;

/// Technical points Steal takes from the opposing team.
const STEAL_AMOUNT: u8 = 4;

/// How a damaging technique landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strike {
    Blocked,
    Reflected,
    /// Damage dealt to the target.
    Hit(u32),
}

impl BattleEngine<'_> {
    pub(super) fn apply_technique(
        &mut self,
        side: Side,
        technique: Technique,
        report: &mut TurnReport,
    ) -> Result<(), BattleError> {
        let foe = side.opponent();
        let timed = EffectDuration::Turns(self.battle.config().effect_turns);
        let power = technique.power();

        match technique {
            // Rejected during selection.
            Technique::None | Technique::Switch | Technique::SlowSwitch => {}

            Technique::Attack
            | Technique::QuickAttack
            | Technique::SlowAttack
            | Technique::Special => {
                self.strike(side, power, report)?;
            }
            Technique::Defend => {
                self.add_word_effect(side, WordEffect::Defend, EffectDuration::Ephemeral, report);
                let charge = self.battle.config().technical_point_charge;
                let (team, _) = self.side_mut(side);
                let amount = team.charge_technical_points(charge);
                if amount > 0 {
                    report.push(BattleEvent::TechnicalPointsCharged { side, amount });
                }
            }

            // ===== health =====
            Technique::Heal => self.heal_active_fraction(side, 2, report)?,
            Technique::Emergency => self.heal_active_fraction(side, 4, report)?,
            Technique::Recover => {
                self.heal_active_fraction(side, 2, report)?;
                self.cure(side, report);
            }
            Technique::Cure => self.cure(side, report),
            Technique::Drain => {
                if let Strike::Hit(dealt) = self.strike(side, power, report)? {
                    self.heal(side, self.active_handle(side), dealt / 2, report)?;
                }
            }
            Technique::AntiHeal => {
                self.add_word_effect(foe, WordEffect::BlockHeal, timed, report);
            }
            Technique::Aura => self.add_word_effect(side, WordEffect::AuraHeal, timed, report),
            Technique::TeamHeal => {
                let (team, roster) = self.side(side);
                let living: Vec<(WordHandle, u32)> = team
                    .living_members(roster)
                    .filter_map(|handle| {
                        roster
                            .get(handle)
                            .map(|word| (handle, fraction_of(word.max_hp(), PASSIVE_DIVISOR)))
                    })
                    .collect();
                for (handle, amount) in living {
                    self.heal(side, handle, amount, report)?;
                }
            }

            // ===== attack =====
            Technique::Smash => {
                if let Strike::Hit(dealt) = self.strike(side, power, report)? {
                    self.hurt(side, (dealt / 4).max(1), DamageCause::Recoil, report)?;
                }
            }
            Technique::Explosion => {
                self.strike(side, power, report)?;
                let remaining = self.active(side)?.current_hp();
                self.hurt(side, remaining, DamageCause::SelfDestruct, report)?;
            }
            Technique::Charge => self.boost(side, Stat::Attack, 1, report),
            Technique::Bolster => self.boost(side, Stat::Defend, 1, report),
            Technique::Quicken => self.boost(side, Stat::Speed, 1, report),
            Technique::Break => self.strike_then_lower(side, power, Stat::Defend, report)?,
            Technique::Blunt => self.strike_then_lower(side, power, Stat::Attack, report)?,
            Technique::Slow => self.strike_then_lower(side, power, Stat::Speed, report)?,
            Technique::Stun => {
                if self.strike(side, power, report)?.landed() && !self.active(foe)?.is_fainted() {
                    self.add_word_effect(foe, WordEffect::Stun, EffectDuration::Ephemeral, report);
                }
            }
            Technique::Wrap => {
                if self.strike(side, power, report)?.landed() && !self.active(foe)?.is_fainted() {
                    self.add_word_effect(foe, WordEffect::AuraHurt, timed, report);
                    self.add_word_effect(foe, WordEffect::NoEscape, timed, report);
                }
            }

            // ===== defend =====
            Technique::Protect => {
                self.add_word_effect(side, WordEffect::Protect, EffectDuration::Ephemeral, report);
            }
            Technique::Reflect => {
                self.add_word_effect(side, WordEffect::Reflect, EffectDuration::Ephemeral, report);
            }
            Technique::Retaliate => {
                self.add_word_effect(side, WordEffect::Retaliate, timed, report);
            }
            Technique::Tank => {
                self.add_word_effect(side, WordEffect::Defend, EffectDuration::Ephemeral, report);
                self.strike(side, power, report)?;
            }
            Technique::Screen => self.add_field_effect(side, FieldEffect::Defend, timed, report),

            // ===== speed =====
            Technique::Swift => self.add_field_effect(side, FieldEffect::Speed, timed, report),
            Technique::Concentrate => {
                self.add_word_effect(side, WordEffect::DoubleTp, timed, report);
            }
            Technique::Steal => {
                let (enemy_team, _) = self.side_mut(foe);
                let taken = enemy_team.drain_technical_points(STEAL_AMOUNT);
                let (team, _) = self.side_mut(side);
                team.gain_technical_points(taken);
                report.push(BattleEvent::TechnicalPointsStolen {
                    from: foe,
                    amount: taken,
                });
            }
            Technique::SwitchAttack => {
                self.strike(side, power, report)?;
                let trapped = self.battle.team(side).has_word_effect(WordEffect::NoEscape);
                if !trapped && !self.active(side)?.is_fainted() {
                    self.switch_to_first_living(side, report)?;
                }
            }
            Technique::Hazard => self.add_field_effect(foe, FieldEffect::Hazard, timed, report),
            Technique::Eject => {
                if self.strike(side, power, report)?.landed() && !self.active(foe)?.is_fainted() {
                    self.switch_to_first_living(foe, report)?;
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    /// Hits the opposing active word with a technique of `power`.
    ///
    /// Protect blocks the hit, Defend halves it, Reflect sends it back to the
    /// attacker, and Retaliate returns a quarter of whatever landed.
    fn strike(
        &mut self,
        attacker: Side,
        power: u32,
        report: &mut TurnReport,
    ) -> Result<Strike, BattleError> {
        let defender = attacker.opponent();
        let attack = self.boosted(attacker, Stat::Attack)?;
        let defend = self.boosted(defender, Stat::Defend)?;
        let level = self.active(attacker)?.level();
        let damage = technique_damage(power, attack, defend, level);

        let team = self.battle.team(defender);
        if team.has_word_effect(WordEffect::Protect) {
            report.push(BattleEvent::Protected { side: defender });
            return Ok(Strike::Blocked);
        }
        let mitigation = if team.has_word_effect(WordEffect::Defend) {
            Mitigation::Halved
        } else {
            Mitigation::Full
        };
        let damage = mitigation.apply(damage);
        let reflects = team.has_word_effect(WordEffect::Reflect);
        let retaliates = team.has_word_effect(WordEffect::Retaliate);

        if reflects {
            report.push(BattleEvent::Reflected { side: defender });
            self.hurt(attacker, damage, DamageCause::Reflected, report)?;
            return Ok(Strike::Reflected);
        }

        let dealt = self.hurt(defender, damage, DamageCause::Technique, report)?;
        if retaliates && dealt > 0 {
            self.hurt(attacker, (dealt / 4).max(1), DamageCause::Retaliation, report)?;
        }
        Ok(Strike::Hit(dealt))
    }

    /// Strikes, then lowers the target's `stat` by one if it is still standing.
    fn strike_then_lower(
        &mut self,
        side: Side,
        power: u32,
        stat: Stat,
        report: &mut TurnReport,
    ) -> Result<(), BattleError> {
        let foe = side.opponent();
        if self.strike(side, power, report)?.landed() && !self.active(foe)?.is_fainted() {
            self.boost(foe, stat, -1, report);
        }
        Ok(())
    }

    /// Removes up to `amount` HP from the active word. Returns the HP lost.
    pub(super) fn hurt(
        &mut self,
        side: Side,
        amount: u32,
        cause: DamageCause,
        report: &mut TurnReport,
    ) -> Result<u32, BattleError> {
        let (team, roster) = self.side_mut(side);
        let word = team.active_word_mut(roster).map_err(BattleError::team(side))?;
        if word.is_fainted() {
            return Ok(0);
        }
        let lost = word.change_current_hp(-i64::from(amount)).unsigned_abs() as u32;
        let remaining_hp = word.current_hp();
        let fainted = word.is_fainted();
        let handle = team.active();

        report.push(BattleEvent::Damaged {
            side,
            word: handle,
            amount: lost,
            remaining_hp,
            cause,
        });
        if fainted {
            tracing::debug!(%side, word = %handle, "word fainted");
            report.push(BattleEvent::Fainted { side, word: handle });
        }
        Ok(lost)
    }

    /// Restores HP to a team member. BlockHeal on the active word stops it.
    pub(super) fn heal(
        &mut self,
        side: Side,
        handle: WordHandle,
        amount: u32,
        report: &mut TurnReport,
    ) -> Result<u32, BattleError> {
        let (team, roster) = self.side_mut(side);
        if handle == team.active() && team.has_word_effect(WordEffect::BlockHeal) {
            report.push(BattleEvent::HealBlocked { side, word: handle });
            return Ok(0);
        }
        let word = roster.word_mut(handle).map_err(|_| BattleError::Team {
            side,
            error: TeamError::MissingMember { handle },
        })?;
        if word.is_fainted() {
            return Ok(0);
        }
        let healed = word.change_current_hp(i64::from(amount)) as u32;
        report.push(BattleEvent::Healed {
            side,
            word: handle,
            amount: healed,
        });
        Ok(healed)
    }

    fn heal_active_fraction(
        &mut self,
        side: Side,
        divisor: u32,
        report: &mut TurnReport,
    ) -> Result<(), BattleError> {
        let amount = fraction_of(self.active(side)?.max_hp(), divisor);
        self.heal(side, self.active_handle(side), amount, report)?;
        Ok(())
    }

    fn cure(&mut self, side: Side, report: &mut TurnReport) {
        let (team, _) = self.side_mut(side);
        let removed = team.cure();
        report.push(BattleEvent::Cured { side, removed });
    }

    fn boost(&mut self, side: Side, stat: Stat, delta: i8, report: &mut TurnReport) {
        let (team, _) = self.side_mut(side);
        let change = team.change_stat_boost(stat, delta);
        report.push(BattleEvent::BoostChanged { side, change });
    }

    fn add_word_effect(
        &mut self,
        side: Side,
        effect: WordEffect,
        duration: EffectDuration,
        report: &mut TurnReport,
    ) {
        let (team, _) = self.side_mut(side);
        team.add_word_effect(effect, duration);
        report.push(BattleEvent::WordEffectAdded { side, effect });
    }

    fn add_field_effect(
        &mut self,
        side: Side,
        effect: FieldEffect,
        duration: EffectDuration,
        report: &mut TurnReport,
    ) {
        let (team, _) = self.side_mut(side);
        team.add_field_effect(effect, duration);
        report.push(BattleEvent::FieldEffectAdded { side, effect });
    }

    /// Brings in the bench member at `index`, applying Hazard to it.
    pub(super) fn switch_in(
        &mut self,
        side: Side,
        index: usize,
        report: &mut TurnReport,
    ) -> Result<(), BattleError> {
        let (team, roster) = self.side_mut(side);
        let from = team.active();
        team.switch_active(roster, index)
            .map_err(BattleError::team(side))?;
        let to = team.active();
        let hazard = team.has_field_effect(FieldEffect::Hazard);
        report.push(BattleEvent::Switched { side, from, to });

        if hazard {
            let amount = fraction_of(self.active(side)?.max_hp(), PASSIVE_DIVISOR);
            self.hurt(side, amount, DamageCause::Hazard, report)?;
        }
        Ok(())
    }

    /// Switches to the first living bench member, if there is one.
    fn switch_to_first_living(
        &mut self,
        side: Side,
        report: &mut TurnReport,
    ) -> Result<(), BattleError> {
        let (team, roster) = self.side(side);
        if let Some(index) = team.first_living_bench(roster) {
            self.switch_in(side, index, report)?;
        }
        Ok(())
    }
}

impl Strike {
    /// True if the target was actually hit.
    fn landed(self) -> bool {
        matches!(self, Strike::Hit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{Battle, BattleAction, BattleEngine};
    use crate::config::GameConfig;
    use crate::dictionary::WordTable;
    use crate::roster::WordRoster;
    use crate::team::Team;
    use crate::word::generate;

    struct Fixture {
        battle: Battle,
        users: WordRoster,
        enemies: WordRoster,
    }

    /// Two level-50 made-up words per side: cat, dog against owl, ant.
    fn fixture() -> Fixture {
        let mut table = WordTable::new();
        table.load_lines(["zzz"]).unwrap();
        let mut users = WordRoster::new();
        let mut enemies = WordRoster::new();
        let user_words =
            ["cat", "dog"].map(|text| users.insert(generate(text, 50, &table).unwrap()).unwrap());
        let enemy_words =
            ["owl", "ant"].map(|text| enemies.insert(generate(text, 50, &table).unwrap()).unwrap());
        let battle = Battle::new(
            Team::new(user_words).unwrap(),
            Team::new(enemy_words).unwrap(),
            &users,
            &enemies,
            &GameConfig::default(),
        )
        .unwrap();
        Fixture {
            battle,
            users,
            enemies,
        }
    }

    impl Fixture {
        fn engine(&mut self) -> BattleEngine<'_> {
            BattleEngine::new(&mut self.battle, &mut self.users, &mut self.enemies)
        }
    }

    fn use_technique(engine: &mut BattleEngine<'_>, side: Side, technique: Technique) -> TurnReport {
        let mut report = TurnReport::new(1);
        engine.apply_technique(side, technique, &mut report).unwrap();
        report
    }

    fn amount(report: &TurnReport, wanted: DamageCause) -> Option<u32> {
        report.events.iter().find_map(|event| match event {
            BattleEvent::Damaged { amount, cause, .. } if *cause == wanted => Some(*amount),
            _ => None,
        })
    }

    #[test]
    fn smash_recoils_a_quarter() {
        let mut fixture = fixture();
        let mut engine = fixture.engine();
        let report = use_technique(&mut engine, Side::Users, Technique::Smash);

        let dealt = amount(&report, DamageCause::Technique).unwrap();
        assert_eq!(amount(&report, DamageCause::Recoil), Some((dealt / 4).max(1)));
    }

    #[test]
    fn drain_heals_half_the_damage() {
        let mut fixture = fixture();
        let mut engine = fixture.engine();
        engine
            .hurt(Side::Users, 50, DamageCause::Technique, &mut TurnReport::new(1))
            .unwrap();

        let report = use_technique(&mut engine, Side::Users, Technique::Drain);
        let dealt = amount(&report, DamageCause::Technique).unwrap();
        let user = engine.active_handle(Side::Users);
        assert!(report.events.contains(&BattleEvent::Healed {
            side: Side::Users,
            word: user,
            amount: dealt / 2,
        }));
    }

    #[test]
    fn reflect_turns_the_hit_around() {
        let mut fixture = fixture();
        let mut engine = fixture.engine();
        use_technique(&mut engine, Side::Enemies, Technique::Reflect);

        let expected = technique_damage(
            Technique::Attack.power(),
            engine.boosted(Side::Users, Stat::Attack).unwrap(),
            engine.boosted(Side::Enemies, Stat::Defend).unwrap(),
            engine.active(Side::Users).unwrap().level(),
        );
        let report = use_technique(&mut engine, Side::Users, Technique::Attack);
        assert_eq!(amount(&report, DamageCause::Reflected), Some(expected));
        assert_eq!(report.damage_taken(Side::Enemies), 0);
    }

    #[test]
    fn retaliate_punishes_attackers() {
        let mut fixture = fixture();
        let mut engine = fixture.engine();
        use_technique(&mut engine, Side::Enemies, Technique::Retaliate);

        let report = use_technique(&mut engine, Side::Users, Technique::Attack);
        let dealt = amount(&report, DamageCause::Technique).unwrap();
        assert_eq!(
            amount(&report, DamageCause::Retaliation),
            Some((dealt / 4).max(1))
        );
    }

    #[test]
    fn anti_heal_blocks_healing_until_cured() {
        let mut fixture = fixture();
        let mut engine = fixture.engine();
        use_technique(&mut engine, Side::Users, Technique::AntiHeal);

        let enemy = engine.active_handle(Side::Enemies);
        let report = use_technique(&mut engine, Side::Enemies, Technique::Heal);
        assert_eq!(
            report.events,
            vec![BattleEvent::HealBlocked {
                side: Side::Enemies,
                word: enemy,
            }]
        );

        let report = use_technique(&mut engine, Side::Enemies, Technique::Cure);
        assert_eq!(
            report.events,
            vec![BattleEvent::Cured {
                side: Side::Enemies,
                removed: 1,
            }]
        );
        assert!(!engine.battle().team(Side::Enemies).has_word_effect(WordEffect::BlockHeal));
    }

    #[test]
    fn wrap_traps_the_target() {
        let mut fixture = fixture();
        let mut engine = fixture.engine();
        use_technique(&mut engine, Side::Users, Technique::Wrap);

        let enemies = engine.battle().team(Side::Enemies);
        assert!(enemies.has_word_effect(WordEffect::AuraHurt));
        assert!(enemies.has_word_effect(WordEffect::NoEscape));
        assert_eq!(
            engine.validate(Side::Enemies, &BattleAction::switch(1)),
            Err(BattleError::IllegalAction {
                side: Side::Enemies,
                error: crate::battle::ActionError::NoEscape,
            })
        );
    }

    #[test]
    fn steal_takes_what_is_there() {
        let mut fixture = fixture();
        fixture.battle.enemies.drain_technical_points(7);
        let mut engine = fixture.engine();

        let report = use_technique(&mut engine, Side::Users, Technique::Steal);
        assert_eq!(
            report.events,
            vec![BattleEvent::TechnicalPointsStolen {
                from: Side::Enemies,
                amount: 3,
            }]
        );
        assert_eq!(engine.battle().team(Side::Users).technical_points(), 13);
        assert_eq!(engine.battle().team(Side::Enemies).technical_points(), 0);
    }

    #[test]
    fn eject_and_switch_attack_move_words() {
        let mut fixture = fixture();
        let users_bench = fixture.battle.users.bench()[0];
        let enemies_bench = fixture.battle.enemies.bench()[0];
        let mut engine = fixture.engine();

        use_technique(&mut engine, Side::Users, Technique::Eject);
        assert_eq!(engine.active_handle(Side::Enemies), enemies_bench);

        use_technique(&mut engine, Side::Users, Technique::SwitchAttack);
        assert_eq!(engine.active_handle(Side::Users), users_bench);
    }

    #[test]
    fn team_heal_reaches_the_bench() {
        let mut fixture = fixture();
        let bench = fixture.battle.users.bench()[0];
        fixture
            .users
            .word_mut(bench)
            .unwrap()
            .change_current_hp(-40);
        let mut engine = fixture.engine();

        let report = use_technique(&mut engine, Side::Users, Technique::TeamHeal);
        let max_hp = engine.roster(Side::Users).word(bench).unwrap().max_hp();
        assert!(report.events.contains(&BattleEvent::Healed {
            side: Side::Users,
            word: bench,
            amount: fraction_of(max_hp, PASSIVE_DIVISOR),
        }));
    }

    #[test]
    fn boosts_stop_at_the_clamp() {
        let mut fixture = fixture();
        let mut engine = fixture.engine();
        for _ in 0..4 {
            use_technique(&mut engine, Side::Users, Technique::Charge);
        }
        let report = use_technique(&mut engine, Side::Users, Technique::Charge);
        let BattleEvent::BoostChanged { change, .. } = report.events[0] else {
            panic!("expected a boost change, got {:?}", report.events);
        };
        assert!(!change.changed());
        assert_eq!(engine.battle().team(Side::Users).stat_boost(Stat::Attack), 4);
    }

    #[test]
    fn aura_heals_at_end_of_turn() {
        let mut fixture = fixture();
        let mut engine = fixture.engine();
        use_technique(&mut engine, Side::Users, Technique::Aura);
        engine
            .hurt(Side::Users, 40, DamageCause::Technique, &mut TurnReport::new(1))
            .unwrap();

        let report = engine
            .resolve_turn(BattleAction::defend(), BattleAction::defend())
            .unwrap();
        let user = engine.active_handle(Side::Users);
        let max_hp = engine.active(Side::Users).unwrap().max_hp();
        assert!(report.events.contains(&BattleEvent::Healed {
            side: Side::Users,
            word: user,
            amount: fraction_of(max_hp, PASSIVE_DIVISOR),
        }));
    }
}
