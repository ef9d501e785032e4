//! Deterministic action choice for computer-controlled sides.

use std::cmp::Reverse;

use wordsmith_core::battle::technique_damage;
use wordsmith_core::{BattleAction, BattleEngine, Side, Stat, Technique, WordEffect};

/// Healing techniques in order of preference.
const HEALS: [Technique; 3] = [Technique::Recover, Technique::Heal, Technique::Emergency];

/// Picks an action for `side`.
///
/// A word at a quarter of its HP or less heals if it can. Otherwise it uses
/// the damaging technique with the highest expected damage, ignoring overkill
/// and cheaper on ties. Explosion is scored net of the HP it costs the user.
/// With nothing worth using it defends, which is always affordable.
pub fn choose(engine: &BattleEngine<'_>, side: Side) -> BattleAction {
    let battle = engine.battle();
    let (team, foe) = (battle.team(side), battle.team(side.opponent()));
    let (roster, foe_roster) = (engine.roster(side), engine.roster(side.opponent()));
    let (Ok(word), Ok(target)) = (team.active_word(roster), foe.active_word(foe_roster)) else {
        return BattleAction::defend();
    };
    let legal = |technique: Technique| {
        engine
            .validate(side, &BattleAction::Technique(technique))
            .is_ok()
    };

    let hurt = u64::from(word.current_hp()) * 4 <= u64::from(word.max_hp());
    if hurt && !team.has_word_effect(WordEffect::BlockHeal) {
        if let Some(heal) = HEALS.into_iter().find(|t| word.knows(*t) && legal(*t)) {
            return BattleAction::Technique(heal);
        }
    }

    let attack = team.boosted_stat(roster, Stat::Attack).unwrap_or(1);
    let defend = foe.boosted_stat(foe_roster, Stat::Defend).unwrap_or(1);
    let best = word
        .techniques()
        .iter()
        .copied()
        .chain([Technique::Attack])
        .filter(|t| t.is_damaging() && legal(*t))
        .map(|technique| {
            let dealt = technique_damage(technique.power(), attack, defend, word.level())
                .min(target.current_hp());
            let mut score = i64::from(dealt);
            if technique == Technique::Explosion {
                score -= i64::from(word.current_hp());
            }
            (score, Reverse(technique.cost()), technique)
        })
        .max_by_key(|(score, cost, _)| (*score, *cost));

    match best {
        Some((score, _, technique)) if score > 0 => BattleAction::Technique(technique),
        _ => BattleAction::defend(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordsmith_core::{Battle, GameConfig, Team, WordRoster, WordTable, generate};

    fn roster(text: &str, level: u32) -> (WordRoster, Team) {
        let mut table = WordTable::new();
        table.load_lines(["cat"]).unwrap();
        let mut roster = WordRoster::new();
        let handle = roster.insert(generate(text, level, &table).unwrap()).unwrap();
        (roster, Team::new([handle]).unwrap())
    }

    #[test]
    fn prefers_the_strongest_hit() {
        // "rara" knows Smash (120) and Explosion (255); the foe is fragile.
        let (mut users, user_team) = roster("rara", 50);
        let (mut enemies, enemy_team) = roster("cat", 5);
        let mut battle = Battle::new(
            user_team,
            enemy_team,
            &users,
            &enemies,
            &GameConfig::default(),
        )
        .unwrap();
        let engine = BattleEngine::new(&mut battle, &mut users, &mut enemies);

        // Every hit is overkill, so the cheapest one wins and Explosion loses.
        assert_eq!(choose(&engine, Side::Users), BattleAction::attack());
    }

    #[test]
    fn defends_without_technical_points() {
        let config = GameConfig {
            starting_technical_points: 0,
            ..GameConfig::default()
        };
        let (mut users, user_team) = roster("cat", 20);
        let (mut enemies, enemy_team) = roster("dog", 20);
        let mut battle = Battle::new(user_team, enemy_team, &users, &enemies, &config).unwrap();
        let engine = BattleEngine::new(&mut battle, &mut users, &mut enemies);

        assert_eq!(choose(&engine, Side::Users), BattleAction::defend());
        assert_eq!(choose(&engine, Side::Enemies), BattleAction::defend());
    }

    #[test]
    fn heals_when_low() {
        // "hah" learns Emergency from its second codon.
        let (mut users, user_team) = roster("hah", 30);
        let word = users.word_mut(user_team.active()).unwrap();
        assert!(word.knows(Technique::Emergency));
        let max_hp = i64::from(word.max_hp());
        word.change_current_hp(1 - max_hp);

        let (mut enemies, enemy_team) = roster("cat", 30);
        let mut battle = Battle::new(
            user_team,
            enemy_team,
            &users,
            &enemies,
            &GameConfig::default(),
        )
        .unwrap();
        let engine = BattleEngine::new(&mut battle, &mut users, &mut enemies);

        assert_eq!(
            choose(&engine, Side::Users),
            BattleAction::Technique(Technique::Emergency)
        );
    }
}
