//! Plain-text rendering of battle events.

use wordsmith_core::{BattleEngine, BattleEvent, BattleOutcome, Side, WordHandle};

fn name<'a>(engine: &'a BattleEngine<'_>, side: Side, word: WordHandle) -> &'a str {
    engine
        .roster(side)
        .get(word)
        .map_or("?", |word| word.text())
}

/// One line describing `event`.
pub fn describe(engine: &BattleEngine<'_>, event: &BattleEvent) -> String {
    match event {
        BattleEvent::ActionUsed { side, word, action } => {
            format!("[{side}] {} uses {action}", name(engine, *side, *word))
        }
        BattleEvent::ActionSkipped {
            side,
            action,
            reason,
        } => format!("[{side}] {action} skipped ({reason})"),
        BattleEvent::Damaged {
            side,
            word,
            amount,
            remaining_hp,
            cause,
        } => format!(
            "[{side}] {} takes {amount} {cause} damage ({remaining_hp} HP left)",
            name(engine, *side, *word)
        ),
        BattleEvent::Protected { side } => format!("[{side}] protected"),
        BattleEvent::Reflected { side } => format!("[{side}] reflected the hit"),
        BattleEvent::Healed { side, word, amount } => {
            format!("[{side}] {} heals {amount}", name(engine, *side, *word))
        }
        BattleEvent::HealBlocked { side, word } => {
            format!("[{side}] {} cannot heal", name(engine, *side, *word))
        }
        BattleEvent::Fainted { side, word } => {
            format!("[{side}] {} faints", name(engine, *side, *word))
        }
        BattleEvent::Switched { side, from, to } => format!(
            "[{side}] {} switches out for {}",
            name(engine, *side, *from),
            name(engine, *side, *to)
        ),
        BattleEvent::BoostChanged { side, change } => {
            if change.changed() {
                format!(
                    "[{side}] {} {:+} -> {:+}",
                    change.stat, change.previous, change.current
                )
            } else {
                format!("[{side}] {} cannot go further", change.stat)
            }
        }
        BattleEvent::WordEffectAdded { side, effect } => format!("[{side}] gains {effect}"),
        BattleEvent::FieldEffectAdded { side, effect } => {
            format!("[{side}] field gains {effect}")
        }
        BattleEvent::WordEffectExpired { side, effect } => format!("[{side}] {effect} wore off"),
        BattleEvent::FieldEffectExpired { side, effect } => {
            format!("[{side}] field {effect} wore off")
        }
        BattleEvent::Cured { side, removed } => format!("[{side}] cured {removed} effect(s)"),
        BattleEvent::TechnicalPointsStolen { from, amount } => {
            format!("[{}] steals {amount} TP from {from}", from.opponent())
        }
        BattleEvent::TechnicalPointsCharged { side, amount } => {
            format!("[{side}] charges {amount} TP")
        }
        BattleEvent::BattleEnded { outcome } => format!("battle over: {}", verdict(*outcome)),
    }
}

pub fn verdict(outcome: BattleOutcome) -> &'static str {
    match outcome {
        BattleOutcome::Ongoing => "undecided",
        BattleOutcome::UsersWon => "users win",
        BattleOutcome::EnemiesWon => "enemies win",
        BattleOutcome::Draw => "draw",
    }
}
