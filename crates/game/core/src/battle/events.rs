//! Battle events reported to the presentation layer.

use super::{BattleAction, BattleOutcome, Side};
use crate::roster::WordHandle;
use crate::team::{BoostChange, FieldEffect, WordEffect};

/// Source of an HP loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum DamageCause {
    Technique,
    /// Bounced back by Reflect.
    Reflected,
    /// Retaliate punishing an attacker.
    Retaliation,
    /// Smash hitting its user.
    Recoil,
    /// Explosion knocking out its user.
    #[strum(serialize = "self-destruct")]
    SelfDestruct,
    /// AuraHurt at the end of a turn.
    Aura,
    /// Hazard on switch-in.
    Hazard,
}

/// Why a chosen action did not execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    #[strum(serialize = "fainted")]
    Fainted,
    #[strum(serialize = "stunned")]
    Stunned,
    /// The word that chose the action is no longer active.
    #[strum(serialize = "switched out")]
    SwitchedOut,
    #[strum(serialize = "not enough technical points")]
    NotEnoughTechnicalPoints,
    /// The opposing active word fainted earlier in the turn.
    #[strum(serialize = "no target")]
    NoTarget,
    /// The switch target stopped being legal before the action ran.
    #[strum(serialize = "switch target unavailable")]
    IllegalSwitch,
}

/// A single observable thing that happened during a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    ActionUsed {
        side: Side,
        word: WordHandle,
        action: BattleAction,
    },
    ActionSkipped {
        side: Side,
        action: BattleAction,
        reason: SkipReason,
    },
    Damaged {
        side: Side,
        word: WordHandle,
        amount: u32,
        remaining_hp: u32,
        cause: DamageCause,
    },
    Protected {
        side: Side,
    },
    Reflected {
        side: Side,
    },
    Healed {
        side: Side,
        word: WordHandle,
        amount: u32,
    },
    HealBlocked {
        side: Side,
        word: WordHandle,
    },
    Fainted {
        side: Side,
        word: WordHandle,
    },
    Switched {
        side: Side,
        from: WordHandle,
        to: WordHandle,
    },
    BoostChanged {
        side: Side,
        change: BoostChange,
    },
    WordEffectAdded {
        side: Side,
        effect: WordEffect,
    },
    FieldEffectAdded {
        side: Side,
        effect: FieldEffect,
    },
    WordEffectExpired {
        side: Side,
        effect: WordEffect,
    },
    FieldEffectExpired {
        side: Side,
        effect: FieldEffect,
    },
    Cured {
        side: Side,
        removed: usize,
    },
    TechnicalPointsStolen {
        from: Side,
        amount: u8,
    },
    TechnicalPointsCharged {
        side: Side,
        amount: u8,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

/// Everything that happened during one resolved turn, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// Turn number that was resolved.
    pub turn: u32,
    pub events: Vec<BattleEvent>,
}

impl TurnReport {
    pub(crate) fn new(turn: u32) -> Self {
        Self {
            turn,
            events: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, event: BattleEvent) {
        tracing::trace!(?event, "battle event");
        self.events.push(event);
    }

    /// Total damage dealt to `side` during the turn.
    pub fn damage_taken(&self, side: Side) -> u32 {
        self.events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::Damaged {
                    side: hit, amount, ..
                } if *hit == side => Some(*amount),
                _ => None,
            })
            .sum()
    }

    /// Outcome reported by a `BattleEnded` event, if the battle ended this turn.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.events.iter().find_map(|event| match event {
            BattleEvent::BattleEnded { outcome } => Some(*outcome),
            _ => None,
        })
    }
}
