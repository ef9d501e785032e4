//! Error types for battle setup and turn resolution.

use super::{BattleOutcome, Side};
use crate::error::{ErrorSeverity, GameError};
use crate::team::TeamError;
use crate::technique::Technique;

/// Why a submitted action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the None technique cannot be used")]
    NoneTechnique,

    #[error("{technique:?} is not known by the active word")]
    UnknownTechnique { technique: Technique },

    #[error("{technique:?} needs a switch target")]
    MissingSwitchTarget { technique: Technique },

    #[error("{technique:?} is not a switching technique")]
    NotASwitch { technique: Technique },

    #[error("not enough technical points for {technique:?}: need {cost}, have {available}")]
    NotEnoughTechnicalPoints {
        technique: Technique,
        cost: u8,
        available: u8,
    },

    #[error("the active word is stunned")]
    Stunned,

    #[error("the active word cannot escape")]
    NoEscape,

    #[error("the opposing active word has fainted")]
    TargetFainted,

    #[error("illegal switch: {0}")]
    Switch(TeamError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::Switch(inner) => inner.severity(),
            ActionError::NotEnoughTechnicalPoints { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::NoneTechnique => "ACTION_NONE_TECHNIQUE",
            ActionError::UnknownTechnique { .. } => "ACTION_UNKNOWN_TECHNIQUE",
            ActionError::MissingSwitchTarget { .. } => "ACTION_MISSING_SWITCH_TARGET",
            ActionError::NotASwitch { .. } => "ACTION_NOT_A_SWITCH",
            ActionError::NotEnoughTechnicalPoints { .. } => "ACTION_NOT_ENOUGH_TP",
            ActionError::Stunned => "ACTION_STUNNED",
            ActionError::NoEscape => "ACTION_NO_ESCAPE",
            ActionError::TargetFainted => "ACTION_TARGET_FAINTED",
            ActionError::Switch(inner) => inner.error_code(),
        }
    }
}

/// Errors surfaced by the battle engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// A side submitted an action that cannot be taken. Nothing was applied.
    #[error("{side} action rejected: {error}")]
    IllegalAction { side: Side, error: ActionError },

    #[error("battle is over ({outcome})")]
    BattleOver { outcome: BattleOutcome },

    /// The side's active word fainted and must be replaced before the next turn.
    #[error("{side} must replace its fainted active word first")]
    ReplacementRequired { side: Side },

    #[error("{side} has no fainted active word to replace")]
    NoReplacementNeeded { side: Side },

    #[error("{side} team error: {error}")]
    Team { side: Side, error: TeamError },

    /// A team was asked to act with no living active word.
    #[error("{side} has no living active word")]
    NoLivingActiveWord { side: Side },
}

impl BattleError {
    pub(crate) fn team(side: Side) -> impl FnOnce(TeamError) -> Self {
        move |error| BattleError::Team { side, error }
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BattleError::IllegalAction { error, .. } => error.severity(),
            BattleError::BattleOver { .. }
            | BattleError::ReplacementRequired { .. }
            | BattleError::NoReplacementNeeded { .. } => ErrorSeverity::Validation,
            BattleError::Team { error, .. } => error.severity(),
            BattleError::NoLivingActiveWord { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            BattleError::IllegalAction { error, .. } => error.error_code(),
            BattleError::BattleOver { .. } => "BATTLE_OVER",
            BattleError::ReplacementRequired { .. } => "BATTLE_REPLACEMENT_REQUIRED",
            BattleError::NoReplacementNeeded { .. } => "BATTLE_NO_REPLACEMENT_NEEDED",
            BattleError::Team { error, .. } => error.error_code(),
            BattleError::NoLivingActiveWord { .. } => "BATTLE_NO_LIVING_ACTIVE_WORD",
        }
    }
}
