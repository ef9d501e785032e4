use crate::error::{ErrorSeverity, GameError};
use crate::roster::WordHandle;
use crate::word::Stat;

/// Errors raised by team construction and team operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TeamError {
    #[error("team must have {min}..={max} members (got {count})")]
    InvalidSize { count: usize, min: usize, max: usize },

    #[error("{handle} appears more than once in the team")]
    DuplicateMember { handle: WordHandle },

    #[error("switch target {index} is out of range (team has {len} members)")]
    SwitchOutOfRange { index: usize, len: usize },

    #[error("switch target {index} is already the active word")]
    SwitchToActive { index: usize },

    #[error("switch target {index} has fainted")]
    SwitchToFainted { index: usize },

    #[error("{stat} boost {boost} is outside -4..=4")]
    BoostOutOfRange { stat: Stat, boost: i8 },

    #[error("not enough technical points: need {cost}, have {available}")]
    NotEnoughTechnicalPoints { cost: u8, available: u8 },

    /// A team member no longer resolves in the owning roster.
    #[error("team member {handle} is missing from the roster")]
    MissingMember { handle: WordHandle },
}

impl GameError for TeamError {
    fn severity(&self) -> ErrorSeverity {
        use TeamError::*;
        match self {
            InvalidSize { .. }
            | DuplicateMember { .. }
            | SwitchOutOfRange { .. }
            | SwitchToActive { .. }
            | SwitchToFainted { .. }
            | BoostOutOfRange { .. } => ErrorSeverity::Validation,
            NotEnoughTechnicalPoints { .. } => ErrorSeverity::Recoverable,
            MissingMember { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use TeamError::*;
        match self {
            InvalidSize { .. } => "TEAM_INVALID_SIZE",
            DuplicateMember { .. } => "TEAM_DUPLICATE_MEMBER",
            SwitchOutOfRange { .. } => "TEAM_SWITCH_OUT_OF_RANGE",
            SwitchToActive { .. } => "TEAM_SWITCH_TO_ACTIVE",
            SwitchToFainted { .. } => "TEAM_SWITCH_TO_FAINTED",
            BoostOutOfRange { .. } => "TEAM_BOOST_OUT_OF_RANGE",
            NotEnoughTechnicalPoints { .. } => "TEAM_NOT_ENOUGH_TP",
            MissingMember { .. } => "TEAM_MISSING_MEMBER",
        }
    }
}
