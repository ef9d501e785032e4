//! Severity classification shared by every error in wordsmith-core.
//!
//! Each module owns its error enum (`GenerationError` in `word`,
//! `BattleError` in `battle`, and so on). They all implement [`GameError`] so
//! callers can decide how to react without matching every variant.
//!
//! An operation that returns an error has not changed any state.

/// How a caller should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ErrorSeverity {
    /// The environment got in the way: a missing file, a corrupt save.
    /// Retrying with other input or after fixing the source can succeed.
    Recoverable,

    /// The request itself is wrong (word too long, unknown technique).
    /// Repeating it unchanged fails again.
    Validation,

    /// Operations were called out of order, e.g. a battle asked to act
    /// with no living active word. Points at a bug in the caller.
    Internal,

    /// State no longer holds together, e.g. a team handle that no roster
    /// resolves. Nothing built on that state should continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for errors that indicate a bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error enum in the crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs, e.g. `"TEAM_SWITCH_TO_FAINTED"`.
    ///
    /// Defaults to the type name; implementors return one code per variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{BattleError, Side};
    use crate::dictionary::DictionaryError;
    use crate::word::GenerationError;

    #[test]
    fn severities_classify_errors() {
        assert_eq!(
            GenerationError::DictionaryNotLoaded.severity(),
            ErrorSeverity::Internal
        );
        assert!(DictionaryError::Empty.severity().is_recoverable());
        assert!(
            BattleError::NoLivingActiveWord { side: Side::Users }
                .severity()
                .is_internal()
        );
        assert_eq!(ErrorSeverity::Fatal.to_string(), ErrorSeverity::Fatal.as_str());
    }
}
