use crate::technique::{Priority, Technique};

/// What a side intends to do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleAction {
    /// Use a non-switching technique against the opposing active word.
    Technique(Technique),

    /// Switch the active word out for the bench member at `target`.
    ///
    /// `technique` must be [`Technique::Switch`] or [`Technique::SlowSwitch`].
    Switch { technique: Technique, target: usize },
}

impl BattleAction {
    pub const fn attack() -> Self {
        BattleAction::Technique(Technique::Attack)
    }

    pub const fn defend() -> Self {
        BattleAction::Technique(Technique::Defend)
    }

    pub const fn switch(target: usize) -> Self {
        BattleAction::Switch {
            technique: Technique::Switch,
            target,
        }
    }

    pub const fn slow_switch(target: usize) -> Self {
        BattleAction::Switch {
            technique: Technique::SlowSwitch,
            target,
        }
    }

    /// The technique spent by this action.
    pub const fn technique(&self) -> Technique {
        match self {
            BattleAction::Technique(technique) => *technique,
            BattleAction::Switch { technique, .. } => *technique,
        }
    }

    pub const fn priority(&self) -> Priority {
        self.technique().priority()
    }

    pub const fn cost(&self) -> u8 {
        self.technique().cost()
    }
}

impl core::fmt::Display for BattleAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BattleAction::Technique(technique) => f.write_str(technique.name()),
            BattleAction::Switch { technique, target } => {
                write!(f, "{} to #{target}", technique.name())
            }
        }
    }
}
