//! Static technique catalog.
//!
//! Every [`Technique`] maps to exactly one [`TechniqueData`] through an
//! exhaustive `match`, so adding a variant without catalog data does not
//! compile. [`Technique::None`] is the "no technique" sentinel and is never
//! executed by the battle engine.

/// Turn-ordering tier of a technique. Faster tiers act first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    Slowest = 1,
    Slow = 2,
    Normal = 3,
    Fast = 4,
    Fastest = 5,
}

/// Identity of every technique a word can know or use.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Technique {
    // ========================================================================
    // Sentinel
    // ========================================================================
    None = 0,

    // ========================================================================
    // Basic (usable by every word)
    // ========================================================================
    Attack,
    Defend,
    Switch,

    // ========================================================================
    // Health-dominant
    // ========================================================================
    Heal,
    Recover,
    Drain,
    AntiHeal,
    Cure,
    Aura,
    Emergency,
    TeamHeal,

    // ========================================================================
    // Attack-dominant
    // ========================================================================
    Smash,
    Explosion,
    Charge,
    Break,
    Blunt,
    Stun,
    Wrap,
    Slow,

    // ========================================================================
    // Defend-dominant
    // ========================================================================
    Protect,
    SlowSwitch,
    Retaliate,
    Tank,
    Bolster,
    Screen,
    SlowAttack,
    Reflect,

    // ========================================================================
    // Speed-dominant
    // ========================================================================
    Concentrate,
    Steal,
    SwitchAttack,
    QuickAttack,
    Hazard,
    Eject,
    Quicken,
    Swift,

    // ========================================================================
    // Event-only
    // ========================================================================
    Special,
}

/// Catalog entry for a technique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TechniqueData {
    pub name: &'static str,
    /// Damage multiplier base, 0 for non-damaging techniques.
    pub power: u32,
    /// Technical points spent when the technique executes.
    pub cost: u8,
    pub priority: Priority,
    pub description: &'static str,
}

impl TechniqueData {
    const fn new(
        name: &'static str,
        power: u32,
        cost: u8,
        priority: Priority,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            power,
            cost,
            priority,
            description,
        }
    }
}

impl Technique {
    /// Techniques every word may use without learning them.
    pub const BASIC: [Technique; 3] = [Technique::Attack, Technique::Defend, Technique::Switch];

    /// Returns the catalog entry for this technique.
    pub const fn data(self) -> TechniqueData {
        use Priority::*;
        match self {
            Technique::None => {
                TechniqueData::new("None", 0, 0, Normal, "This attack does nothing.")
            }
            Technique::Attack => TechniqueData::new(
                "Attack",
                30,
                1,
                Normal,
                "A basic attack that damages the enemy.",
            ),
            Technique::Defend => TechniqueData::new(
                "Defend",
                0,
                0,
                Fastest,
                "The user takes half damage this turn.",
            ),
            Technique::Switch => {
                TechniqueData::new("Switch", 0, 1, Fastest, "The user switches out.")
            }
            Technique::Heal => {
                TechniqueData::new("Heal", 0, 6, Normal, "The user recovers half its HP.")
            }
            Technique::Recover => TechniqueData::new(
                "Recover",
                0,
                8,
                Normal,
                "The user recovers half its HP and is cured of status.",
            ),
            Technique::Drain => TechniqueData::new(
                "Drain",
                30,
                2,
                Normal,
                "The user steals HP from the target, healing itself.",
            ),
            Technique::AntiHeal => TechniqueData::new(
                "Anti Heal",
                0,
                2,
                Normal,
                "The target is prevented from healing for 5 turns.",
            ),
            Technique::Cure => {
                TechniqueData::new("Cure", 0, 2, Normal, "The user is cured of status.")
            }
            Technique::Aura => TechniqueData::new(
                "Aura",
                0,
                4,
                Normal,
                "The user heals some HP at the end of each turn for 5 turns.",
            ),
            Technique::Emergency => TechniqueData::new(
                "Emergency",
                0,
                4,
                Fast,
                "The user heals some HP. This attack usually goes first.",
            ),
            Technique::TeamHeal => TechniqueData::new(
                "Team Heal",
                0,
                10,
                Normal,
                "The user and its allies recover some HP.",
            ),
            Technique::Smash => TechniqueData::new(
                "Smash",
                120,
                6,
                Normal,
                "A powerful attack that damages the user as well.",
            ),
            Technique::Explosion => TechniqueData::new(
                "Explosion",
                255,
                10,
                Normal,
                "The user explodes and passes out, dealing terrible damage.",
            ),
            Technique::Charge => TechniqueData::new(
                "Charge",
                0,
                4,
                Normal,
                "The user charges power and increases its Attack.",
            ),
            Technique::Break => TechniqueData::new(
                "Break",
                60,
                6,
                Normal,
                "The user attacks viciously. The target's Defend is lowered.",
            ),
            Technique::Blunt => TechniqueData::new(
                "Blunt",
                60,
                6,
                Normal,
                "The user disarms the target. The target's Attack is lowered.",
            ),
            Technique::Stun => TechniqueData::new(
                "Stun",
                60,
                8,
                Normal,
                "The target is stunned, leaving it unable to attack this turn.",
            ),
            Technique::Wrap => TechniqueData::new(
                "Wrap",
                30,
                8,
                Normal,
                "The target is damaged at the end of each turn for 5 turns. It cannot switch out.",
            ),
            Technique::Slow => TechniqueData::new(
                "Slow",
                60,
                6,
                Normal,
                "The target is slowed down, reducing its Speed.",
            ),
            Technique::Protect => TechniqueData::new(
                "Protect",
                0,
                10,
                Fastest,
                "The user is protected from any attack this turn.",
            ),
            Technique::SlowSwitch => TechniqueData::new(
                "Slow Switch",
                0,
                4,
                Slowest,
                "The user stalls and switches out. This always goes last.",
            ),
            Technique::Retaliate => TechniqueData::new(
                "Retaliate",
                0,
                4,
                Normal,
                "The enemy is damaged if they attack the user for 5 turns.",
            ),
            Technique::Tank => TechniqueData::new(
                "Tank",
                30,
                3,
                Normal,
                "The user attacks while defending itself.",
            ),
            Technique::Bolster => TechniqueData::new(
                "Bolster",
                0,
                4,
                Normal,
                "The user sturdies itself and increases its Defend.",
            ),
            Technique::Screen => TechniqueData::new(
                "Screen",
                0,
                8,
                Normal,
                "Damage is halved for the user's team for 5 turns.",
            ),
            // Slow Switch is the only thing slower.
            Technique::SlowAttack => TechniqueData::new(
                "Slow Attack",
                60,
                4,
                Slow,
                "An attack that always goes last.",
            ),
            Technique::Reflect => TechniqueData::new(
                "Reflect",
                0,
                8,
                Fastest,
                "The enemy takes all damage the user would take this turn.",
            ),
            Technique::Concentrate => TechniqueData::new(
                "Concentrate",
                0,
                0,
                Normal,
                "The user's TP recharge speed is doubled for 5 turns.",
            ),
            Technique::Steal => TechniqueData::new(
                "Steal",
                0,
                2,
                Normal,
                "The user steals up to 4 TP from the enemy.",
            ),
            Technique::SwitchAttack => TechniqueData::new(
                "Switch Attack",
                30,
                3,
                Normal,
                "The user switches out after attacking.",
            ),
            Technique::QuickAttack => TechniqueData::new(
                "Quick Attack",
                30,
                3,
                Fast,
                "The user attacks quickly, always going first.",
            ),
            Technique::Hazard => TechniqueData::new(
                "Hazard",
                0,
                6,
                Normal,
                "The enemy field is trapped. Every enemy switching in is damaged for 5 turns.",
            ),
            Technique::Eject => TechniqueData::new(
                "Eject",
                30,
                6,
                Normal,
                "The enemy is attacked and forced to switch out.",
            ),
            Technique::Quicken => TechniqueData::new(
                "Quicken",
                0,
                4,
                Normal,
                "The user moves quickly, increasing its Speed.",
            ),
            Technique::Swift => TechniqueData::new(
                "Swift",
                0,
                8,
                Normal,
                "The user team's Speed is doubled for 5 turns.",
            ),
            Technique::Special => {
                TechniqueData::new("Special", 90, 6, Normal, "A special event attack.")
            }
        }
    }

    /// Looks a technique up by its numeric identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|technique| technique.id() == id)
    }

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        self.data().name
    }

    pub const fn power(self) -> u32 {
        self.data().power
    }

    pub const fn cost(self) -> u8 {
        self.data().cost
    }

    pub const fn priority(self) -> Priority {
        self.data().priority
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Technique::None)
    }

    /// Returns true for techniques every word can use without learning them.
    pub const fn is_basic(self) -> bool {
        matches!(
            self,
            Technique::Attack | Technique::Defend | Technique::Switch
        )
    }

    /// Returns true if the technique deals direct damage to the target.
    pub const fn is_damaging(self) -> bool {
        self.power() > 0
    }

    /// Returns true if the technique requires a bench member to switch to.
    pub const fn is_switch(self) -> bool {
        matches!(self, Technique::Switch | Technique::SlowSwitch)
    }
}
