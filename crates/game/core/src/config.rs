/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Technical points every team starts a battle with.
    pub starting_technical_points: u8,
    /// Technical points recovered by each team at the end of a turn.
    pub technical_point_charge: u8,
    /// Number of turns a timed word or field effect lasts.
    pub effect_turns: u8,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Letters supported by the letter-stat table (a-z).
    pub const N_LETTERS: usize = 26;
    /// Words on one battle team.
    pub const MAX_TEAM_SIZE: usize = 3;
    /// Techniques a single word can learn.
    pub const MAX_TECHNIQUES: usize = 4;
    /// Words a player can own.
    pub const MAX_ROSTER_SIZE: usize = 100;
    pub const MAX_WORD_EFFECTS: usize = 10;
    pub const MAX_FIELD_EFFECTS: usize = 4;

    // ===== word bounds =====
    pub const MIN_WORD_LENGTH: usize = 2;
    pub const MAX_WORD_LENGTH: usize = 16;
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 100;
    pub const MIN_BASE_STAT: u32 = 1;
    pub const MAX_BASE_STAT: u32 = 255;
    pub const MIN_STAT: u32 = 1;
    pub const MAX_STAT: u32 = 9999;

    // ===== battle bounds =====
    pub const MIN_TECHNICAL_POINTS: u8 = 0;
    pub const MAX_TECHNICAL_POINTS: u8 = 20;
    pub const MIN_BOOST: i8 = -4;
    pub const MAX_BOOST: i8 = 4;

    // ===== player bounds =====
    pub const MIN_USERNAME_LENGTH: usize = 3;
    pub const MAX_USERNAME_LENGTH: usize = 25;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_TECHNICAL_POINTS: u8 = 10;
    pub const DEFAULT_TECHNICAL_POINT_CHARGE: u8 = 2;
    pub const DEFAULT_EFFECT_TURNS: u8 = 5;

    pub fn new() -> Self {
        Self {
            starting_technical_points: Self::DEFAULT_STARTING_TECHNICAL_POINTS,
            technical_point_charge: Self::DEFAULT_TECHNICAL_POINT_CHARGE,
            effect_turns: Self::DEFAULT_EFFECT_TURNS,
        }
    }

    /// Starting technical points clamped into the legal range.
    pub fn clamped_starting_points(&self) -> u8 {
        self.starting_technical_points
            .clamp(Self::MIN_TECHNICAL_POINTS, Self::MAX_TECHNICAL_POINTS)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
