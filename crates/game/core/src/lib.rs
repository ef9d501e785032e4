//! Deterministic rules for a word-battling RPG.
//!
//! `wordsmith-core` turns arbitrary text into combat-ready words and runs
//! team battles between them. Everything here is pure and synchronous: the
//! only input from the outside world is the dictionary word list, which
//! callers load (see `wordsmith-content`) and hand over as a [`WordTable`].
//!
//! - [`word`]: letter-stat table, generator, and the [`WordEntity`] it produces
//! - [`technique`]: the static technique catalog
//! - [`dictionary`]: the "is this a real word" oracle
//! - [`roster`], [`player`]: ownership of words
//! - [`team`], [`battle`]: teams, effects, and turn resolution
//! - [`context`]: owner of the dictionary and the active battle
pub mod battle;
pub mod config;
pub mod context;
pub mod dictionary;
pub mod error;
pub mod player;
pub mod roster;
pub mod team;
pub mod technique;
pub mod word;

pub use battle::{
    ActionError, Battle, BattleAction, BattleEngine, BattleError, BattleEvent, BattleOutcome,
    DamageCause, Side, SkipReason, TurnReport,
};
pub use config::GameConfig;
pub use context::{ContextError, GameContext};
pub use dictionary::{DictionaryError, DictionaryOracle, WordTable};
pub use error::{ErrorSeverity, GameError};
pub use player::{Placement, Player, PlayerError};
pub use roster::{RosterError, WordHandle, WordRoster};
pub use team::{
    BoostChange, EffectDuration, FieldEffect, Team, TeamError, WordEffect,
};
pub use technique::{Priority, Technique, TechniqueData};
pub use word::{GenerationError, Rank, Stat, StatBlock, WordEntity, generate};

#[cfg(feature = "serde")]
pub use player::save::{self, SaveError};
