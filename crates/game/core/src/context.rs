//! Process-wide game state without globals.
//!
//! [`GameContext`] owns the dictionary table and the battle in progress, so
//! the "load the dictionary before generating" and "start a battle before
//! resolving turns" orderings are enforced by the types it hands out.

use crate::battle::{Battle, BattleEngine, BattleError};
use crate::config::GameConfig;
use crate::dictionary::{DictionaryError, DictionaryOracle, WordTable};
use crate::error::{ErrorSeverity, GameError};
use crate::roster::WordRoster;
use crate::team::Team;
use crate::word::{GenerationError, WordEntity, generate};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error("cannot install a dictionary table that is not loaded")]
    DictionaryNotLoaded,

    #[error("a battle is already in progress")]
    BattleInProgress,

    #[error("no battle has been started")]
    NoBattle,

    #[error(transparent)]
    Battle(#[from] BattleError),
}

impl GameError for ContextError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ContextError::Dictionary(inner) => inner.severity(),
            ContextError::DictionaryNotLoaded => ErrorSeverity::Validation,
            ContextError::BattleInProgress | ContextError::NoBattle => ErrorSeverity::Internal,
            ContextError::Battle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ContextError::Dictionary(inner) => inner.error_code(),
            ContextError::DictionaryNotLoaded => "CONTEXT_DICTIONARY_NOT_LOADED",
            ContextError::BattleInProgress => "CONTEXT_BATTLE_IN_PROGRESS",
            ContextError::NoBattle => "CONTEXT_NO_BATTLE",
            ContextError::Battle(inner) => inner.error_code(),
        }
    }
}

/// Owner of the dictionary and the active battle.
#[derive(Clone, Debug, Default)]
pub struct GameContext {
    config: GameConfig,
    dictionary: WordTable,
    battle: Option<Battle>,
}

impl GameContext {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            dictionary: WordTable::new(),
            battle: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &WordTable {
        &self.dictionary
    }

    /// Installs an already loaded table. The dictionary can be installed once.
    pub fn install_dictionary(&mut self, table: WordTable) -> Result<(), ContextError> {
        if self.dictionary.is_loaded() {
            return Err(DictionaryError::AlreadyLoaded.into());
        }
        if !table.is_loaded() {
            return Err(ContextError::DictionaryNotLoaded);
        }
        self.dictionary = table;
        Ok(())
    }

    /// Loads newline-delimited text into the context's own table.
    pub fn load_dictionary_str(&mut self, contents: &str) -> Result<usize, ContextError> {
        Ok(self.dictionary.load_str(contents)?)
    }

    /// Generates a word against the installed dictionary.
    pub fn generate_word(&self, text: &str, level: u32) -> Result<WordEntity, GenerationError> {
        generate(text, level, &self.dictionary)
    }

    /// Starts a battle, replacing a finished one if present.
    pub fn start_battle(
        &mut self,
        users: Team,
        enemies: Team,
        user_roster: &WordRoster,
        enemy_roster: &WordRoster,
    ) -> Result<&Battle, ContextError> {
        if self.battle.as_ref().is_some_and(|battle| !battle.is_over()) {
            return Err(ContextError::BattleInProgress);
        }
        let battle = Battle::new(users, enemies, user_roster, enemy_roster, &self.config)?;
        tracing::info!(outcome = %battle.outcome(), "battle started");
        Ok(self.battle.insert(battle))
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// Engine over the battle in progress.
    pub fn engine<'a>(
        &'a mut self,
        users: &'a mut WordRoster,
        enemies: &'a mut WordRoster,
    ) -> Result<BattleEngine<'a>, ContextError> {
        let battle = self.battle.as_mut().ok_or(ContextError::NoBattle)?;
        Ok(BattleEngine::new(battle, users, enemies))
    }

    /// Removes and returns the current battle.
    pub fn end_battle(&mut self) -> Option<Battle> {
        self.battle.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_requires_a_dictionary() {
        let mut context = GameContext::new(GameConfig::default());
        assert_eq!(
            context.generate_word("cat", 5),
            Err(GenerationError::DictionaryNotLoaded)
        );

        context.load_dictionary_str("cat\ndog\n").unwrap();
        assert!(context.generate_word("cat", 5).unwrap().is_real());
    }

    #[test]
    fn dictionary_installs_once() {
        let mut context = GameContext::default();
        assert_eq!(
            context.install_dictionary(WordTable::new()),
            Err(ContextError::DictionaryNotLoaded)
        );

        let mut table = WordTable::new();
        table.load_lines(["cat"]).unwrap();
        context.install_dictionary(table.clone()).unwrap();
        assert_eq!(
            context.install_dictionary(table),
            Err(ContextError::Dictionary(DictionaryError::AlreadyLoaded))
        );
    }

    #[test]
    fn engine_requires_a_battle() {
        let mut context = GameContext::default();
        let mut users = WordRoster::new();
        let mut enemies = WordRoster::new();
        assert!(matches!(
            context.engine(&mut users, &mut enemies),
            Err(ContextError::NoBattle)
        ));
    }

    #[test]
    fn only_one_battle_at_a_time() {
        let mut context = GameContext::default();
        context.load_dictionary_str("cat\ndog").unwrap();
        let mut users = WordRoster::new();
        let mut enemies = WordRoster::new();
        let cat = users.insert(context.generate_word("cat", 10).unwrap()).unwrap();
        let dog = enemies.insert(context.generate_word("dog", 10).unwrap()).unwrap();

        let start = |context: &mut GameContext| {
            context
                .start_battle(
                    Team::new([cat]).unwrap(),
                    Team::new([dog]).unwrap(),
                    &users,
                    &enemies,
                )
                .map(|battle| battle.turn())
        };
        assert_eq!(start(&mut context), Ok(1));
        assert_eq!(start(&mut context), Err(ContextError::BattleInProgress));

        assert!(context.end_battle().is_some());
        assert_eq!(start(&mut context), Ok(1));
        assert!(context.engine(&mut users, &mut enemies).is_ok());
    }
}
