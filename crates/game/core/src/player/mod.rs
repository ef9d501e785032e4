//! Players and the words they own.
//!
//! Every owned word lives in the player's [`WordRoster`] and is placed either
//! on the team (at most three, in battle order) or in storage. A word is never
//! in both, and every roster word is in exactly one of them.

#[cfg(feature = "serde")]
pub mod save;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::roster::{RosterError, WordHandle, WordRoster};
use crate::team::{Members, Team, TeamError};
use crate::word::WordEntity;

/// Where a word sits after [`Player::add_word`] or [`Player::swap_word`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Team,
    Storage,
}

/// Errors raised by player bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("username must be {min}..={max} characters (got {length})")]
    InvalidUsername {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("{handle} is not owned by this player")]
    NotOwned { handle: WordHandle },

    #[error("team already has {max} words", max = GameConfig::MAX_TEAM_SIZE)]
    TeamFull,

    #[error("player has no words on their team")]
    EmptyTeam,

    #[error(transparent)]
    Team(#[from] TeamError),

    /// Team and storage disagree with the roster (e.g. after loading bad data).
    #[error("inconsistent player state: {reason}")]
    Inconsistent { reason: &'static str },
}

impl GameError for PlayerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            PlayerError::InvalidUsername { .. }
            | PlayerError::NotOwned { .. }
            | PlayerError::TeamFull
            | PlayerError::EmptyTeam => ErrorSeverity::Validation,
            PlayerError::Roster(inner) => inner.severity(),
            PlayerError::Team(inner) => inner.severity(),
            PlayerError::Inconsistent { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PlayerError::InvalidUsername { .. } => "PLAYER_INVALID_USERNAME",
            PlayerError::Roster(inner) => inner.error_code(),
            PlayerError::NotOwned { .. } => "PLAYER_NOT_OWNED",
            PlayerError::TeamFull => "PLAYER_TEAM_FULL",
            PlayerError::EmptyTeam => "PLAYER_EMPTY_TEAM",
            PlayerError::Team(inner) => inner.error_code(),
            PlayerError::Inconsistent { .. } => "PLAYER_INCONSISTENT",
        }
    }
}

/// A named owner of up to 100 words.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    username: String,
    roster: WordRoster,
    team: Members,
    storage: Vec<WordHandle>,
}

impl Player {
    pub fn new(username: &str) -> Result<Self, PlayerError> {
        validate_username(username)?;
        Ok(Self {
            username: username.to_owned(),
            roster: WordRoster::new(),
            team: Members::new(),
            storage: Vec::new(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roster(&self) -> &WordRoster {
        &self.roster
    }

    /// Mutable access for battles.
    ///
    /// Adding or removing words must go through [`add_word`](Self::add_word)
    /// and [`remove_word`](Self::remove_word) to keep team and storage in sync.
    pub fn roster_mut(&mut self) -> &mut WordRoster {
        &mut self.roster
    }

    pub fn word(&self, handle: WordHandle) -> Option<&WordEntity> {
        self.roster.get(handle)
    }

    pub fn word_count(&self) -> usize {
        self.roster.len()
    }

    pub fn team_members(&self) -> &[WordHandle] {
        &self.team
    }

    pub fn storage(&self) -> &[WordHandle] {
        &self.storage
    }

    /// Position of `handle` on the team.
    pub fn team_index(&self, handle: WordHandle) -> Option<usize> {
        self.team.iter().position(|h| *h == handle)
    }

    pub fn placement(&self, handle: WordHandle) -> Option<Placement> {
        if self.team.contains(&handle) {
            Some(Placement::Team)
        } else if self.storage.contains(&handle) {
            Some(Placement::Storage)
        } else {
            None
        }
    }

    /// Takes ownership of a word. It joins the team while the team has room.
    pub fn add_word(&mut self, word: WordEntity) -> Result<(WordHandle, Placement), PlayerError> {
        let handle = self.roster.insert(word)?;
        let placement = if self.team.try_push(handle).is_ok() {
            Placement::Team
        } else {
            self.storage.push(handle);
            Placement::Storage
        };
        tracing::debug!(player = %self.username, word = %handle, ?placement, "word added");
        Ok((handle, placement))
    }

    /// Releases a word. Other handles remain valid.
    pub fn remove_word(&mut self, handle: WordHandle) -> Result<WordEntity, PlayerError> {
        let placement = self
            .placement(handle)
            .ok_or(PlayerError::NotOwned { handle })?;
        // Placement only changes once the roster has given the word up.
        let word = self.roster.remove(handle)?;
        match placement {
            Placement::Team => self.team.retain(|h| *h != handle),
            Placement::Storage => self.storage.retain(|h| *h != handle),
        }
        Ok(word)
    }

    /// Moves a word between the team and storage. Returns its new placement.
    pub fn swap_word(&mut self, handle: WordHandle) -> Result<Placement, PlayerError> {
        match self.placement(handle) {
            Some(Placement::Team) => {
                self.team.retain(|h| *h != handle);
                self.storage.push(handle);
                Ok(Placement::Storage)
            }
            Some(Placement::Storage) => {
                if self.team.is_full() {
                    return Err(PlayerError::TeamFull);
                }
                self.storage.retain(|h| *h != handle);
                self.team.push(handle);
                Ok(Placement::Team)
            }
            None => Err(PlayerError::NotOwned { handle }),
        }
    }

    /// Builds a battle team from the current team members.
    pub fn team(&self) -> Result<Team, PlayerError> {
        if self.team.is_empty() {
            return Err(PlayerError::EmptyTeam);
        }
        Ok(Team::new(self.team.iter().copied())?)
    }

    /// Restores every word to full HP.
    pub fn heal_all(&mut self) {
        let handles: Vec<WordHandle> = self.roster.handles().collect();
        for handle in handles {
            if let Some(word) = self.roster.get_mut(handle) {
                word.change_current_hp(i64::from(word.max_hp()));
            }
        }
    }

    /// Checks the structural invariants. Used after loading saved data.
    pub fn validate(&self) -> Result<(), PlayerError> {
        validate_username(&self.username)?;
        self.roster.validate()?;
        let placed = self.team.len() + self.storage.len();
        if placed != self.roster.len() {
            return Err(PlayerError::Inconsistent {
                reason: "team and storage do not cover the roster",
            });
        }
        for (position, handle) in self.team.iter().chain(&self.storage).enumerate() {
            if !self.roster.contains(*handle) {
                return Err(PlayerError::Inconsistent {
                    reason: "placement refers to a missing word",
                });
            }
            let duplicated = self
                .team
                .iter()
                .chain(&self.storage)
                .skip(position + 1)
                .any(|other| other == handle);
            if duplicated {
                return Err(PlayerError::Inconsistent {
                    reason: "word placed twice",
                });
            }
        }
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), PlayerError> {
    let length = username.chars().count();
    if !(GameConfig::MIN_USERNAME_LENGTH..=GameConfig::MAX_USERNAME_LENGTH).contains(&length) {
        return Err(PlayerError::InvalidUsername {
            length,
            min: GameConfig::MIN_USERNAME_LENGTH,
            max: GameConfig::MAX_USERNAME_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordTable;
    use crate::word::generate;

    fn table() -> WordTable {
        let mut table = WordTable::new();
        table.load_lines(["ant", "bee", "cat", "dog"]).unwrap();
        table
    }

    fn player_with(words: &[&str]) -> (Player, Vec<WordHandle>) {
        let table = table();
        let mut player = Player::new("ada").unwrap();
        let handles = words
            .iter()
            .map(|text| player.add_word(generate(text, 5, &table).unwrap()).unwrap().0)
            .collect();
        (player, handles)
    }

    #[test]
    fn username_length_is_checked() {
        assert!(matches!(
            Player::new("ab"),
            Err(PlayerError::InvalidUsername { length: 2, .. })
        ));
        assert!(Player::new(&"x".repeat(26)).is_err());
        assert!(Player::new(&"x".repeat(25)).is_ok());
        assert_eq!(Player::new("ada").unwrap().username(), "ada");
    }

    #[test]
    fn first_three_words_join_the_team() {
        let (player, handles) = player_with(&["ant", "bee", "cat", "dog"]);
        assert_eq!(player.team_members(), &handles[..3]);
        assert_eq!(player.storage(), &handles[3..]);
        assert_eq!(player.placement(handles[3]), Some(Placement::Storage));
        assert_eq!(player.word_count(), 4);
        player.validate().unwrap();
    }

    #[test]
    fn removing_keeps_other_handles_valid() {
        let (mut player, handles) = player_with(&["ant", "bee", "cat", "dog"]);
        let removed = player.remove_word(handles[1]).unwrap();
        assert_eq!(removed.text(), "BEE");
        assert_eq!(player.team_members(), &[handles[0], handles[2]]);
        assert_eq!(player.word(handles[3]).unwrap().text(), "DOG");
        assert_eq!(
            player.remove_word(handles[1]),
            Err(PlayerError::NotOwned { handle: handles[1] })
        );
        player.validate().unwrap();
    }

    #[test]
    fn failed_removal_leaves_placement_alone() {
        let (mut player, handles) = player_with(&["ant", "bee"]);
        let stale = player.roster.remove(handles[1]).unwrap();
        assert_eq!(stale.text(), "BEE");

        assert!(matches!(
            player.remove_word(handles[1]),
            Err(PlayerError::Roster(RosterError::StaleHandle { .. }))
        ));
        assert_eq!(player.team_members(), &handles[..]);
    }

    #[test]
    fn swapping_moves_between_team_and_storage() {
        let (mut player, handles) = player_with(&["ant", "bee", "cat", "dog"]);
        assert_eq!(player.swap_word(handles[3]), Err(PlayerError::TeamFull));

        assert_eq!(player.swap_word(handles[0]).unwrap(), Placement::Storage);
        assert_eq!(player.swap_word(handles[3]).unwrap(), Placement::Team);
        assert_eq!(player.team_members(), &[handles[1], handles[2], handles[3]]);
        assert_eq!(player.storage(), &[handles[0]]);
        player.validate().unwrap();
    }

    #[test]
    fn team_requires_members() {
        let player = Player::new("ada").unwrap();
        assert_eq!(player.team(), Err(PlayerError::EmptyTeam));

        let (player, handles) = player_with(&["ant", "bee"]);
        let team = player.team().unwrap();
        assert_eq!(team.members(), &handles[..]);
    }

    #[test]
    fn heal_all_restores_hp() {
        let (mut player, handles) = player_with(&["ant"]);
        player
            .roster_mut()
            .word_mut(handles[0])
            .unwrap()
            .change_current_hp(-5);
        player.heal_all();
        let word = player.word(handles[0]).unwrap();
        assert_eq!(word.current_hp(), word.max_hp());
    }
}
