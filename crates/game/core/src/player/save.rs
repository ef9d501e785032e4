//! Binary save codec for [`Player`].
//!
//! # Format
//!
//! ```text
//! +----------+-------------------------+----------+
//! | SAVEWSM1 | bincode(Player)         | SAVEWSM1 |
//! +----------+-------------------------+----------+
//!   8 bytes    variable                  8 bytes
//! ```
//!
//! Words are stored as-is, so a loaded word is identical to the saved one
//! without regenerating it from its text.

use super::{Player, PlayerError};
use crate::error::{ErrorSeverity, GameError};

/// Header and footer framing every save.
pub const MAGIC: [u8; 8] = *b"SAVEWSM1";

/// Errors raised while encoding or decoding a save.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("failed to encode player: {0}")]
    Encode(String),

    #[error("corrupt save data: {0}")]
    Corrupt(String),
}

impl GameError for SaveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SaveError::Encode(_) => ErrorSeverity::Internal,
            SaveError::Corrupt(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SaveError::Encode(_) => "SAVE_ENCODE",
            SaveError::Corrupt(_) => "SAVE_CORRUPT",
        }
    }
}

impl From<PlayerError> for SaveError {
    fn from(error: PlayerError) -> Self {
        SaveError::Corrupt(error.to_string())
    }
}

/// Serializes a player into a framed save blob.
pub fn encode(player: &Player) -> Result<Vec<u8>, SaveError> {
    let payload = bincode::serialize(player).map_err(|e| SaveError::Encode(e.to_string()))?;
    let mut bytes = Vec::with_capacity(payload.len() + 2 * MAGIC.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&payload);
    bytes.extend_from_slice(&MAGIC);
    Ok(bytes)
}

/// Parses a framed save blob and checks the player's invariants.
pub fn decode(bytes: &[u8]) -> Result<Player, SaveError> {
    let payload = bytes
        .strip_prefix(&MAGIC)
        .ok_or_else(|| SaveError::Corrupt("missing header".into()))?
        .strip_suffix(&MAGIC)
        .ok_or_else(|| SaveError::Corrupt("missing footer".into()))?;
    let player: Player =
        bincode::deserialize(payload).map_err(|e| SaveError::Corrupt(e.to_string()))?;
    player.validate()?;
    tracing::debug!(player = player.username(), words = player.word_count(), "save decoded");
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordTable;
    use crate::roster::WordHandle;
    use crate::word::generate;

    /// Same field layout as `WordRoster`, with every field writable.
    #[derive(serde::Serialize)]
    struct RawRoster {
        slots: Vec<()>,
        free: Vec<u16>,
        len: usize,
        capacity: usize,
    }

    /// Same field layout as `Player`.
    #[derive(serde::Serialize)]
    struct RawPlayer {
        username: &'static str,
        roster: RawRoster,
        team: Vec<WordHandle>,
        storage: Vec<WordHandle>,
    }

    fn framed(raw: &RawPlayer) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&bincode::serialize(raw).unwrap());
        bytes.extend_from_slice(&MAGIC);
        bytes
    }

    fn empty_roster_save(free: Vec<u16>, len: usize) -> Vec<u8> {
        framed(&RawPlayer {
            username: "mallory",
            roster: RawRoster {
                slots: Vec::new(),
                free,
                len,
                capacity: 100,
            },
            team: Vec::new(),
            storage: Vec::new(),
        })
    }

    fn player() -> Player {
        let mut table = WordTable::new();
        table.load_lines(["cat", "explosion"]).unwrap();
        let mut player = Player::new("wordsmith").unwrap();
        for text in ["cat", "explosion", "zzyzx", "quiet"] {
            player.add_word(generate(text, 30, &table).unwrap()).unwrap();
        }
        let first = player.team_members()[0];
        player
            .roster_mut()
            .word_mut(first)
            .unwrap()
            .gain_experience(2000);
        player
    }

    #[test]
    fn saved_player_reloads_identically() {
        let player = player();
        let bytes = encode(&player).unwrap();
        assert_eq!(&bytes[..8], b"SAVEWSM1");
        assert_eq!(&bytes[bytes.len() - 8..], b"SAVEWSM1");

        let loaded = decode(&bytes).unwrap();
        assert_eq!(loaded, player);
    }

    #[test]
    fn bad_framing_is_corrupt() {
        let bytes = encode(&player()).unwrap();

        let mut no_header = bytes.clone();
        no_header[0] = b'X';
        assert!(matches!(decode(&no_header), Err(SaveError::Corrupt(_))));

        let truncated = &bytes[..bytes.len() - 1];
        assert!(matches!(decode(truncated), Err(SaveError::Corrupt(_))));

        assert!(matches!(decode(b"SAVEWSM1"), Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn layout_mirror_matches_a_real_save() {
        let bytes = empty_roster_save(Vec::new(), 0);
        let player = decode(&bytes).unwrap();
        assert_eq!(player.username(), "mallory");
        assert_eq!(encode(&player).unwrap(), bytes);
    }

    #[test]
    fn dangling_free_list_is_corrupt() {
        let bytes = empty_roster_save(vec![7], 0);
        assert!(matches!(decode(&bytes), Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn miscounted_roster_is_corrupt() {
        let bytes = empty_roster_save(Vec::new(), 1);
        assert!(matches!(decode(&bytes), Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn decoded_players_accept_new_words() {
        let mut table = WordTable::new();
        table.load_lines(["cat"]).unwrap();
        let bytes = encode(&player()).unwrap();
        let mut loaded = decode(&bytes).unwrap();
        let removed = loaded.storage()[0];
        loaded.remove_word(removed).unwrap();

        let mut reloaded = decode(&encode(&loaded).unwrap()).unwrap();
        let (handle, _) = reloaded.add_word(generate("cat", 5, &table).unwrap()).unwrap();
        assert_eq!(handle.index(), removed.index());
        assert_ne!(handle, removed);
    }

    #[test]
    fn garbage_payload_is_corrupt() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&[0xFF; 5]);
        bytes.extend_from_slice(&MAGIC);
        assert!(matches!(decode(&bytes), Err(SaveError::Corrupt(_))));
    }
}
