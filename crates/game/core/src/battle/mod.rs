//! Two-team turn-based battles.
//!
//! [`Battle`] is plain state: two [`Team`]s, the turn counter, and the outcome.
//! All mutation flows through [`BattleEngine`], which borrows the battle
//! together with the rosters owning each side's words.

mod action;
mod damage;
mod engine;
mod errors;
mod events;
mod techniques;

pub use action::BattleAction;
pub use damage::{Mitigation, fraction_of, technique_damage};
pub use engine::BattleEngine;
pub use errors::{ActionError, BattleError};
pub use events::{BattleEvent, DamageCause, SkipReason, TurnReport};

use crate::config::GameConfig;
use crate::roster::WordRoster;
use crate::team::{Team, TeamError};

/// One of the two teams in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Users,
    Enemies,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Users, Side::Enemies];

    pub const fn opponent(self) -> Side {
        match self {
            Side::Users => Side::Enemies,
            Side::Enemies => Side::Users,
        }
    }
}

/// State of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Ongoing,
    UsersWon,
    EnemiesWon,
    /// Both teams were defeated in the same turn.
    Draw,
}

impl BattleOutcome {
    pub const fn is_over(self) -> bool {
        !matches!(self, BattleOutcome::Ongoing)
    }

    /// Outcome implied by which teams are defeated.
    pub const fn from_defeats(users_defeated: bool, enemies_defeated: bool) -> Self {
        match (users_defeated, enemies_defeated) {
            (false, false) => BattleOutcome::Ongoing,
            (false, true) => BattleOutcome::UsersWon,
            (true, false) => BattleOutcome::EnemiesWon,
            (true, true) => BattleOutcome::Draw,
        }
    }
}

/// Two teams and the bookkeeping of the fight between them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    users: Team,
    enemies: Team,
    /// Turn currently awaiting actions, starting at 1.
    turn: u32,
    outcome: BattleOutcome,
    config: GameConfig,
}

impl Battle {
    /// Starts a battle.
    ///
    /// Both teams begin with the configured technical points. If either team is
    /// already defeated the battle is over immediately, without any turn.
    pub fn new(
        users: Team,
        enemies: Team,
        user_roster: &WordRoster,
        enemy_roster: &WordRoster,
        config: &GameConfig,
    ) -> Result<Self, BattleError> {
        check_members(Side::Users, &users, user_roster)?;
        check_members(Side::Enemies, &enemies, enemy_roster)?;

        let points = config.clamped_starting_points();
        let outcome = BattleOutcome::from_defeats(
            users.is_defeated(user_roster),
            enemies.is_defeated(enemy_roster),
        );
        if outcome.is_over() {
            tracing::debug!(%outcome, "battle decided before the first turn");
        }

        Ok(Self {
            users: users.with_technical_points(points),
            enemies: enemies.with_technical_points(points),
            turn: 1,
            outcome,
            config: config.clone(),
        })
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Users => &self.users,
            Side::Enemies => &self.enemies,
        }
    }

    pub fn users(&self) -> &Team {
        &self.users
    }

    pub fn enemies(&self) -> &Team {
        &self.enemies
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn check_members(side: Side, team: &Team, roster: &WordRoster) -> Result<(), BattleError> {
    match team.members().iter().find(|handle| !roster.contains(**handle)) {
        Some(&handle) => Err(BattleError::Team {
            side,
            error: TeamError::MissingMember { handle },
        }),
        None => Ok(()),
    }
}
