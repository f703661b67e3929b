//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules, content loading and repositories so clients
//! can bubble them up with consistent context.

use auren_content::ValidationIssue;
use auren_core::{CombatError, GameError, LoadoutError, OracleError, Position, QuestError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load content: {0}")]
    ContentLoad(String),

    #[error("content failed validation with {} issue(s)", .0.len())]
    InvalidContent(Vec<ValidationIssue>),

    #[error("an encounter is already in progress")]
    EncounterInProgress,

    #[error("no encounter in progress")]
    NoEncounter,

    /// The player fell twice; the save can no longer be played.
    #[error("the journey has ended")]
    JourneyOver,

    /// The player is at zero health and must respawn before doing anything
    /// else.
    #[error("the player is down; respawn first")]
    Downed,

    #[error("the player is not down")]
    NotDowned,

    #[error("position ({}, {}) is outside the map", .0.x, .0.y)]
    OutOfBounds(Position),

    #[error("save slot {0} is empty")]
    EmptySlot(u8),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error(transparent)]
    Loadout(#[from] LoadoutError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    /// Whether the session can carry on after this error. Player mistakes are
    /// recoverable; broken content and storage are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::EncounterInProgress
            | Self::NoEncounter
            | Self::OutOfBounds(_)
            | Self::EmptySlot(_)
            | Self::Downed
            | Self::NotDowned => true,
            Self::Combat(err) => !err.severity().is_internal(),
            Self::Quest(err) => !err.severity().is_internal(),
            Self::Loadout(err) => !err.severity().is_internal(),
            Self::Oracle(_)
            | Self::Repository(_)
            | Self::ContentLoad(_)
            | Self::InvalidContent(_)
            | Self::JourneyOver => false,
        }
    }
}
