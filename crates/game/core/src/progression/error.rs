//! Quest and loadout errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Tonic;

/// Errors from quest requests.
///
/// A returned error leaves the quest log untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuestError {
    /// No quest with this id exists.
    #[error("Unknown quest: {0}")]
    UnknownQuest(String),

    /// The quest is not offered to this player right now.
    #[error("Quest not available: {0}")]
    NotEligible(String),

    #[error("Quest already active: {0}")]
    AlreadyActive(String),

    /// The active side quest limit is reached.
    #[error("Too many active quests (max {max})")]
    TooManyActive { max: usize },

    #[error("Quest not active: {0}")]
    NotActive(String),

    /// The objective is not finished yet.
    #[error("Quest not complete: {0}")]
    NotComplete(String),

    /// The current main-quest step does not end in a path choice, or is not
    /// finished.
    #[error("No story choice is pending")]
    NoChoicePending,

    /// The current main-quest step id is missing from the quest table.
    #[error("Main quest step missing from content: {0}")]
    MainStepMissing(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for QuestError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownQuest(_) | Self::NotEligible(_) | Self::NotActive(_) => {
                ErrorSeverity::Validation
            }
            Self::AlreadyActive(_) | Self::NoChoicePending => ErrorSeverity::Validation,
            Self::TooManyActive { .. } | Self::NotComplete(_) => ErrorSeverity::Recoverable,
            Self::MainStepMissing(_) => ErrorSeverity::Internal,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownQuest(_) => "QUEST_UNKNOWN",
            Self::NotEligible(_) => "QUEST_NOT_ELIGIBLE",
            Self::AlreadyActive(_) => "QUEST_ALREADY_ACTIVE",
            Self::TooManyActive { .. } => "QUEST_TOO_MANY_ACTIVE",
            Self::NotActive(_) => "QUEST_NOT_ACTIVE",
            Self::NotComplete(_) => "QUEST_NOT_COMPLETE",
            Self::NoChoicePending => "QUEST_NO_CHOICE_PENDING",
            Self::MainStepMissing(_) => "QUEST_MAIN_STEP_MISSING",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

/// Errors from equipment, echo focus and tonic requests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadoutError {
    #[error("Echo not collected: {0}")]
    NotCollected(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Item not in inventory: {0}")]
    NotInInventory(String),

    #[error("No {0} tonic left")]
    NoTonic(Tonic),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for LoadoutError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotCollected(_) | Self::UnknownItem(_) | Self::NotInInventory(_) => {
                ErrorSeverity::Validation
            }
            Self::NoTonic(_) => ErrorSeverity::Recoverable,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotCollected(_) => "LOADOUT_NOT_COLLECTED",
            Self::UnknownItem(_) => "LOADOUT_UNKNOWN_ITEM",
            Self::NotInInventory(_) => "LOADOUT_NOT_IN_INVENTORY",
            Self::NoTonic(_) => "LOADOUT_NO_TONIC",
            Self::Oracle(err) => err.error_code(),
        }
    }
}
