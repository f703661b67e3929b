//! Combat request errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::progression::QuestError;
use crate::state::{ItemKind, SkillId};

/// Errors returned by [`Encounter::submit`](super::Encounter::submit).
///
/// Validation happens before anything is resolved: an error means the turn
/// was not consumed and no effect ticked.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    /// The encounter already ended.
    #[error("Encounter is over")]
    EncounterOver,

    /// The skill (or this rank of it) is not learned yet.
    #[error("Skill not learned: {0}")]
    SkillLocked(SkillId),

    #[error("Skill {skill} is on cooldown ({turns} turns)")]
    OnCooldown { skill: SkillId, turns: u32 },

    /// Limit Break needs health at or below a quarter of the maximum.
    #[error("Health is too high to use {0}")]
    HealthTooHigh(SkillId),

    #[error("No {0} left")]
    OutOfStock(ItemKind),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Victory bookkeeping failed.
    #[error(transparent)]
    Progress(#[from] QuestError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EncounterOver => ErrorSeverity::Validation,
            Self::SkillLocked(_) => ErrorSeverity::Validation,
            Self::OnCooldown { .. } | Self::HealthTooHigh(_) | Self::OutOfStock(_) => {
                ErrorSeverity::Recoverable
            }
            Self::Oracle(err) => err.severity(),
            Self::Progress(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EncounterOver => "COMBAT_ENCOUNTER_OVER",
            Self::SkillLocked(_) => "COMBAT_SKILL_LOCKED",
            Self::OnCooldown { .. } => "COMBAT_ON_COOLDOWN",
            Self::HealthTooHigh(_) => "COMBAT_HEALTH_TOO_HIGH",
            Self::OutOfStock(_) => "COMBAT_OUT_OF_STOCK",
            Self::Oracle(err) => err.error_code(),
            Self::Progress(err) => err.error_code(),
        }
    }
}
