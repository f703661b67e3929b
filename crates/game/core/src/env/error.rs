//! Oracle access errors.
//!
//! Errors related to oracle availability and content lookups that cannot be
//! skipped.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing Oracle data.
///
/// Most content lookups degrade to a no-op when an id is unknown. These
/// variants cover the cases where the engine cannot proceed: a missing oracle
/// or a request naming content that must exist (starting a fight).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// MonsterOracle is not available in the environment.
    #[error("MonsterOracle not available")]
    MonstersNotAvailable,

    /// ItemOracle is not available in the environment.
    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    /// EffectOracle is not available in the environment.
    #[error("EffectOracle not available")]
    EffectsNotAvailable,

    /// CodexOracle is not available in the environment.
    #[error("CodexOracle not available")]
    CodexNotAvailable,

    /// QuestOracle is not available in the environment.
    #[error("QuestOracle not available")]
    QuestsNotAvailable,

    /// TablesOracle is not available in the environment.
    #[error("TablesOracle not available")]
    TablesNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Monster template was not found by ID.
    #[error("monster template '{0}' not found")]
    MonsterNotFound(String),

    /// Item definition was not found by ID.
    #[error("item definition '{0}' not found")]
    ItemNotFound(String),

    /// Codex entry was not found by ID.
    #[error("codex entry '{0}' not found")]
    CodexEntryNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing oracles are fatal - engine cannot proceed
            MonstersNotAvailable | ItemsNotAvailable | EffectsNotAvailable | CodexNotAvailable
            | QuestsNotAvailable | TablesNotAvailable | RngNotAvailable => ErrorSeverity::Fatal,

            // Not found errors are validation errors - invalid references
            MonsterNotFound(_) | ItemNotFound(_) | CodexEntryNotFound(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MonstersNotAvailable => "ORACLE_MONSTERS_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            EffectsNotAvailable => "ORACLE_EFFECTS_NOT_AVAILABLE",
            CodexNotAvailable => "ORACLE_CODEX_NOT_AVAILABLE",
            QuestsNotAvailable => "ORACLE_QUESTS_NOT_AVAILABLE",
            TablesNotAvailable => "ORACLE_TABLES_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            MonsterNotFound(_) => "ORACLE_MONSTER_NOT_FOUND",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            CodexEntryNotFound(_) => "ORACLE_CODEX_ENTRY_NOT_FOUND",
        }
    }
}
