//! Deterministic rules for Echoes of Auren.
//!
//! `auren-core` defines the canonical game rules (combat, status effects,
//! stat aggregation and quest progression) and exposes pure APIs that the
//! runtime and offline tools share. Content is read through the oracle traits
//! in [`env`]; randomness comes from an injected [`RngOracle`](env::RngOracle)
//! driven by a [`RollStream`](env::RollStream), so every outcome replays from
//! its seed.
pub mod combat;
pub mod config;
pub mod effects;
pub mod env;
pub mod error;
pub mod progression;
pub mod state;
pub mod stats;

#[cfg(test)]
mod testkit;

pub use combat::{
    CombatAction, CombatError, CombatEvent, CombatState, Encounter, Rewards, RoundResult,
};
pub use config::GameConfig;
pub use effects::{EffectEvent, TickOutcome};
pub use env::{ContentSnapshot, Env, GameEnv, OracleError, RulesTable};
pub use error::{ErrorSeverity, GameError};
pub use progression::{LoadoutError, ProgressEvent, QuestError, Respawn};
pub use state::{
    CodexId, Combatant, EffectId, ItemId, ItemKind, Monster, MonsterId, Player, Position, QuestId,
    SkillId, StatusEffects, Tonic,
};
pub use stats::{BattleStats, EffectiveStats, recompute_stats};
