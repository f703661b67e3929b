//! Mutable game state: the persistent player and per-encounter monsters.
//!
//! Nothing here consults content tables except through an explicit
//! [`GameEnv`](crate::env::GameEnv) argument, so state values can be built and
//! inspected in isolation.
mod combatant;
pub mod types;

pub use combatant::{Combatant, Resistance};
pub use types::{
    ActiveEffect, CodexId, CombatFlags, Consumables, EffectId, Equipment, ItemId, ItemKind,
    Monster, MonsterId, Player, Position, QuestId, QuestLog, SkillCooldowns, SkillId,
    StatusEffects, Tonic,
};
