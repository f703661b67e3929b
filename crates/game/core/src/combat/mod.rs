//! Turn-based combat between the player and a single monster.
//!
//! [`Encounter`] owns the monster instance and the encounter's roll stream;
//! the player is borrowed per call so that the caller keeps ownership of the
//! persistent character. Damage arithmetic lives in [`damage`], the skill
//! table in [`skills`] and the monster behavior lookup in [`monster_ai`].

pub mod damage;
mod encounter;
mod error;
mod events;
pub mod monster_ai;
mod rewards;
pub mod skills;

pub use encounter::{CombatAction, CombatState, Encounter, RoundResult};
pub use error::CombatError;
pub use events::{AttackKind, CombatEvent};
pub use rewards::Rewards;
pub use skills::{SkillEffect, SkillSpec, Unlock};
