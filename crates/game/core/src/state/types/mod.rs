pub mod common;
pub mod equipment;
pub mod monster;
pub mod player;
pub mod quest_log;
pub mod skills;
pub mod status;

pub use common::{CodexId, EffectId, ItemId, MonsterId, Position, QuestId};
pub use equipment::{Consumables, Equipment, ItemKind, Tonic};
pub use monster::{CombatFlags, Monster};
pub use player::Player;
pub use quest_log::QuestLog;
pub use skills::{SkillCooldowns, SkillId};
pub use status::{ActiveEffect, StatusEffects};
