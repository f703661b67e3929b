//! Skill table and availability rules.

use strum::IntoEnumIterator;

use crate::state::{Player, SkillId};

/// Codex entry that teaches Reflected Strike.
pub const MIRROR_ECHO: &str = "mirror_echo";

/// What a skill does when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillEffect {
    /// Hits for a percentage of battle attack.
    Strike { damage_percent: u32 },
    /// Halves the next incoming monster hit.
    Guard,
    /// Heals a percentage of max health.
    Meditate { heal_percent: u32 },
    /// Removes the first curable effect.
    Purify,
    /// Hits, then costs the player's next turn.
    ReflectedStrike { damage_percent: u32 },
}

/// How a skill is learned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unlock {
    Level(u32),
    CodexEntry(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillSpec {
    pub id: SkillId,
    pub name: &'static str,
    pub unlock: Unlock,
    pub effect: SkillEffect,
    pub cooldown: u32,
}

impl SkillSpec {
    pub fn is_unlocked(&self, player: &Player) -> bool {
        match self.unlock {
            Unlock::Level(level) => player.level >= level,
            Unlock::CodexEntry(entry) => player.has_codex_entry(entry),
        }
    }

    /// Limit Break is gated on low health as well as level.
    pub fn needs_low_health(&self) -> bool {
        self.id == SkillId::LimitBreak
    }
}

/// Static definition of every skill.
pub const fn spec(id: SkillId) -> SkillSpec {
    let (name, unlock, effect, cooldown) = match id {
        SkillId::FocusStrike => (
            "Focus Strike",
            Unlock::Level(3),
            SkillEffect::Strike {
                damage_percent: 180,
            },
            2,
        ),
        SkillId::FocusStrikeII => (
            "Focus Strike II",
            Unlock::Level(15),
            SkillEffect::Strike {
                damage_percent: 220,
            },
            2,
        ),
        SkillId::Guard => ("Guard", Unlock::Level(4), SkillEffect::Guard, 3),
        SkillId::GuardII => ("Guard II", Unlock::Level(18), SkillEffect::Guard, 2),
        SkillId::Meditate => (
            "Meditate",
            Unlock::Level(6),
            SkillEffect::Meditate { heal_percent: 15 },
            5,
        ),
        SkillId::MeditateII => (
            "Meditate II",
            Unlock::Level(20),
            SkillEffect::Meditate { heal_percent: 25 },
            4,
        ),
        SkillId::LimitBreak => (
            "Limit Break",
            Unlock::Level(10),
            SkillEffect::Strike {
                damage_percent: 300,
            },
            6,
        ),
        SkillId::Purify => ("Purify", Unlock::Level(12), SkillEffect::Purify, 4),
        SkillId::ReflectedStrike => (
            "Reflected Strike",
            Unlock::CodexEntry(MIRROR_ECHO),
            SkillEffect::ReflectedStrike {
                damage_percent: 120,
            },
            3,
        ),
    };
    SkillSpec {
        id,
        name,
        unlock,
        effect,
        cooldown,
    }
}

/// Resolves a requested skill to the rank the player actually uses.
///
/// Asking for a base skill picks its upgrade once unlocked. Returns `None`
/// when the requested rank is not learned.
pub fn resolve(player: &Player, requested: SkillId) -> Option<SkillSpec> {
    if !requested.is_upgrade()
        && let Some(upgrade) = requested.upgrade().map(spec)
        && upgrade.is_unlocked(player)
    {
        return Some(upgrade);
    }
    let requested = spec(requested);
    requested.is_unlocked(player).then_some(requested)
}

/// Skills shown in the combat menu: the highest learned rank of each line.
pub fn available(player: &Player) -> Vec<SkillSpec> {
    SkillId::iter()
        .filter(|id| !id.is_upgrade())
        .filter_map(|id| resolve(player, id))
        .collect()
}

/// `health < 25%` of max, as integer arithmetic.
pub fn is_desperate(health: u32, max_health: u32) -> bool {
    u64::from(health) * 100 < u64::from(max_health) * 25
}
