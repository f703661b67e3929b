//! Monster instances created per encounter.

use bitflags::bitflags;

use crate::env::MonsterTemplate;
use crate::state::{MonsterId, StatusEffects};

bitflags! {
    /// Transient tokens a monster picks up during a fight.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CombatFlags: u8 {
        /// Halves the next physical hit taken, then clears.
        const HARDENED = 1 << 0;
        /// Skips the next action, then clears.
        const EXHAUSTED = 1 << 1;
        /// Enrage already used this encounter.
        const ENRAGED = 1 << 2;
    }
}

/// A monster for the duration of one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub attack: i32,
    pub defense: i32,
    pub effects: StatusEffects,
    pub flags: CombatFlags,
}

impl Monster {
    /// Fresh instance at full health.
    pub fn from_template(template: &MonsterTemplate) -> Self {
        let max_health = template.max_health.max(1);
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            health: max_health,
            max_health,
            attack: template.attack,
            defense: template.defense,
            effects: StatusEffects::empty(),
            flags: CombatFlags::empty(),
        }
    }

    pub fn is_hardened(&self) -> bool {
        self.flags.contains(CombatFlags::HARDENED)
    }

    /// Clears the exhausted token, reporting whether it was set.
    pub fn take_exhaustion(&mut self) -> bool {
        let exhausted = self.flags.contains(CombatFlags::EXHAUSTED);
        self.flags.remove(CombatFlags::EXHAUSTED);
        exhausted
    }

    /// Clears the hardened token, reporting whether it was set.
    pub fn take_hardened(&mut self) -> bool {
        let hardened = self.is_hardened();
        self.flags.remove(CombatFlags::HARDENED);
        hardened
    }
}
