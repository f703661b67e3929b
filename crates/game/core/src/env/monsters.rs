//! Monster templates and their behavior tables.

use crate::env::{Element, OnHitProc};
use crate::state::{ItemId, MonsterId};

/// Read-only catalog of monster templates.
pub trait MonsterOracle: Send + Sync {
    /// Returns the template for the given monster id.
    fn template(&self, id: &str) -> Option<&MonsterTemplate>;

    /// Returns all monster templates available in this oracle.
    fn all_templates(&self) -> Vec<&MonsterTemplate>;
}

/// Static description of a species. Every encounter deep-copies the numbers
/// it needs into a fresh [`Monster`](crate::state::Monster).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub id: MonsterId,
    pub name: String,
    pub max_health: u32,
    pub attack: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: i32,
    pub gold: u64,
    pub xp: u64,
    /// Independent drop rolls, in table order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<LootEntry>,
    /// Effects rolled against the player after each monster action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_hit: Vec<OnHitProc>,
    /// Specials in priority order; the first entry whose trigger holds and
    /// whose chance succeeds is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub behaviors: Vec<BehaviorEntry>,
    /// Victory over this monster ends the game.
    #[cfg_attr(feature = "serde", serde(default))]
    pub final_boss: bool,
}

impl MonsterTemplate {
    pub fn new(
        id: impl Into<MonsterId>,
        name: impl Into<String>,
        max_health: u32,
        attack: i32,
        gold: u64,
        xp: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_health,
            attack,
            defense: 0,
            gold,
            xp,
            loot: Vec::new(),
            on_hit: Vec::new(),
            behaviors: Vec::new(),
            final_boss: false,
        }
    }

    pub fn with_loot(mut self, item: impl Into<ItemId>, chance: u32) -> Self {
        self.loot.push(LootEntry {
            item: item.into(),
            chance,
        });
        self
    }

    pub fn with_on_hit(mut self, proc_: OnHitProc) -> Self {
        self.on_hit.push(proc_);
        self
    }

    pub fn with_behavior(mut self, entry: BehaviorEntry) -> Self {
        self.behaviors.push(entry);
        self
    }

    pub fn as_final_boss(mut self) -> Self {
        self.final_boss = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: ItemId,
    /// Percent chance, 0-100.
    pub chance: u32,
}

/// One row of a species behavior table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorEntry {
    /// All conditions must hold before the chance is rolled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub when: Vec<Trigger>,
    /// Percent chance, 0-100.
    pub chance: u32,
    pub behavior: Behavior,
}

impl BehaviorEntry {
    pub fn new(chance: u32, behavior: Behavior) -> Self {
        Self {
            when: Vec::new(),
            chance,
            behavior,
        }
    }

    pub fn when(mut self, trigger: Trigger) -> Self {
        self.when.push(trigger);
        self
    }
}

/// Precondition of a behavior entry, checked against the monster itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    /// Not already holding a hardened token.
    NotHardened,
    /// Has not enraged this encounter.
    NotEnraged,
    /// Current health at or below a flat value.
    HealthAtMost(u32),
    /// Current health at or below a percentage of max health.
    HealthPercentAtMost(u32),
}

/// Monster special actions.
///
/// Percent-scaled damage uses `floor(attack * percent / 100)` before defense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    /// Gain a token that halves the next physical hit taken.
    Harden,
    /// Put one of the player's drainable skills on cooldown.
    SabotageCooldown { turns: u32 },
    /// Hit, then heal a share of the damage dealt.
    LifeDrain {
        damage_percent: u32,
        heal_percent: u32,
    },
    /// Regain a flat amount of health.
    Heal { amount: u32 },
    /// Permanently raise attack for the rest of the encounter.
    Enrage { attack_bonus: i32 },
    /// Several weaker hits; stops when the player falls.
    MultiHit { hits: u32, damage_percent: u32 },
    /// A heavy hit that leaves the monster exhausted for its next turn.
    HeavyStrike { damage_percent: u32 },
    /// Fixed elemental damage, halved by guard before defense and reduced by
    /// a matching resistance.
    Breath { damage: u32, element: Element },
}
