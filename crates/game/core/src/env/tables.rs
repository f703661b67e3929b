//! Balance rules table.

use crate::state::{EffectId, ItemId, Position};

/// Provides the balance rules the engine reads at every step.
pub trait TablesOracle: Send + Sync {
    fn rules(&self) -> &RulesTable;
}

/// Tunable numbers of the game. Defaults match the shipped balance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesTable {
    pub progression: ProgressionRules,
    pub consumables: ConsumableRules,
    pub world: WorldRules,
    pub quests: QuestRules,
    pub start: StartingKit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionRules {
    pub max_level: u32,
    /// Experience needed to leave level 1.
    pub base_xp_threshold: u64,
    /// Each threshold is `floor(previous * growth / 100)`.
    pub xp_growth_percent: u64,
    pub base_max_health: u32,
    pub health_per_level: u32,
    pub attack_per_level: i32,
    /// Health after a respawn is `max(this, max_health / 2)`.
    pub respawn_min_health: u32,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            max_level: 50,
            base_xp_threshold: 40,
            xp_growth_percent: 160,
            base_max_health: 50,
            health_per_level: 10,
            attack_per_level: 1,
            respawn_min_health: 20,
        }
    }
}

impl ProgressionRules {
    /// Threshold following `previous`.
    pub fn next_threshold(&self, previous: u64) -> u64 {
        previous.saturating_mul(self.xp_growth_percent) / 100
    }

    /// Max health a player of `level` has before equipment and echoes.
    pub fn level_max_health(&self, level: u32) -> u32 {
        self.base_max_health
            .saturating_add(self.health_per_level.saturating_mul(level.saturating_sub(1)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsumableRules {
    pub potion_heal: u32,
    pub potion_cures: Vec<EffectId>,
    pub elixir_heal: u32,
    /// Chance to find a potion after a victory, in percent.
    pub potion_find_chance: u32,
    pub rage_tonic_attack: i32,
    pub stone_tonic_defense: i32,
    /// Purify removes the first active effect from this list.
    pub purify_cures: Vec<EffectId>,
}

impl Default for ConsumableRules {
    fn default() -> Self {
        Self {
            potion_heal: 25,
            potion_cures: vec![EffectId::new("poison"), EffectId::new("bleed")],
            elixir_heal: 50,
            potion_find_chance: 30,
            rage_tonic_attack: 5,
            stone_tonic_defense: 2,
            purify_cures: vec![EffectId::new("poison"), EffectId::new("burn")],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldRules {
    pub map: MapDimensions,
    /// Respawn point and fallback for out-of-map saves.
    pub town: Position,
    /// Location name whose visit is reported when entering the town.
    pub town_location: String,
}

impl Default for WorldRules {
    fn default() -> Self {
        Self {
            map: MapDimensions::new(8, 6),
            town: Position::new(2, 3),
            town_location: "town".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestRules {
    pub max_active_side_quests: usize,
    /// Side quests are offered while `min_level <= level <= min_level + window`.
    pub side_quest_level_window: u32,
    pub board_offer_count: usize,
}

impl Default for QuestRules {
    fn default() -> Self {
        Self {
            max_active_side_quests: 3,
            side_quest_level_window: 5,
            board_offer_count: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StartingKit {
    pub position: Position,
    pub base_attack: i32,
    pub base_defense: i32,
    pub potions: u32,
    pub inventory: Vec<ItemId>,
}

impl Default for StartingKit {
    fn default() -> Self {
        Self {
            position: Position::new(1, 3),
            base_attack: 3,
            base_defense: 0,
            potions: 1,
            inventory: vec![ItemId::new("rusted_sword")],
        }
    }
}
