//! The persistent player character.

use crate::env::{GameEnv, RulesTable, Special};
use crate::state::{
    CodexId, Consumables, Equipment, ItemId, Position, QuestId, QuestLog, SkillCooldowns,
    StatusEffects, Tonic,
};
use crate::stats::EffectiveStats;

/// Player character. This is also the persisted save record: optional fields
/// default when missing so older saves keep loading.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    pub gold: u64,
    pub health: u32,
    /// Derived values from the last recomputation; rebuilt after load.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: EffectiveStats,
    #[cfg_attr(feature = "serde", serde(default = "default_base_attack"))]
    pub base_attack: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_defense: i32,
    /// Permanent bonuses from rewards.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_attack: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_defense: i32,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<ItemId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumables: Consumables,
    /// Tonic drunk for the next encounter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub primed_tonic: Option<Tonic>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub codex: Vec<CodexId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub focused_echo: Option<CodexId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldowns: SkillCooldowns,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skip_next_turn: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub guard: bool,
    /// The one-time respawn has been used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub respawned: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_seal_intact"))]
    pub seal_intact: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub holds_key: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quests: QuestLog,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: StatusEffects,
}

#[cfg(feature = "serde")]
fn default_base_attack() -> i32 {
    RulesTable::default().start.base_attack
}

#[cfg(feature = "serde")]
fn default_seal_intact() -> bool {
    true
}

impl Player {
    /// Creates a level-1 character from the starting kit.
    ///
    /// Stats are seeded with the level-1 base values; equipment bonuses are
    /// folded in by the next recomputation.
    pub fn new(name: impl Into<String>, rules: &RulesTable, first_step: Option<QuestId>) -> Self {
        let kit = &rules.start;
        let max_health = rules.progression.level_max_health(1);
        Self {
            name: name.into(),
            level: 1,
            xp: 0,
            xp_to_next: rules.progression.base_xp_threshold,
            gold: 0,
            health: max_health,
            stats: EffectiveStats {
                attack: kit.base_attack,
                defense: kit.base_defense,
                max_health,
                gold_bonus: 0,
            },
            base_attack: kit.base_attack,
            base_defense: kit.base_defense,
            bonus_attack: 0,
            bonus_defense: 0,
            position: kit.position,
            equipment: Equipment::default(),
            inventory: kit.inventory.clone(),
            consumables: Consumables {
                potions: kit.potions,
                ..Consumables::default()
            },
            primed_tonic: None,
            codex: Vec::new(),
            focused_echo: None,
            cooldowns: SkillCooldowns::new(),
            skip_next_turn: false,
            guard: false,
            respawned: false,
            seal_intact: true,
            holds_key: false,
            quests: QuestLog::starting_at(first_step),
            effects: StatusEffects::empty(),
        }
    }

    pub fn max_health(&self) -> u32 {
        self.stats.max_health
    }

    pub fn has_codex_entry(&self, id: &str) -> bool {
        self.codex.iter().any(|entry| entry == id)
    }

    pub fn is_focused_on(&self, id: &str) -> bool {
        self.focused_echo.as_ref().is_some_and(|entry| entry == id)
    }

    /// Sources of passive specials in lookup order: equipped items by slot,
    /// then the focused echo.
    pub fn specials<'a>(
        &'a self,
        env: GameEnv<'a>,
    ) -> impl Iterator<Item = (&'a str, Special)> + 'a {
        let items = self
            .equipment
            .iter()
            .filter_map(move |id| env.item(id.as_str()))
            .filter_map(|item| item.special.map(|s| (item.name.as_str(), s)));
        let echo = self
            .focused_echo
            .iter()
            .filter_map(move |id| env.codex_entry(id.as_str()))
            .filter_map(|entry| entry.special.map(|s| (entry.title.as_str(), s)));
        items.chain(echo)
    }
}
