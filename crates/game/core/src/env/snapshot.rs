//! In-memory content tables backing every oracle.
//!
//! The content crate builds a [`ContentSnapshot`] from RON/TOML catalogs; tests
//! build small ones by hand. Tables are immutable once built.

use std::collections::BTreeMap;

use super::{
    CodexEntry, CodexOracle, EffectDefinition, EffectOracle, ItemDefinition, ItemOracle,
    MainQuestStep, MonsterOracle, MonsterTemplate, QuestOracle, RulesTable, SideQuest,
    TablesOracle,
};
use crate::state::QuestId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete snapshot of all content tables.
///
/// Keyed tables use `BTreeMap` for deterministic iteration; quests keep their
/// declaration order because board sampling and the validation report depend
/// on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentSnapshot {
    pub effects: BTreeMap<String, EffectDefinition>,
    pub items: BTreeMap<String, ItemDefinition>,
    pub codex: BTreeMap<String, CodexEntry>,
    pub monsters: BTreeMap<String, MonsterTemplate>,
    pub main_quest: Vec<MainQuestStep>,
    pub side_quests: Vec<SideQuest>,
    pub rules: RulesTable,
}

impl ContentSnapshot {
    pub fn new(rules: RulesTable) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = EffectDefinition>) -> Self {
        self.effects
            .extend(effects.into_iter().map(|e| (e.id.0.clone(), e)));
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = ItemDefinition>) -> Self {
        self.items
            .extend(items.into_iter().map(|i| (i.id.0.clone(), i)));
        self
    }

    pub fn with_codex(mut self, entries: impl IntoIterator<Item = CodexEntry>) -> Self {
        self.codex
            .extend(entries.into_iter().map(|c| (c.id.0.clone(), c)));
        self
    }

    pub fn with_monsters(mut self, monsters: impl IntoIterator<Item = MonsterTemplate>) -> Self {
        self.monsters
            .extend(monsters.into_iter().map(|m| (m.id.0.clone(), m)));
        self
    }

    /// Appends main-quest steps. The first step ever added is where new
    /// characters start.
    pub fn with_main_quest(mut self, steps: impl IntoIterator<Item = MainQuestStep>) -> Self {
        self.main_quest.extend(steps);
        self
    }

    pub fn with_side_quests(mut self, quests: impl IntoIterator<Item = SideQuest>) -> Self {
        self.side_quests.extend(quests);
        self
    }
}

impl MonsterOracle for ContentSnapshot {
    fn template(&self, id: &str) -> Option<&MonsterTemplate> {
        self.monsters.get(id)
    }

    fn all_templates(&self) -> Vec<&MonsterTemplate> {
        self.monsters.values().collect()
    }
}

impl ItemOracle for ContentSnapshot {
    fn definition(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    fn all_definitions(&self) -> Vec<&ItemDefinition> {
        self.items.values().collect()
    }
}

impl EffectOracle for ContentSnapshot {
    fn effect(&self, id: &str) -> Option<&EffectDefinition> {
        self.effects.get(id)
    }

    fn all_effects(&self) -> Vec<&EffectDefinition> {
        self.effects.values().collect()
    }
}

impl CodexOracle for ContentSnapshot {
    fn entry(&self, id: &str) -> Option<&CodexEntry> {
        self.codex.get(id)
    }

    fn all_entries(&self) -> Vec<&CodexEntry> {
        self.codex.values().collect()
    }
}

impl QuestOracle for ContentSnapshot {
    fn first_main_step(&self) -> Option<&QuestId> {
        self.main_quest.first().map(|step| &step.id)
    }

    fn main_step(&self, id: &str) -> Option<&MainQuestStep> {
        self.main_quest.iter().find(|step| step.id == id)
    }

    fn side_quest(&self, id: &str) -> Option<&SideQuest> {
        self.side_quests.iter().find(|quest| quest.id == id)
    }

    fn side_quests(&self) -> Vec<&SideQuest> {
        self.side_quests.iter().collect()
    }

    fn main_steps(&self) -> Vec<&MainQuestStep> {
        self.main_quest.iter().collect()
    }
}

impl TablesOracle for ContentSnapshot {
    fn rules(&self) -> &RulesTable {
        &self.rules
    }
}
