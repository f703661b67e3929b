//! Content tables compiled into the binary.

use auren_core::ContentSnapshot;

use crate::loaders::{
    CodexLoader, EffectLoader, ItemLoader, LoadResult, MonsterLoader, QuestLoader, TablesLoader,
};

const TABLES: &str = include_str!("../data/tables.toml");
const EFFECTS: &str = include_str!("../data/effects.ron");
const ITEMS: &str = include_str!("../data/items.ron");
const CODEX: &str = include_str!("../data/codex.ron");
const MONSTERS: &str = include_str!("../data/monsters.ron");
const QUESTS: &str = include_str!("../data/quests.ron");

/// Parses the shipped content. Used when no data directory is configured.
pub fn bundled() -> LoadResult<ContentSnapshot> {
    let quests = QuestLoader::parse(QUESTS)?;
    Ok(ContentSnapshot::new(TablesLoader::parse(TABLES)?)
        .with_effects(EffectLoader::parse(EFFECTS)?)
        .with_items(ItemLoader::parse(ITEMS)?)
        .with_codex(CodexLoader::parse(CODEX)?)
        .with_monsters(MonsterLoader::parse(MONSTERS)?)
        .with_main_quest(quests.main)
        .with_side_quests(quests.side))
}
