//! Content factory for building a snapshot from data files.

use std::path::{Path, PathBuf};

use auren_core::env::{CodexEntry, EffectDefinition, ItemDefinition, MonsterTemplate};
use auren_core::{ContentSnapshot, RulesTable};

use crate::loaders::{
    CodexLoader, EffectLoader, ItemLoader, LoadResult, MonsterLoader, QuestCatalog, QuestLoader,
    TablesLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml
/// ├── effects.ron
/// ├── items.ron
/// ├── codex.ron
/// ├── monsters.ron
/// └── quests.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance rules from `tables.toml`. A missing file yields the
    /// default table.
    pub fn load_tables(&self) -> LoadResult<RulesTable> {
        let path = self.data_dir.join("tables.toml");
        if !path.exists() {
            return Ok(RulesTable::default());
        }
        TablesLoader::load(&path)
    }

    /// Load effect definitions from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<Vec<EffectDefinition>> {
        EffectLoader::load(&self.data_dir.join("effects.ron"))
    }

    /// Load equipment from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load codex entries from `codex.ron`.
    pub fn load_codex(&self) -> LoadResult<Vec<CodexEntry>> {
        CodexLoader::load(&self.data_dir.join("codex.ron"))
    }

    /// Load monster templates from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<Vec<MonsterTemplate>> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load the quest chain and side-quest pool from `quests.ron`.
    pub fn load_quests(&self) -> LoadResult<QuestCatalog> {
        QuestLoader::load(&self.data_dir.join("quests.ron"))
    }

    /// Loads every catalog into one snapshot.
    ///
    /// The snapshot is not validated; run [`crate::validate`] on it before use.
    pub fn load_snapshot(&self) -> LoadResult<ContentSnapshot> {
        let quests = self.load_quests()?;
        Ok(ContentSnapshot::new(self.load_tables()?)
            .with_effects(self.load_effects()?)
            .with_items(self.load_items()?)
            .with_codex(self.load_codex()?)
            .with_monsters(self.load_monsters()?)
            .with_main_quest(quests.main)
            .with_side_quests(quests.side))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
