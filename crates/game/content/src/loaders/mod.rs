//! Content loaders for reading game data from files.
//!
//! Each catalog file has one loader. `load` reads a file from disk, `parse`
//! takes the text directly so the bundled copy and tests share the same path.

pub mod codex;
pub mod effects;
pub mod factory;
pub mod items;
pub mod monsters;
pub mod quests;
pub mod tables;

pub use codex::CodexLoader;
pub use effects::EffectLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use monsters::MonsterLoader;
pub use quests::{QuestCatalog, QuestLoader};
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
