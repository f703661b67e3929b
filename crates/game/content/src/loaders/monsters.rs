//! Monster template loader.

use std::path::Path;

use auren_core::env::MonsterTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Monster catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterCatalog {
    pub monsters: Vec<MonsterTemplate>,
}

/// Loader for monster templates and their behavior tables.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load monster templates from a RON file.
    ///
    /// Duplicate ids are rejected; the later entry would otherwise silently
    /// replace the earlier one in the snapshot.
    pub fn load(path: &Path) -> LoadResult<Vec<MonsterTemplate>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MonsterTemplate>> {
        let catalog: MonsterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for monster in &catalog.monsters {
            if !seen.insert(monster.id.as_str()) {
                anyhow::bail!("Duplicate monster id '{}'", monster.id);
            }
        }

        Ok(catalog.monsters)
    }
}
