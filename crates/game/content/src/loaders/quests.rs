//! Quest catalog loader.

use std::path::Path;

use auren_core::env::{MainQuestStep, SideQuest};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Main-quest chain and side-quest pool, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestCatalog {
    pub main: Vec<MainQuestStep>,
    #[serde(default)]
    pub side: Vec<SideQuest>,
}

/// Loader for quest definitions from RON files.
pub struct QuestLoader;

impl QuestLoader {
    pub fn load(path: &Path) -> LoadResult<QuestCatalog> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<QuestCatalog> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse quest catalog RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auren_core::env::{NextStep, Objective};

    #[test]
    fn side_quests_default_to_the_board() {
        let catalog = QuestLoader::parse(
            r#"(
                main: [(id: "mq_01", title: "Start", objective: Visit(location: "town"), next: End)],
                side: [(id: "sq_01", title: "Pests", objective: Kill(monster: "goblin", count: 4))],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.main[0].next, NextStep::End);
        let side = &catalog.side[0];
        assert!(side.board);
        assert_eq!(side.min_level, 1);
        assert_eq!(side.objective.required(), 4);
        assert!(matches!(side.objective, Objective::Kill { .. }));
    }
}
