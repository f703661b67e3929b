use std::collections::BTreeMap;

use crate::state::QuestId;

/// Per-player quest bookkeeping.
///
/// Progress counters are keyed by quest id. A missing key means "not
/// started"; main-quest keys stay behind as completion markers, side-quest
/// keys are deleted on turn-in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestLog {
    /// Current main-quest step.
    pub main_quest: Option<QuestId>,
    pub progress: BTreeMap<QuestId, u32>,
    pub active_side_quests: Vec<QuestId>,
    pub completed_side_quests: Vec<QuestId>,
}

impl QuestLog {
    pub fn starting_at(step: Option<QuestId>) -> Self {
        Self {
            main_quest: step,
            ..Self::default()
        }
    }

    pub fn progress(&self, quest: &str) -> Option<u32> {
        self.progress.get(quest).copied()
    }

    pub fn is_main_step(&self, quest: &str) -> bool {
        self.main_quest.as_ref().is_some_and(|id| id == quest)
    }

    pub fn is_active_side(&self, quest: &str) -> bool {
        self.active_side_quests.iter().any(|id| id == quest)
    }

    pub fn is_completed_side(&self, quest: &str) -> bool {
        self.completed_side_quests.iter().any(|id| id == quest)
    }
}
