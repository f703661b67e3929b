//! Main-quest chain and side-quest pool definitions.

use crate::state::{CodexId, MonsterId, QuestId};

/// Read-only catalog of quest definitions.
pub trait QuestOracle: Send + Sync {
    /// Step the main quest starts at for a new character.
    fn first_main_step(&self) -> Option<&QuestId>;

    fn main_step(&self, id: &str) -> Option<&MainQuestStep>;

    fn side_quest(&self, id: &str) -> Option<&SideQuest>;

    /// All side quests in table order.
    fn side_quests(&self) -> Vec<&SideQuest>;

    /// All main-quest steps in table order.
    fn main_steps(&self) -> Vec<&MainQuestStep>;
}

/// What has to happen for a quest to be complete.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    Visit { location: String },
    Talk { npc: String },
    Kill { monster: MonsterId, count: u32 },
    CollectEcho { entry: CodexId },
}

impl Objective {
    /// Counter value that marks the objective as complete.
    pub fn required(&self) -> u32 {
        match self {
            Self::Kill { count, .. } => (*count).max(1),
            _ => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestReward {
    pub gold: u64,
    pub xp: u64,
}

impl QuestReward {
    pub const fn new(gold: u64, xp: u64) -> Self {
        Self { gold, xp }
    }
}

/// Narrative branch of the main quest.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StoryPath {
    Hero,
    Reckless,
}

/// Where the chain goes once a step completes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NextStep {
    Step(QuestId),
    /// The player picks a path; the chosen step starts immediately.
    Branch { hero: QuestId, reckless: QuestId },
    End,
}

/// World flag changes attached to starting or completing a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldChange {
    BreakSeal,
    GrantKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MainQuestStep {
    pub id: QuestId,
    pub title: String,
    pub objective: Objective,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: QuestReward,
    pub next: NextStep,
    /// Branch this step belongs to; `None` before the branch point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub path: Option<StoryPath>,
    /// Talk steps only count while this echo is focused.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_focused_echo: Option<CodexId>,
    /// Minimum effective attack to choose a branch.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_attack: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_start: Vec<WorldChange>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_complete: Vec<WorldChange>,
}

impl MainQuestStep {
    pub fn new(
        id: impl Into<QuestId>,
        title: impl Into<String>,
        objective: Objective,
        next: NextStep,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            objective,
            reward: QuestReward::default(),
            next,
            path: None,
            requires_focused_echo: None,
            min_attack: None,
            on_start: Vec::new(),
            on_complete: Vec::new(),
        }
    }

    pub fn with_reward(mut self, gold: u64, xp: u64) -> Self {
        self.reward = QuestReward::new(gold, xp);
        self
    }

    pub fn on_path(mut self, path: StoryPath) -> Self {
        self.path = Some(path);
        self
    }

    pub fn requiring_echo(mut self, entry: impl Into<CodexId>) -> Self {
        self.requires_focused_echo = Some(entry.into());
        self
    }

    pub fn with_min_attack(mut self, attack: i32) -> Self {
        self.min_attack = Some(attack);
        self
    }

    pub fn starting_with(mut self, change: WorldChange) -> Self {
        self.on_start.push(change);
        self
    }

    pub fn completing_with(mut self, change: WorldChange) -> Self {
        self.on_complete.push(change);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideQuest {
    pub id: QuestId,
    pub title: String,
    pub objective: Objective,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: QuestReward,
    #[cfg_attr(feature = "serde", serde(default = "default_min_level"))]
    pub min_level: u32,
    /// Only offered while the main quest is on this path.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exclusive_path: Option<StoryPath>,
    /// False for quests handed out by an NPC instead of the board.
    #[cfg_attr(feature = "serde", serde(default = "default_board"))]
    pub board: bool,
}

#[cfg(feature = "serde")]
fn default_min_level() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_board() -> bool {
    true
}

impl SideQuest {
    pub fn new(
        id: impl Into<QuestId>,
        title: impl Into<String>,
        objective: Objective,
        reward: QuestReward,
        min_level: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            objective,
            reward,
            min_level,
            exclusive_path: None,
            board: true,
        }
    }

    pub fn exclusive_to(mut self, path: StoryPath) -> Self {
        self.exclusive_path = Some(path);
        self
    }

    pub fn off_board(mut self) -> Self {
        self.board = false;
        self
    }
}
