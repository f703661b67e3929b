use core::fmt;

use crate::env::QuestReward;

/// Something the progression tracker did to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    GoldGained {
        amount: u64,
    },
    XpGained {
        amount: u64,
    },
    LeveledUp {
        level: u32,
        max_health: u32,
        attack: i32,
    },
    MaxLevelReached,
    CodexEntryAdded {
        title: String,
    },
    /// Permanent bonus stats were raised; `total_attack` is the new effective
    /// attack.
    PermanentBonus {
        attack: i32,
        defense: i32,
        total_attack: i32,
    },
    QuestProgress {
        quest: String,
        count: u32,
        required: u32,
    },
    MainStepCompleted {
        title: String,
    },
    MainQuestAdvanced {
        title: String,
    },
    /// The current step is done and waits for a story path choice.
    PathChoiceAvailable,
    /// The step cannot be completed yet: attack is below the gate.
    AttackGateNotMet {
        required: i32,
        attack: i32,
    },
    /// The step cannot be completed yet: the wrong echo is focused.
    EchoNotFocused {
        entry: String,
    },
    MainQuestFinished,
    SideQuestAccepted {
        title: String,
    },
    SideQuestReady {
        title: String,
    },
    SideQuestTurnedIn {
        title: String,
        reward: QuestReward,
    },
    SealBroken,
    KeyGranted,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoldGained { amount } => write!(f, "Gained {amount} gold"),
            Self::XpGained { amount } => write!(f, "Gained {amount} XP"),
            Self::LeveledUp {
                level,
                max_health,
                attack,
            } => write!(
                f,
                "LEVEL UP! You are now level {level} (max HP {max_health}, ATK {attack})"
            ),
            Self::MaxLevelReached => write!(f, "You have reached the maximum level!"),
            Self::CodexEntryAdded { title } => write!(f, "New echo added to the codex: {title}"),
            Self::PermanentBonus {
                attack,
                defense,
                total_attack,
            } => write!(
                f,
                "You feel stronger: {attack:+} bonus ATK, {defense:+} bonus DEF (ATK now {total_attack})"
            ),
            Self::QuestProgress {
                quest,
                count,
                required,
            } => write!(f, "{quest}: {count}/{required}"),
            Self::MainStepCompleted { title } => write!(f, "Main quest completed: {title}"),
            Self::MainQuestAdvanced { title } => write!(f, "Main quest updated: {title}"),
            Self::PathChoiceAvailable => write!(f, "A fateful choice awaits you"),
            Self::AttackGateNotMet { required, attack } => {
                write!(f, "Your echo is still weak (ATK {attack}/{required})")
            }
            Self::EchoNotFocused { entry } => write!(f, "You must focus on the echo '{entry}'"),
            Self::MainQuestFinished => write!(f, "The main quest is complete"),
            Self::SideQuestAccepted { title } => write!(f, "Accepted bounty: {title}"),
            Self::SideQuestReady { title } => {
                write!(f, "Side quest '{title}' complete! Turn it in at the quest board")
            }
            Self::SideQuestTurnedIn { title, reward } => write!(
                f,
                "Turned in '{title}': {} gold, {} XP",
                reward.gold, reward.xp
            ),
            Self::SealBroken => write!(f, "The seal has been broken"),
            Self::KeyGranted => write!(f, "You receive the ancient key"),
        }
    }
}
