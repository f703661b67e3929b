use core::fmt;

use crate::effects::EffectEvent;
use crate::progression::ProgressEvent;
use crate::state::{ItemKind, SkillId};

/// How a monster hit landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AttackKind {
    Plain,
    Swift,
    Heavy,
    Siphon,
    Breath,
}

/// Something that happened during an encounter, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatEvent {
    Started {
        monster: String,
    },
    Effect(EffectEvent),
    /// The player's turn passes without an action.
    PlayerSkipsTurn,
    PlayerHit {
        /// Skill name, `None` for a plain attack.
        skill: Option<&'static str>,
        monster: String,
        damage: u32,
        /// The hit was halved by the hardened token.
        hardened: bool,
    },
    Guarding,
    Meditated {
        healed: u32,
    },
    NothingToPurify,
    /// Reflected Strike costs the next turn.
    GatheringFocus,
    ItemUsed {
        item: ItemKind,
        healed: u32,
    },
    Fled,
    MonsterExhausted {
        monster: String,
    },
    Hardened {
        monster: String,
    },
    Enraged {
        monster: String,
        attack_bonus: i32,
    },
    MonsterHealed {
        monster: String,
        amount: u32,
    },
    MonsterHit {
        monster: String,
        kind: AttackKind,
        damage: u32,
        guarded: bool,
        resisted_by: Option<String>,
    },
    /// A heavy strike leaves the monster unable to act next turn.
    MonsterTired {
        monster: String,
    },
    Evaded {
        monster: String,
        source: String,
    },
    CooldownSabotaged {
        skill: SkillId,
        turns: u32,
    },
    Victory {
        monster: String,
    },
    Rewarded {
        gold: u64,
        bonus_gold: u64,
        xp: u64,
    },
    LootDropped {
        item: String,
    },
    PotionFound,
    Progress(ProgressEvent),
    Defeated,
    GameWon,
}

impl From<EffectEvent> for CombatEvent {
    fn from(event: EffectEvent) -> Self {
        Self::Effect(event)
    }
}

impl From<ProgressEvent> for CombatEvent {
    fn from(event: ProgressEvent) -> Self {
        Self::Progress(event)
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { monster } => write!(f, "A {monster} appears!"),
            Self::Effect(event) => event.fmt(f),
            Self::PlayerSkipsTurn => write!(f, "You skip this turn to gather strength"),
            Self::PlayerHit {
                skill,
                monster,
                damage,
                hardened,
            } => {
                if *hardened {
                    write!(f, "Your attack clangs against the hardened {monster}! ")?;
                }
                match skill {
                    Some(skill) => write!(f, "You used {skill} for {damage} damage"),
                    None => write!(f, "You dealt {damage} damage"),
                }
            }
            Self::Guarding => write!(f, "You take a defensive stance"),
            Self::Meditated { healed } => {
                write!(f, "You focus your spirit and heal for {healed} HP")
            }
            Self::NothingToPurify => write!(f, "You used Purify, but had nothing to cure"),
            Self::GatheringFocus => write!(f, "You will skip your next turn to focus"),
            Self::ItemUsed { item, healed } => write!(f, "You used a {item} (+{healed} HP)"),
            Self::Fled => write!(f, "You fled from battle"),
            Self::MonsterExhausted { monster } => {
                write!(f, "The {monster} is exhausted and does nothing")
            }
            Self::Hardened { monster } => write!(
                f,
                "The {monster} hardens its defense! (Next physical hit is halved)"
            ),
            Self::Enraged {
                monster,
                attack_bonus,
            } => write!(f, "The {monster} flies into a rage! Its ATK increases by {attack_bonus}"),
            Self::MonsterHealed { monster, amount } => {
                write!(f, "The {monster} regenerates {amount} HP")
            }
            Self::MonsterHit {
                monster,
                kind,
                damage,
                guarded,
                resisted_by,
            } => {
                match kind {
                    AttackKind::Plain => write!(f, "The {monster} dealt {damage} damage")?,
                    AttackKind::Swift => write!(f, "The {monster} strikes swiftly for {damage} damage")?,
                    AttackKind::Heavy => write!(f, "The {monster} delivers a brutal slam for {damage} damage")?,
                    AttackKind::Siphon => write!(f, "The {monster} siphons your life for {damage} damage")?,
                    AttackKind::Breath => write!(f, "The {monster} breathes fire for {damage} damage")?,
                }
                if *guarded {
                    write!(f, " (guarded)")?;
                }
                if let Some(source) = resisted_by {
                    write!(f, " ({source} resists some of it)")?;
                }
                Ok(())
            }
            Self::MonsterTired { monster } => write!(f, "The {monster} seems exhausted"),
            Self::Evaded { monster, source } => {
                write!(f, "You evaded the {monster}'s attack thanks to your {source}")
            }
            Self::CooldownSabotaged { skill, turns } => {
                write!(f, "Your {skill} skill is put on cooldown for {turns} turns")
            }
            Self::Victory { monster } => write!(f, "You defeated the {monster}!"),
            Self::Rewarded {
                gold,
                bonus_gold,
                xp,
            } => write!(f, "Gained {gold} gold (+{bonus_gold} bonus) and {xp} XP"),
            Self::LootDropped { item } => write!(f, "The enemy dropped: {item}"),
            Self::PotionFound => write!(f, "You found a potion!"),
            Self::Progress(event) => event.fmt(f),
            Self::Defeated => write!(f, "You fall to your knees..."),
            Self::GameWon => write!(f, "The dragon is slain. Auren is free!"),
        }
    }
}
