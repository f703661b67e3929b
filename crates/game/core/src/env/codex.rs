use crate::env::{OnHitProc, Special, StatModifiers};
use crate::state::{CodexId, EffectId};

/// Read-only catalog of codex (echo) entries.
pub trait CodexOracle: Send + Sync {
    fn entry(&self, id: &str) -> Option<&CodexEntry>;

    fn all_entries(&self) -> Vec<&CodexEntry>;
}

/// A collectible memory. Focusing it applies its buff; any entry can be
/// collected whether or not it carries a buff.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodexEntry {
    pub id: CodexId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buff: StatModifiers,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_hit: Option<OnHitProc>,
    /// Applied to the player when an encounter starts, unless already active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub combat_effect: Option<CombatStartEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub special: Option<Special>,
    /// Granted once, when the entry is collected, whether or not it is ever
    /// focused.
    #[cfg_attr(feature = "serde", serde(default))]
    pub collect_bonus: PermanentBonus,
}

impl CodexEntry {
    pub fn new(id: impl Into<CodexId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            buff: StatModifiers::ZERO,
            on_hit: None,
            combat_effect: None,
            special: None,
            collect_bonus: PermanentBonus::ZERO,
        }
    }

    pub fn with_buff(mut self, buff: StatModifiers) -> Self {
        self.buff = buff;
        self
    }

    pub fn with_on_hit(mut self, proc_: OnHitProc) -> Self {
        self.on_hit = Some(proc_);
        self
    }

    pub fn with_combat_effect(mut self, effect: impl Into<EffectId>, turns: u32) -> Self {
        self.combat_effect = Some(CombatStartEffect {
            effect: effect.into(),
            turns,
        });
        self
    }

    pub fn with_special(mut self, special: Special) -> Self {
        self.special = Some(special);
        self
    }

    pub fn with_collect_bonus(mut self, attack: i32, defense: i32) -> Self {
        self.collect_bonus = PermanentBonus { attack, defense };
        self
    }

    /// Whether focusing this entry changes anything.
    pub fn has_buff(&self) -> bool {
        !self.buff.is_zero()
            || self.on_hit.is_some()
            || self.combat_effect.is_some()
            || self.special.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStartEffect {
    pub effect: EffectId,
    pub turns: u32,
}

/// Permanent attack and defense added to the player's bonus stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PermanentBonus {
    pub attack: i32,
    pub defense: i32,
}

impl PermanentBonus {
    pub const ZERO: Self = Self {
        attack: 0,
        defense: 0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
