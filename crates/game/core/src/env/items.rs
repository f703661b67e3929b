use crate::env::Element;
use crate::state::{EffectId, ItemId};

pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: &str) -> Option<&ItemDefinition>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<&ItemDefinition>;
}

/// Equipment definition.
///
/// # Design: Base + Modifier Pattern
///
/// - `stats` holds flat contributions summed by the stat aggregator
/// - `on_hit` is rolled every time the wearer lands an attack
/// - `special` is a passive ability (resistance or evasion)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: StatModifiers,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_hit: Option<OnHitProc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub special: Option<Special>,
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, slot: EquipSlot) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slot,
            stats: StatModifiers::default(),
            on_hit: None,
            special: None,
        }
    }

    pub fn with_stats(mut self, stats: StatModifiers) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_on_hit(mut self, proc_: OnHitProc) -> Self {
        self.on_hit = Some(proc_);
        self
    }

    pub fn with_special(mut self, special: Special) -> Self {
        self.special = Some(special);
        self
    }
}

/// Equipment slot. Slot order is also the resistance lookup order.
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
pub enum EquipSlot {
    Weapon,
    Armor,
    Charm,
}

/// Flat stat contributions. Negative values are allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatModifiers {
    pub attack: i32,
    pub defense: i32,
    pub max_health: i32,
    /// Extra gold from victories, in percent.
    pub gold_bonus: i32,
}

impl StatModifiers {
    pub const ZERO: Self = Self {
        attack: 0,
        defense: 0,
        max_health: 0,
        gold_bonus: 0,
    };

    pub const fn new(attack: i32, defense: i32, max_health: i32, gold_bonus: i32) -> Self {
        Self {
            attack,
            defense,
            max_health,
            gold_bonus,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl core::ops::Add for StatModifiers {
    type Output = StatModifiers;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            max_health: self.max_health + rhs.max_health,
            gold_bonus: self.gold_bonus + rhs.gold_bonus,
        }
    }
}

impl core::ops::AddAssign for StatModifiers {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl core::iter::Sum for StatModifiers {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}

/// Chance to inflict an effect when the holder lands a hit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnHitProc {
    pub effect: EffectId,
    /// Percent chance, 0-100.
    pub chance: u32,
    pub turns: u32,
}

impl OnHitProc {
    pub fn new(effect: impl Into<EffectId>, chance: u32, turns: u32) -> Self {
        Self {
            effect: effect.into(),
            chance,
            turns,
        }
    }
}

/// Passive ability carried by equipment or an echo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Special {
    /// Reduces damage of one element by a percentage.
    Resist { element: Element, percent: u32 },
    /// Percent chance to avoid a plain monster attack.
    EvadePhysical(u32),
}
