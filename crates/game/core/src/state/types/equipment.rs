//! Equipped items and consumable stock.

use crate::env::EquipSlot;
use crate::state::ItemId;

/// One item per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Equipment {
    pub weapon: Option<ItemId>,
    pub armor: Option<ItemId>,
    pub charm: Option<ItemId>,
}

impl Equipment {
    pub fn get(&self, slot: EquipSlot) -> Option<&ItemId> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Charm => self.charm.as_ref(),
        }
    }

    /// Puts `item` into `slot` and returns what was there.
    pub fn set(&mut self, slot: EquipSlot, item: Option<ItemId>) -> Option<ItemId> {
        let target = match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Charm => &mut self.charm,
        };
        core::mem::replace(target, item)
    }

    /// Equipped items in slot order (weapon, armor, charm).
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        [&self.weapon, &self.armor, &self.charm]
            .into_iter()
            .flatten()
    }
}

/// Potion-like stock carried between fights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Consumables {
    pub potions: u32,
    pub elixirs: u32,
    pub rage_tonics: u32,
    pub stone_tonics: u32,
}

impl Consumables {
    pub fn tonics(&self, tonic: Tonic) -> u32 {
        match tonic {
            Tonic::Rage => self.rage_tonics,
            Tonic::Stone => self.stone_tonics,
        }
    }

    fn tonics_mut(&mut self, tonic: Tonic) -> &mut u32 {
        match tonic {
            Tonic::Rage => &mut self.rage_tonics,
            Tonic::Stone => &mut self.stone_tonics,
        }
    }

    /// Takes one tonic from stock. Returns false when none are left.
    pub fn take_tonic(&mut self, tonic: Tonic) -> bool {
        let stock = self.tonics_mut(tonic);
        if *stock == 0 {
            return false;
        }
        *stock -= 1;
        true
    }

    pub fn return_tonic(&mut self, tonic: Tonic) {
        *self.tonics_mut(tonic) += 1;
    }
}

/// Battle tonic drunk before a fight; it lasts for exactly one encounter.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Tonic {
    /// Raises attack for the next battle.
    Rage,
    /// Raises defense for the next battle.
    Stone,
}

/// Consumable used from the combat menu.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    Potion,
    Elixir,
}
