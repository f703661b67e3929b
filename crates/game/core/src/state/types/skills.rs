//! Skill identifiers and the per-line cooldown map.

use std::collections::BTreeMap;

/// Every skill the player can learn.
///
/// "II" variants replace their base skill once the level qualifies and share
/// its cooldown slot; [`SkillId::line`] maps a variant to that slot.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillId {
    FocusStrike,
    #[strum(to_string = "focus_strike_ii")]
    #[cfg_attr(feature = "serde", serde(rename = "focus_strike_ii"))]
    FocusStrikeII,
    Guard,
    #[strum(to_string = "guard_ii")]
    #[cfg_attr(feature = "serde", serde(rename = "guard_ii"))]
    GuardII,
    Meditate,
    #[strum(to_string = "meditate_ii")]
    #[cfg_attr(feature = "serde", serde(rename = "meditate_ii"))]
    MeditateII,
    LimitBreak,
    Purify,
    ReflectedStrike,
}

impl SkillId {
    /// Base skill whose cooldown slot this skill uses.
    pub const fn line(self) -> SkillId {
        match self {
            Self::FocusStrike | Self::FocusStrikeII => Self::FocusStrike,
            Self::Guard | Self::GuardII => Self::Guard,
            Self::Meditate | Self::MeditateII => Self::Meditate,
            other => other,
        }
    }

    /// Upgraded variant of a base skill, if it has one.
    pub const fn upgrade(self) -> Option<SkillId> {
        match self.line() {
            Self::FocusStrike => Some(Self::FocusStrikeII),
            Self::Guard => Some(Self::GuardII),
            Self::Meditate => Some(Self::MeditateII),
            _ => None,
        }
    }

    pub const fn is_upgrade(self) -> bool {
        matches!(self, Self::FocusStrikeII | Self::GuardII | Self::MeditateII)
    }
}

/// Remaining cooldown per skill line.
///
/// Entries stay in the map at zero after they expire; cooldown sabotage picks
/// among every recorded line, not only the ones still cooling down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct SkillCooldowns {
    remaining: BTreeMap<SkillId, u32>,
}

impl SkillCooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining turns for the line `skill` belongs to.
    pub fn get(&self, skill: SkillId) -> u32 {
        self.remaining.get(&skill.line()).copied().unwrap_or(0)
    }

    pub fn is_ready(&self, skill: SkillId) -> bool {
        self.get(skill) == 0
    }

    pub fn set(&mut self, skill: SkillId, turns: u32) {
        self.remaining.insert(skill.line(), turns);
    }

    /// Decrements every entry by one, flooring at zero.
    pub fn tick(&mut self) {
        for turns in self.remaining.values_mut() {
            *turns = turns.saturating_sub(1);
        }
    }

    /// Recorded lines, in key order.
    pub fn lines(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.remaining.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillId, u32)> + '_ {
        self.remaining.iter().map(|(skill, turns)| (*skill, *turns))
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }
}
