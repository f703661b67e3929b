use crate::state::EffectId;

/// Read-only catalog of status effect definitions.
pub trait EffectOracle: Send + Sync {
    fn effect(&self, id: &str) -> Option<&EffectDefinition>;

    /// Returns all effect definitions available in this oracle.
    fn all_effects(&self) -> Vec<&EffectDefinition>;
}

/// Static definition of a timed effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    pub id: EffectId,
    pub name: String,
    pub kind: EffectKind,
    /// Element used to select a resistance on the holder.
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<Element>,
    /// Removed when the holder takes a hit (sleep).
    #[cfg_attr(feature = "serde", serde(default))]
    pub breaks_on_hit: bool,
}

impl EffectDefinition {
    pub fn new(id: impl Into<EffectId>, name: impl Into<String>, kind: EffectKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            element: None,
            breaks_on_hit: false,
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    pub fn breaking_on_hit(mut self) -> Self {
        self.breaks_on_hit = true;
        self
    }

    /// Heal-over-time effects are the only ones an elixir leaves in place.
    pub fn is_beneficial(&self) -> bool {
        matches!(self.kind, EffectKind::HealOverTime(_))
    }

    pub fn is_control(&self) -> bool {
        matches!(self.kind, EffectKind::Control)
    }
}

/// What an effect does each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Loses this much health per turn.
    DamageOverTime(u32),
    /// Regains this much health per turn, never above max.
    HealOverTime(u32),
    /// Skips the holder's action while active.
    Control,
    /// Never ticks; on the player it sabotages a skill cooldown instead.
    Drain,
}

/// Damage element, matched against resistances.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    Fire,
}
