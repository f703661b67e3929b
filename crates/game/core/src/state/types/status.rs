//! Timed status effects attached to a combatant.
//!
//! Durations count whole turns of the holder. Each holder ticks its own list
//! at the start of its turn, so a three-turn poison deals damage three times
//! before it is removed.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::EffectId;

/// Active status effects on a combatant.
///
/// At most one instance per effect id is kept; re-application refreshes the
/// duration instead of stacking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct StatusEffects {
    effects: ArrayVec<ActiveEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

/// A single effect with its remaining duration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub id: EffectId,
    /// Turns left, including the holder's next turn.
    pub turns: u32,
}

impl ActiveEffect {
    pub fn new(id: impl Into<EffectId>, turns: u32) -> Self {
        Self {
            id: id.into(),
            turns,
        }
    }
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific effect is active.
    pub fn has(&self, id: &str) -> bool {
        self.effects.iter().any(|e| e.id == id)
    }

    /// Remaining turns of an effect, if active.
    pub fn remaining(&self, id: &str) -> Option<u32> {
        self.effects.iter().find(|e| e.id == id).map(|e| e.turns)
    }

    /// Adds an effect for `turns` turns.
    ///
    /// If the effect already exists, the duration becomes the larger of the
    /// two. Returns `false` when the effect could not be stored (zero turns or
    /// no free slot).
    pub fn add(&mut self, id: &EffectId, turns: u32) -> bool {
        if turns == 0 {
            return false;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| &e.id == id) {
            existing.turns = existing.turns.max(turns);
            return true;
        }

        self.effects
            .try_push(ActiveEffect::new(id.clone(), turns))
            .is_ok()
    }

    /// Removes an effect immediately. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.id != id);
        self.effects.len() != before
    }

    /// Keeps only the effects for which `keep` returns true and returns the
    /// removed ones in their original order.
    pub fn retain_or_take(&mut self, mut keep: impl FnMut(&ActiveEffect) -> bool) -> Vec<ActiveEffect> {
        let mut removed = Vec::new();
        let mut kept = ArrayVec::new();
        for effect in self.effects.drain(..) {
            if keep(&effect) {
                kept.push(effect);
            } else {
                removed.push(effect);
            }
        }
        self.effects = kept;
        removed
    }

    /// Decrements the durations of the listed effects by one and removes the
    /// ones that reach zero.
    ///
    /// Returns the ids that expired, in list order.
    pub fn age(&mut self, ids: &[EffectId]) -> Vec<EffectId> {
        for effect in self.effects.iter_mut().filter(|e| ids.contains(&e.id)) {
            effect.turns = effect.turns.saturating_sub(1);
        }
        self.retain_or_take(|e| e.turns > 0)
            .into_iter()
            .map(|e| e.id)
            .collect()
    }

    /// Removes every effect.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Returns an iterator over all active effects.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns true if no status effects are active.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl FromIterator<ActiveEffect> for StatusEffects {
    fn from_iter<T: IntoIterator<Item = ActiveEffect>>(iter: T) -> Self {
        let mut effects = Self::empty();
        for effect in iter {
            effects.add(&effect.id, effect.turns);
        }
        effects
    }
}
