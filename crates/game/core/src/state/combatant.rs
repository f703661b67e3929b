use crate::env::{Element, GameEnv, Special};
use crate::state::{Monster, Player, StatusEffects};

/// A resistance that applies to an incoming hit or tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resistance {
    /// Name of the item or echo granting it.
    pub source: String,
    pub percent: u32,
}

impl Resistance {
    /// Reduces `amount` by the resistance, never below 1.
    pub fn reduce(&self, amount: u32) -> u32 {
        let kept = 100u32.saturating_sub(self.percent.min(100));
        (amount.saturating_mul(kept) / 100).max(1)
    }
}

/// Capability shared by the player and monsters: health, timed effects and
/// resistances.
pub trait Combatant {
    fn display_name(&self) -> &str;

    fn health(&self) -> u32;

    fn max_health(&self) -> u32;

    /// Stores a new health value; implementations clamp to `[0, max_health]`.
    fn set_health(&mut self, health: u32);

    fn effects(&self) -> &StatusEffects;

    fn effects_mut(&mut self) -> &mut StatusEffects;

    fn is_player(&self) -> bool;

    /// First resistance against `element`, if any.
    fn resistance(&self, _element: Element, _env: &GameEnv<'_>) -> Option<Resistance> {
        None
    }

    fn is_defeated(&self) -> bool {
        self.health() == 0
    }

    /// Subtracts damage and returns how much was actually lost.
    fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.health();
        self.set_health(before.saturating_sub(amount));
        before - self.health()
    }

    /// Adds health up to the maximum and returns how much was gained.
    fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health();
        self.set_health(before.saturating_add(amount));
        self.health().saturating_sub(before)
    }
}

impl Combatant for Player {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn max_health(&self) -> u32 {
        self.stats.max_health
    }

    fn set_health(&mut self, health: u32) {
        self.health = health.min(self.stats.max_health);
    }

    fn effects(&self) -> &StatusEffects {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut StatusEffects {
        &mut self.effects
    }

    fn is_player(&self) -> bool {
        true
    }

    fn resistance(&self, element: Element, env: &GameEnv<'_>) -> Option<Resistance> {
        self.specials(*env).find_map(|(source, special)| match special {
            Special::Resist {
                element: resisted,
                percent,
            } if resisted == element => Some(Resistance {
                source: source.to_owned(),
                percent,
            }),
            _ => None,
        })
    }
}

impl Combatant for Monster {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn max_health(&self) -> u32 {
        self.max_health
    }

    fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    fn effects(&self) -> &StatusEffects {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut StatusEffects {
        &mut self.effects
    }

    fn is_player(&self) -> bool {
        false
    }
}
