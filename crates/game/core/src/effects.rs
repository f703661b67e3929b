//! Status effect engine: apply, tick, expire and cure timed effects on any
//! combatant.
//!
//! Ticking works on a snapshot of the effect list so that every effect is
//! processed exactly once even when earlier ones expire; the list is compacted
//! afterwards.

use core::fmt;

use crate::env::{EffectKind, GameEnv};
use crate::state::{Combatant, EffectId};

/// Something the effect engine did to a combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectEvent {
    Applied {
        target: String,
        effect: String,
        turns: u32,
    },
    Damaged {
        target: String,
        effect: String,
        amount: u32,
        /// Name of the item or echo that reduced the tick.
        resisted_by: Option<String>,
    },
    Healed {
        target: String,
        effect: String,
        amount: u32,
    },
    Expired {
        target: String,
        effect: String,
    },
    Cured {
        target: String,
        effect: String,
    },
    /// A hit broke a sleep-like effect.
    WokeUp {
        target: String,
        effect: String,
    },
    /// A control effect costs the holder this turn.
    Incapacitated {
        target: String,
        effect: String,
    },
}

impl fmt::Display for EffectEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied {
                target,
                effect,
                turns,
            } => write!(f, "{target} is afflicted by {effect} ({turns} turns)"),
            Self::Damaged {
                target,
                effect,
                amount,
                resisted_by: Some(source),
            } => write!(
                f,
                "{target} takes {amount} damage from {effect} ({source} resists some of it)"
            ),
            Self::Damaged {
                target,
                effect,
                amount,
                resisted_by: None,
            } => write!(f, "{target} takes {amount} damage from {effect}"),
            Self::Healed {
                target,
                effect,
                amount,
            } => write!(f, "{target} recovers {amount} health from {effect}"),
            Self::Expired { target, effect } => write!(f, "{target} is no longer {effect}"),
            Self::Cured { target, effect } => write!(f, "{target} is cured of {effect}"),
            Self::WokeUp { target, effect } => write!(f, "{target} is jolted out of {effect}"),
            Self::Incapacitated { target, effect } => {
                write!(f, "{target} cannot act ({effect})")
            }
        }
    }
}

/// Result of ticking one combatant's effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub events: Vec<EffectEvent>,
    /// The holder skips its action this turn.
    pub incapacitated: bool,
}

fn effect_name(env: &GameEnv<'_>, id: &str) -> String {
    env.effect(id)
        .map(|def| def.name.clone())
        .unwrap_or_else(|| id.to_owned())
}

/// Applies an effect for `turns` turns, refreshing to the longer duration if
/// it is already active.
///
/// Unknown effect ids and zero durations are ignored.
pub fn apply_effect<C: Combatant + ?Sized>(
    target: &mut C,
    id: &EffectId,
    turns: u32,
    env: &GameEnv<'_>,
) -> Option<EffectEvent> {
    let definition = env.effect(id.as_str())?;
    if !target.effects_mut().add(id, turns) {
        return None;
    }
    Some(EffectEvent::Applied {
        target: target.display_name().to_owned(),
        effect: definition.name.clone(),
        turns: target.effects().remaining(id.as_str()).unwrap_or(turns),
    })
}

/// Ticks every active effect once, at the start of the holder's turn.
///
/// - damage-over-time subtracts its magnitude, reduced by a matching
///   resistance (floor 1 after resistance)
/// - heal-over-time adds its magnitude, clamped to max health
/// - durations drop by one and expired effects are removed
/// - a control effect still active after the compaction costs the holder
///   this turn
///
/// Unknown effect ids are left untouched.
pub fn tick_effects<C: Combatant + ?Sized>(target: &mut C, env: &GameEnv<'_>) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    let name = target.display_name().to_owned();
    let snapshot: Vec<EffectId> = target.effects().iter().map(|e| e.id.clone()).collect();

    let mut known = Vec::with_capacity(snapshot.len());

    for id in &snapshot {
        let Some(definition) = env.effect(id.as_str()) else {
            continue;
        };
        known.push(id.clone());

        match definition.kind {
            EffectKind::DamageOverTime(amount) => {
                let resistance = definition
                    .element
                    .and_then(|element| target.resistance(element, env));
                let amount = match &resistance {
                    Some(resist) => resist.reduce(amount),
                    None => amount,
                };
                let dealt = target.take_damage(amount);
                outcome.events.push(EffectEvent::Damaged {
                    target: name.clone(),
                    effect: definition.name.clone(),
                    amount: dealt,
                    resisted_by: resistance.map(|r| r.source),
                });
            }
            EffectKind::HealOverTime(amount) => {
                let healed = target.heal(amount);
                outcome.events.push(EffectEvent::Healed {
                    target: name.clone(),
                    effect: definition.name.clone(),
                    amount: healed,
                });
            }
            EffectKind::Control | EffectKind::Drain => {}
        }
    }

    // Compact: only known effects age.
    for id in target.effects_mut().age(&known) {
        outcome.events.push(EffectEvent::Expired {
            target: name.clone(),
            effect: effect_name(env, id.as_str()),
        });
    }

    let control = target.effects().iter().find_map(|active| {
        env.effect(active.id.as_str())
            .filter(|def| matches!(def.kind, EffectKind::Control))
            .map(|def| def.name.clone())
    });
    if let Some(effect) = control {
        outcome.incapacitated = true;
        outcome.events.push(EffectEvent::Incapacitated {
            target: name,
            effect,
        });
    }
    outcome
}

/// Removes every listed effect that is active.
pub fn cure<C: Combatant + ?Sized>(
    target: &mut C,
    ids: &[EffectId],
    env: &GameEnv<'_>,
) -> Vec<EffectEvent> {
    let name = target.display_name().to_owned();
    target
        .effects_mut()
        .retain_or_take(|e| !ids.contains(&e.id))
        .into_iter()
        .map(|e| EffectEvent::Cured {
            target: name.clone(),
            effect: effect_name(env, e.id.as_str()),
        })
        .collect()
}

/// Removes the first active effect (in the holder's list order) that appears
/// in `ids`.
pub fn cure_first<C: Combatant + ?Sized>(
    target: &mut C,
    ids: &[EffectId],
    env: &GameEnv<'_>,
) -> Option<EffectEvent> {
    let id = target
        .effects()
        .iter()
        .find(|e| ids.contains(&e.id))
        .map(|e| e.id.clone())?;
    target.effects_mut().remove(id.as_str());
    Some(EffectEvent::Cured {
        target: target.display_name().to_owned(),
        effect: effect_name(env, id.as_str()),
    })
}

/// Removes everything except heal-over-time effects. Unknown ids are removed
/// too.
pub fn cure_negative<C: Combatant + ?Sized>(
    target: &mut C,
    env: &GameEnv<'_>,
) -> Vec<EffectEvent> {
    let name = target.display_name().to_owned();
    target
        .effects_mut()
        .retain_or_take(|e| env.effect(e.id.as_str()).is_some_and(|d| d.is_beneficial()))
        .into_iter()
        .map(|e| EffectEvent::Cured {
            target: name.clone(),
            effect: effect_name(env, e.id.as_str()),
        })
        .collect()
}

/// Removes effects that break when the holder is hit.
pub fn wake_on_hit<C: Combatant + ?Sized>(target: &mut C, env: &GameEnv<'_>) -> Vec<EffectEvent> {
    let name = target.display_name().to_owned();
    target
        .effects_mut()
        .retain_or_take(|e| !env.effect(e.id.as_str()).is_some_and(|d| d.breaks_on_hit))
        .into_iter()
        .map(|e| EffectEvent::WokeUp {
            target: name.clone(),
            effect: effect_name(env, e.id.as_str()),
        })
        .collect()
}
