//! Behavior table lookup.

use crate::env::{Behavior, MonsterTemplate, RngOracle, RollContext, RollStream, Trigger};
use crate::state::{CombatFlags, Monster};

fn holds(trigger: Trigger, monster: &Monster) -> bool {
    match trigger {
        Trigger::NotHardened => !monster.flags.contains(CombatFlags::HARDENED),
        Trigger::NotEnraged => !monster.flags.contains(CombatFlags::ENRAGED),
        Trigger::HealthAtMost(health) => monster.health <= health,
        Trigger::HealthPercentAtMost(percent) => {
            u64::from(monster.health) * 100 <= u64::from(monster.max_health) * u64::from(percent)
        }
    }
}

/// Walks the behavior table in order. An entry is eligible when all of its
/// triggers hold; eligible entries roll their chance and the first success
/// wins. `None` means a plain attack.
pub fn choose_behavior(
    monster: &Monster,
    template: &MonsterTemplate,
    rolls: &mut RollStream,
    rng: &(impl RngOracle + ?Sized),
) -> Option<Behavior> {
    template
        .behaviors
        .iter()
        .filter(|entry| entry.when.iter().all(|trigger| holds(*trigger, monster)))
        .find(|entry| rolls.chance(rng, RollContext::MonsterSpecial, entry.chance))
        .map(|entry| entry.behavior)
}
