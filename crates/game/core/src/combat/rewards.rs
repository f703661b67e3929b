//! Victory payout.

use crate::env::{GameEnv, MonsterTemplate, RollContext, RollStream};
use crate::progression::{gain_xp, record_kill};
use crate::state::{ItemId, Player};

use super::{CombatError, CombatEvent};

/// Everything a victory handed out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub gold: u64,
    /// Extra gold from the gold bonus stat, included in the player's total.
    pub bonus_gold: u64,
    /// XP actually granted; zero at the level cap.
    pub xp: u64,
    pub loot: Vec<ItemId>,
    pub potion_found: bool,
    /// The final boss fell.
    pub game_won: bool,
}

/// Pays out gold, xp and loot, records the kill for quests and rolls for a
/// spare potion.
///
/// Loot rolls happen in table order, one independent roll per entry. Drops
/// naming unknown items are skipped.
pub(super) fn claim(
    player: &mut Player,
    template: &MonsterTemplate,
    rolls: &mut RollStream,
    env: &GameEnv<'_>,
    events: &mut Vec<CombatEvent>,
) -> Result<Rewards, CombatError> {
    let rng = env.rng()?;
    let rules = env.rules()?;

    let gold_bonus = u64::from(player.stats.gold_bonus.max(0).unsigned_abs());
    let bonus_gold = template.gold * gold_bonus / 100;
    player.gold += template.gold + bonus_gold;

    let xp = if player.level < rules.progression.max_level {
        template.xp
    } else {
        0
    };
    events.push(CombatEvent::Rewarded {
        gold: template.gold,
        bonus_gold,
        xp,
    });
    events.extend(gain_xp(player, xp, env)?.into_iter().map(CombatEvent::from));

    let mut loot = Vec::new();
    for entry in &template.loot {
        if !rolls.chance(rng, RollContext::Loot, entry.chance) {
            continue;
        }
        let Some(item) = env.item(entry.item.as_str()) else {
            continue;
        };
        player.inventory.push(entry.item.clone());
        loot.push(entry.item.clone());
        events.push(CombatEvent::LootDropped {
            item: item.name.clone(),
        });
    }

    events.extend(
        record_kill(player, template.id.as_str(), env)?
            .into_iter()
            .map(CombatEvent::from),
    );

    let potion_found = rolls.chance(
        rng,
        RollContext::PotionFind,
        rules.consumables.potion_find_chance,
    );
    if potion_found {
        player.consumables.potions += 1;
        events.push(CombatEvent::PotionFound);
    }

    if template.final_boss {
        events.push(CombatEvent::GameWon);
    }

    Ok(Rewards {
        gold: template.gold,
        bonus_gold,
        xp,
        loot,
        potion_found,
        game_won: template.final_boss,
    })
}
