//! Repairs applied to a player record right after it is loaded.
//!
//! A save may predate the current content: quests, items or effects it names
//! can be gone, and the map can have shrunk. Anything the rules would trip
//! over is dropped or moved, and derived stats are rebuilt.

use auren_core::env::EquipSlot;
use auren_core::progression::prune_stale_progress;
use auren_core::{CodexId, EffectId, GameEnv, ItemId, OracleError, Player, Position, recompute_stats};

/// One repair made to a loaded player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Adjustment {
    /// Quest progress for quests that no longer exist was removed.
    PrunedQuests,
    /// The saved position was outside the map.
    MovedToTown { from: Position },
    DroppedEffect(EffectId),
    DroppedEquipment(ItemId),
    /// The focused echo is unknown or was never collected.
    ClearedFocus(CodexId),
}

/// Normalizes a freshly loaded player and recomputes its stats.
pub fn normalize_player(
    player: &mut Player,
    env: &GameEnv<'_>,
) -> Result<Vec<Adjustment>, OracleError> {
    let rules = env.rules()?;
    let mut adjustments = Vec::new();

    let before = player.quests.clone();
    prune_stale_progress(player, env)?;
    if player.quests != before {
        adjustments.push(Adjustment::PrunedQuests);
    }

    if !rules.world.map.contains(player.position) {
        adjustments.push(Adjustment::MovedToTown {
            from: player.position,
        });
        player.position = rules.world.town;
    }

    let dropped = player
        .effects
        .retain_or_take(|effect| env.effect(effect.id.as_str()).is_some());
    adjustments.extend(dropped.into_iter().map(|effect| Adjustment::DroppedEffect(effect.id)));

    for slot in [EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Charm] {
        if let Some(item) = player.equipment.get(slot)
            && env.item(item.as_str()).is_none()
            && let Some(item) = player.equipment.set(slot, None)
        {
            adjustments.push(Adjustment::DroppedEquipment(item));
        }
    }

    if let Some(echo) = &player.focused_echo
        && (env.codex_entry(echo.as_str()).is_none() || !player.has_codex_entry(echo.as_str()))
        && let Some(echo) = player.focused_echo.take()
    {
        adjustments.push(Adjustment::ClearedFocus(echo));
    }

    // Combat stances never outlive an encounter.
    player.guard = false;
    player.skip_next_turn = false;

    recompute_stats(player, env)?;

    for adjustment in &adjustments {
        tracing::warn!(?adjustment, player = %player.name, "save adjusted on load");
    }
    Ok(adjustments)
}
