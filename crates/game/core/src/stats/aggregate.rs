use crate::env::{GameEnv, OracleError, StatModifiers};
use crate::state::Player;

/// Effective stats after equipment and the focused echo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectiveStats {
    /// Never below 0.
    pub attack: i32,
    /// May be negative; negative defense increases damage taken.
    pub defense: i32,
    /// Never below 1.
    pub max_health: u32,
    /// Extra victory gold in percent, never below 0.
    pub gold_bonus: i32,
}

/// Sum of everything equipped plus the focused echo's buff.
///
/// Unknown item or codex ids contribute nothing.
pub fn contributions(player: &Player, env: &GameEnv<'_>) -> StatModifiers {
    let items: StatModifiers = player
        .equipment
        .iter()
        .filter_map(|id| env.item(id.as_str()))
        .map(|item| item.stats)
        .sum();
    let buff = player
        .focused_echo
        .as_ref()
        .and_then(|id| env.codex_entry(id.as_str()))
        .map(|entry| entry.buff)
        .unwrap_or_default();
    items + buff
}

/// Rebuilds the player's effective stats and rescales current health so the
/// health percentage survives a max-health change.
///
/// # Errors
///
/// Returns `OracleError::TablesNotAvailable` when the rules table is missing.
pub fn recompute_stats(player: &mut Player, env: &GameEnv<'_>) -> Result<(), OracleError> {
    let rules = env.rules()?;
    let extra = contributions(player, env);

    let level_health = i64::from(rules.progression.level_max_health(player.level));
    let max_health = (level_health + i64::from(extra.max_health)).clamp(1, i64::from(u32::MAX));

    let stats = EffectiveStats {
        attack: (player.base_attack + player.bonus_attack + extra.attack).max(0),
        defense: player.base_defense + player.bonus_defense + extra.defense,
        max_health: max_health as u32,
        gold_bonus: extra.gold_bonus.max(0),
    };

    player.health = rescale_health(player.health, player.stats.max_health, stats.max_health);
    player.stats = stats;
    Ok(())
}

/// `max(1, round(new_max * health / old_max))`, clamped to `new_max`.
///
/// A downed character stays at 0. An unknown previous maximum (zero, e.g. a
/// save without derived stats) only clamps.
pub fn rescale_health(health: u32, old_max: u32, new_max: u32) -> u32 {
    if health == 0 {
        return 0;
    }
    if old_max == 0 {
        return health.min(new_max);
    }
    if old_max == new_max {
        return health.clamp(1, new_max);
    }
    let numerator = u64::from(new_max) * u64::from(health) * 2 + u64::from(old_max);
    let scaled = numerator / (2 * u64::from(old_max));
    (scaled as u32).clamp(1, new_max)
}
