//! Equipment, echo focus and battle tonics.
//!
//! Every change that touches stats ends with a recomputation so effective
//! stats never go stale.

use crate::env::{EquipSlot, GameEnv};
use crate::state::{ItemId, Player, Tonic};
use crate::stats::recompute_stats;

use super::LoadoutError;

/// Focuses one collected echo, replacing the previous focus.
pub fn focus_echo(player: &mut Player, entry: &str, env: &GameEnv<'_>) -> Result<(), LoadoutError> {
    let Some(id) = player.codex.iter().find(|id| *id == entry).cloned() else {
        return Err(LoadoutError::NotCollected(entry.to_owned()));
    };
    player.focused_echo = Some(id);
    recompute_stats(player, env)?;
    Ok(())
}

pub fn unfocus_echo(player: &mut Player, env: &GameEnv<'_>) -> Result<(), LoadoutError> {
    player.focused_echo = None;
    recompute_stats(player, env)?;
    Ok(())
}

/// Equips an item from the inventory into its slot.
///
/// The previously equipped item goes back to the inventory and is returned.
pub fn equip(
    player: &mut Player,
    item: &str,
    env: &GameEnv<'_>,
) -> Result<Option<ItemId>, LoadoutError> {
    let definition = env
        .item(item)
        .ok_or_else(|| LoadoutError::UnknownItem(item.to_owned()))?;
    let index = player
        .inventory
        .iter()
        .position(|id| id == item)
        .ok_or_else(|| LoadoutError::NotInInventory(item.to_owned()))?;

    let new = player.inventory.remove(index);
    let previous = player.equipment.set(definition.slot, Some(new));
    if let Some(old) = &previous {
        player.inventory.push(old.clone());
    }
    recompute_stats(player, env)?;
    Ok(previous)
}

/// Moves whatever is in `slot` back to the inventory.
pub fn unequip(
    player: &mut Player,
    slot: EquipSlot,
    env: &GameEnv<'_>,
) -> Result<Option<ItemId>, LoadoutError> {
    let previous = player.equipment.set(slot, None);
    if let Some(old) = &previous {
        player.inventory.push(old.clone());
    }
    recompute_stats(player, env)?;
    Ok(previous)
}

/// Drinks a tonic for the next encounter.
///
/// A tonic that was already primed goes back into stock.
pub fn prime_tonic(player: &mut Player, tonic: Tonic) -> Result<(), LoadoutError> {
    if !player.consumables.take_tonic(tonic) {
        return Err(LoadoutError::NoTonic(tonic));
    }
    if let Some(previous) = player.primed_tonic.replace(tonic) {
        player.consumables.return_tonic(previous);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::state::CodexId;
    use crate::testkit;

    #[test]
    fn equip_swaps_with_inventory() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.inventory.push(ItemId::new("poison_dagger"));

        assert_eq!(equip(&mut player, "rusted_sword", &env).unwrap(), None);
        assert_eq!(player.stats.attack, 5);
        assert!(player.inventory.iter().all(|id| id != "rusted_sword"));

        let previous = equip(&mut player, "poison_dagger", &env).unwrap();
        assert_eq!(previous, Some(ItemId::new("rusted_sword")));
        assert_eq!(player.stats.attack, 4);
        assert_eq!(player.inventory, vec![ItemId::new("rusted_sword")]);
    }

    #[test]
    fn equip_requires_the_item_in_inventory() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);

        assert_eq!(
            equip(&mut player, "lucky_coin", &env),
            Err(LoadoutError::NotInInventory("lucky_coin".into()))
        );
        assert_eq!(
            equip(&mut player, "mystery", &env),
            Err(LoadoutError::UnknownItem("mystery".into()))
        );
    }

    #[test]
    fn unequip_returns_item_and_drops_bonus() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        equip(&mut player, "rusted_sword", &env).unwrap();

        unequip(&mut player, EquipSlot::Weapon, &env).unwrap();

        assert_eq!(player.stats.attack, 3);
        assert_eq!(player.inventory, vec![ItemId::new("rusted_sword")]);
    }

    #[test]
    fn only_collected_echoes_can_be_focused() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);

        assert_eq!(
            focus_echo(&mut player, "fallen_knight", &env),
            Err(LoadoutError::NotCollected("fallen_knight".into()))
        );

        player.codex.push(CodexId::new("fallen_knight"));
        focus_echo(&mut player, "fallen_knight", &env).unwrap();
        assert_eq!(player.stats.attack, 5);

        unfocus_echo(&mut player, &env).unwrap();
        assert_eq!(player.stats.attack, 3);
    }

    #[test]
    fn priming_a_second_tonic_returns_the_first() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.consumables.rage_tonics = 1;
        player.consumables.stone_tonics = 1;

        prime_tonic(&mut player, Tonic::Rage).unwrap();
        prime_tonic(&mut player, Tonic::Stone).unwrap();

        assert_eq!(player.primed_tonic, Some(Tonic::Stone));
        assert_eq!(player.consumables.rage_tonics, 1);
        assert_eq!(player.consumables.stone_tonics, 0);
        assert_eq!(
            prime_tonic(&mut player, Tonic::Stone),
            Err(LoadoutError::NoTonic(Tonic::Stone))
        );
    }
}
