//! Experience curve and rewards.

use crate::env::{GameEnv, OracleError, PermanentBonus, QuestReward};
use crate::state::Player;
use crate::stats::recompute_stats;

use super::ProgressEvent;

/// Adds experience and applies every level-up it pays for.
///
/// Overflow carries into the next level. Each level adds base attack and
/// raises the threshold by the growth percentage; after the last level-up
/// stats are recomputed and health refilled. At the level cap experience is
/// frozen at zero.
pub fn gain_xp(
    player: &mut Player,
    amount: u64,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, OracleError> {
    let rules = &env.rules()?.progression;
    let mut events = Vec::new();
    if player.level >= rules.max_level || amount == 0 {
        return Ok(events);
    }

    player.xp = player.xp.saturating_add(amount);
    events.push(ProgressEvent::XpGained { amount });

    let mut leveled = false;
    while player.xp >= player.xp_to_next && player.level < rules.max_level {
        player.xp -= player.xp_to_next;
        player.level += 1;
        player.base_attack += rules.attack_per_level;
        player.xp_to_next = rules.next_threshold(player.xp_to_next);
        leveled = true;
    }

    if player.level >= rules.max_level {
        player.xp = 0;
        player.xp_to_next = u64::MAX;
    }

    if leveled {
        recompute_stats(player, env)?;
        player.health = player.stats.max_health;
        events.push(ProgressEvent::LeveledUp {
            level: player.level,
            max_health: player.stats.max_health,
            attack: player.stats.attack,
        });
        if player.level >= rules.max_level {
            events.push(ProgressEvent::MaxLevelReached);
        }
    }
    Ok(events)
}

/// Grants quest gold and experience.
pub fn grant_reward(
    player: &mut Player,
    reward: QuestReward,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, OracleError> {
    let mut events = Vec::new();
    if reward.gold > 0 {
        player.gold = player.gold.saturating_add(reward.gold);
        events.push(ProgressEvent::GoldGained {
            amount: reward.gold,
        });
    }
    events.extend(gain_xp(player, reward.xp, env)?);
    Ok(events)
}

/// Adds to the player's permanent bonus attack and defense and recomputes
/// stats. A zero bonus does nothing.
pub fn grant_permanent_bonus(
    player: &mut Player,
    bonus: PermanentBonus,
    env: &GameEnv<'_>,
) -> Result<Option<ProgressEvent>, OracleError> {
    if bonus.is_zero() {
        return Ok(None);
    }
    player.bonus_attack += bonus.attack;
    player.bonus_defense += bonus.defense;
    recompute_stats(player, env)?;
    Ok(Some(ProgressEvent::PermanentBonus {
        attack: bonus.attack,
        defense: bonus.defense,
        total_attack: player.stats.attack,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::testkit;

    #[test]
    fn first_threshold_levels_to_two() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.health = 10;

        gain_xp(&mut player, 40, &env).unwrap();

        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 0);
        assert_eq!(player.xp_to_next, 64);
        assert_eq!(player.base_attack, 4);
        assert_eq!(player.stats.max_health, 60);
        assert_eq!(player.health, 60);
    }

    #[test]
    fn overflow_carries_into_the_next_level() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);

        gain_xp(&mut player, 40, &env).unwrap();
        gain_xp(&mut player, 100, &env).unwrap();

        assert_eq!(player.level, 3);
        assert_eq!(player.xp, 36);
        assert_eq!(player.xp_to_next, 102);
    }

    #[test]
    fn single_grant_stops_when_overflow_runs_short() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);

        gain_xp(&mut player, 100, &env).unwrap();

        // 100 - 40 = 60 < 64
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 60);
    }

    #[test]
    fn level_cap_freezes_experience() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.level = 49;
        player.xp_to_next = 100;

        let events = gain_xp(&mut player, 500, &env).unwrap();

        assert_eq!(player.level, 50);
        assert_eq!(player.xp, 0);
        assert!(events.contains(&ProgressEvent::MaxLevelReached));
        assert!(gain_xp(&mut player, 500, &env).unwrap().is_empty());
        assert_eq!(player.xp, 0);
    }

    #[test]
    fn reward_adds_gold_and_xp() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);

        grant_reward(&mut player, QuestReward::new(50, 20), &env).unwrap();

        assert_eq!(player.gold, 50);
        assert_eq!(player.xp, 20);
    }

    #[test]
    fn permanent_bonus_feeds_effective_stats() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);

        let bonus = PermanentBonus {
            attack: 1,
            defense: 2,
        };
        let event = grant_permanent_bonus(&mut player, bonus, &env).unwrap();

        assert_eq!(
            event,
            Some(ProgressEvent::PermanentBonus {
                attack: 1,
                defense: 2,
                total_attack: 4,
            })
        );
        assert_eq!(player.bonus_attack, 1);
        assert_eq!(player.stats.defense, 2);

        // Survives a level-up, which only touches base attack.
        gain_xp(&mut player, 40, &env).unwrap();
        assert_eq!(player.stats.attack, 5);
        assert_eq!(
            grant_permanent_bonus(&mut player, PermanentBonus::ZERO, &env).unwrap(),
            None
        );
    }
}
