use crate::env::{GameEnv, OracleError};
use crate::state::Player;

/// What happened after the player fell in battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Respawn {
    /// Back in town with half the gold.
    Revived { gold_lost: u64, health: u32 },
    /// The one respawn was already spent; the run is over.
    Fallen,
}

/// Brings a defeated player back once per save.
///
/// Halves gold, sets health to `max(respawn_min_health, max_health / 2)`,
/// clears every effect and combat stance, and moves the player to town. A
/// second defeat returns [`Respawn::Fallen`] without touching the player.
pub fn respawn(player: &mut Player, env: &GameEnv<'_>) -> Result<Respawn, OracleError> {
    if player.respawned {
        return Ok(Respawn::Fallen);
    }
    let rules = env.rules()?;

    let gold_lost = player.gold - player.gold / 2;
    player.gold /= 2;
    player.health = (player.stats.max_health / 2)
        .max(rules.progression.respawn_min_health)
        .min(player.stats.max_health);
    player.effects.clear();
    player.guard = false;
    player.skip_next_turn = false;
    player.position = rules.world.town;
    player.respawned = true;

    Ok(Respawn::Revived {
        gold_lost,
        health: player.health,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::state::{EffectId, Position};
    use crate::testkit;

    #[test]
    fn first_defeat_revives_in_town() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.gold = 101;
        player.health = 0;
        player.position = Position::new(6, 1);
        player.effects.add(&EffectId::new("poison"), 3);

        let outcome = respawn(&mut player, &env).unwrap();

        assert_eq!(
            outcome,
            Respawn::Revived {
                gold_lost: 51,
                health: 25
            }
        );
        assert_eq!(player.gold, 50);
        assert_eq!(player.position, Position::new(2, 3));
        assert!(player.effects.is_empty());
        assert!(player.respawned);
    }

    #[test]
    fn low_max_health_still_gets_the_minimum() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.stats.max_health = 30;

        respawn(&mut player, &env).unwrap();

        assert_eq!(player.health, 20);
    }

    #[test]
    fn second_defeat_is_final() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.respawned = true;
        player.gold = 80;

        assert_eq!(respawn(&mut player, &env).unwrap(), Respawn::Fallen);
        assert_eq!(player.gold, 80);
    }
}
