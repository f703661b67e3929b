use crate::env::ConsumableRules;
use crate::state::{Player, Tonic};

/// Attack and defense locked in for one encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattleStats {
    pub attack: i32,
    pub defense: i32,
}

impl BattleStats {
    /// Effective stats plus the tonic consumed at encounter start, if any.
    pub fn for_encounter(player: &Player, tonic: Option<Tonic>, rules: &ConsumableRules) -> Self {
        let mut stats = Self {
            attack: player.stats.attack,
            defense: player.stats.defense,
        };
        match tonic {
            Some(Tonic::Rage) => stats.attack += rules.rage_tonic_attack,
            Some(Tonic::Stone) => stats.defense += rules.stone_tonic_defense,
            None => {}
        }
        stats
    }

    /// `floor(attack * percent / 100)`, never negative.
    pub fn scaled_attack(&self, percent: u32) -> u32 {
        let attack = self.attack.max(0) as u64;
        (attack * u64::from(percent) / 100) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRng, RulesTable};
    use crate::testkit;

    #[test]
    fn tonic_applies_only_to_battle_stats() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let player = testkit::player(&env);
        let rules = RulesTable::default().consumables;

        let rage = BattleStats::for_encounter(&player, Some(Tonic::Rage), &rules);
        let stone = BattleStats::for_encounter(&player, Some(Tonic::Stone), &rules);

        assert_eq!(rage.attack, player.stats.attack + 5);
        assert_eq!(stone.defense, player.stats.defense + 2);
        assert_eq!(player.stats.attack, 3);
    }

    #[test]
    fn scaled_attack_floors() {
        let stats = BattleStats {
            attack: 7,
            defense: 0,
        };
        // 7 * 1.8 = 12.6
        assert_eq!(stats.scaled_attack(180), 12);
        assert_eq!(stats.scaled_attack(300), 21);
    }
}
