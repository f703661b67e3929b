//! Damage arithmetic.
//!
//! All formulas work in integers and floor where fractions appear. Defense may
//! be negative, in which case it adds to the hit.

/// `floor(attack * percent / 100)`; negative attack counts as zero.
pub fn scale(attack: i32, percent: u32) -> u32 {
    let attack = u64::from(attack.max(0).unsigned_abs());
    (attack * u64::from(percent) / 100).min(u64::from(u32::MAX)) as u32
}

/// `max(1, raw - defense)`.
pub fn mitigate(raw: u32, defense: i32) -> u32 {
    let damage = i64::from(raw) - i64::from(defense);
    damage.clamp(1, i64::from(u32::MAX)) as u32
}

/// Guard stance halves a hit, flooring. A 1-damage hit becomes 0.
pub fn guarded(damage: u32, guard: bool) -> u32 {
    if guard { damage / 2 } else { damage }
}

/// A hardened monster halves the hit, never below 1.
pub fn hardened(damage: u32) -> u32 {
    (damage / 2).max(1)
}

/// `floor(amount * percent / 100)`.
pub fn percent_of(amount: u32, percent: u32) -> u32 {
    (u64::from(amount) * u64::from(percent) / 100).min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mitigation_never_drops_below_one() {
        assert_eq!(mitigate(3, 10), 1);
        assert_eq!(mitigate(9, 2), 7);
    }

    #[test]
    fn negative_defense_adds_damage() {
        assert_eq!(mitigate(4, -1), 5);
    }

    #[test]
    fn hardened_halves_with_floor_one() {
        assert_eq!(hardened(9), 4);
        assert_eq!(hardened(1), 1);
    }

    #[test]
    fn guard_can_zero_a_weak_hit() {
        assert_eq!(guarded(1, true), 0);
        assert_eq!(guarded(7, true), 3);
        assert_eq!(guarded(7, false), 7);
    }

    #[test]
    fn scaling_floors() {
        // 9 * 1.2 = 10.8
        assert_eq!(scale(9, 120), 10);
        assert_eq!(scale(-4, 180), 0);
        assert_eq!(percent_of(55, 15), 8);
    }
}
