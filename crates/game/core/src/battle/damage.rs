//! Damage and healing arithmetic.

/// Damage dealt by a technique before any defensive effect.
///
/// # Formula
///
/// ```text
/// raw    = power * attack / max(defend, 1)
/// damage = raw * (level + 10) / 50 + 1
/// ```
///
/// `attack` and `defend` are boosted stats and `level` is the attacker's.
/// Every damaging hit deals at least 1.
pub fn technique_damage(power: u32, attack: u32, defend: u32, level: u32) -> u32 {
    let raw = u128::from(power) * u128::from(attack) / u128::from(defend.max(1));
    let damage = raw * (u128::from(level) + 10) / 50 + 1;
    u32::try_from(damage).unwrap_or(u32::MAX)
}

/// `max_hp / divisor`, never less than 1.
pub fn fraction_of(max_hp: u32, divisor: u32) -> u32 {
    (max_hp / divisor.max(1)).max(1)
}

/// Damage that actually reaches a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mitigation {
    /// Protect: nothing gets through.
    Blocked,
    /// Defend: half gets through.
    Halved,
    Full,
}

impl Mitigation {
    pub fn apply(self, damage: u32) -> u32 {
        match self {
            Mitigation::Blocked => 0,
            Mitigation::Halved => damage / 2,
            Mitigation::Full => damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_formula() {
        // raw = 30 * 60 / 40 = 45; 45 * 30 / 50 + 1 = 28
        assert_eq!(technique_damage(30, 60, 40, 20), 28);
        // Zero defense is treated as 1.
        assert_eq!(technique_damage(10, 5, 0, 40), 50 * 50 / 50 + 1);
        // A weak hit still deals 1.
        assert_eq!(technique_damage(30, 1, 9999, 1), 1);
    }

    #[test]
    fn damage_saturates() {
        assert_eq!(technique_damage(u32::MAX, u32::MAX, 1, 100), u32::MAX);
    }

    #[test]
    fn fractions_floor_at_one() {
        assert_eq!(fraction_of(80, 8), 10);
        assert_eq!(fraction_of(5, 8), 1);
        assert_eq!(fraction_of(0, 8), 1);
    }

    #[test]
    fn mitigation() {
        assert_eq!(Mitigation::Blocked.apply(40), 0);
        assert_eq!(Mitigation::Halved.apply(41), 20);
        assert_eq!(Mitigation::Full.apply(41), 41);
    }
}
