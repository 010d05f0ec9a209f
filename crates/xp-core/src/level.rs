//! Cubic level curve: level `L` starts at `L^3` experience.

/// Experience that sits exactly on a level boundary.
///
/// Rounding up gives the largest value still at `level`, `(level+1)^3 - 1`.
/// Rounding down gives `level^3 + 1`, just past the start of `level`.
pub const fn perfect_experience_for(level: u64, round_up: bool) -> u64 {
    if round_up {
        cube(level.saturating_add(1)).saturating_sub(1)
    } else {
        cube(level).saturating_add(1)
    }
}

/// Level reached with `exp` experience: the largest `L` with `L^3 <= exp`.
pub fn level_for_experience(exp: u64) -> u64 {
    // Float cube root gets within one of the answer; correct it exactly.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "estimate only, corrected below"
    )]
    let mut level = (exp as f64).cbrt() as u64;
    while checked_cube(level).is_none_or(|value| value > exp) {
        level -= 1;
    }
    while level
        .checked_add(1)
        .and_then(checked_cube)
        .is_some_and(|next| next <= exp)
    {
        level += 1;
    }
    level
}

const fn cube(n: u64) -> u64 {
    n.saturating_mul(n).saturating_mul(n)
}

fn checked_cube(n: u64) -> Option<u64> {
    n.checked_mul(n)?.checked_mul(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_up_stays_on_level() {
        assert_eq!(perfect_experience_for(5, true), 215);
        assert_eq!(perfect_experience_for(2499, true), 15_624_999_999);
    }

    #[test]
    fn rounding_down_is_just_past_level_start() {
        assert_eq!(perfect_experience_for(5, false), 126);
        assert_eq!(perfect_experience_for(0, false), 1);
    }

    #[test]
    fn level_for_experience_matches_curve() {
        assert_eq!(level_for_experience(0), 0);
        assert_eq!(level_for_experience(7), 1);
        assert_eq!(level_for_experience(8), 2);
        assert_eq!(level_for_experience(15_606_381_712), 2499);
        assert_eq!(level_for_experience(u64::MAX), 2_642_245);
        assert_eq!(level_for_experience(15_625_000_000), 2500);
    }

    #[test]
    fn perfect_values_map_back_to_their_level() {
        for level in [1, 2, 10, 99, 100, 2499] {
            assert_eq!(level_for_experience(perfect_experience_for(level, true)), level);
            assert_eq!(level_for_experience(perfect_experience_for(level, false)), level);
        }
    }

    #[test]
    fn huge_levels_saturate() {
        assert_eq!(perfect_experience_for(u64::MAX, true), u64::MAX - 1);
    }
}
