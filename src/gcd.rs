//! Greatest common divisors, used to keep fractions in lowest terms.

use num_traits::{PrimInt, Unsigned};

/// The greatest common divisor of `a` and `b`, ignoring signs.
///
/// The result is unsigned so that `gcd(i64::MIN, 0)`, which is 2^63, is representable. `gcd(0, b)`
/// is `|b|`, and `gcd(0, 0)` is 0.
pub fn gcd(a: i64, b: i64) -> u64 {
    euclid(a.unsigned_abs(), b.unsigned_abs())
}

/// Euclid's algorithm on magnitudes. Symmetric in its arguments: if `p < q`, the first step swaps
/// them.
pub(crate) fn euclid<T: PrimInt + Unsigned>(p: T, q: T) -> T {
    let mut p = p;
    let mut q = q;
    while !q.is_zero() {
        let r = p % q;
        p = q;
        q = r;
    }

    p
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(1, 2), 1);
        assert_eq!(gcd(2, 4), 2);
        assert_eq!(gcd(11, 33), 11);
        assert_eq!(gcd(-2, 6), 2);
        assert_eq!(gcd(25, 10), 5);
        assert_eq!(gcd(64, 8), 8);
    }

    #[test]
    fn test_gcd_zero() {
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(-7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn test_gcd_extremes() {
        assert_eq!(gcd(i64::MIN, 0), 1 << 63);
        assert_eq!(gcd(i64::MIN, i64::MIN), 1 << 63);
        assert_eq!(gcd(i64::MIN, 6), 2);
        assert_eq!(gcd(i64::MAX, i64::MIN), 1);
    }

    #[test]
    fn test_euclid_wide() {
        let big: u128 = 1 << 100;
        assert_eq!(euclid(big, 1u128 << 40), 1 << 40);
        assert_eq!(euclid(3u128 * big, 9), 3);
    }

    proptest! {
        #[test]
        fn test_gcd_sign_agnostic(a in any::<i32>(), b in any::<i32>()) {
            let (a, b) = (a as i64, b as i64);
            let g = gcd(a, b);
            prop_assert_eq!(g, gcd(-a, b));
            prop_assert_eq!(g, gcd(b, a));
            prop_assert_eq!(g, gcd(a.abs(), b.abs()));
            if g != 0 {
                prop_assert_eq!(a % g as i64, 0);
                prop_assert_eq!(b % g as i64, 0);
            }
        }
    }
}
