// src/core/math_utils.rs

use std::ops::{Add, Div, Mul, Rem, Sub};

/// Integer types accepted by [`gcd`] and [`round_up`].
pub trait Integer:
    Copy
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Integer for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Computes the greatest common divisor of `a` and `b` (Euclid).
///
/// `gcd(a, 0)` is `a`.
pub fn gcd<T: Integer>(mut a: T, mut b: T) -> T {
    while b != T::ZERO {
        let c = a % b;
        a = b;
        b = c;
    }
    a
}

/// Rounds `a` up to the next multiple of `k`.
///
/// Both values must be positive and `k` must not be zero.
pub fn round_up<T: Integer>(a: T, k: T) -> T {
    let rest = a % k;
    if rest == T::ZERO { a } else { a + (k - rest) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up() {
        assert_eq!(round_up(6, 4), 8);
        assert_eq!(round_up(3, 3), 3);
        assert_eq!(round_up(12, 10), 20);
        assert_eq!(round_up(1u64, 4096), 4096);
    }

    #[test]
    fn test_round_up_bounds() {
        for k in 1u32..=12 {
            for a in 1u32..=50 {
                let r = round_up(a, k);
                assert_eq!(r % k, 0);
                assert!(r >= a);
                assert!(r < a + k);
            }
        }
    }

    #[test]
    fn test_round_up_near_type_max() {
        assert_eq!(round_up(255u8, 1), 255);
        assert_eq!(round_up(250u8, 5), 250);
        assert_eq!(round_up(u32::MAX - 3, 4), u32::MAX - 3);
        assert_eq!(round_up(i64::MAX - 1, 2), i64::MAX - 1);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(6, 9), 3);
        assert_eq!(gcd(17u8, 5), 1);
        assert_eq!(gcd(12, 0), 12);
    }

    #[test]
    fn test_gcd_is_symmetric() {
        for a in 1i64..=30 {
            for b in 1i64..=30 {
                assert_eq!(gcd(a, b), gcd(b, a));
            }
        }
    }
}
