//! Request quantities and their signal-count encoding.
//!
//! A request bound is an unsigned 32-bit value, but combinator signals carry
//! signed 32-bit counts. Values that fit in `i32` are stored as-is; larger
//! values are folded onto the negative half:
//!
//! | Quantity                 | Signal count        |
//! |--------------------------|---------------------|
//! | 0 ..= 2147483647         | same value          |
//! | 2147483648               | -1                  |
//! | 4294967295 (infinite)    | -2147483648         |
//!
//! The fold is `2147483647 - q`, not a two's-complement reinterpretation:
//! a bit-cast would map 2147483648 to `i32::MIN` and break compatibility with
//! previously exported templates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A request bound. `u32::MAX` is the "no upper bound" sentinel.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Nothing requested.
    pub const ZERO: Self = Self(0);

    /// Unbounded. Absorbs addition and is never reduced by finite subtraction.
    pub const INFINITE: Self = Self(u32::MAX);

    #[inline]
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Addition clamped to the infinite sentinel.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Subtraction clamped at zero.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            f.write_str("inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Encode a quantity as a combinator signal count.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn encode(q: Quantity) -> i32 {
    let raw = q.0;
    if raw <= i32::MAX as u32 {
        raw as i32
    } else {
        // In range [i32::MIN, -1] for raw in (i32::MAX, u32::MAX].
        (i32::MAX as i64 - raw as i64) as i32
    }
}

/// Decode a combinator signal count back into a quantity.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn decode(count: i32) -> Quantity {
    if count >= 0 {
        Quantity(count as u32)
    } else {
        Quantity((i32::MAX as i64 - count as i64) as u32)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_encode_literal_vectors() {
        let cases: &[(u32, i32)] = &[
            (0, 0),
            (1, 1),
            (2_147_483_647, 2_147_483_647),
            (2_147_483_648, -1),
            (4_294_967_294, -2_147_483_647),
            (4_294_967_295, i32::MIN),
        ];
        for &(q, expected) in cases {
            assert_eq!(encode(Quantity::new(q)), expected, "encode({q})");
            assert_eq!(decode(expected), Quantity::new(q), "decode({expected})");
        }
    }

    #[test]
    fn test_infinite_maps_to_i32_min() {
        assert_eq!(encode(Quantity::INFINITE), i32::MIN);
        assert!(decode(i32::MIN).is_infinite());
    }

    #[test]
    fn test_fold_is_not_a_bit_cast() {
        #[allow(clippy::cast_possible_wrap)]
        let bit_cast = 2_147_483_648_u32 as i32;
        assert_eq!(bit_cast, i32::MIN);
        assert_eq!(encode(Quantity::new(2_147_483_648)), -1);
    }

    #[test]
    fn test_saturating_arithmetic() {
        let big = Quantity::new(u32::MAX - 5);
        assert_eq!(big.saturating_add(Quantity::new(10)), Quantity::INFINITE);
        assert_eq!(
            Quantity::new(3).saturating_sub(Quantity::new(5)),
            Quantity::ZERO
        );
        assert_eq!(
            Quantity::INFINITE.saturating_add(Quantity::new(1)),
            Quantity::INFINITE
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Quantity::new(50).to_string(), "50");
        assert_eq!(Quantity::INFINITE.to_string(), "inf");
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&Quantity::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: Quantity = serde_json::from_str("4294967295").unwrap();
        assert!(back.is_infinite());
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(q in any::<u32>()) {
            prop_assert_eq!(decode(encode(Quantity::new(q))), Quantity::new(q));
        }

        #[test]
        fn prop_encode_inverts_decode(c in any::<i32>()) {
            prop_assert_eq!(encode(decode(c)), c);
        }

        #[test]
        fn prop_encode_preserves_order_within_each_half(a in any::<u32>(), b in any::<u32>()) {
            let half = i32::MAX as u32;
            if (a <= half) == (b <= half) && a < b {
                let (ea, eb) = (encode(Quantity::new(a)), encode(Quantity::new(b)));
                if a <= half {
                    prop_assert!(ea < eb);
                } else {
                    prop_assert!(ea > eb);
                }
            }
        }
    }
}
