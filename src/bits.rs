//! Bitwise capability layer for control masks.
//!
//! [`ControlBits`] is the small set of operations the edge detector needs from
//! its storage word: AND, OR, XOR, NOT, a zero test and equality. It is
//! implemented for every unsigned integer width, so the same state logic works
//! for an 8-button pad (`u8`) and a 64-key bank (`u64`) alike.
//!
//! `bitflags` types reach this layer through their `Bits` storage type; see
//! [`DigitalFlagStates`](crate::flags::DigitalFlagStates).

use std::fmt;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Unsigned storage word for a set of digital controls (one control per bit).
///
/// `!x` is the complement within the type's own width, so `u8` masks never
/// grow bits past 7.
pub trait ControlBits:
    Copy
    + Eq
    + Hash
    + Default
    + fmt::Debug
    + fmt::Binary
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// No controls set.
    const ZERO: Self;

    /// Number of controls representable (bit width).
    const WIDTH: u32;

    /// `true` if no bit is set.
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// `true` if at least one bit is shared with `mask`.
    #[inline]
    fn intersects(self, mask: Self) -> bool {
        !(self & mask).is_zero()
    }

    /// `true` if every bit of `mask` is set in `self`.
    #[inline]
    fn contains_all(self, mask: Self) -> bool {
        (self & mask) == mask
    }

    /// Index of the lowest set bit, or `None` when zero.
    fn lowest_bit(self) -> Option<u32>;

    /// `self` with its lowest set bit cleared.
    fn without_lowest_bit(self) -> Self;

    /// Zero-extend to `u128` (used for error reporting).
    fn widen(self) -> u128;
}

macro_rules! impl_control_bits {
    ($($t:ty),* $(,)?) => {
        $(
            impl ControlBits for $t {
                const ZERO: Self = 0;
                const WIDTH: u32 = <$t>::BITS;

                #[inline]
                fn lowest_bit(self) -> Option<u32> {
                    if self == 0 {
                        None
                    } else {
                        Some(self.trailing_zeros())
                    }
                }

                #[inline]
                fn without_lowest_bit(self) -> Self {
                    self & self.wrapping_sub(1)
                }

                #[inline]
                fn widen(self) -> u128 {
                    self as u128
                }
            }
        )*
    };
}

impl_control_bits!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_stays_within_width() {
        assert_eq!(!0u8, 0xFF);
        assert_eq!((!0b1010_0000u8).widen(), 0b0101_1111);
        assert_eq!(<u16 as ControlBits>::WIDTH, 16);
    }

    #[test]
    fn test_zero_and_masks() {
        assert!(0u32.is_zero());
        assert!(!1u32.is_zero());
        assert!(0b110u32.intersects(0b010));
        assert!(!0b100u32.intersects(0b011));
        assert!(0b110u32.contains_all(0b110));
        assert!(!0b100u32.contains_all(0b110));
        // Empty mask is trivially contained.
        assert!(0u32.contains_all(0));
    }

    #[test]
    fn test_lowest_bit() {
        assert_eq!(0u16.lowest_bit(), None);
        assert_eq!(0b1000u16.lowest_bit(), Some(3));
        assert_eq!(0b1010u16.without_lowest_bit(), 0b1000);
        assert_eq!(u64::MAX.lowest_bit(), Some(0));
        assert_eq!((1u128 << 127).lowest_bit(), Some(127));
        assert_eq!((1u128 << 127).without_lowest_bit(), 0);
    }
}
