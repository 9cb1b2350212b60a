//! Typed control states over `bitflags` types.
//!
//! [`DigitalFlagStates<F>`] gives call sites that name their controls with a
//! `bitflags!` type the same API as [`DigitalControlStates`], taking and
//! returning `F` instead of raw integers. All edge logic lives in the wrapped
//! [`DigitalControlStates<F::Bits>`]; this type only converts at the boundary.
//!
//! # Example
//! ```
//! use bitflags::bitflags;
//! use controlstate::DigitalFlagStates;
//!
//! bitflags! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub struct Pad: u16 {
//!         const A = 1 << 0;
//!         const B = 1 << 1;
//!         const START = 1 << 2;
//!     }
//! }
//!
//! let mut pad = DigitalFlagStates::<Pad>::new();
//! pad.update(Pad::A | Pad::START);
//! assert!(pad.is_pressed(Pad::START));
//! assert!(pad.consume_press(Pad::A));
//! assert_eq!(pad.pressed(), Pad::START);
//! ```
//!
//! Raw driver snapshots can be fed through [`update_bits`](DigitalFlagStates::update_bits),
//! which rejects bits outside `F`, or [`update_truncate`](DigitalFlagStates::update_truncate),
//! which drops them.

use crate::bits::ControlBits;
use crate::digital::DigitalControlStates;
use crate::error::{ControlError, Result};
use crate::event::ControlEdge;
use bitflags::Flags;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};

/// Edge-detecting state for the controls named by flags type `F`.
pub struct DigitalFlagStates<F>
where
    F: Flags,
    F::Bits: ControlBits,
{
    bits: DigitalControlStates<F::Bits>,
    _flags: PhantomData<F>,
}

impl<F> DigitalFlagStates<F>
where
    F: Flags,
    F::Bits: ControlBits,
{
    pub fn new() -> Self {
        Self::from_bits(DigitalControlStates::new())
    }

    /// Wrap an existing raw state.
    pub fn from_bits(bits: DigitalControlStates<F::Bits>) -> Self {
        Self {
            bits,
            _flags: PhantomData,
        }
    }

    /// Borrow the underlying raw state.
    #[inline]
    pub fn as_bits(&self) -> &DigitalControlStates<F::Bits> {
        &self.bits
    }

    pub fn into_bits(self) -> DigitalControlStates<F::Bits> {
        self.bits
    }

    /// See [`DigitalControlStates::update`].
    pub fn update(&mut self, current: F) -> bool {
        self.bits.update(current.bits())
    }

    /// See [`DigitalControlStates::update_latched`].
    pub fn update_latched(&mut self, current: F) -> bool {
        self.bits.update_latched(current.bits())
    }

    /// Update from a raw driver word, failing if it names undeclared controls.
    ///
    /// State is left untouched on error.
    pub fn update_bits(&mut self, raw: F::Bits) -> Result<bool> {
        match F::from_bits(raw) {
            Some(current) => Ok(self.update(current)),
            None => {
                log::trace!("rejecting raw control bits {:#b}", raw);
                Err(ControlError::UnknownBits { bits: raw.widen() })
            }
        }
    }

    /// Update from a raw driver word, dropping bits outside `F`.
    pub fn update_truncate(&mut self, raw: F::Bits) -> bool {
        let current = F::from_bits_truncate(raw);
        if current.bits() != raw {
            log::trace!(
                "dropping undeclared control bits {:#b}",
                raw & !current.bits()
            );
        }
        self.update(current)
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn clear_changes(&mut self) {
        self.bits.clear_changes();
    }

    pub fn consume_press(&mut self, mask: F) -> bool {
        self.bits.consume_press(mask.bits())
    }

    pub fn consume_release(&mut self, mask: F) -> bool {
        self.bits.consume_release(mask.bits())
    }

    #[inline]
    pub fn is_down(&self, mask: F) -> bool {
        self.bits.is_down(mask.bits())
    }

    #[inline]
    pub fn is_down_all(&self, mask: F) -> bool {
        self.bits.is_down_all(mask.bits())
    }

    #[inline]
    pub fn is_pressed(&self, mask: F) -> bool {
        self.bits.is_pressed(mask.bits())
    }

    #[inline]
    pub fn is_released(&self, mask: F) -> bool {
        self.bits.is_released(mask.bits())
    }

    #[inline]
    pub fn has_changes(&self) -> bool {
        self.bits.has_changes()
    }

    pub fn current(&self) -> F {
        F::from_bits_retain(self.bits.current)
    }

    pub fn prev(&self) -> F {
        F::from_bits_retain(self.bits.prev)
    }

    pub fn pressed(&self) -> F {
        F::from_bits_retain(self.bits.pressed)
    }

    pub fn released(&self) -> F {
        F::from_bits_retain(self.bits.released)
    }

    pub fn changes(&self) -> F {
        F::from_bits_retain(self.bits.changes())
    }

    /// See [`DigitalControlStates::edges`]. `bit` is the flag's bit index.
    pub fn edges(&self) -> impl Iterator<Item = ControlEdge> {
        self.bits.edges()
    }

    /// OR-merge any number of typed states; see [`DigitalControlStates::merged`].
    pub fn merged<I>(states: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::from_bits(DigitalControlStates::merged(
            states.into_iter().map(Self::into_bits),
        ))
    }
}

impl<F> Clone for DigitalFlagStates<F>
where
    F: Flags,
    F::Bits: ControlBits,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for DigitalFlagStates<F>
where
    F: Flags,
    F::Bits: ControlBits,
{
}

impl<F> Default for DigitalFlagStates<F>
where
    F: Flags,
    F::Bits: ControlBits,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<F> PartialEq for DigitalFlagStates<F>
where
    F: Flags,
    F::Bits: ControlBits,
{
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<F> Eq for DigitalFlagStates<F>
where
    F: Flags,
    F::Bits: ControlBits,
{
}

impl<F> Hash for DigitalFlagStates<F>
where
    F: Flags,
    F::Bits: ControlBits,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<F> fmt::Debug for DigitalFlagStates<F>
where
    F: Flags + fmt::Debug,
    F::Bits: ControlBits,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalFlagStates")
            .field("current", &self.current())
            .field("prev", &self.prev())
            .field("pressed", &self.pressed())
            .field("released", &self.released())
            .finish()
    }
}

impl<F> From<DigitalControlStates<F::Bits>> for DigitalFlagStates<F>
where
    F: Flags,
    F::Bits: ControlBits,
{
    fn from(bits: DigitalControlStates<F::Bits>) -> Self {
        Self::from_bits(bits)
    }
}

macro_rules! impl_flag_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident) => {
        impl<F> $op for DigitalFlagStates<F>
        where
            F: Flags,
            F::Bits: ControlBits,
        {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self::from_bits($op::$method(self.bits, rhs.bits))
            }
        }

        impl<F> $assign for DigitalFlagStates<F>
        where
            F: Flags,
            F::Bits: ControlBits,
        {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                $assign::$assign_method(&mut self.bits, rhs.bits);
            }
        }
    };
}

impl_flag_op!(BitOr, bitor, BitOrAssign, bitor_assign);
impl_flag_op!(BitAnd, bitand, BitAndAssign, bitand_assign);
impl_flag_op!(BitXor, bitxor, BitXorAssign, bitxor_assign);

#[cfg(test)]
mod tests {
    use super::*;
    use bitflags::bitflags;

    bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Buttons: u8 {
            const A = 1 << 0;
            const B = 1 << 1;
            const X = 1 << 2;
            const START = 1 << 7;
        }
    }

    #[test]
    fn test_press_then_partial_release() {
        let mut s = DigitalFlagStates::<Buttons>::new();

        assert!(s.update(Buttons::A | Buttons::X));
        assert_eq!(s.current(), Buttons::A | Buttons::X);
        assert_eq!(s.prev(), Buttons::empty());
        assert_eq!(s.pressed(), Buttons::A | Buttons::X);
        assert_eq!(s.released(), Buttons::empty());

        assert!(s.update(Buttons::X));
        assert_eq!(s.prev(), Buttons::A | Buttons::X);
        assert_eq!(s.pressed(), Buttons::empty());
        assert_eq!(s.released(), Buttons::A);
        assert_eq!(s.changes(), Buttons::A);

        assert!(!s.update(Buttons::X));
    }

    #[test]
    fn test_queries_and_consumption() {
        let mut s = DigitalFlagStates::<Buttons>::new();
        s.update(Buttons::A | Buttons::B);

        assert!(s.is_down_all(Buttons::A | Buttons::B));
        assert!(!s.is_down_all(Buttons::A | Buttons::X));
        assert!(s.is_down(Buttons::B | Buttons::X));

        assert!(s.consume_press(Buttons::A));
        assert_eq!(s.pressed(), Buttons::B);
        assert!(!s.consume_press(Buttons::A));

        s.update(Buttons::empty());
        assert!(s.is_released(Buttons::A));
        assert!(s.consume_release(Buttons::A | Buttons::B));
        assert!(!s.has_changes());
    }

    #[test]
    fn test_not_respects_storage_width() {
        let mut s = DigitalFlagStates::<Buttons>::new();
        s.update(Buttons::all());
        s.update(Buttons::START);
        assert_eq!(s.released(), Buttons::A | Buttons::B | Buttons::X);
        assert_eq!(s.as_bits().released, 0b0000_0111);
    }

    #[test]
    fn test_clear_variants() {
        let mut s = DigitalFlagStates::<Buttons>::new();
        s.update(Buttons::A);
        s.clear_changes();
        assert_eq!(s.current(), Buttons::A);
        assert!(!s.has_changes());

        s.clear();
        assert_eq!(s, DigitalFlagStates::default());
    }

    #[test]
    fn test_update_bits_rejects_unknown() {
        let mut s = DigitalFlagStates::<Buttons>::new();
        assert!(s.update_bits(0b0000_0011).unwrap());

        let err = s.update_bits(0b0100_0001).unwrap_err();
        assert!(matches!(err, ControlError::UnknownBits { bits: 0b0100_0001 }));
        // Rejected snapshot left state alone.
        assert_eq!(s.current(), Buttons::A | Buttons::B);
    }

    #[test]
    fn test_update_truncate_drops_unknown() {
        let mut s = DigitalFlagStates::<Buttons>::new();
        assert!(s.update_truncate(0b0110_0001));
        assert_eq!(s.current(), Buttons::A);
        assert_eq!(s.as_bits().current, 0b0000_0001);
    }

    #[test]
    fn test_combinators_match_raw() {
        let mut a = DigitalFlagStates::<Buttons>::new();
        a.update(Buttons::A);
        let mut b = DigitalFlagStates::<Buttons>::new();
        b.update(Buttons::B);
        b.update(Buttons::B | Buttons::X);

        assert_eq!((a | b).into_bits(), a.into_bits() | b.into_bits());
        assert_eq!((a & b).into_bits(), a.into_bits() & b.into_bits());
        assert_eq!((a ^ b).into_bits(), a.into_bits() ^ b.into_bits());

        let mut c = a;
        c |= b;
        assert_eq!(c.current(), Buttons::A | Buttons::B | Buttons::X);
        assert_eq!(c.pressed(), Buttons::A | Buttons::X);
    }

    #[test]
    fn test_latched_update() {
        let mut s = DigitalFlagStates::<Buttons>::new();
        s.update_latched(Buttons::A);
        s.update_latched(Buttons::A | Buttons::B);
        assert_eq!(s.pressed(), Buttons::A | Buttons::B);
    }

    #[test]
    fn test_from_raw_state() {
        let mut raw = DigitalControlStates::<u8>::new();
        raw.update(0b101);
        let s: DigitalFlagStates<Buttons> = raw.into();
        assert_eq!(s.pressed(), Buttons::A | Buttons::X);
        assert!(format!("{:?}", s).starts_with("DigitalFlagStates {"));
    }

    #[test]
    fn test_edges_and_merge_match_raw_form() {
        let mut a = DigitalFlagStates::<Buttons>::new();
        a.update(Buttons::A | Buttons::START);
        let mut b = DigitalFlagStates::<Buttons>::new();
        b.update(Buttons::B);
        b.update(Buttons::empty());

        let edges: Vec<ControlEdge> = a.edges().collect();
        assert_eq!(
            edges,
            vec![
                ControlEdge::Pressed { bit: 0 },
                ControlEdge::Pressed { bit: 7 },
            ]
        );

        let merged = DigitalFlagStates::merged([a, b]);
        assert_eq!(merged, a | b);
        assert_eq!(merged.pressed(), Buttons::A | Buttons::START);
        assert_eq!(merged.released(), Buttons::B);
        assert_eq!(
            DigitalFlagStates::<Buttons>::merged(std::iter::empty()),
            DigitalFlagStates::new()
        );
    }

    #[test]
    fn test_hash_follows_raw_state() {
        use std::collections::HashSet;

        let mut a = DigitalFlagStates::<Buttons>::new();
        a.update(Buttons::X);
        let b = DigitalFlagStates::<Buttons>::from_bits(a.into_bits());

        let mut seen = HashSet::new();
        assert!(seen.insert(a));
        assert!(!seen.insert(b));
        assert!(seen.insert(DigitalFlagStates::new()));
    }
}
