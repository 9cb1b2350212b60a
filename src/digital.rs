//! Edge-detecting state for a bank of digital controls.
//!
//! [`DigitalControlStates`] packs one control per bit of an unsigned word and
//! derives press/release edges from consecutive snapshots. The input driver
//! calls [`update`](DigitalControlStates::update) once per tick; consumers
//! query or consume the result before the next tick.
//!
//! # Edge lifetime
//! `update` **overwrites** `pressed`/`released` with the edges of the latest
//! transition only. If the driver updates twice before a consumer looks, the
//! first tick's edges are gone. Consumers that poll slower than the driver
//! should use [`update_latched`](DigitalControlStates::update_latched), which
//! keeps unconsumed edges until they are consumed or cleared.
//!
//! # Merging devices
//! `|`, `&` and `^` combine two states field by field. Edges are **not**
//! re-derived from the merged `current`/`prev`, so a merged `pressed` bit may
//! be set while the merged `current` bit is also held by another device.
//!
//! # Example
//! ```
//! use controlstate::DigitalControlStates;
//!
//! const JUMP: u32 = 0b001;
//! const FIRE: u32 = 0b100;
//!
//! let mut pad = DigitalControlStates::<u32>::new();
//! assert!(pad.update(JUMP | FIRE));
//! assert!(pad.consume_press(JUMP));
//! assert!(!pad.is_pressed(JUMP));
//! assert!(pad.is_pressed(FIRE));
//! ```

use crate::bits::ControlBits;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};

/// Current/previous level and pending edges for up to `B::WIDTH` controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DigitalControlStates<B: ControlBits = u32> {
    /// Controls down as of the last update.
    pub current: B,
    /// Controls down as of the update before that.
    pub prev: B,
    /// Controls that went up → down.
    pub pressed: B,
    /// Controls that went down → up.
    pub released: B,
}

impl<B: ControlBits> DigitalControlStates<B> {
    /// All controls up, no history, no pending edges.
    pub fn new() -> Self {
        Self {
            current: B::ZERO,
            prev: B::ZERO,
            pressed: B::ZERO,
            released: B::ZERO,
        }
    }

    /// Shift `current` into `prev`, store the new snapshot and recompute edges.
    ///
    /// Returns `true` if any control changed level.
    pub fn update(&mut self, current: B) -> bool {
        self.prev = self.current;
        self.current = current;

        let changes = self.changes();
        self.pressed = changes & self.current;
        self.released = changes & !self.current;

        !changes.is_zero()
    }

    /// Like [`update`](Self::update), but new edges are added to the pending
    /// ones instead of replacing them.
    ///
    /// A newer edge on a bit cancels that bit's opposite pending edge, so a
    /// control never reads as both pressed and released.
    pub fn update_latched(&mut self, current: B) -> bool {
        self.prev = self.current;
        self.current = current;

        let changes = self.changes();
        let pressed = changes & self.current;
        let released = changes & !self.current;
        self.pressed = (self.pressed & !released) | pressed;
        self.released = (self.released & !pressed) | released;

        !changes.is_zero()
    }

    /// Zero every field, dropping history and pending edges.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Drop pending edges; `current` and `prev` are untouched.
    pub fn clear_changes(&mut self) {
        self.pressed = B::ZERO;
        self.released = B::ZERO;
    }

    /// Returns whether any `mask` bit was pressed, then clears those bits
    /// from `pressed`. Other pending presses are left for other consumers.
    pub fn consume_press(&mut self, mask: B) -> bool {
        let hit = self.pressed.intersects(mask);
        self.pressed = self.pressed & !mask;
        hit
    }

    /// Release counterpart of [`consume_press`](Self::consume_press).
    pub fn consume_release(&mut self, mask: B) -> bool {
        let hit = self.released.intersects(mask);
        self.released = self.released & !mask;
        hit
    }

    /// Any control in `mask` is down.
    #[inline]
    pub fn is_down(&self, mask: B) -> bool {
        self.current.intersects(mask)
    }

    /// Every control in `mask` is down.
    #[inline]
    pub fn is_down_all(&self, mask: B) -> bool {
        self.current.contains_all(mask)
    }

    /// Any control in `mask` has a pending press.
    #[inline]
    pub fn is_pressed(&self, mask: B) -> bool {
        self.pressed.intersects(mask)
    }

    /// Any control in `mask` has a pending release.
    #[inline]
    pub fn is_released(&self, mask: B) -> bool {
        self.released.intersects(mask)
    }

    /// Controls whose level differs between `prev` and `current`.
    #[inline]
    pub fn changes(&self) -> B {
        self.current ^ self.prev
    }

    /// `true` while any press or release is pending.
    #[inline]
    pub fn has_changes(&self) -> bool {
        !(self.pressed | self.released).is_zero()
    }

    /// OR-merge any number of device states into one logical state.
    ///
    /// An empty iterator yields the zero state.
    pub fn merged<I>(states: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        states.into_iter().fold(Self::new(), |acc, s| acc | s)
    }
}

macro_rules! impl_fieldwise_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $sym:tt) => {
        impl<B: ControlBits> $op for DigitalControlStates<B> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self {
                    current: self.current $sym rhs.current,
                    prev: self.prev $sym rhs.prev,
                    pressed: self.pressed $sym rhs.pressed,
                    released: self.released $sym rhs.released,
                }
            }
        }

        impl<B: ControlBits> $assign for DigitalControlStates<B> {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = *self $sym rhs;
            }
        }
    };
}

impl_fieldwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_fieldwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_fieldwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);
