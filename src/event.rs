//! Per-control edge views.
//!
//! A [`DigitalControlStates`] stores edges as masks. Code that wants one item per
//! control (UI widgets, debug overlays, binding editors) can walk them with
//! [`DigitalControlStates::edges`], which yields [`ControlEdge`] values in the
//! same press/release vocabulary device backends use.
//!
//! This is a read-only view over the pending masks. Nothing is queued or
//! consumed by iterating.

use crate::bits::ControlBits;
use crate::digital::DigitalControlStates;

/// One pending transition of a single control.
///
/// `bit` is the control's bit index within the storage word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlEdge {
    /// The control went up → down.
    Pressed { bit: u32 },
    /// The control went down → up.
    Released { bit: u32 },
}

impl ControlEdge {
    /// Bit index of the control this edge belongs to.
    #[inline]
    pub fn bit(&self) -> u32 {
        match *self {
            ControlEdge::Pressed { bit } | ControlEdge::Released { bit } => bit,
        }
    }
}

/// Iterator over the set bit indices of a mask, lowest first.
#[derive(Clone, Copy, Debug)]
pub struct BitIter<B: ControlBits> {
    rest: B,
}

impl<B: ControlBits> BitIter<B> {
    pub fn new(mask: B) -> Self {
        Self { rest: mask }
    }
}

impl<B: ControlBits> Iterator for BitIter<B> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let bit = self.rest.lowest_bit()?;
        self.rest = self.rest.without_lowest_bit();
        Some(bit)
    }
}

impl<B: ControlBits> DigitalControlStates<B> {
    /// Pending presses then pending releases, each in ascending bit order.
    pub fn edges(&self) -> impl Iterator<Item = ControlEdge> {
        let pressed = BitIter::new(self.pressed).map(|bit| ControlEdge::Pressed { bit });
        let released = BitIter::new(self.released).map(|bit| ControlEdge::Released { bit });
        pressed.chain(released)
    }
}
