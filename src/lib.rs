//! controlstate: edge-detecting control state for game input layers.
//!
//! An input driver feeds raw snapshots in once per tick; gameplay and UI code
//! read back levels and press/release edges, optionally consuming them so a
//! single press triggers only one consumer.
//!
//! - [`DigitalControlStates`]: bitmask form over any unsigned width (default `u32`).
//! - [`DigitalFlagStates`]: the same state typed over a `bitflags` type.
//! - [`AxisControlState8`]: analog sample with an 8-slot inline history,
//!   filtered through an [`AxisFilter`].
//!
//! Device polling, event queues and input remapping live outside this crate.

pub mod axis;
pub mod bits;
pub mod digital;
pub mod error;
pub mod event;
pub mod filter;
pub mod flags;

pub use axis::*;
pub use bits::ControlBits;
pub use digital::*;
pub use error::{ControlError, Result};
pub use event::*;
pub use filter::*;
pub use flags::*;
