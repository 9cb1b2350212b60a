//! Analog axis sample with a short inline history.
//!
//! [`AxisControlState8`] is embedded by value in a device's state record. It
//! holds the last raw sample, the filtered (`adjusted`) sample and the eight
//! adjusted samples before it, newest first. Nothing here allocates.

use crate::filter::AxisFilter;

/// Number of prior adjusted samples kept by [`AxisControlState8`].
pub const AXIS_HISTORY_LEN: usize = 8;

/// One analog axis: raw sample, adjusted sample, and 8 samples of history.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisControlState8 {
    /// Unprocessed sample as reported by the device.
    pub raw: f32,
    /// Sample after deadzone/calibration.
    pub adjusted: f32,
    /// Previous `adjusted` values; `history[0]` is the most recent.
    pub history: [f32; AXIS_HISTORY_LEN],
}

impl AxisControlState8 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the current `adjusted` into history and store a new sample pair.
    ///
    /// The oldest history entry is dropped.
    pub fn record(&mut self, raw: f32, adjusted: f32) {
        self.history.copy_within(0..AXIS_HISTORY_LEN - 1, 1);
        self.history[0] = self.adjusted;
        self.raw = raw;
        self.adjusted = adjusted;
    }

    /// Record `raw` and its filtered value.
    pub fn update(&mut self, raw: f32, filter: &AxisFilter) {
        self.record(raw, filter.apply(raw));
    }

    /// Change in `adjusted` since the previous sample.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.adjusted - self.history[0]
    }

    pub fn history_mean(&self) -> f32 {
        self.history.iter().sum::<f32>() / AXIS_HISTORY_LEN as f32
    }

    /// Zero the sample and its history.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
