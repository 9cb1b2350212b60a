//! Axis filter configuration.
//!
//! [`AxisFilter`] turns a raw normalized sample into the `adjusted` value stored
//! in [`AxisControlState8`](crate::axis::AxisControlState8). It is
//! usually loaded from a TOML fragment:
//!
//! ```
//! use controlstate::AxisFilter;
//!
//! let filter = AxisFilter::from_toml_str("deadzone = 0.2\ninvert = true").unwrap();
//! assert_eq!(filter.apply(0.1), 0.0);
//! assert!(filter.apply(1.0) < 0.0);
//! ```
//!
//! Missing keys fall back to [`AxisFilter::default`] (no deadzone, no invert,
//! rescale on).

use crate::error::{ControlError, Result};
use serde::Deserialize;

/// Deadzone/invert settings for one analog axis.
///
/// Build one with [`new`](Self::new), [`with_deadzone`](Self::with_deadzone) or
/// [`from_toml_str`](Self::from_toml_str); all of them validate the deadzone.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisFilter {
    /// Magnitudes below this read as `0.0`. Must be in `[0, 1)`.
    deadzone: f32,
    /// Flip the sign before the deadzone is applied.
    invert: bool,
    /// Stretch `[deadzone, 1]` back to `[0, 1]` so the output has no jump.
    rescale: bool,
}

impl Default for AxisFilter {
    fn default() -> Self {
        Self {
            deadzone: 0.0,
            invert: false,
            rescale: true,
        }
    }
}

impl AxisFilter {
    /// Fully specified filter, validated.
    pub fn new(deadzone: f32, invert: bool, rescale: bool) -> Result<Self> {
        let filter = Self {
            deadzone,
            invert,
            rescale,
        };
        filter.validate()?;
        Ok(filter)
    }

    /// Filter with the given deadzone and default flags, validated.
    pub fn with_deadzone(deadzone: f32) -> Result<Self> {
        Self::new(deadzone, false, true)
    }

    /// Same filter with the sign flip set to `invert`.
    pub fn inverted(self, invert: bool) -> Self {
        Self { invert, ..self }
    }

    /// Same filter with post-deadzone rescaling set to `rescale`.
    pub fn rescaled(self, rescale: bool) -> Self {
        Self { rescale, ..self }
    }

    /// Parse and validate a filter from TOML. Unknown keys are rejected.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let filter: AxisFilter = toml::from_str(src)?;
        filter.validate()?;
        log::debug!(
            "loaded axis filter: deadzone={} invert={} rescale={}",
            filter.deadzone,
            filter.invert,
            filter.rescale
        );
        Ok(filter)
    }

    pub fn validate(&self) -> Result<()> {
        if !deadzone_in_range(self.deadzone) {
            return Err(ControlError::InvalidDeadzone(self.deadzone));
        }
        Ok(())
    }

    #[inline]
    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    #[inline]
    pub fn invert(&self) -> bool {
        self.invert
    }

    #[inline]
    pub fn rescale(&self) -> bool {
        self.rescale
    }

    /// Filter one sample. Output is always within `[-1, 1]`.
    ///
    /// NaN reads as centred, infinities as full deflection. An out-of-range
    /// deadzone is treated as no deadzone.
    pub fn apply(&self, raw: f32) -> f32 {
        let value = if self.invert { -raw } else { raw };
        if value.is_nan() {
            return 0.0;
        }
        if value.is_infinite() {
            return value.signum();
        }

        let deadzone = if deadzone_in_range(self.deadzone) {
            self.deadzone
        } else {
            0.0
        };

        if value.abs() < deadzone {
            return 0.0;
        }

        let value = if self.rescale && deadzone > 0.0 {
            value.signum() * (value.abs() - deadzone) / (1.0 - deadzone)
        } else {
            value
        };

        value.clamp(-1.0, 1.0)
    }
}

#[inline]
fn deadzone_in_range(deadzone: f32) -> bool {
    deadzone.is_finite() && (0.0..1.0).contains(&deadzone)
}
