//! Error type for the fallible edges of the crate.
//!
//! Core state updates are total and never fail. Errors only come from
//! boundaries: raw bits that don't fit a flags type, and axis filter
//! configuration.

use thiserror::Error;

/// Errors produced by `controlstate`.
#[derive(Debug, Error)]
pub enum ControlError {
    /// A raw snapshot carried bits that name no declared control.
    #[error("raw control bits {bits:#x} contain undeclared controls")]
    UnknownBits { bits: u128 },

    /// Deadzone must be finite and within `[0, 1)`.
    #[error("deadzone {0} is outside [0, 1)")]
    InvalidDeadzone(f32),

    /// Axis filter configuration failed to parse.
    #[error("invalid axis filter config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ControlError>;
