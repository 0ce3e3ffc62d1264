//! Failures reported by the encoder.

use thiserror::Error;

/// Errors returned by segment construction and symbol encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// The payload does not fit any allowed version at the requested level.
    ///
    /// `needed_bits` is `None` when a segment's character count overflows
    /// its length field in every allowed version.
    #[error("data too long: needs {needed_bits:?} bits, largest allowed capacity is {capacity_bits} bits")]
    DataTooLong {
        needed_bits: Option<usize>,
        capacity_bits: usize,
    },

    /// Pinned mask index outside 0-7
    #[error("invalid mask index {0}, expected 0-7")]
    InvalidMaskIndex(u8),

    /// Version bounds outside 1-40 or reversed
    #[error("invalid version bounds {min}..={max}, expected 1 <= min <= max <= 40")]
    InvalidVersionBounds { min: u8, max: u8 },

    /// A character the segment's mode cannot carry
    #[error("character at position {position} cannot be encoded in {mode} mode")]
    InvalidCharacter { mode: &'static str, position: usize },

    /// ECI designator of one million or more
    #[error("ECI assignment value {0} out of range")]
    InvalidEciAssignment(u32),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, QrError>;
