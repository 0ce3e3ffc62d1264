//! qr_forge - QR code symbol encoder (ISO/IEC 18004, Model 2)
//!
//! Turns text, bytes or caller-built segments into a finished module
//! matrix plus its version, error correction level and mask. Rendering
//! is left to the caller; [`tools`] has text and PNG helpers.
//!
//! ```
//! use qr_forge::{ECLevel, EncodeOptions, encode_text};
//!
//! let qr = encode_text("HELLO WORLD", ECLevel::M, &EncodeOptions::default()).unwrap();
//! assert_eq!(qr.size(), 21);
//! assert!(qr.get_module(0, 0));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding pipeline (segments, error correction, matrix layout, masking)
pub mod encoder;
/// Encoder failures
pub mod error;
/// Core data structures (QrCode, BitMatrix, Version, etc.)
pub mod models;
/// Text and image renderings of finished symbols
pub mod tools;

pub use encoder::options::EncodeOptions;
pub use encoder::qr_encoder::QrEncoder;
pub use encoder::segment::{Mode, Segment};
pub use error::{QrError, Result};
pub use models::{BitMatrix, ECLevel, MaskPattern, QrCode, Version};

/// Input accepted by [`encode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Text, segmented automatically into numeric/alphanumeric/byte runs
    Text(&'a str),
    /// Raw bytes, carried as one byte-mode segment
    Binary(&'a [u8]),
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Payload::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(data: &'a [u8]) -> Self {
        Payload::Binary(data)
    }
}

/// Encode a text or binary payload
///
/// # Errors
/// [`QrError::DataTooLong`] when nothing in the allowed version range holds
/// the payload, or an option error from [`EncodeOptions::validate`].
pub fn encode<'a>(
    payload: impl Into<Payload<'a>>,
    ec_level: ECLevel,
    opts: &EncodeOptions,
) -> Result<QrCode> {
    match payload.into() {
        Payload::Text(text) => QrEncoder::encode_text(text, ec_level, opts),
        Payload::Binary(data) => QrEncoder::encode_binary(data, ec_level, opts),
    }
}

/// Encode text with automatic segmentation
pub fn encode_text(text: &str, ec_level: ECLevel, opts: &EncodeOptions) -> Result<QrCode> {
    QrEncoder::encode_text(text, ec_level, opts)
}

/// Encode bytes in byte mode
pub fn encode_binary(data: &[u8], ec_level: ECLevel, opts: &EncodeOptions) -> Result<QrCode> {
    QrEncoder::encode_binary(data, ec_level, opts)
}

/// Encode caller-built segments in the given order
pub fn encode_segments(
    segs: &[Segment],
    ec_level: ECLevel,
    opts: &EncodeOptions,
) -> Result<QrCode> {
    QrEncoder::encode_segments(segs, ec_level, opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_dispatch() {
        let opts = EncodeOptions::default();
        let text = encode("12345", ECLevel::L, &opts).unwrap();
        let bytes = encode(&b"12345"[..], ECLevel::L, &opts).unwrap();
        assert_eq!(text.version(), bytes.version());
        // Numeric mode and byte mode pack differently
        assert_ne!(text.modules(), bytes.modules());
    }

    #[test]
    fn test_empty_payload() {
        let qr = encode_binary(&[], ECLevel::L, &EncodeOptions::default()).unwrap();
        assert_eq!(qr.version(), Version::MIN);
        let qr = encode_text("", ECLevel::L, &EncodeOptions::default()).unwrap();
        assert_eq!(qr.version(), Version::MIN);
    }
}
