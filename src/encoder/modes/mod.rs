//! QR code data mode encoders
//!
//! This module contains packers for the QR data modes:
//! - Numeric: three digits per 10 bits
//! - Alphanumeric: two characters of a 45-symbol set per 11 bits
//! - Byte: 8 bits per input byte
//! - Kanji: one Shift JIS double-byte character per 13 bits
//! - ECI: extended channel interpretation designators

pub mod alphanumeric;
pub mod byte;
pub mod eci;
pub mod kanji;
pub mod numeric;
