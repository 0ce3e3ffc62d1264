//! QR code encoding modules
//!
//! This module contains every stage between a payload and a finished symbol:
//! - Data mode packing and segmentation (numeric, alphanumeric, byte, kanji, ECI)
//! - Version selection, padding and Reed-Solomon error correction
//! - Function patterns, format and version information
//! - Codeword placement, masking and penalty scoring

/// Growable MSB-first bit sequence
pub mod bit_buffer;
/// Version selection, level boost and data codeword assembly
pub mod capacity;
pub(crate) mod config;
/// Format information encoding (EC level, mask pattern)
pub mod format;
/// Function pattern drawing and the function module mask
pub mod function_patterns;
/// GF(256) field arithmetic
pub mod gf256;
/// Mask application over data modules
pub mod mask;
/// Data mode encoders (numeric, alphanumeric, byte, kanji, ECI)
pub mod modes;
/// Per-call encoder options
pub mod options;
/// Mask penalty rules
pub mod penalty;
/// Zigzag codeword placement
pub mod placement;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction and block interleaving
pub mod reed_solomon;
/// Typed segments and automatic segmentation
pub mod segment;
/// QR specification tables (ECC codewords/blocks)
pub mod tables;
/// Version information encoding (versions 7-40)
pub mod version;
