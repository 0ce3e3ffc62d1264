//! Version selection, level boosting and data codeword assembly.

use tracing::{debug, trace};

use crate::encoder::bit_buffer::BitBuffer;
use crate::encoder::segment::Segment;
use crate::encoder::tables::num_data_codewords;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, Version};

/// Pad bytes appended after the terminator, alternating
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Data bits available at `version` and `ec_level`
pub fn data_capacity_bits(version: Version, ec_level: ECLevel) -> usize {
    num_data_codewords(version, ec_level) * 8
}

/// Smallest version in `min..=max` whose data capacity holds the payload.
///
/// `bits_for` returns the total segment bits at a given version (header widths
/// depend on the version bracket), or None when a count field overflows.
/// Returns the version and the bits used there.
pub fn select_version<F>(
    ec_level: ECLevel,
    min: Version,
    max: Version,
    mut bits_for: F,
) -> Result<(Version, usize)>
where
    F: FnMut(Version) -> Option<usize>,
{
    let mut version = min;
    loop {
        let capacity = data_capacity_bits(version, ec_level);
        let needed = bits_for(version);
        trace!(version = version.number(), ?needed, capacity, "capacity probe");

        if let Some(bits) = needed.filter(|&bits| bits <= capacity) {
            debug!(
                version = version.number(),
                bits,
                capacity,
                ?ec_level,
                "selected version"
            );
            return Ok((version, bits));
        }

        match version.next() {
            Some(next) if next <= max => version = next,
            _ => {
                return Err(QrError::DataTooLong {
                    needed_bits: needed,
                    capacity_bits: capacity,
                });
            }
        }
    }
}

/// Strongest level at or above `ec_level` that still holds `used_bits` at `version`
pub fn boost_level(version: Version, ec_level: ECLevel, used_bits: usize) -> ECLevel {
    let mut level = ec_level;
    while let Some(next) = level.boosted() {
        if used_bits > data_capacity_bits(version, next) {
            break;
        }
        level = next;
    }
    if level != ec_level {
        debug!(from = ?ec_level, to = ?level, "boosted error correction level");
    }
    level
}

/// Concatenate segments with headers, then terminate and pad to the exact
/// data capacity of `version` at `ec_level`.
///
/// The caller must have checked that the segments fit.
pub fn build_data_codewords(segs: &[Segment], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let capacity = data_capacity_bits(version, ec_level);
    let mut bb = BitBuffer::with_capacity(capacity);

    for seg in segs {
        bb.append_bits(seg.mode().mode_bits(), 4);
        bb.append_bits(seg.num_chars() as u32, seg.mode().char_count_bits(version));
        bb.append_buffer(seg.data());
    }
    debug_assert!(bb.len() <= capacity, "segments exceed capacity");

    // Terminator of up to four zero bits, then zero-fill to a byte boundary
    let terminator = (capacity - bb.len()).min(4);
    bb.append_bits(0, terminator as u8);
    bb.append_bits(0, ((8 - bb.len() % 8) % 8) as u8);
    debug_assert_eq!(bb.len() % 8, 0);

    for &pad in PAD_BYTES.iter().cycle() {
        if bb.len() >= capacity {
            break;
        }
        bb.append_bits(pad as u32, 8);
    }
    debug_assert_eq!(bb.len(), capacity);

    bb.into_bytes()
}
