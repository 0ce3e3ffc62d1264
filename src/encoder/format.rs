/// Format information encoding for QR codes
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const GENERATOR: u32 = 0x537;
/// XOR applied so the format bits are never all zero
const FORMAT_MASK: u16 = 0x5412;

/// Format info is 15 bits (5 data + 10 ECC), drawn twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Mask pattern applied to the data area
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Format info for a level and mask
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// Masked 15-bit codeword, bit 14 first in reading order
    pub fn bits(&self) -> u16 {
        let data = ((self.ec_level.format_bits() as u32) << 3) | self.mask_pattern.index() as u32;
        let mut rem = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * GENERATOR);
        }
        debug_assert!(rem >> 10 == 0);
        (((data << 10) | rem) as u16) ^ FORMAT_MASK
    }

    /// Cells receiving each format bit as (x, y, dark), both copies
    pub fn positions(&self, size: usize) -> Vec<(usize, usize, bool)> {
        let bits = self.bits();
        let bit = |i: usize| (bits >> i) & 1 == 1;
        let mut cells = Vec::with_capacity(30);

        // First copy, around the top-left finder
        for i in 0..=5 {
            cells.push((8, i, bit(i)));
        }
        cells.push((8, 7, bit(6)));
        cells.push((8, 8, bit(7)));
        cells.push((7, 8, bit(8)));
        for i in 9..15 {
            cells.push((14 - i, 8, bit(i)));
        }

        // Second copy, split between the other two finders
        for i in 0..8 {
            cells.push((size - 1 - i, 8, bit(i)));
        }
        for i in 8..15 {
            cells.push((8, size - 15 + i, bit(i)));
        }
        cells
    }

    /// Write both copies into `modules`
    pub fn draw(&self, modules: &mut BitMatrix) {
        for (x, y, dark) in self.positions(modules.width()) {
            modules.set(x, y, dark);
        }
    }
}
