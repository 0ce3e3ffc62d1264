/// Version information encoding for QR codes v7+
use crate::models::{BitMatrix, Version};

/// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const GENERATOR: u32 = 0x1F25;

/// Version info is 18 bits (6 data + 12 ECC) for versions 7-40
pub struct VersionInfo;

impl VersionInfo {
    /// 18-bit codeword for `version`
    pub fn bits(version: Version) -> u32 {
        let data = version.number() as u32;
        let mut rem = data;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * GENERATOR);
        }
        (data << 12) | rem
    }

    /// Cells receiving each bit as (x, y, dark): a 6x3 block left of the
    /// top-right finder and its transpose above the bottom-left finder.
    /// Empty below version 7.
    pub fn positions(version: Version) -> Vec<(usize, usize, bool)> {
        if !version.has_version_info() {
            return Vec::new();
        }
        let bits = Self::bits(version);
        let size = version.size();
        let mut cells = Vec::with_capacity(36);
        for i in 0..18 {
            let dark = (bits >> i) & 1 == 1;
            let a = size - 11 + i % 3;
            let b = i / 3;
            cells.push((a, b, dark));
            cells.push((b, a, dark));
        }
        cells
    }

    /// Write both copies into `modules`
    pub fn draw(version: Version, modules: &mut BitMatrix) {
        for (x, y, dark) in Self::positions(version) {
            modules.set(x, y, dark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_version_bits_known_values() {
        assert_eq!(VersionInfo::bits(v(7)), 0x07C94);
        assert_eq!(VersionInfo::bits(v(8)), 0x085BC);
        assert_eq!(VersionInfo::bits(v(40)), 0x28C69);
    }

    #[test]
    fn test_no_version_info_below_7() {
        assert!(VersionInfo::positions(v(6)).is_empty());
        assert_eq!(VersionInfo::positions(v(7)).len(), 36);
    }

    #[test]
    fn test_version_draw_transposed() {
        let version = v(7);
        let mut modules = BitMatrix::square(version.size());
        VersionInfo::draw(version, &mut modules);
        let size = version.size();
        for y in 0..6 {
            for x in size - 11..size - 8 {
                assert_eq!(modules.get(x, y), modules.get(y, x));
            }
        }
        // 0x07C94 bit 0 is 0, bit 2 is 1
        assert!(!modules.get(size - 11, 0));
        assert!(modules.get(size - 9, 0));
    }
}
