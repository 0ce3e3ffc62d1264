/// Kanji mode encoder (Mode 1000)
/// Input is Shift JIS double-byte values, 13 bits each
use crate::encoder::bit_buffer::BitBuffer;
use crate::error::{QrError, Result};

pub struct KanjiEncoder;

impl KanjiEncoder {
    /// Reduce a Shift JIS value to its 13-bit form
    pub fn compact(sjis: u16) -> Option<u32> {
        let offset = match sjis {
            0x8140..=0x9FFC => 0x8140,
            0xE040..=0xEBBF => 0xC140,
            _ => return None,
        };
        let reduced = sjis - offset;
        let (hi, lo) = (reduced >> 8, reduced & 0xFF);
        // Low byte must lie in the Shift JIS trail-byte range
        if lo > 0xBC {
            return None;
        }
        Some(hi as u32 * 0xC0 + lo as u32)
    }

    /// Number of data bits for `char_count` characters
    pub fn data_bits(char_count: usize) -> usize {
        char_count * 13
    }

    /// Pack Shift JIS characters into `out`
    pub fn encode(chars: &[u16], out: &mut BitBuffer) -> Result<()> {
        let values = chars
            .iter()
            .enumerate()
            .map(|(position, &c)| {
                Self::compact(c).ok_or(QrError::InvalidCharacter {
                    mode: "kanji",
                    position,
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        for value in values {
            out.append_bits(value, 13);
        }
        Ok(())
    }
}
