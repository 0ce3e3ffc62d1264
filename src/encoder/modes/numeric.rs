/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::encoder::bit_buffer::BitBuffer;
use crate::error::{QrError, Result};

pub struct NumericEncoder;

impl NumericEncoder {
    /// True if every character is an ASCII digit
    pub fn is_numeric(text: &str) -> bool {
        text.bytes().all(|b| b.is_ascii_digit())
    }

    /// Number of data bits for `char_count` digits
    pub fn data_bits(char_count: usize) -> usize {
        char_count / 3 * 10 + [0, 4, 7][char_count % 3]
    }

    /// Pack `digits` into `out`
    pub fn encode(digits: &str, out: &mut BitBuffer) -> Result<()> {
        if let Some(position) = digits.bytes().position(|b| !b.is_ascii_digit()) {
            return Err(QrError::InvalidCharacter {
                mode: "numeric",
                position,
            });
        }

        for group in digits.as_bytes().chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
            out.append_bits(value, group.len() as u8 * 3 + 1);
        }
        Ok(())
    }
}
