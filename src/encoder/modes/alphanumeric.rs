/// Alphanumeric mode encoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::encoder::bit_buffer::BitBuffer;
use crate::error::{QrError, Result};

const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Index of `c` in the 45-symbol set
    pub fn char_value(c: u8) -> Option<u32> {
        ALPHANUMERIC_CHARSET
            .iter()
            .position(|&x| x == c)
            .map(|i| i as u32)
    }

    /// True if every character belongs to the alphanumeric set
    pub fn is_alphanumeric(text: &str) -> bool {
        text.bytes().all(|b| Self::char_value(b).is_some())
    }

    /// Number of data bits for `char_count` characters
    pub fn data_bits(char_count: usize) -> usize {
        char_count / 2 * 11 + char_count % 2 * 6
    }

    /// Pack `text` into `out`
    pub fn encode(text: &str, out: &mut BitBuffer) -> Result<()> {
        let values = text
            .bytes()
            .enumerate()
            .map(|(position, b)| {
                Self::char_value(b).ok_or(QrError::InvalidCharacter {
                    mode: "alphanumeric",
                    position,
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        let mut pairs = values.chunks_exact(2);
        for pair in pairs.by_ref() {
            out.append_bits(pair[0] * 45 + pair[1], 11);
        }
        if let [single] = pairs.remainder() {
            out.append_bits(*single, 6);
        }
        Ok(())
    }
}
