/// Byte mode encoder (Mode 0100) for 8-bit data
use crate::encoder::bit_buffer::BitBuffer;

pub struct ByteEncoder;

impl ByteEncoder {
    /// Number of data bits for `byte_count` bytes
    pub fn data_bits(byte_count: usize) -> usize {
        byte_count * 8
    }

    /// Copy `data` into `out` verbatim
    pub fn encode(data: &[u8], out: &mut BitBuffer) {
        for &byte in data {
            out.append_bits(byte as u32, 8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_encode() {
        // "HI" in ASCII = 72, 73
        let mut bb = BitBuffer::new();
        ByteEncoder::encode(b"HI", &mut bb);
        assert_eq!(bb.len(), 16);
        assert_eq!(bb.as_bytes(), &[0x48, 0x49]);
    }
}
