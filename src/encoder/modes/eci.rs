/// ECI designator encoder (Mode 0111)
use crate::encoder::bit_buffer::BitBuffer;
use crate::error::{QrError, Result};

pub struct EciEncoder;

impl EciEncoder {
    /// Write the designator using the 1-, 2- or 3-byte form
    pub fn encode(assign_value: u32, out: &mut BitBuffer) -> Result<()> {
        match assign_value {
            0..0x80 => out.append_bits(assign_value, 8),
            0x80..0x4000 => {
                out.append_bits(0b10, 2);
                out.append_bits(assign_value, 14);
            }
            0x4000..1_000_000 => {
                out.append_bits(0b110, 3);
                out.append_bits(assign_value, 21);
            }
            _ => return Err(QrError::InvalidEciAssignment(assign_value)),
        }
        Ok(())
    }
}
