/// Append-only bit sequence, packed MSB-first into bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Length in bits
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no bits have been appended
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`, or None past the end
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some((self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    /// Append a single bit
    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Append the low `count` bits of `value`, most significant first.
    ///
    /// # Panics
    /// If `count > 31` or `value` has bits set above `count`.
    pub fn append_bits(&mut self, value: u32, count: u8) {
        assert!(count <= 31 && value >> count == 0, "value out of range");
        for i in (0..count).rev() {
            self.push((value >> i) & 1 == 1);
        }
    }

    /// Append every bit of another buffer
    pub fn append_buffer(&mut self, other: &BitBuffer) {
        if self.len % 8 == 0 {
            // Byte-aligned fast path
            self.bytes.truncate(self.len / 8);
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// Iterate bits in append order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| (self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
    }

    /// Packed bytes; a trailing partial byte is zero-filled
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume into packed bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
