//! Test-only reference reader.
//!
//! Reads a finished symbol back into bytes without going through the
//! encoder's own placement, masking or format code: format bits are matched
//! against a locally computed BCH table, the zigzag walk and de-interleave are
//! redone here, and every block goes through a Berlekamp-Massey / Forney
//! Reed-Solomon decoder before the segments are parsed.

#![allow(dead_code)]

use qr_forge::encoder::function_patterns::FunctionMask;
use qr_forge::encoder::gf256::Gf256;
use qr_forge::encoder::tables::ec_block_info;
use qr_forge::{BitMatrix, ECLevel, MaskPattern, QrCode, Version};

const ALPHANUMERIC: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// What the reader recovered from a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
    /// Concatenated segment payloads (digits and alphanumerics as ASCII,
    /// kanji as Shift JIS pairs)
    pub data: Vec<u8>,
    /// (mode indicator, character count) per segment
    pub segments: Vec<(u8, usize)>,
    pub eci: Vec<u32>,
    /// Codewords repaired by Reed-Solomon across all blocks
    pub corrected: usize,
}

/// Decode a symbol from its module grid
pub fn read_matrix(modules: &BitMatrix) -> Result<Decoded, String> {
    let size = modules.width();
    if size < 21 || (size - 17) % 4 != 0 {
        return Err(format!("bad symbol size {size}"));
    }
    let version = Version::new(((size - 17) / 4) as u8).ok_or("version out of range")?;

    let (ec_level, mask) = read_format(modules)?;
    if version.has_version_info() {
        let stored = read_version_bits(modules);
        if stored != version_codeword(version.number() as u32) {
            return Err(format!("version info {stored:#x} does not match size"));
        }
    }

    let func = FunctionMask::new(version);
    let mut unmasked = modules.clone();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask.is_masked(y, x) {
                unmasked.toggle(x, y);
            }
        }
    }

    let bits = extract_bits(&unmasked, &func);
    let info = ec_block_info(version, ec_level);
    let codewords: Vec<u8> = bits
        .chunks(8)
        .take(info.total_codewords)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect();
    if codewords.len() != info.total_codewords {
        return Err("not enough data modules".to_string());
    }

    // De-interleave: data round-robin (short blocks stop early), then EC round-robin
    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|i| Vec::with_capacity(info.block_data_len(i) + info.ecc_per_block))
        .collect();
    let mut next = codewords.iter().copied();
    let long_len = info.short_block_data_len() + 1;
    for i in 0..long_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < info.block_data_len(b) {
                block.push(next.next().ok_or("codeword stream ended early")?);
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.push(next.next().ok_or("codeword stream ended early")?);
        }
    }

    let rs = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut data = Vec::with_capacity(info.data_codewords());
    let mut corrected = 0;
    for (b, block) in blocks.iter_mut().enumerate() {
        corrected += rs.decode(block)?;
        data.extend_from_slice(&block[..info.block_data_len(b)]);
    }

    let mut decoded = parse_segments(&data, version)?;
    decoded.version = version;
    decoded.ec_level = ec_level;
    decoded.mask = mask;
    decoded.corrected = corrected;
    Ok(decoded)
}

pub fn read(qr: &QrCode) -> Result<Decoded, String> {
    read_matrix(qr.modules())
}

/// Flip every module of the first `per_block` codewords of each block
pub fn damage_codewords(qr: &QrCode, per_block: usize) -> BitMatrix {
    let info = ec_block_info(qr.version(), qr.ec_level());
    let func = FunctionMask::new(qr.version());
    let positions = data_positions(&func);
    let mut modules = qr.modules().clone();
    // The first num_blocks codewords of the stream are codeword 0 of each block, and so on
    for bit in 0..per_block * info.num_blocks * 8 {
        let (x, y) = positions[bit];
        modules.toggle(x, y);
    }
    modules
}

fn format_codeword(data: u32) -> u32 {
    let mut rem = data << 10;
    for shift in (10..15).rev() {
        if (rem >> shift) & 1 == 1 {
            rem ^= 0x537 << (shift - 10);
        }
    }
    ((data << 10) | rem) ^ 0x5412
}

fn version_codeword(version: u32) -> u32 {
    let mut rem = version << 12;
    for shift in (12..18).rev() {
        if (rem >> shift) & 1 == 1 {
            rem ^= 0x1F25 << (shift - 12);
        }
    }
    (version << 12) | rem
}

fn read_format(modules: &BitMatrix) -> Result<(ECLevel, MaskPattern), String> {
    let size = modules.width();
    let mut first = 0u32;
    let mut second = 0u32;
    for i in 0..15 {
        let (x1, y1) = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
        let (x2, y2) = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
        first |= (modules.get(x1, y1) as u32) << i;
        second |= (modules.get(x2, y2) as u32) << i;
    }
    if first != second {
        return Err(format!("format copies differ: {first:#x} vs {second:#x}"));
    }

    for data in 0..32u32 {
        if format_codeword(data) == first {
            let level = match data >> 3 {
                0b01 => ECLevel::L,
                0b00 => ECLevel::M,
                0b11 => ECLevel::Q,
                _ => ECLevel::H,
            };
            let mask = MaskPattern::from_index((data & 7) as u8).ok_or("mask index")?;
            return Ok((level, mask));
        }
    }
    Err(format!("format bits {first:#017b} are not a valid codeword"))
}

fn read_version_bits(modules: &BitMatrix) -> u32 {
    let size = modules.width();
    let mut bits = 0u32;
    for i in 0..18 {
        // Bottom-left copy; the top-right one is its transpose
        let (x, y) = (i / 3, size - 11 + i % 3);
        debug_assert_eq!(modules.get(x, y), modules.get(y, x));
        bits |= (modules.get(x, y) as u32) << i;
    }
    bits
}

/// Data module coordinates in reading order
fn data_positions(func: &FunctionMask) -> Vec<(usize, usize)> {
    let dimension = func.size();
    let mut positions = Vec::new();
    let mut upward = true;
    let mut col = dimension as i32 - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }
        let rows: Box<dyn Iterator<Item = usize>> = if upward {
            Box::new((0..dimension).rev())
        } else {
            Box::new(0..dimension)
        };
        for row in rows {
            for c in [col as usize, col as usize - 1] {
                if !func.is_function(c, row) {
                    positions.push((c, row));
                }
            }
        }
        upward = !upward;
        col -= 2;
    }
    positions
}

fn extract_bits(matrix: &BitMatrix, func: &FunctionMask) -> Vec<bool> {
    data_positions(func)
        .into_iter()
        .map(|(x, y)| matrix.get(x, y))
        .collect()
}

struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.pos
    }

    fn read(&mut self, count: usize) -> Result<u32, String> {
        if count > self.remaining() {
            return Err(format!("wanted {count} bits, {} left", self.remaining()));
        }
        let mut value = 0u32;
        for _ in 0..count {
            let bit = (self.bytes[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | bit as u32;
            self.pos += 1;
        }
        Ok(value)
    }
}

fn count_bits(mode: u8, version: Version) -> usize {
    let bracket = version.bracket();
    match mode {
        0b0001 => [10, 12, 14][bracket],
        0b0010 => [9, 11, 13][bracket],
        0b0100 => [8, 16, 16][bracket],
        0b1000 => [8, 10, 12][bracket],
        _ => 0,
    }
}

fn parse_segments(data: &[u8], version: Version) -> Result<Decoded, String> {
    let mut reader = BitReader::new(data);
    let mut out = Decoded {
        version,
        ec_level: ECLevel::L,
        mask: MaskPattern::Pattern0,
        data: Vec::new(),
        segments: Vec::new(),
        eci: Vec::new(),
        corrected: 0,
    };

    while reader.remaining() >= 4 {
        let mode = reader.read(4)? as u8;
        if mode == 0 {
            break;
        }
        if mode == 0b0111 {
            let first = reader.read(8)?;
            let value = if first & 0x80 == 0 {
                first
            } else if first & 0xC0 == 0x80 {
                ((first & 0x3F) << 8) | reader.read(8)?
            } else if first & 0xE0 == 0xC0 {
                ((first & 0x1F) << 16) | reader.read(16)?
            } else {
                return Err(format!("bad ECI prefix {first:#x}"));
            };
            out.eci.push(value);
            out.segments.push((mode, 0));
            continue;
        }

        let count = reader.read(count_bits(mode, version))? as usize;
        out.segments.push((mode, count));
        match mode {
            0b0001 => {
                let mut left = count;
                while left > 0 {
                    let take = left.min(3);
                    let value = reader.read([0, 4, 7, 10][take])?;
                    let digits = format!("{value:0width$}", width = take);
                    if digits.len() != take {
                        return Err(format!("numeric group {value} too large"));
                    }
                    out.data.extend_from_slice(digits.as_bytes());
                    left -= take;
                }
            }
            0b0010 => {
                let mut left = count;
                while left >= 2 {
                    let value = reader.read(11)? as usize;
                    out.data.push(ALPHANUMERIC[value / 45]);
                    out.data.push(ALPHANUMERIC[value % 45]);
                    left -= 2;
                }
                if left == 1 {
                    out.data.push(ALPHANUMERIC[reader.read(6)? as usize]);
                }
            }
            0b0100 => {
                for _ in 0..count {
                    out.data.push(reader.read(8)? as u8);
                }
            }
            0b1000 => {
                for _ in 0..count {
                    let value = reader.read(13)?;
                    let packed = ((value / 0xC0) << 8) | (value % 0xC0);
                    let sjis = if packed < 0x1F00 {
                        packed + 0x8140
                    } else {
                        packed + 0xC140
                    };
                    out.data.extend_from_slice(&(sjis as u16).to_be_bytes());
                }
            }
            _ => return Err(format!("unknown mode {mode:#06b}")),
        }
    }
    Ok(out)
}

/// Reed-Solomon decoder with generator roots alpha^0 .. alpha^(e-1)
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` in place, returning how many codewords changed
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, String> {
        let syndrome = self.syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = Self::error_locator(&syndrome);
        let n = received.len();
        let degree = sigma.len() - 1;

        // Chien search; position j in the block is x^(n-1-j)
        let mut positions = Vec::new();
        for pos in 0..n {
            let inv_exp = (255 - (n - 1 - pos) % 255) % 255;
            if Self::eval(&sigma, inv_exp) == 0 {
                positions.push(pos);
            }
        }
        if positions.len() != degree {
            return Err(format!(
                "uncorrectable block: locator degree {degree}, {} roots",
                positions.len()
            ));
        }

        // Forney: omega = S(x) * sigma(x) mod x^e
        let e = self.num_ecc_codewords;
        let mut omega = vec![0u8; e];
        for (i, slot) in omega.iter_mut().enumerate() {
            for j in 0..=i.min(degree) {
                *slot ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }
        }
        let derivative: Vec<u8> = (1..sigma.len())
            .map(|i| if i % 2 == 1 { sigma[i] } else { 0 })
            .collect();

        for &pos in &positions {
            let power = (n - 1 - pos) % 255;
            let inv_exp = (255 - power) % 255;
            let denom = Self::eval(&derivative, inv_exp);
            if denom == 0 {
                return Err("zero locator derivative".to_string());
            }
            let magnitude = Gf256::mul(Gf256::exp(power), Gf256::div(Self::eval(&omega, inv_exp), denom));
            received[pos] ^= magnitude;
        }

        if self.syndrome(received).iter().any(|&s| s != 0) {
            return Err("correction left a non-zero syndrome".to_string());
        }
        Ok(positions.len())
    }

    fn syndrome(&self, received: &[u8]) -> Vec<u8> {
        (0..self.num_ecc_codewords)
            .map(|i| {
                received
                    .iter()
                    .fold(0u8, |acc, &c| Gf256::mul(acc, Gf256::exp(i)) ^ c)
            })
            .collect()
    }

    /// Berlekamp-Massey; returns sigma with ascending coefficients, sigma[0] = 1
    fn error_locator(syndrome: &[u8]) -> Vec<u8> {
        let mut sigma = vec![1u8];
        let mut prev = vec![1u8];
        let mut prev_delta = 1u8;
        let mut l = 0usize;
        let mut m = 1usize;

        for k in 0..syndrome.len() {
            let mut delta = syndrome[k];
            for i in 1..=l {
                delta ^= Gf256::mul(sigma.get(i).copied().unwrap_or(0), syndrome[k - i]);
            }
            if delta == 0 {
                m += 1;
                continue;
            }

            let coef = Gf256::div(delta, prev_delta);
            let before = sigma.clone();
            if sigma.len() < prev.len() + m {
                sigma.resize(prev.len() + m, 0);
            }
            for (i, &p) in prev.iter().enumerate() {
                sigma[i + m] ^= Gf256::mul(coef, p);
            }

            if 2 * l <= k {
                l = k + 1 - l;
                prev = before;
                prev_delta = delta;
                m = 1;
            } else {
                m += 1;
            }
        }
        sigma.resize(l + 1, 0);
        sigma
    }

    /// Evaluate an ascending polynomial at alpha^exp
    fn eval(poly: &[u8], exp: usize) -> u8 {
        poly.iter()
            .enumerate()
            .fold(0u8, |acc, (i, &c)| acc ^ Gf256::mul(c, Gf256::exp(exp * i)))
    }
}
