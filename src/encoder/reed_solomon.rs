/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
use rayon::prelude::*;

use crate::encoder::config;
use crate::encoder::gf256::Gf256;
use crate::encoder::tables::ec_block_info;
use crate::models::{ECLevel, Version};

/// Reed-Solomon encoder for one EC codeword count
pub struct ReedSolomonEncoder {
    /// Generator coefficients from x^(degree-1) down to x^0; the monic
    /// leading term is implicit.
    divisor: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Build the generator (x - a^0)(x - a^1)...(x - a^(degree-1))
    pub fn new(degree: usize) -> Self {
        assert!((1..=255).contains(&degree), "degree out of range");
        let mut divisor = vec![0u8; degree];
        divisor[degree - 1] = 1; // start from the constant 1

        // Multiply the running product by (x - a^i)
        let mut root = 1u8;
        for _ in 0..degree {
            for j in 0..degree {
                divisor[j] = Gf256::mul(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Gf256::mul(root, 0x02);
        }
        Self { divisor }
    }

    /// Number of EC codewords produced per block
    pub fn degree(&self) -> usize {
        self.divisor.len()
    }

    /// Generator coefficients, highest degree first, monic term omitted
    pub fn generator(&self) -> &[u8] {
        &self.divisor
    }

    /// EC codewords for `data`: remainder of data(x) * x^degree / g(x)
    pub fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let degree = self.divisor.len();
        let mut remainder = vec![0u8; degree];
        for &d in data {
            let factor = d ^ remainder[0];
            remainder.copy_within(1.., 0);
            remainder[degree - 1] = 0;
            for (r, &coef) in remainder.iter_mut().zip(&self.divisor) {
                *r ^= Gf256::mul(coef, factor);
            }
        }
        remainder
    }
}

/// Split data codewords into blocks, append EC to each and interleave.
///
/// Returns the final codeword sequence in placement order.
pub fn add_ec_and_interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let info = ec_block_info(version, ec_level);
    assert_eq!(data.len(), info.data_codewords(), "data length mismatch");

    // Block boundaries in table order; short blocks come first
    let mut bounds = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = info.block_data_len(i);
        bounds.push(offset..offset + len);
        offset += len;
    }

    let rs = ReedSolomonEncoder::new(info.ecc_per_block);
    let ecc_blocks: Vec<Vec<u8>> = if info.num_blocks >= config::parallel_ec_min_blocks() {
        bounds
            .par_iter()
            .map(|r| rs.remainder(&data[r.clone()]))
            .collect()
    } else {
        bounds.iter().map(|r| rs.remainder(&data[r.clone()])).collect()
    };

    let mut result = Vec::with_capacity(info.total_codewords);
    let long_len = info.short_block_data_len() + 1;
    for i in 0..long_len {
        for r in &bounds {
            if i < r.len() {
                result.push(data[r.start + i]);
            }
        }
    }
    for i in 0..info.ecc_per_block {
        for ecc in &ecc_blocks {
            result.push(ecc[i]);
        }
    }
    debug_assert_eq!(result.len(), info.total_codewords);
    result
}
