/// GF(256) arithmetic for QR Reed-Solomon codes
/// Reducing polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D), generator alpha = 2
pub struct Gf256;

const PRIMITIVE_POLY: u16 = 0x11D;

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut value: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = value as u8;
        value <<= 1;
        if value & 0x100 != 0 {
            value ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    // alpha^255 wraps to alpha^0
    table[255] = 1;
    table
}

const fn build_log_table(exp: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static EXP_TABLE: [u8; 256] = build_exp_table();
static LOG_TABLE: [u8; 256] = build_log_table(&EXP_TABLE);

impl Gf256 {
    /// Product of two field elements
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + log_b) % 255]
    }

    /// Quotient a / b; b must be non-zero
    pub fn div(a: u8, b: u8) -> u8 {
        assert!(b != 0, "division by zero in GF(256)");
        if a == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + 255 - log_b) % 255]
    }

    /// alpha^n for any exponent
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }

    /// Bitwise Russian-peasant multiply, no tables
    pub fn mul_slow(a: u8, b: u8) -> u8 {
        let mut z: u16 = 0;
        for i in (0..8).rev() {
            z = (z << 1) ^ ((z >> 7) * PRIMITIVE_POLY);
            z ^= ((b as u16 >> i) & 1) * a as u16;
        }
        z as u8
    }
}
