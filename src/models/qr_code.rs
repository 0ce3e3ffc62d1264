use super::BitMatrix;

/// QR Code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest symbol (21x21)
    pub const MIN: Version = Version(1);
    /// Largest symbol (177x177)
    pub const MAX: Version = Version(40);

    /// Create a version, rejecting numbers outside 1-40
    pub fn new(number: u8) -> Option<Self> {
        (1..=40).contains(&number).then_some(Version(number))
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Character-count bracket: 0 for 1-9, 1 for 10-26, 2 for 27-40
    pub fn bracket(&self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    /// Version that follows this one, if any
    pub fn next(&self) -> Option<Version> {
        Version::new(self.0 + 1)
    }

    /// Whether 18-bit version information is drawn (versions 7+)
    pub fn has_version_info(&self) -> bool {
        self.0 >= 7
    }

    /// Number of modules available for data and EC codewords, including
    /// the remainder bits that do not fill a whole codeword.
    pub fn num_raw_data_modules(&self) -> usize {
        let ver = self.0 as usize;
        let mut result = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let num_align = ver / 7 + 2;
            result -= (25 * num_align - 10) * num_align - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels in increasing order of protection
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Row index into the capacity tables
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Two-bit value carried in format information (01=L, 00=M, 11=Q, 10=H)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Get error correction level from its format information bits
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// Next stronger level, or None for H
    pub fn boosted(&self) -> Option<Self> {
        match self {
            ECLevel::L => Some(ECLevel::M),
            ECLevel::M => Some(ECLevel::Q),
            ECLevel::Q => Some(ECLevel::H),
            ECLevel::H => None,
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in index order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its index; None outside 0-7
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Pattern index (0-7)
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Check if module at row i, column j should be inverted
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// Finished QR code symbol
///
/// Immutable once returned by the encoder. Renderers read it through
/// [`QrCode::get_module`] or [`QrCode::rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    modules: BitMatrix,
}

impl QrCode {
    pub(crate) fn new(
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        modules: BitMatrix,
    ) -> Self {
        debug_assert_eq!(modules.width(), version.size());
        Self {
            version,
            ec_level,
            mask,
            modules,
        }
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Side length in modules (4 * version + 17)
    pub fn size(&self) -> usize {
        self.version.size()
    }

    /// Error correction level actually used (may exceed the requested one when boosted)
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask pattern applied to the data area
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Module color at column x, row y (true = dark).
    ///
    /// Coordinates outside the symbol read as light, so renderers can draw
    /// a quiet zone by iterating past the edges.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let size = self.size() as i32;
        (0..size).contains(&x) && (0..size).contains(&y) && self.modules.get(x as usize, y as usize)
    }

    /// Underlying module grid
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Rows of the symbol, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = Vec<bool>> + '_ {
        (0..self.size()).map(move |y| self.modules.row(y).collect())
    }
}
