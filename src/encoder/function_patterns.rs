use crate::encoder::format::FormatInfo;
use crate::encoder::version::VersionInfo;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
#[derive(Debug, Clone)]
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    /// Mark every function area of `version` without drawing anything
    pub fn new(version: Version) -> Self {
        let mut modules = BitMatrix::square(version.size());
        draw_function_patterns(version, &mut modules)
    }

    pub fn size(&self) -> usize {
        self.mask.width()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    pub fn data_modules_count(&self) -> usize {
        self.size() * self.size() - self.mask.count_ones()
    }

    /// Set a module and mark it as function
    fn set(&mut self, modules: &mut BitMatrix, x: usize, y: usize, dark: bool) {
        modules.set(x, y, dark);
        self.mask.set(x, y, true);
    }

    /// 7x7 finder centered at (cx, cy) plus its light separator ring, clipped to bounds
    fn draw_finder(&mut self, modules: &mut BitMatrix, cx: usize, cy: usize) {
        let size = self.size() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let (x, y) = (cx as isize + dx, cy as isize + dy);
                if !(0..size).contains(&x) || !(0..size).contains(&y) {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                self.set(modules, x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }

    /// 5x5 alignment pattern centered at (cx, cy)
    fn draw_alignment(&mut self, modules: &mut BitMatrix, cx: usize, cy: usize) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let dark = dx.abs().max(dy.abs()) != 1;
                let x = (cx as isize + dx) as usize;
                let y = (cy as isize + dy) as usize;
                self.set(modules, x, y, dark);
            }
        }
    }
}

/// Draw finder, separator, timing and alignment patterns, the dark module,
/// and placeholder format/version areas into `modules`.
///
/// Returns the mask of every cell that was touched. The format area holds
/// placeholder bits until [`FormatInfo::draw`] is called with the final mask.
pub fn draw_function_patterns(version: Version, modules: &mut BitMatrix) -> FunctionMask {
    let size = version.size();
    debug_assert_eq!(modules.width(), size);
    let mut func = FunctionMask {
        mask: BitMatrix::square(size),
        version,
    };

    // Timing patterns (row 6 and column 6); finders overwrite the ends
    for i in 0..size {
        func.set(modules, 6, i, i % 2 == 0);
        func.set(modules, i, 6, i % 2 == 0);
    }

    // Finder patterns + separators
    func.draw_finder(modules, 3, 3);
    func.draw_finder(modules, size - 4, 3);
    func.draw_finder(modules, 3, size - 4);

    // Alignment patterns, skipping the three finder corners
    let align = alignment_pattern_positions(version);
    let last = align.len().saturating_sub(1);
    for (i, &cx) in align.iter().enumerate() {
        for (j, &cy) in align.iter().enumerate() {
            let corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !corner {
                func.draw_alignment(modules, cx, cy);
            }
        }
    }

    // Format area is reserved with throwaway bits, then version info
    let placeholder = FormatInfo::new(ECLevel::M, MaskPattern::Pattern0);
    for (x, y, bit) in placeholder.positions(size) {
        func.set(modules, x, y, bit);
    }
    func.set(modules, 8, size - 8, true); // dark module

    if version.has_version_info() {
        for (x, y, bit) in VersionInfo::positions(version) {
            func.set(modules, x, y, bit);
        }
    }

    func
}

/// Alignment pattern centers for a given version (same list for rows and columns).
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let ver = version.number() as usize;
    if ver == 1 {
        return Vec::new();
    }
    let num_align = ver / 7 + 2;
    let step = (ver * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;

    // First is always 6; the rest are evenly spaced back from size - 7
    let last = version.size() - 7;
    (0..num_align)
        .map(|i| match i {
            0 => 6,
            _ => last - (num_align - 1 - i) * step,
        })
        .collect()
}
