/// Codeword placement into the QR matrix following the zigzag pattern
use crate::encoder::function_patterns::FunctionMask;
use crate::models::BitMatrix;

/// Write `codewords` MSB-first into every data module of `matrix`.
///
/// Column pairs are walked right to left, skipping the vertical timing
/// column, alternating upward and downward. Function modules are skipped.
/// Modules left over once the codewords run out (remainder bits) stay light.
pub fn draw_codewords(matrix: &mut BitMatrix, func: &FunctionMask, codewords: &[u8]) {
    let total_bits = codewords.len() * 8;
    let order = data_module_order(func);
    debug_assert!(order.len() >= total_bits, "codewords exceed data modules");

    for (i, (x, y)) in order.into_iter().enumerate() {
        let dark = i < total_bits && (codewords[i / 8] >> (7 - i % 8)) & 1 == 1;
        matrix.set(x, y, dark);
    }
}

/// Data module coordinates (x, y) in placement order
pub fn data_module_order(func: &FunctionMask) -> Vec<(usize, usize)> {
    let size = func.size();
    let mut order = Vec::with_capacity(func.data_modules_count());
    let mut upward = true;
    let mut right = size as isize - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for x in [right as usize, right as usize - 1] {
                if !func.is_function(x, y) {
                    order.push((x, y));
                }
            }
        }
        upward = !upward;
        right -= 2;
    }
    order
}
