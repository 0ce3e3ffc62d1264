/// Apply a mask pattern to the data area of a QR code matrix
use crate::encoder::function_patterns::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

/// XOR every data module with `mask_pattern`; function modules are untouched.
///
/// Applying the same pattern twice restores the matrix.
pub fn apply_mask(matrix: &mut BitMatrix, mask_pattern: MaskPattern, func: &FunctionMask) {
    let size = func.size();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask_pattern.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}
