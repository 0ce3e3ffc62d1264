use crate::models::QrCode;
use image::{GrayImage, Luma};
use std::path::Path;

const DARK: u8 = 0;
const LIGHT: u8 = 255;

/// Render with two block characters per module, surrounded by `border`
/// light modules (4 is the standard quiet zone).
pub fn render_text(qr: &QrCode, border: usize) -> String {
    let border = border as i32;
    let size = qr.size() as i32;
    let mut out = String::with_capacity(((size + 2 * border) * (size + 2 * border + 1) * 2) as usize);
    for y in -border..size + border {
        for x in -border..size + border {
            out.push_str(if qr.get_module(x, y) { "██" } else { "  " });
        }
        out.push('\n');
    }
    out
}

/// Render to an 8-bit grayscale image, `scale` pixels per module.
pub fn render_luma(qr: &QrCode, border: u32, scale: u32) -> GrayImage {
    let scale = scale.max(1);
    let side = (qr.size() as u32 + 2 * border) * scale;
    GrayImage::from_fn(side, side, |px, py| {
        let x = (px / scale) as i32 - border as i32;
        let y = (py / scale) as i32 - border as i32;
        Luma([if qr.get_module(x, y) { DARK } else { LIGHT }])
    })
}

/// Render and write a PNG (format chosen from the extension).
pub fn save_png<P: AsRef<Path>>(
    qr: &QrCode,
    path: P,
    border: u32,
    scale: u32,
) -> Result<(), image::ImageError> {
    render_luma(qr, border, scale).save(path)
}
