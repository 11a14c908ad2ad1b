use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// White canvas with the given segments drawn on it in `color`.
pub fn lines_rgba(width: u32, height: u32, segments: &[((f32, f32), (f32, f32))], color: Rgba<u8>) -> RgbaImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = RgbaImage::from_pixel(width, height, WHITE);
    for &(from, to) in segments {
        draw_line_segment_mut(&mut img, from, to, color);
    }
    img
}
