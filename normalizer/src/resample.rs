//! Alpha-aware resampling.
//!
//! Color channels are premultiplied by alpha before filtering and divided
//! back afterwards, so transparent pixels do not bleed their (usually black)
//! color into the subject's edges.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, Rgba32FImage, RgbaImage};

fn premultiply(image: &RgbaImage) -> Rgba32FImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0);
        Rgba([r * a, g * a, b * a, a])
    })
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn unpremultiply(image: &Rgba32FImage) -> RgbaImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = to_u8(a);
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([to_u8(r / a), to_u8(g / a), to_u8(b / a), alpha])
    })
}

/// Resize `image` to `width` x `height` with premultiplied alpha.
pub fn resize(image: &RgbaImage, width: u32, height: u32, filter: FilterType) -> RgbaImage {
    let premultiplied = premultiply(image);
    let resized = imageops::resize(&premultiplied, width, height, filter);
    unpremultiply(&resized)
}

#[cfg(test)]
#[path = "resample_test.rs"]
mod tests;
