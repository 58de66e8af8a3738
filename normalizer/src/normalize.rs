//! Source image normalization.
//!
//! Turns an arbitrary raster image into a square master: transparent padding
//! and a flat border are trimmed, the subject is centered on a transparent
//! square canvas, and the canvas is resampled to the configured master size.

use std::path::Path;

use image::{DynamicImage, ImageReader, Rgba, RgbaImage, imageops};
use tracing::{debug, info};

use crate::config::IconConfig;
use crate::container;
use crate::error::{IconError, Result};
use crate::resample;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Rectangle covering the whole image.
    pub fn full(image: &RgbaImage) -> Self {
        Self {
            x: 0,
            y: 0,
            width: image.width(),
            height: image.height(),
        }
    }

    /// Length of the longer edge.
    pub fn longer_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// Result of normalizing one source image.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Square master image at the configured master size.
    pub master: RgbaImage,
    /// Subject bounds in source image coordinates.
    pub subject: Rect,
    /// Side of the square canvas before resampling.
    pub canvas_side: u32,
}

/// Bounding box of pixels matching `keep`, or `None` if no pixel matches.
fn bounds_where(image: &RgbaImage, keep: impl Fn(&Rgba<u8>) -> bool) -> Option<Rect> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if keep(pixel) {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Fully transparent pixels compare equal whatever their color channels hold.
fn same_pixel(a: &Rgba<u8>, b: &Rgba<u8>) -> bool {
    (a[3] == 0 && b[3] == 0) || a == b
}

/// Bounding box of pixels with non-zero alpha.
pub fn alpha_bounds(image: &RgbaImage) -> Option<Rect> {
    bounds_where(image, |pixel| pixel[3] != 0)
}

/// Bounding box of pixels that differ from the top-left pixel.
///
/// The top-left pixel is taken as a flat background color; any channel
/// difference counts.
pub fn background_bounds(image: &RgbaImage) -> Option<Rect> {
    if image.width() == 0 || image.height() == 0 {
        return None;
    }
    let background = *image.get_pixel(0, 0);
    bounds_where(image, |pixel| !same_pixel(pixel, &background))
}

fn crop(image: &RgbaImage, rect: Rect) -> RgbaImage {
    imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image()
}

/// Trim transparent padding, then a uniform border.
///
/// Returns the cropped image and its bounds in `image` coordinates. Each step
/// is skipped when it finds nothing to keep.
pub fn crop_to_subject(image: &RgbaImage) -> (RgbaImage, Rect) {
    let mut subject = Rect::full(image);
    let mut cropped = image.clone();

    if let Some(rect) = alpha_bounds(&cropped) {
        cropped = crop(&cropped, rect);
        subject = rect;
    }

    if let Some(rect) = background_bounds(&cropped) {
        cropped = crop(&cropped, rect);
        subject = Rect {
            x: subject.x + rect.x,
            y: subject.y + rect.y,
            width: rect.width,
            height: rect.height,
        };
    }

    (cropped, subject)
}

/// Center `image` on a transparent square canvas sized to its longer edge.
pub fn square_canvas(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let side = width.max(height);
    let mut canvas = RgbaImage::new(side, side);
    let x = (side - width) / 2;
    let y = (side - height) / 2;
    imageops::replace(&mut canvas, image, i64::from(x), i64::from(y));
    canvas
}

/// Build the square master image for `source`.
pub fn normalize_image(source: &DynamicImage, icon: &IconConfig) -> Normalized {
    let rgba = source.to_rgba8();
    let (cropped, subject) = crop_to_subject(&rgba);
    let canvas = square_canvas(&cropped);
    let canvas_side = canvas.width();

    debug!(
        source_width = rgba.width(),
        source_height = rgba.height(),
        ?subject,
        canvas_side,
        "Cropped and squared source image"
    );

    let master = if canvas_side == icon.master_size {
        canvas
    } else {
        resample::resize(
            &canvas,
            icon.master_size,
            icon.master_size,
            icon.filter_type(),
        )
    };

    Normalized {
        master,
        subject,
        canvas_side,
    }
}

/// Read and decode a source image; the file handle does not outlive the call.
pub fn load_source(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| IconError::unreadable(path, e))?
        .with_guessed_format()
        .map_err(|e| IconError::unreadable(path, e))?;

    reader
        .decode()
        .map_err(|e| IconError::undecodable(path, e))
}

/// Normalize the image at `source` and write the icon container to `dest`.
pub fn normalize_file(source: &Path, dest: &Path, icon: &IconConfig) -> Result<Normalized> {
    let image = load_source(source)?;
    let normalized = normalize_image(&image, icon);

    container::write_icon(&normalized.master, icon, dest)?;

    info!(
        source = %source.display(),
        dest = %dest.display(),
        sizes = ?icon.sizes,
        "Icon written"
    );

    Ok(normalized)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
