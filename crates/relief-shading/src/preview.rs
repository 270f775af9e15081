//! Offline CPU rendering of the spectrum colorizer into RGBA8 images.
//!
//! Used to diagnose palette and range problems without a GPU: a 1D strip
//! sweeping the whole range shows the band layout, and a colorized grid of
//! raw samples approximates what the heightmap pipeline will draw.

use glam::Vec4;
use log::debug;

use crate::spectrum::{HeightRange, spectrum_color};

/// A 2D preview image stored as row-major RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct PreviewImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA order. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl PreviewImage {
    /// Create a new all-zero (transparent black) image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Write a normalized RGBA color into one pixel. Channels are clamped to
    /// \[0, 1\] before quantization; the shading core itself never clamps,
    /// only the 8-bit preview does.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Vec4) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx] = quantize(color.x);
        self.pixels[idx + 1] = quantize(color.y);
        self.pixels[idx + 2] = quantize(color.z);
        self.pixels[idx + 3] = quantize(color.w);
    }

    /// Read back one pixel as `(r, g, b, a)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let idx = ((y * self.width + x) * 4) as usize;
        (
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }
}

fn quantize(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Render a horizontal strip sweeping the range from `min` (left edge) to
/// `max` (right edge), one color sample per column repeated down `height`
/// rows.
pub fn render_spectrum_strip(range: HeightRange, width: u32, height: u32) -> PreviewImage {
    debug!("Rendering {width}x{height} spectrum strip for range {range:?}");
    let mut image = PreviewImage::new(width, height);

    for px in 0..width {
        // Sample at the column center so the first and last columns stay
        // strictly inside [min, max].
        let t = (px as f32 + 0.5) / width as f32;
        let h = range.min + t * range.span();
        let color = spectrum_color(h, range);
        for py in 0..height {
            image.set_pixel(px, py, color);
        }
    }

    image
}

/// Colorize a row-major grid of raw elevation samples against `range`.
///
/// `heights.len()` must equal `width * height`; samples outside the range
/// colorize the same way the shader does (no clamping).
///
/// # Panics
///
/// Panics if the sample count does not match the dimensions.
pub fn render_heightfield_preview(
    heights: &[f32],
    width: u32,
    height: u32,
    range: HeightRange,
) -> PreviewImage {
    assert_eq!(
        heights.len(),
        (width * height) as usize,
        "sample count must match image dimensions"
    );
    debug!("Rendering {width}x{height} heightfield preview for range {range:?}");

    let mut image = PreviewImage::new(width, height);
    for py in 0..height {
        for px in 0..width {
            let h = heights[(py * width + px) as usize];
            image.set_pixel(px, py, spectrum_color(h, range));
        }
    }

    image
}
