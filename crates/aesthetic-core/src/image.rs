//! Image representation for the filter pipeline.

use image::{DynamicImage, RgbaImage};

/// Decoded image. Always stored as straight-alpha RGBA f32 in the source's
/// sRGB encoding, which is the space CSS filter functions operate in.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data, row-major, each channel in `[0, 1]`.
    pub pixels: Vec<[f32; 4]>,
}

impl FilterImage {
    /// Fill a `width × height` image with one colour.
    pub fn solid(width: u32, height: u32, rgba: [f32; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgba; (width as usize) * (height as usize)],
        }
    }

    pub fn from_dynamic(img: &DynamicImage) -> Self {
        Self::from_rgba8(&img.to_rgba8())
    }

    pub fn from_rgba8(rgba: &RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| p.0.map(|c| c as f32 / 255.0))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Quantize to 8-bit RGBA, clamping and rounding each channel.
    pub fn to_rgba8(&self) -> RgbaImage {
        let bytes: Vec<[u8; 4]> = self
            .pixels
            .iter()
            .map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect();
        let raw: Vec<u8> = bytemuck::cast_slice(&bytes).to_vec();
        // Length is width * height * 4 by construction.
        RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Downscale so neither side exceeds `max_dim`, keeping aspect ratio.
    /// Images already within bounds are returned as a plain copy.
    pub fn fit_within(&self, max_dim: u32) -> Self {
        let longest = self.width.max(self.height);
        if max_dim == 0 || longest <= max_dim {
            return self.clone();
        }
        let scale = max_dim as f32 / longest as f32;
        let width = ((self.width as f32 * scale).round() as u32).max(1);
        let height = ((self.height as f32 * scale).round() as u32).max(1);
        let resized = image::imageops::resize(
            &self.to_rgba8(),
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        Self::from_rgba8(&resized)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_round_trip_is_lossless() {
        let mut rgba = RgbaImage::new(3, 2);
        for (i, px) in rgba.pixels_mut().enumerate() {
            let v = (i * 40) as u8;
            px.0 = [v, 255 - v, v / 2, 200];
        }
        let back = FilterImage::from_rgba8(&rgba).to_rgba8();
        assert_eq!(back, rgba);
    }

    #[test]
    fn test_fit_within_keeps_aspect() {
        let img = FilterImage::solid(400, 200, [0.5, 0.5, 0.5, 1.0]);
        let small = img.fit_within(100);
        assert_eq!((small.width, small.height), (100, 50));
    }

    #[test]
    fn test_fit_within_leaves_small_images() {
        let img = FilterImage::solid(20, 10, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(img.fit_within(100), img);
    }
}
