use std::path::Path;

use crate::error::RenderError;
use crate::math::Rgb;

const GAMMA: f32 = 2.2;

/// Accumulation target for the renderer: one linear RGB value per pixel,
/// written out either tonemapped (PNG) or raw (OpenEXR).
pub struct Film {
    pub width: usize,
    pub height: usize,
    buffer: Vec<Rgb>,
}

impl Film {
    pub fn new(width: usize, height: usize) -> Film {
        Film {
            width,
            height,
            buffer: vec![Rgb::ZERO; width * height],
        }
    }

    pub fn set(&mut self, x: usize, y: usize, c: Rgb) {
        self.buffer[y * self.width + x] = c;
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.buffer[y * self.width + x]
    }

    /// Flat pixel storage in row-major order, for scanline-parallel fills.
    pub fn buffer_mut(&mut self) -> &mut [Rgb] {
        &mut self.buffer
    }

    /// Tonemapped 8-bit output: clamp to [0, 1] after gamma correction.
    pub fn write_png(&self, path: &Path) -> Result<(), RenderError> {
        let mut img = image::RgbImage::new(self.width as u32, self.height as u32);
        for (x, y, px) in img.enumerate_pixels_mut() {
            let c = self.get(x as usize, y as usize);
            *px = image::Rgb([to_srgb(c.r), to_srgb(c.g), to_srgb(c.b)]);
        }
        img.save(path)?;
        Ok(())
    }

    /// Full-range linear radiance, straight to OpenEXR.
    pub fn write_exr(&self, path: &Path) -> Result<(), RenderError> {
        exr::prelude::write_rgb_file(path, self.width, self.height, |x, y| {
            let c = self.get(x, y);
            (c.r, c.g, c.b)
        })?;
        Ok(())
    }
}

fn to_srgb(v: f32) -> u8 {
    (v.max(0.0).powf(1.0 / GAMMA).min(1.0) * 255.0) as u8
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let mut film = Film::new(4, 3);
        film.set(3, 2, Rgb::new(0.1, 0.2, 0.3));
        assert_eq!(film.get(3, 2), Rgb::new(0.1, 0.2, 0.3));
        assert_eq!(film.get(0, 0), Rgb::ZERO);
    }

    #[test]
    fn test_buffer_is_row_major() {
        let mut film = Film::new(3, 2);
        film.set(2, 1, Rgb::splat(1.0));
        assert_eq!(film.buffer_mut()[5], Rgb::splat(1.0));
    }

    #[test]
    fn test_srgb_clamps_and_saturates() {
        assert_eq!(to_srgb(-0.5), 0);
        assert_eq!(to_srgb(0.0), 0);
        assert_eq!(to_srgb(1.0), 255);
        assert_eq!(to_srgb(7.0), 255);
    }
}
