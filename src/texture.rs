use std::path::Path;

use crate::error::RenderError;
use crate::math::Rgb;

/// A 2D raster of linear RGB texels with bilinear filtering. Shared by the
/// diffuse texture lookup and the environment probe.
#[derive(Clone, Debug)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub texels: Vec<Rgb>,
}

impl Raster {
    pub fn new(width: usize, height: usize, texels: Vec<Rgb>) -> Raster {
        assert_eq!(texels.len(), width * height);
        Raster {
            width,
            height,
            texels,
        }
    }

    pub fn texel(&self, x: usize, y: usize) -> Rgb {
        self.texels[y * self.width + x]
    }

    /// Bilinear lookup at continuous pixel coordinates, clamped to the
    /// raster bounds.
    pub fn bilinear(&self, fx: f32, fy: f32) -> Rgb {
        let fx = fx.clamp(0.0, (self.width - 1) as f32);
        let fy = fy.clamp(0.0, (self.height - 1) as f32);

        let x0 = fx as usize;
        let y0 = fy as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let dx = fx - x0 as f32;
        let dy = fy - y0 as f32;

        let c0 = self.texel(x0, y0) * (1.0 - dx) + self.texel(x1, y0) * dx;
        let c1 = self.texel(x0, y1) * (1.0 - dx) + self.texel(x1, y1) * dx;
        c0 * (1.0 - dy) + c1 * dy
    }

    /// Decode any format the `image` crate understands into linear f32.
    pub fn load(path: &Path) -> Result<Raster, RenderError> {
        let decoded = image::open(path)
            .map_err(|e| RenderError::Resource {
                kind: "texture",
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .to_rgb32f();
        let (width, height) = (decoded.width() as usize, decoded.height() as usize);
        let texels = decoded
            .pixels()
            .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
            .collect();
        Ok(Raster::new(width, height, texels))
    }
}

/// Diffuse texture bound to a material; replaces Kd with a per-texel value.
#[derive(Clone, Debug)]
pub struct Texture {
    raster: Raster,
}

impl Texture {
    pub fn new(raster: Raster) -> Texture {
        Texture { raster }
    }

    pub fn load(path: &Path) -> Result<Texture, RenderError> {
        Ok(Texture::new(Raster::load(path)?))
    }

    pub fn kd(&self, uv: (f32, f32)) -> Rgb {
        let u = uv.0.clamp(0.0, 1.0);
        let v = uv.1.clamp(0.0, 1.0);
        self.raster.bilinear(
            u * (self.raster.width - 1) as f32,
            v * (self.raster.height - 1) as f32,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn checker() -> Raster {
        Raster::new(
            2,
            2,
            vec![
                Rgb::splat(0.0),
                Rgb::splat(1.0),
                Rgb::splat(1.0),
                Rgb::splat(0.0),
            ],
        )
    }

    #[test]
    fn test_bilinear_midpoint_averages_texels() {
        let r = checker();
        let mid = r.bilinear(0.5, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_kd_corners_hit_exact_texels() {
        let t = Texture::new(checker());
        assert_eq!(t.kd((0.0, 0.0)), Rgb::splat(0.0));
        assert_eq!(t.kd((1.0, 0.0)), Rgb::splat(1.0));
        assert_eq!(t.kd((1.0, 1.0)), Rgb::splat(0.0));
    }

    #[test]
    fn test_kd_clamps_out_of_range_uv() {
        let t = Texture::new(checker());
        assert_eq!(t.kd((-2.0, 0.0)), t.kd((0.0, 0.0)));
        assert_eq!(t.kd((3.0, 5.0)), t.kd((1.0, 1.0)));
    }
}
