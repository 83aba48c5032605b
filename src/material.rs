use crate::math::Rgb;
use crate::texture::Texture;

/// Phong-style BRDF coefficients. Owned by the scene; intersections refer to
/// materials by index and never copy them.
#[derive(Clone, Debug)]
pub struct Brdf {
    /// Ambient coefficient.
    pub ka: Rgb,
    /// Diffuse coefficient.
    pub kd: Rgb,
    /// Specular (mirror) coefficient.
    pub ks: Rgb,
    /// Transmissive coefficient.
    pub kt: Rgb,
    /// Refractive index of the medium behind the surface.
    pub eta: f32,
    /// When present, replaces `kd` with a per-texel lookup.
    pub texture: Option<Texture>,
}

impl Brdf {
    pub fn diffuse(ka: Rgb, kd: Rgb) -> Brdf {
        Brdf {
            ka,
            kd,
            eta: 1.0,
            ..Brdf::default()
        }
    }

    pub fn mirror(ks: Rgb) -> Brdf {
        Brdf {
            ks,
            eta: 1.0,
            ..Brdf::default()
        }
    }

    pub fn glass(ks: Rgb, kt: Rgb, eta: f32) -> Brdf {
        Brdf {
            ks,
            kt,
            eta,
            ..Brdf::default()
        }
    }

    pub fn with_texture(mut self, texture: Texture) -> Brdf {
        self.texture = Some(texture);
        self
    }

    /// Effective diffuse coefficient at the given texture coordinates.
    pub fn kd_at(&self, uv: (f32, f32)) -> Rgb {
        match &self.texture {
            Some(t) => t.kd(uv),
            None => self.kd,
        }
    }
}

impl Default for Brdf {
    fn default() -> Brdf {
        Brdf {
            ka: Rgb::ZERO,
            kd: Rgb::ZERO,
            ks: Rgb::ZERO,
            kt: Rgb::ZERO,
            eta: 1.0,
            texture: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::texture::Raster;

    #[test]
    fn test_kd_at_prefers_texture() {
        let plain = Brdf::diffuse(Rgb::ZERO, Rgb::splat(0.4));
        assert_eq!(plain.kd_at((0.5, 0.5)), Rgb::splat(0.4));

        let textured = plain.with_texture(Texture::new(Raster::new(
            1,
            1,
            vec![Rgb::new(0.9, 0.1, 0.1)],
        )));
        assert_eq!(textured.kd_at((0.5, 0.5)), Rgb::new(0.9, 0.1, 0.1));
    }
}
