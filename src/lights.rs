use std::f32::consts::PI;

use crate::geometry::Triangle;
use crate::math::{random_on_unit_sphere, Point3, Rgb, Sample2D, Vec3};
use crate::probe::HdrProbe;

/// Constant background term; contributes `ka * color` with no geometry.
#[derive(Clone, Debug)]
pub struct AmbientLight {
    pub color: Rgb,
}

/// Isotropic emitter at a fixed position with inverse-square falloff.
#[derive(Clone, Debug)]
pub struct PointLight {
    pub color: Rgb,
    pub position: Point3,
}

/// Emitting triangle. The geometry is owned here and used both for
/// nearest-hit intersection and for uniform-area sampling.
#[derive(Clone, Debug)]
pub struct AreaLight {
    /// Emitted radiance, constant over the triangle.
    pub power: Rgb,
    pub gem: Triangle,
}

impl AreaLight {
    pub fn new(power: Rgb, gem: Triangle) -> AreaLight {
        AreaLight { power, gem }
    }

    pub fn radiance(&self) -> Rgb {
        self.power
    }

    /// Uniform point on the emitting triangle with pdf = 1/area.
    pub fn sample(&self, s: Sample2D) -> (Rgb, Point3, f32) {
        let p = self.gem.sample(s);
        (self.power, p, 1.0 / self.gem.area())
    }
}

/// All-directions emitter backed by an HDR light probe. Has no finite
/// geometry, so it is resolved on ray misses rather than via shadow rays.
#[derive(Clone, Debug)]
pub struct EnvironmentLight {
    pub probe: HdrProbe,
}

impl EnvironmentLight {
    pub fn new(probe: HdrProbe) -> EnvironmentLight {
        EnvironmentLight { probe }
    }

    pub fn radiance(&self, dir: Vec3) -> Rgb {
        self.probe.radiance(dir)
    }

    /// Uniform direction on the sphere with pdf = 1/(4 pi).
    pub fn sample(&self, s: Sample2D) -> (Rgb, Vec3, f32) {
        let dir = random_on_unit_sphere(s);
        (self.probe.radiance(dir), dir, 1.0 / (4.0 * PI))
    }
}

/// Closed set of light variants; dispatch is by match, never by downcast.
#[derive(Clone, Debug)]
pub enum Light {
    Ambient(AmbientLight),
    Point(PointLight),
    Area(AreaLight),
    Environment(EnvironmentLight),
}

impl Light {
    pub fn as_area(&self) -> Option<&AreaLight> {
        match self {
            Light::Area(al) => Some(al),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::texture::Raster;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_environment_sample_is_unit_with_sphere_pdf() {
        let probe = HdrProbe::new(Raster::new(1, 1, vec![Rgb::splat(0.5)]));
        let light = EnvironmentLight::new(probe);
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            let (_le, dir, pdf) = light.sample(Sample2D::from_rng(&mut rng));
            assert!((dir.norm() - 1.0).abs() < 1e-5, "{:?}", dir);
            assert!((pdf - 1.0 / (4.0 * PI)).abs() < 1e-7);
        }
    }

    #[test]
    fn test_area_light_pdf_is_inverse_area() {
        let gem = Triangle::new(
            Point3::new(0.0, 5.0, 0.0),
            Point3::new(2.0, 5.0, 0.0),
            Point3::new(0.0, 5.0, 2.0),
        );
        let light = AreaLight::new(Rgb::splat(2.0), gem);
        let mut rng = SmallRng::seed_from_u64(1);
        let (le, _p, pdf) = light.sample(Sample2D::from_rng(&mut rng));
        assert_eq!(le, Rgb::splat(2.0));
        assert!((pdf - 1.0 / light.gem.area()).abs() < 1e-6);
    }
}
