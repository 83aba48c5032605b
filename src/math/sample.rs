use std::f32::consts::PI;

use rand::Rng;

use super::Vec3;

#[derive(Copy, Clone, Debug)]
pub struct Sample1D {
    pub x: f32,
}

impl Sample1D {
    pub fn new(x: f32) -> Self {
        debug_assert!((0.0..1.0).contains(&x));
        Sample1D { x }
    }

    pub fn from_rng(rng: &mut impl Rng) -> Self {
        Sample1D::new(rng.gen())
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Sample2D {
    pub x: f32,
    pub y: f32,
}

impl Sample2D {
    pub fn new(x: f32, y: f32) -> Self {
        debug_assert!((0.0..1.0).contains(&x));
        debug_assert!((0.0..1.0).contains(&y));
        Sample2D { x, y }
    }

    pub fn from_rng(rng: &mut impl Rng) -> Self {
        Sample2D::new(rng.gen(), rng.gen())
    }
}

pub fn random_on_unit_sphere(s: Sample2D) -> Vec3 {
    let phi = s.x * 2.0 * PI;
    let z = s.y * 2.0 - 1.0;
    let r = (1.0 - z * z).sqrt();
    let (sin, cos) = phi.sin_cos();
    Vec3::new(r * cos, r * sin, z)
}

/// Uniform barycentric coordinates over a triangle.
pub fn uniform_triangle_barycentrics(s: Sample2D) -> (f32, f32) {
    let su0 = s.x.sqrt();
    (1.0 - su0, s.y * su0)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_unit_sphere_samples_are_unit() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = random_on_unit_sphere(Sample2D::from_rng(&mut rng));
            assert!((v.norm() - 1.0).abs() < 1e-5, "{:?}", v);
        }
    }

    #[test]
    fn test_triangle_barycentrics_stay_inside() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            let (b0, b1) = uniform_triangle_barycentrics(Sample2D::from_rng(&mut rng));
            assert!(b0 >= 0.0 && b1 >= 0.0 && b0 + b1 <= 1.0 + 1e-6);
        }
    }
}
