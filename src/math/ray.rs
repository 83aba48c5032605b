use super::{Point3, Vec3};

/// Distance the origin is pushed along the geometric normal to keep
/// secondary rays from re-hitting the surface that spawned them.
pub const ORIGIN_BIAS: f32 = 1.0e-3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RayKind {
    Camera,
    Shadow,
    SpecularReflection,
    SpecularTransmission,
}

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Point3,
    /// Unit direction.
    pub direction: Vec3,
    pub kind: RayKind,
    /// Pixel that spawned this ray, carried for debugging/attribution.
    pub pixel: (usize, usize),
    /// Refractive index of the medium the ray propagates through.
    pub eta: f32,
}

impl Ray {
    pub const fn new(origin: Point3, direction: Vec3, kind: RayKind, pixel: (usize, usize)) -> Self {
        Ray {
            origin,
            direction,
            kind,
            pixel,
            eta: 1.0,
        }
    }

    pub fn with_eta(mut self, eta: f32) -> Self {
        self.eta = eta;
        self
    }

    pub fn point_at_parameter(self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }

    /// One-shot self-intersection guard: push the origin along `n` by
    /// [`ORIGIN_BIAS`]. Callers pass the geometric normal (or its negation
    /// for rays continuing to the far side of the surface).
    pub fn adjust_origin(&mut self, n: Vec3) {
        self.origin = self.origin + n * ORIGIN_BIAS;
    }
}
