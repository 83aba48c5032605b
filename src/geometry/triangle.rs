use super::{Hit, Shape};
use crate::math::{uniform_triangle_barycentrics, Point3, Ray, Sample2D, Vec3};

/// One-sided triangle with a fixed geometric normal. Area lights use it both
/// as intersectable geometry and as a uniform sampling domain.
#[derive(Copy, Clone, Debug)]
pub struct Triangle {
    pub v0: Point3,
    pub v1: Point3,
    pub v2: Point3,
    pub normal: Vec3,
}

impl Triangle {
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Triangle {
        let normal = (v1 - v0).cross(v2 - v0).normalized();
        Triangle { v0, v1, v2, normal }
    }

    pub fn area(&self) -> f32 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).norm() * 0.5
    }

    /// Uniform point on the triangle; the matching pdf is 1/area.
    pub fn sample(&self, s: Sample2D) -> Point3 {
        let (b0, b1) = uniform_triangle_barycentrics(s);
        self.v0 + (self.v1 - self.v0) * b0 + (self.v2 - self.v0) * b1
    }
}

impl Shape for Triangle {
    // Moller-Trumbore
    fn intersect(&self, r: &Ray) -> Option<Hit> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let pvec = r.direction.cross(edge2);
        let det = edge1.dot(pvec);
        if det.abs() < 1.0e-8 {
            return None;
        }
        let inv_det = 1.0 / det;
        let tvec = r.origin - self.v0;
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let qvec = tvec.cross(edge1);
        let v = r.direction.dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let depth = edge2.dot(qvec) * inv_det;
        if depth <= 0.0 {
            return None;
        }
        Some(Hit {
            depth,
            p: r.point_at_parameter(depth),
            n: self.normal,
            uv: (u, v),
        })
    }
}
