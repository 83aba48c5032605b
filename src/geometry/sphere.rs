use std::f32::consts::PI;

use super::{Hit, Shape};
use crate::math::{Point3, Ray, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Point3, radius: f32) -> Sphere {
        Sphere { center, radius }
    }

    fn hit_at(&self, r: &Ray, depth: f32) -> Hit {
        let p = r.point_at_parameter(depth);
        let n = ((p - self.center) / self.radius).normalized();
        // spherical uv, azimuth around z then inclination from +z
        let u = n.y.atan2(n.x) / (2.0 * PI) + 0.5;
        let v = n.z.clamp(-1.0, 1.0).acos() / PI;
        Hit {
            depth,
            p,
            n,
            uv: (u, v),
        }
    }
}

impl Shape for Sphere {
    fn intersect(&self, r: &Ray) -> Option<Hit> {
        let oc: Vec3 = r.origin - self.center;
        let a = r.direction.dot(r.direction);
        let b = oc.dot(r.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }
        let discriminant_sqrt = discriminant.sqrt();

        let near = (-b - discriminant_sqrt) / a;
        if near > 0.0 {
            return Some(self.hit_at(r, near));
        }
        let far = (-b + discriminant_sqrt) / a;
        if far > 0.0 {
            return Some(self.hit_at(r, far));
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::RayKind;

    #[test]
    fn test_ray_hits_front_of_sphere() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Point3::ORIGIN, Vec3::Z, RayKind::Camera, (0, 0));
        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.depth - 4.0).abs() < 1e-5);
        assert!((hit.n - -Vec3::Z).norm() < 1e-5);
    }

    #[test]
    fn test_ray_from_inside_hits_far_wall() {
        let sphere = Sphere::new(Point3::ORIGIN, 2.0);
        let ray = Ray::new(Point3::ORIGIN, Vec3::X, RayKind::Camera, (0, 0));
        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.depth - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_miss_returns_none() {
        let sphere = Sphere::new(Point3::new(0.0, 10.0, 0.0), 1.0);
        let ray = Ray::new(Point3::ORIGIN, Vec3::Z, RayKind::Camera, (0, 0));
        assert!(sphere.intersect(&ray).is_none());
    }
}
