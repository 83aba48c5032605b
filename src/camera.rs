use crate::math::{Point3, Ray, RayKind, Sample2D, Vec3};

/// Pinhole perspective camera. The image plane spans a horizontal field of
/// view; the vertical extent follows from the aspect ratio.
#[derive(Clone, Debug)]
pub struct Camera {
    eye: Point3,
    // orthonormal camera basis: right, up, forward
    u: Vec3,
    v: Vec3,
    w: Vec3,
    width: usize,
    height: usize,
    tan_half_w: f32,
    tan_half_h: f32,
}

impl Camera {
    /// `fov` is the full horizontal field of view in degrees.
    pub fn new(
        eye: Point3,
        look_at: Point3,
        up: Vec3,
        width: usize,
        height: usize,
        fov: f32,
    ) -> Camera {
        let w = (look_at - eye).normalized();
        let u = up.cross(w).normalized();
        let v = w.cross(u);

        let tan_half_w = (fov.to_radians() * 0.5).tan();
        let tan_half_h = tan_half_w * height as f32 / width as f32;

        Camera {
            eye,
            u,
            v,
            w,
            width,
            height,
            tan_half_w,
            tan_half_h,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Primary ray through pixel `(x, y)`. With `jitter` the sample point
    /// moves inside the pixel footprint; without it the ray goes through the
    /// pixel center. Row 0 is the top of the image.
    pub fn generate_ray(&self, x: usize, y: usize, jitter: Option<Sample2D>) -> Ray {
        let (jx, jy) = match jitter {
            Some(s) => (s.x, s.y),
            None => (0.5, 0.5),
        };

        let ndc_x = 2.0 * (x as f32 + jx) / self.width as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * (y as f32 + jy) / self.height as f32;

        let direction =
            (self.u * (ndc_x * self.tan_half_w) + self.v * (ndc_y * self.tan_half_h) + self.w)
                .normalized();
        Ray::new(self.eye, direction, RayKind::Camera, (x, y))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn forward_camera() -> Camera {
        Camera::new(Point3::ORIGIN, Point3::new(0.0, 0.0, 1.0), Vec3::Y, 3, 3, 90.0)
    }

    #[test]
    fn test_center_pixel_looks_forward() {
        let cam = forward_camera();
        let ray = cam.generate_ray(1, 1, None);
        assert!((ray.direction - Vec3::Z).norm() < 1e-6, "{:?}", ray.direction);
        assert_eq!(ray.pixel, (1, 1));
        assert_eq!(ray.kind, RayKind::Camera);
        assert_eq!(ray.eta, 1.0);
    }

    #[test]
    fn test_top_left_pixel_tilts_off_axis() {
        let cam = forward_camera();
        let ray = cam.generate_ray(0, 0, None);
        // column 0 lands at negative ndc x, row 0 at positive ndc y
        assert!(ray.direction.x < 0.0 && ray.direction.y > 0.0 && ray.direction.z > 0.0);
    }

    #[test]
    fn test_jitter_stays_inside_pixel_footprint() {
        let cam = forward_camera();
        let center = cam.generate_ray(1, 1, None);
        let low = cam.generate_ray(1, 1, Some(Sample2D::new(0.0, 0.0)));
        let high = cam.generate_ray(1, 1, Some(Sample2D::new(0.999, 0.999)));
        // jittered rays bracket the pixel-center ray
        assert!(low.direction.x < center.direction.x);
        assert!(high.direction.x > center.direction.x);
        assert!(low.direction.y > center.direction.y);
        assert!(high.direction.y < center.direction.y);
    }
}
