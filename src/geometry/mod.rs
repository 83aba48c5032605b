use crate::math::{Point3, Ray, Rgb, Vec3};

mod sphere;
mod triangle;

pub use sphere::Sphere;
pub use triangle::Triangle;

/// Raw geometric hit reported by a shape. The scene turns this into a full
/// [`Intersection`] by binding a material or an emitter to it.
#[derive(Copy, Clone, Debug)]
pub struct Hit {
    /// Distance along the ray.
    pub depth: f32,
    pub p: Point3,
    pub n: Vec3,
    pub uv: (f32, f32),
}

/// What the nearest surface along a ray turned out to be.
#[derive(Copy, Clone, Debug)]
pub enum HitKind {
    /// Ordinary geometry; index into the scene's material list.
    Surface { material_id: usize },
    /// Light-emitting geometry, carrying the emitted radiance.
    Emitter { le: Rgb },
}

/// Per-trace hit record. Stack value, rebuilt on every trace call.
#[derive(Copy, Clone, Debug)]
pub struct Intersection {
    pub p: Point3,
    /// Shading normal.
    pub sn: Vec3,
    /// Geometric normal, used for origin offsets.
    pub gn: Vec3,
    /// Direction back toward the ray origin.
    pub wo: Vec3,
    pub uv: (f32, f32),
    pub depth: f32,
    pub pixel: (usize, usize),
    /// Refractive index of the medium the incoming ray travelled through.
    pub incident_eta: f32,
    pub kind: HitKind,
}

impl Intersection {
    pub fn is_light(&self) -> bool {
        matches!(self.kind, HitKind::Emitter { .. })
    }
}

pub trait Shape {
    fn intersect(&self, r: &Ray) -> Option<Hit>;
}

#[derive(Copy, Clone, Debug)]
pub enum ShapeEnum {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Shape for ShapeEnum {
    fn intersect(&self, r: &Ray) -> Option<Hit> {
        match self {
            ShapeEnum::Sphere(s) => s.intersect(r),
            ShapeEnum::Triangle(t) => t.intersect(r),
        }
    }
}

impl From<Sphere> for ShapeEnum {
    fn from(s: Sphere) -> Self {
        ShapeEnum::Sphere(s)
    }
}

impl From<Triangle> for ShapeEnum {
    fn from(t: Triangle) -> Self {
        ShapeEnum::Triangle(t)
    }
}
