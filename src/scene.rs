use crate::geometry::{Hit, HitKind, Intersection, Shape, ShapeEnum};
use crate::lights::{EnvironmentLight, Light};
use crate::material::Brdf;
use crate::math::Ray;

/// A shape bound to a material by index into the scene's material list.
#[derive(Clone, Debug)]
pub struct Primitive {
    pub shape: ShapeEnum,
    pub material_id: usize,
}

/// Owns the primitives, materials and lights. Construction is append-only
/// and must finish before the first trace; rendering only ever reads.
#[derive(Default)]
pub struct Scene {
    pub prims: Vec<Primitive>,
    pub brdfs: Vec<Brdf>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    pub fn add_primitive(&mut self, shape: impl Into<ShapeEnum>, material_id: usize) {
        debug_assert!(material_id < self.brdfs.len());
        self.prims.push(Primitive {
            shape: shape.into(),
            material_id,
        });
    }

    /// Returns the index the material can be referenced by.
    pub fn add_material(&mut self, brdf: Brdf) -> usize {
        self.brdfs.push(brdf);
        self.brdfs.len() - 1
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn num_primitives(&self) -> usize {
        self.prims.len()
    }

    pub fn num_lights(&self) -> usize {
        self.lights.len()
    }

    /// The scene's environment light, if one was added. Exposed as a direct
    /// capability so shading never scans the light list by type.
    pub fn environment(&self) -> Option<&EnvironmentLight> {
        self.lights.iter().find_map(|l| match l {
            Light::Environment(env) => Some(env),
            _ => None,
        })
    }

    /// Nearest hit across all primitives and all light geometry. Light
    /// geometry competes for the nearest hit with the same strict
    /// smaller-depth tie-break; when it wins, the intersection carries the
    /// light's emitted radiance instead of a material binding.
    pub fn trace(&self, r: &Ray) -> Option<Intersection> {
        if self.prims.is_empty() && self.lights.is_empty() {
            return None;
        }

        let mut nearest: Option<(Hit, HitKind)> = None;
        let mut nearest_depth = f32::INFINITY;

        for prim in &self.prims {
            if let Some(hit) = prim.shape.intersect(r) {
                if hit.depth < nearest_depth {
                    nearest_depth = hit.depth;
                    nearest = Some((
                        hit,
                        HitKind::Surface {
                            material_id: prim.material_id,
                        },
                    ));
                }
            }
        }

        for light in &self.lights {
            if let Some(al) = light.as_area() {
                if let Some(hit) = al.gem.intersect(r) {
                    if hit.depth < nearest_depth {
                        nearest_depth = hit.depth;
                        nearest = Some((hit, HitKind::Emitter { le: al.radiance() }));
                    }
                }
            }
        }

        nearest.map(|(hit, kind)| Intersection {
            p: hit.p,
            sn: hit.n,
            gn: hit.n,
            wo: -r.direction,
            uv: hit.uv,
            depth: hit.depth,
            pixel: r.pixel,
            incident_eta: r.eta,
            kind,
        })
    }

    /// Occlusion query for a shadow ray. Only primitives are tested; the
    /// caller bounds `max_dist` to just short of the light surface, so the
    /// light cannot occlude itself. Stops at the first blocking hit.
    pub fn visibility(&self, shadow: &Ray, max_dist: f32) -> bool {
        for prim in &self.prims {
            if let Some(hit) = prim.shape.intersect(shadow) {
                if hit.depth < max_dist {
                    return false;
                }
            }
        }
        true
    }
}
