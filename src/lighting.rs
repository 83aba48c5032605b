use rand::Rng;

use crate::geometry::Intersection;
use crate::lights::{AmbientLight, AreaLight, Light, PointLight};
use crate::material::Brdf;
use crate::math::{Ray, RayKind, Rgb, Sample1D, Sample2D};
use crate::scene::Scene;

/// Shadow rays stop this far short of the light surface so the light cannot
/// occlude itself.
pub const SHADOW_EPSILON: f32 = 1.0e-3;
/// Cosine threshold rejecting grazing and back-facing area-light samples.
pub const COS_EPSILON: f32 = 1.0e-4;

/// Light selection policy for the direct-lighting estimator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleMode {
    /// Evaluate and sum every light in the scene.
    AllLights,
    /// Pick a single area light with probability proportional to its
    /// estimated contribution, then divide by the selection probability.
    UniformOne,
}

/// Estimated direct radiance at `isect` under the given policy. Environment
/// lights are resolved in the shader's miss branch, not here; they have no
/// finite geometry to cast shadow rays against.
pub fn direct_lighting(
    scene: &Scene,
    isect: &Intersection,
    f: &Brdf,
    mode: SampleMode,
    rng: &mut impl Rng,
) -> Rgb {
    match mode {
        SampleMode::AllLights => all_lights(scene, isect, f, rng),
        SampleMode::UniformOne => uniform_one(scene, isect, f, rng),
    }
}

fn all_lights(scene: &Scene, isect: &Intersection, f: &Brdf, rng: &mut impl Rng) -> Rgb {
    let mut color = Rgb::ZERO;
    for light in &scene.lights {
        match light {
            Light::Ambient(l) => color += direct_ambient(l, f),
            Light::Point(l) => color += direct_point(l, scene, isect, f),
            Light::Area(l) => {
                color += direct_area(l, scene, isect, f, Sample2D::from_rng(rng));
            }
            // resolved on ray misses in the shader
            Light::Environment(_) => {}
        }
    }
    color
}

fn direct_ambient(l: &AmbientLight, f: &Brdf) -> Rgb {
    if f.ka.is_black() {
        return Rgb::ZERO;
    }
    f.ka * l.color
}

fn direct_point(l: &PointLight, scene: &Scene, isect: &Intersection, f: &Brdf) -> Rgb {
    let kd = f.kd_at(isect.uv);
    if kd.is_black() {
        return Rgb::ZERO;
    }

    let to_light = l.position - isect.p;
    let distance = to_light.norm();
    let ldir = to_light.normalized();
    let cos_l = ldir.dot(isect.sn);
    if cos_l <= 0.0 {
        return Rgb::ZERO;
    }

    let mut shadow = Ray::new(isect.p, ldir, RayKind::Shadow, isect.pixel);
    shadow.adjust_origin(isect.gn);
    if !scene.visibility(&shadow, distance - SHADOW_EPSILON) {
        return Rgb::ZERO;
    }

    let mut color = l.color * kd * cos_l;
    if distance > 0.0 {
        color /= distance * distance;
    }
    color
}

fn direct_area(
    l: &AreaLight,
    scene: &Scene,
    isect: &Intersection,
    f: &Brdf,
    s: Sample2D,
) -> Rgb {
    let kd = f.kd_at(isect.uv);
    if kd.is_black() {
        return Rgb::ZERO;
    }

    let (le, lpos, pdf) = l.sample(s);
    let to_light = lpos - isect.p;
    let distance = to_light.norm();
    let ldir = to_light.normalized();

    let cos_l = ldir.dot(isect.sn);
    // ldir points into the light, so flip it against the light's normal
    let cos_l_light = -ldir.dot(l.gem.normal);
    if cos_l <= COS_EPSILON || cos_l_light <= COS_EPSILON {
        return Rgb::ZERO;
    }

    let mut shadow = Ray::new(isect.p, ldir, RayKind::Shadow, isect.pixel);
    shadow.adjust_origin(isect.gn);
    if !scene.visibility(&shadow, distance - SHADOW_EPSILON) {
        return Rgb::ZERO;
    }

    let mut color = le * kd * cos_l;
    if pdf > 0.0 {
        color /= pdf;
    }
    if distance > 0.0 {
        color /= distance * distance;
    }
    color * cos_l_light
}

struct Candidate<'a> {
    light: &'a AreaLight,
    sample: Sample2D,
    weight: f32,
}

/// Unnormalized selection weights for every area light, each with the fresh
/// sample point that produced it. The weight approximates the light's
/// contribution: summed power x both cosines x area / squared distance.
fn area_light_weights<'a>(
    scene: &'a Scene,
    isect: &Intersection,
    rng: &mut impl Rng,
) -> (Vec<Candidate<'a>>, f32) {
    let mut candidates = Vec::with_capacity(scene.lights.len());
    let mut total = 0.0;

    for light in &scene.lights {
        let al = match light.as_area() {
            Some(al) => al,
            None => continue,
        };
        let sample = Sample2D::from_rng(rng);
        let (le, lpos, _pdf) = al.sample(sample);
        let to_light = lpos - isect.p;
        let dist_squared = to_light.norm_squared();
        let ldir = to_light.normalized();
        let cos_l = ldir.dot(isect.sn);
        let cos_l_light = -ldir.dot(al.gem.normal);

        let weight = if cos_l > 0.0 && cos_l_light > 0.0 && dist_squared > 0.0 {
            le.power() * cos_l * cos_l_light * al.gem.area() / dist_squared
        } else {
            0.0
        };
        total += weight;
        candidates.push(Candidate {
            light: al,
            sample,
            weight,
        });
    }
    (candidates, total)
}

fn uniform_one(scene: &Scene, isect: &Intersection, f: &Brdf, rng: &mut impl Rng) -> Rgb {
    let (candidates, total) = area_light_weights(scene, isect, rng);
    if total <= 0.0 {
        // every light back-facing or degenerate: nothing to select
        return Rgb::ZERO;
    }

    let draw = Sample1D::from_rng(rng).x;
    let mut accumulated = 0.0;
    let mut selected: Option<(&Candidate, f32)> = None;
    for candidate in &candidates {
        if candidate.weight <= 0.0 {
            continue;
        }
        let probability = candidate.weight / total;
        accumulated += probability;
        // the last positive-weight light takes the remainder of the walk
        selected = Some((candidate, probability));
        if draw < accumulated {
            break;
        }
    }

    match selected {
        Some((candidate, probability)) => {
            direct_area(candidate.light, scene, isect, f, candidate.sample) / probability
        }
        None => Rgb::ZERO,
    }
}
