use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::film::Film;
use crate::math::{Rgb, Sample2D};
use crate::scene::Scene;
use crate::shader::Shader;

/// Fill `film` with `spp` shaded camera samples per pixel, averaged.
///
/// Scanlines are the unit of parallelism: each worker takes whole rows from
/// the rayon pool and owns a thread-local rng for the row, so samples never
/// share generator state across threads.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    shader: &Shader,
    film: &mut Film,
    spp: usize,
    jitter: bool,
) {
    let width = film.width;
    if width == 0 || film.height == 0 {
        // an empty film has no scanlines to chunk
        return;
    }
    info!(
        "rendering {}x{} at {} spp across {} threads",
        width,
        film.height,
        spp,
        rayon::current_num_threads()
    );

    film.buffer_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rng = SmallRng::from_entropy();
            for (x, px) in row.iter_mut().enumerate() {
                let mut color = Rgb::ZERO;
                for _ in 0..spp {
                    let sample = if jitter {
                        Some(Sample2D::from_rng(&mut rng))
                    } else {
                        None
                    };
                    let ray = camera.generate_ray(x, y, sample);
                    let hit = scene.trace(&ray);
                    color += shader.shade(hit, 0, ray.direction, &mut rng);
                }
                *px = color / spp as f32;
            }
        });
}
