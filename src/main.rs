use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};
use structopt::StructOpt;

use helios::camera::Camera;
use helios::error::RenderError;
use helios::film::Film;
use helios::geometry::{Sphere, Triangle};
use helios::lights::{AmbientLight, AreaLight, EnvironmentLight, Light, PointLight};
use helios::material::Brdf;
use helios::math::{Point3, Rgb, Vec3};
use helios::probe::HdrProbe;
use helios::renderer::render;
use helios::scene::Scene;
use helios::shader::Shader;

#[derive(StructOpt, Debug)]
#[structopt(name = "helios", about = "offline Monte Carlo renderer")]
struct Opt {
    /// Image width in pixels
    #[structopt(long, default_value = "512")]
    width: usize,

    /// Image height in pixels
    #[structopt(long, default_value = "512")]
    height: usize,

    /// Camera samples per pixel
    #[structopt(long, default_value = "16")]
    spp: usize,

    /// Shoot every ray through the pixel center instead of jittering
    #[structopt(long)]
    no_jitter: bool,

    /// Worker threads; defaults to one per logical cpu
    #[structopt(long)]
    threads: Option<usize>,

    /// Scene to render: "cornell" or "probe"
    #[structopt(long, default_value = "cornell")]
    scene: String,

    /// HDR light probe for the probe scene (.exr or .hdr)
    #[structopt(long, parse(from_os_str))]
    probe: Option<PathBuf>,

    /// Output basename; writes <output>.png and <output>.exr
    #[structopt(long, default_value = "output")]
    output: String,
}

/// Two triangles spanning the quad `a b c d`, wound so both normals match
/// the winding of `(a, b, c)`.
fn quad(scene: &mut Scene, a: Point3, b: Point3, c: Point3, d: Point3, material_id: usize) {
    scene.add_primitive(Triangle::new(a, b, c), material_id);
    scene.add_primitive(Triangle::new(a, c, d), material_id);
}

/// The classic box: diffuse walls, one mirror and one glass sphere, a quad
/// light just under the ceiling plus a dim ambient term and a point fill.
fn cornell_scene() -> (Scene, Point3, Point3) {
    let mut scene = Scene::new();

    let white = Rgb::new(0.73, 0.73, 0.73);
    let red = Rgb::new(0.65, 0.05, 0.05);
    let green = Rgb::new(0.12, 0.45, 0.15);

    let white_mat = scene.add_material(Brdf::diffuse(white * 0.1, white));
    let red_mat = scene.add_material(Brdf::diffuse(red * 0.1, red));
    let green_mat = scene.add_material(Brdf::diffuse(green * 0.1, green));
    let mirror = scene.add_material(Brdf::mirror(Rgb::splat(0.9)));
    let glass = scene.add_material(Brdf::glass(Rgb::ZERO, Rgb::splat(0.95), 1.5));

    // all interior normals face the camera side of each wall
    let (p000, p001) = (Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 555.0));
    let (p100, p101) = (Point3::new(555.0, 0.0, 0.0), Point3::new(555.0, 0.0, 555.0));
    let (p010, p011) = (Point3::new(0.0, 555.0, 0.0), Point3::new(0.0, 555.0, 555.0));
    let (p110, p111) = (Point3::new(555.0, 555.0, 0.0), Point3::new(555.0, 555.0, 555.0));

    quad(&mut scene, p000, p001, p101, p100, white_mat); // floor, +y
    quad(&mut scene, p010, p110, p111, p011, white_mat); // ceiling, -y
    quad(&mut scene, p001, p011, p111, p101, white_mat); // back wall, -z
    quad(&mut scene, p000, p010, p011, p001, red_mat); // left wall, +x
    quad(&mut scene, p100, p101, p111, p110, green_mat); // right wall, -x

    scene.add_primitive(Sphere::new(Point3::new(160.0, 110.0, 380.0), 110.0), mirror);
    scene.add_primitive(Sphere::new(Point3::new(400.0, 100.0, 230.0), 100.0), glass);

    // quad light just under the ceiling, emitting downward
    let le = Rgb::splat(20.0);
    let (la, lb, lc, ld) = (
        Point3::new(213.0, 554.0, 227.0),
        Point3::new(343.0, 554.0, 227.0),
        Point3::new(343.0, 554.0, 332.0),
        Point3::new(213.0, 554.0, 332.0),
    );
    scene.add_light(Light::Area(AreaLight::new(le, Triangle::new(la, lb, lc))));
    scene.add_light(Light::Area(AreaLight::new(le, Triangle::new(la, lc, ld))));

    scene.add_light(Light::Ambient(AmbientLight {
        color: Rgb::splat(0.5),
    }));
    scene.add_light(Light::Point(PointLight {
        color: Rgb::splat(2.0e4),
        position: Point3::new(278.0, 545.0, 280.0),
    }));

    let eye = Point3::new(278.0, 273.0, -800.0);
    let at = Point3::new(278.0, 273.0, 0.0);
    (scene, eye, at)
}

/// Two spheres on a grey floor under an HDR environment probe.
fn probe_scene(probe_path: &Path) -> Result<(Scene, Point3, Point3), RenderError> {
    let mut scene = Scene::new();

    let grey = Rgb::splat(0.6);
    let floor = scene.add_material(Brdf::diffuse(grey * 0.4, grey));
    let mirror = scene.add_material(Brdf::mirror(Rgb::splat(0.9)));
    let glass = scene.add_material(Brdf::glass(Rgb::ZERO, Rgb::splat(0.95), 1.5));

    quad(
        &mut scene,
        Point3::new(-8.0, 0.0, 8.0),
        Point3::new(8.0, 0.0, 8.0),
        Point3::new(8.0, 0.0, -8.0),
        Point3::new(-8.0, 0.0, -8.0),
        floor,
    );
    scene.add_primitive(Sphere::new(Point3::new(-1.2, 1.0, 0.0), 1.0), mirror);
    scene.add_primitive(Sphere::new(Point3::new(1.2, 1.0, 0.0), 1.0), glass);

    let probe = HdrProbe::load(probe_path)?;
    info!(
        "loaded probe {:?} ({}x{})",
        probe_path,
        probe.width(),
        probe.height()
    );
    scene.add_light(Light::Environment(EnvironmentLight::new(probe)));
    scene.add_light(Light::Ambient(AmbientLight {
        color: Rgb::splat(0.4),
    }));

    let eye = Point3::new(0.0, 1.5, -6.0);
    let at = Point3::new(0.0, 1.0, 0.0);
    Ok((scene, eye, at))
}

fn main() -> Result<(), RenderError> {
    env_logger::init();
    let opt = Opt::from_args();

    let threads = opt.threads.unwrap_or_else(num_cpus::get);
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        warn!("using the default thread pool: {}", e);
    }

    let (scene, eye, at) = match opt.scene.as_str() {
        "cornell" => cornell_scene(),
        "probe" => {
            let path = opt.probe.as_ref().ok_or_else(|| {
                RenderError::Usage("the probe scene needs --probe <file>".into())
            })?;
            probe_scene(path)?
        }
        other => {
            return Err(RenderError::Usage(format!(
                "unknown scene {:?}, expected \"cornell\" or \"probe\"",
                other
            )))
        }
    };
    info!(
        "scene \"{}\": {} primitives, {} lights",
        opt.scene,
        scene.num_primitives(),
        scene.num_lights()
    );

    let camera = Camera::new(eye, at, Vec3::Y, opt.width, opt.height, 40.0);
    let shader = Shader::new(&scene, Rgb::BLACK);
    let mut film = Film::new(opt.width, opt.height);

    let start = Instant::now();
    render(
        &scene,
        &camera,
        &shader,
        &mut film,
        opt.spp,
        !opt.no_jitter,
    );
    info!("rendered in {:.2?}", start.elapsed());

    let png = PathBuf::from(format!("{}.png", opt.output));
    let exr = PathBuf::from(format!("{}.exr", opt.output));
    film.write_png(&png)?;
    film.write_exr(&exr)?;
    info!("wrote {:?} and {:?}", png, exr);

    Ok(())
}
