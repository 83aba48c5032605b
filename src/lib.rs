//! A small offline Monte Carlo renderer: deterministic specular chains over
//! sampled direct lighting, with triangle and sphere geometry, area and
//! environment lights, and PNG/OpenEXR output.

pub mod camera;
pub mod error;
pub mod film;
pub mod geometry;
pub mod lighting;
pub mod lights;
pub mod material;
pub mod math;
pub mod probe;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod texture;

pub use camera::Camera;
pub use error::RenderError;
pub use film::Film;
pub use lighting::SampleMode;
pub use scene::Scene;
pub use shader::Shader;
