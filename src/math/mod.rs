mod color;
mod ray;
mod sample;
mod vec;

pub use color::*;
pub use ray::*;
pub use sample::*;
pub use vec::*;
