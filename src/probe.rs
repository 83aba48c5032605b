use std::f32::consts::PI;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::RenderError;
use crate::math::{Rgb, Vec3};
use crate::texture::Raster;

const RADIAL_EPSILON: f32 = 1.0e-6;

/// HDR light probe: a 2D radiance raster indexed by direction through the
/// azimuthal-equidistant (angular map) projection.
#[derive(Clone, Debug)]
pub struct HdrProbe {
    raster: Raster,
}

impl HdrProbe {
    pub fn new(raster: Raster) -> HdrProbe {
        HdrProbe { raster }
    }

    /// Load a probe from disk. `.exr` goes through the exr crate, anything
    /// else (notably Radiance `.hdr`) through the image crate.
    pub fn load(path: &Path) -> Result<HdrProbe, RenderError> {
        let raster = match path.extension().and_then(|e| e.to_str()) {
            Some("exr") => load_exr(path),
            Some("hdr") => load_radiance_hdr(path),
            _ => Raster::load(path),
        }?;
        Ok(HdrProbe::new(raster))
    }

    pub fn width(&self) -> usize {
        self.raster.width
    }

    pub fn height(&self) -> usize {
        self.raster.height
    }

    /// Radiance arriving from `dir`.
    ///
    /// The angular-map contract: for normalized (Dx, Dy, Dz) the radial
    /// coordinate is r = acos(Dz) / (pi * d) with d = sqrt(Dx^2 + Dy^2),
    /// giving probe coordinates u = 0.5 + Dx * r, v = 0.5 + Dy * r.
    /// Directions landing outside [0,1]^2 return black; in-range lookups are
    /// bilinearly filtered.
    pub fn radiance(&self, dir: Vec3) -> Rgb {
        let d = dir.normalized();
        let planar = (d.x * d.x + d.y * d.y).sqrt();

        let r = if planar > RADIAL_EPSILON {
            d.z.clamp(-1.0, 1.0).acos() / (PI * planar)
        } else {
            0.0
        };

        let u = 0.5 + d.x * r;
        let v = 0.5 + d.y * r;

        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return Rgb::BLACK;
        }

        self.raster.bilinear(
            u * (self.raster.width - 1) as f32,
            v * (self.raster.height - 1) as f32,
        )
    }
}

fn load_exr(path: &Path) -> Result<Raster, RenderError> {
    use exr::prelude::*;

    let image = read_first_rgba_layer_from_file(
        path,
        |resolution: Vec2<usize>, _channels: &RgbaChannels| {
            vec![vec![Rgb::BLACK; resolution.width()]; resolution.height()]
        },
        |rows: &mut Vec<Vec<Rgb>>, position: Vec2<usize>, (r, g, b, _a): (f32, f32, f32, f32)| {
            rows[position.y()][position.x()] = Rgb::new(r, g, b);
        },
    )
    .map_err(|e| RenderError::Resource {
        kind: "light probe",
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let size = image.layer_data.size;
    let texels = image
        .layer_data
        .channel_data
        .pixels
        .into_iter()
        .flatten()
        .collect();
    Ok(Raster::new(size.width(), size.height(), texels))
}

fn load_radiance_hdr(path: &Path) -> Result<Raster, RenderError> {
    let resource = |reason: String| RenderError::Resource {
        kind: "light probe",
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| resource(e.to_string()))?;
    let decoder = image::codecs::hdr::HdrDecoder::new(BufReader::new(file))
        .map_err(|e| resource(e.to_string()))?;
    let meta = decoder.metadata();
    let (width, height) = (meta.width as usize, meta.height as usize);
    let texels = decoder
        .read_image_hdr()
        .map_err(|e| resource(e.to_string()))?
        .into_iter()
        .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
        .collect();
    Ok(Raster::new(width, height, texels))
}
