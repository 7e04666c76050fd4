use colored::Colorize;
use image::{Rgb, RgbImage};
use std::path::PathBuf;
use std::time::Instant;

use crate::error::{Error, Result};

/// Consumer of a finished pixel buffer.
pub trait ImageOutput {
    /// `pixels` holds 3 bytes per pixel in column-major order: all rows of
    /// column 0, then column 1, ...
    fn write_pixels(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<()>;
}

/// Lays out a column-major pixel buffer as a `width x height` raster.
/// Buffer column 0 is the camera's +X side and lands at raster x = 0, so the
/// image is mirrored left-to-right relative to the camera view.
pub fn to_raster(pixels: &[u8], width: u32, height: u32) -> Result<RgbImage> {
    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(Error::PixelBuffer(format!(
            "pixel buffer has {} bytes, expected {expected} for {width}x{height}",
            pixels.len()
        )));
    }
    let mut img = RgbImage::new(width, height);
    for (i, c) in pixels.chunks_exact(3).enumerate() {
        let x = (i / height as usize) as u32;
        let y = (i % height as usize) as u32;
        img.put_pixel(x, y, Rgb([c[0], c[1], c[2]]));
    }
    Ok(img)
}

/// Writes the image to disk, the format follows the file extension.
pub struct ImageFile {
    pub path: PathBuf,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageOutput for ImageFile {
    fn write_pixels(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<()> {
        let start_time = Instant::now();

        let img = to_raster(pixels, width, height)?;
        img.save(&self.path)?;

        let elapsed = start_time.elapsed();
        let lat_msec = elapsed.as_millis() as f64 / 1000.0;
        println!(
            "writing '{}' took {} sec",
            self.path.display().to_string().bold(),
            lat_msec
        );
        Ok(())
    }
}
