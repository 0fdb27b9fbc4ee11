//! Image output collaborators.
//!
//! The renderer produces a linear f32 RGB frame; everything here quantizes
//! on the way out, sharing one gamma/clamp path. Two formats: ASCII PPM
//! ("P3") and 8-bit PNG.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use log::{info, warn};

use crate::interval::Interval;

/// Valid channel intensity after gamma correction, just short of 1 so the
/// 256x quantization never produces a byte above 255.
const INTENSITY: Interval = Interval {
    min: 0.000,
    max: 0.999,
};

/// Transform a linear color component for display (gamma 2).
fn linear_to_gamma(linear_component: f32) -> f32 {
    if linear_component > 0.0 {
        linear_component.sqrt()
    } else {
        0.0
    }
}

/// Quantize a linear RGB color to display bytes.
pub fn to_rgb8(color: Vec3A) -> [u8; 3] {
    [
        (256.0 * INTENSITY.clamp(linear_to_gamma(color.x))) as u8,
        (256.0 * INTENSITY.clamp(linear_to_gamma(color.y))) as u8,
        (256.0 * INTENSITY.clamp(linear_to_gamma(color.z))) as u8,
    ]
}

/// Write an f32 RGB image as ASCII PPM (the "P3" variant).
///
/// Header lines: `P3`, `<width> <height>`, `255`. Body: one `<R> <G> <B>`
/// line per pixel, row-major, top row first, left column first.
pub fn write_ppm<W: Write>(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width(), image.height())?;
    writeln!(out, "255")?;

    for pixel in image.pixels() {
        let [r, g, b] = to_rgb8(Vec3A::new(pixel[0], pixel[1], pixel[2]));
        writeln!(out, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save an f32 RGB image as ASCII PPM.
///
/// Logs the outcome; I/O failures are warnings, not panics.
pub fn save_image_as_ppm(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let result = File::create(output_path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write_ppm(image, &mut writer)?;
        writer.flush()
    });

    match result {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an f32 RGB image as 8-bit PNG, with the same gamma correction and
/// quantization as the PPM writer.
///
/// Logs the outcome; I/O failures are warnings, not panics.
pub fn save_image_as_png(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            Rgb(to_rgb8(Vec3A::new(pixel[0], pixel[1], pixel[2])))
        });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_of_known_colors() {
        assert_eq!(to_rgb8(Vec3A::ZERO), [0, 0, 0]);
        // 0.25 linear -> 0.5 display -> 128
        assert_eq!(to_rgb8(Vec3A::splat(0.25)), [128, 128, 128]);
        // Full white clamps at 0.999 -> 255
        assert_eq!(to_rgb8(Vec3A::ONE), [255, 255, 255]);
        // Out-of-range values clamp instead of wrapping
        assert_eq!(to_rgb8(Vec3A::new(4.0, -1.0, 1.0)), [255, 0, 255]);
    }

    #[test]
    fn ppm_layout() {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(2, 2);
        image.put_pixel(0, 0, Rgb([0.25, 0.25, 0.25]));
        image.put_pixel(1, 1, Rgb([1.0, 0.0, 0.0]));

        let mut buffer = Vec::new();
        write_ppm(&image, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[..3], ["P3", "2 2", "255"]);
        assert_eq!(lines.len(), 3 + 4);
        // Row-major from the top-left pixel
        assert_eq!(lines[3], "128 128 128");
        assert_eq!(lines[6], "255 0 0");
        assert!(text.ends_with('\n'));
    }
}
