//! Image output: gamma-correct quantization and file encoding.
//!
//! The renderer produces linear f32 RGB; this module quantizes it to 8-bit
//! channels (gamma correction, clamp, scale) and encodes PPM (P6), PNG, or
//! linear HDR EXR depending on the output path's extension.

use image::{ImageBuffer, Rgb};
use log::{info, warn};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::interval::Interval;

/// Quantize one linear color channel to an 8-bit value.
///
/// Applies the power-law gamma transform, clamps to [0, 0.999] so a fully
/// saturated channel still maps below 256, and scales by 256.
pub fn quantize_channel(linear: f32, gamma: f32) -> u8 {
    const INTENSITY: Interval = Interval { min: 0.0, max: 0.999 };
    let corrected = linear.max(0.0).powf(1.0 / gamma);
    (INTENSITY.clamp(corrected) * 256.0) as u8
}

/// Quantize a linear RGB pixel to three 8-bit channels.
pub fn quantize_pixel(pixel: &Rgb<f32>, gamma: f32) -> [u8; 3] {
    [
        quantize_channel(pixel[0], gamma),
        quantize_channel(pixel[1], gamma),
        quantize_channel(pixel[2], gamma),
    ]
}

/// In-memory PPM (P6 binary RGB) image sink.
///
/// Pixels are appended in the order [`PpmImage::write_pixel`] is called; the
/// renderer feeds it in scan order, so no reordering is ever needed.
pub struct PpmImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PpmImage {
    /// Create an empty PPM image of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: Vec::with_capacity((width * height * 3) as usize),
        }
    }

    /// Append one RGB pixel to the buffer.
    pub fn write_pixel(&mut self, pixel: [u8; 3]) {
        self.pixels.extend_from_slice(&pixel);
    }

    /// Number of pixels written so far.
    pub fn pixels_written(&self) -> usize {
        self.pixels.len() / 3
    }

    /// Serialize header and pixel data into a writer.
    pub fn encode<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width, self.height)?;
        writer.write_all(&self.pixels)
    }

    /// Write the image to disk.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        self.encode(io::BufWriter::new(file))
    }
}

/// Save a linear f32 image as binary PPM with gamma-correct quantization.
pub fn save_image_as_ppm(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    gamma: f32,
) -> io::Result<()> {
    let mut ppm = PpmImage::new(image.width(), image.height());
    // ImageBuffer iterates row-major from the top row, matching render scan
    // order.
    for pixel in image.pixels() {
        ppm.write_pixel(quantize_pixel(pixel, gamma));
    }
    ppm.save(Path::new(output_path))?;
    info!("Image saved as {}", output_path);
    Ok(())
}

/// Save a linear f32 image as 8-bit PNG with gamma-correct quantization.
pub fn save_image_as_png(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    gamma: f32,
) -> Result<(), image::ImageError> {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            Rgb(quantize_pixel(image.get_pixel(x, y), gamma))
        });

    u8_image.save(output_path)?;
    info!("Image saved as {}", output_path);
    Ok(())
}

/// Save a linear f32 image as EXR, preserving full HDR precision.
///
/// No gamma correction or clamping is applied; EXR stores the raw linear
/// radiance for viewers and compositors that do their own display transform.
pub fn save_image_as_exr(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
) -> Result<(), exr::error::Error> {
    exr::prelude::write_rgb_file(
        output_path,
        image.width() as usize,
        image.height() as usize,
        |x, y| {
            let pixel = image.get_pixel(x as u32, y as u32);
            (pixel[0], pixel[1], pixel[2])
        },
    )?;
    info!("HDR image saved as EXR: {}", output_path);
    Ok(())
}

/// Save a rendered image, choosing the encoder by file extension.
///
/// Supports `.ppm`, `.png` and `.exr`; anything else is an error.
pub fn save_image(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    gamma: f32,
) -> Result<(), String> {
    let result = if output_path.ends_with(".ppm") {
        save_image_as_ppm(image, output_path, gamma).map_err(|e| e.to_string())
    } else if output_path.ends_with(".png") {
        save_image_as_png(image, output_path, gamma).map_err(|e| e.to_string())
    } else if output_path.ends_with(".exr") {
        save_image_as_exr(image, output_path).map_err(|e| e.to_string())
    } else {
        Err(format!(
            "unsupported file extension in '{}': only .ppm, .png and .exr are supported",
            output_path
        ))
    };

    if let Err(ref e) = result {
        warn!("Failed to save image: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_applies_gamma_clamp_and_scale() {
        // Mid grey at gamma 2.0: sqrt(0.25) = 0.5 -> 128.
        assert_eq!(quantize_channel(0.25, 2.0), 128);
        // Saturated channels clamp to 0.999 * 256 = 255, never 256.
        assert_eq!(quantize_channel(1.0, 2.0), 255);
        assert_eq!(quantize_channel(42.0, 2.0), 255);
        // Negative (impossible) radiance clamps to black instead of NaN.
        assert_eq!(quantize_channel(-1.0, 2.0), 0);
        // Gamma 1.0 is a pure linear scale.
        assert_eq!(quantize_channel(0.5, 1.0), 128);
    }

    #[test]
    fn ppm_layout_is_header_then_raw_rgb() {
        let mut ppm = PpmImage::new(2, 1);
        ppm.write_pixel([255, 0, 10]);
        ppm.write_pixel([1, 2, 3]);
        assert_eq!(ppm.pixels_written(), 2);

        let mut buf = Vec::new();
        ppm.encode(&mut buf).unwrap();
        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[255, 0, 10, 1, 2, 3]);
        assert_eq!(buf, expected);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(1, 1);
        assert!(save_image(&image, "render.bmp", 2.0).is_err());
    }
}
