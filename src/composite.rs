use crate::color::Color;
use anyhow::{ensure, Result};
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, RgbaImage};
use rayon::prelude::*;

/// Output canvas is always this size on both axes.
pub const OUTPUT_SIZE: u32 = 640;

/// Fraction of the canvas the scaled source may occupy; the remainder is
/// the blank margin around it.
const CONTENT_FRACTION: f64 = 0.85;

/// Where the scaled source lands on the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
  pub width: u32,
  pub height: u32,
  pub x: u32,
  pub y: u32,
}

/// Compute the scaled dimensions and centering offset for a source of the
/// given size.
///
/// The scale factor is min(544/w, 544/h) with 544 = 640 * 0.85, so the
/// dominant axis fills 85% of the canvas and the aspect ratio is
/// preserved. Small sources are scaled up past 1x. Dimensions and offsets
/// round to the nearest pixel.
pub fn placement(source_width: u32, source_height: u32) -> Result<Placement> {
  ensure!(
    source_width > 0 && source_height > 0,
    "Cannot composite a degenerate {}x{} image",
    source_width,
    source_height
  );

  let max_size = OUTPUT_SIZE as f64 * CONTENT_FRACTION;
  let scale = (max_size / source_width as f64).min(max_size / source_height as f64);

  let width = (source_width as f64 * scale).round().max(1.0) as u32;
  let height = (source_height as f64 * scale).round().max(1.0) as u32;

  Ok(Placement {
    width,
    height,
    x: ((OUTPUT_SIZE - width) as f64 / 2.0).round() as u32,
    y: ((OUTPUT_SIZE - height) as f64 / 2.0).round() as u32,
  })
}

/// Composite a pixel over a background color to handle existing alpha channels
///
/// If the input pixel is translucent (alpha < 255), this pre-composes it over
/// the background color to produce an opaque equivalent.
///
/// Formula: result = foreground * alpha + background * (1 - alpha)
pub fn composite_over_background(pixel: &Rgba<u8>, background: Color) -> Color {
  let alpha = pixel[3] as f64 / 255.0;

  if alpha >= 1.0 {
    // Fully opaque - use as-is
    [pixel[0], pixel[1], pixel[2]]
  } else {
    // Translucent - composite over background
    let bg_norm = [
      background[0] as f64 / 255.0,
      background[1] as f64 / 255.0,
      background[2] as f64 / 255.0,
    ];
    let fg_norm = [
      pixel[0] as f64 / 255.0,
      pixel[1] as f64 / 255.0,
      pixel[2] as f64 / 255.0,
    ];

    [
      ((fg_norm[0] * alpha + bg_norm[0] * (1.0 - alpha)) * 255.0).round() as u8,
      ((fg_norm[1] * alpha + bg_norm[1] * (1.0 - alpha)) * 255.0).round() as u8,
      ((fg_norm[2] * alpha + bg_norm[2] * (1.0 - alpha)) * 255.0).round() as u8,
    ]
  }
}

/// Render the source centered on a 640x640 canvas filled with the given
/// background color.
///
/// The source is resized to the computed placement, each scaled pixel is
/// alpha-blended over the background, and everything outside the placed
/// rectangle keeps the solid fill. The result is fully opaque.
pub fn composite(source: &RgbaImage, background: Color) -> Result<RgbaImage> {
  let (source_width, source_height) = source.dimensions();
  let placement = placement(source_width, source_height)?;

  let mut output = ImageBuffer::from_pixel(
    OUTPUT_SIZE,
    OUTPUT_SIZE,
    Rgba([background[0], background[1], background[2], 255]),
  );

  let scaled = imageops::resize(source, placement.width, placement.height, FilterType::Lanczos3);

  let pixels: Vec<_> = scaled.pixels().collect();
  let blended: Vec<Color> = pixels
    .par_iter()
    .map(|pixel| composite_over_background(pixel, background))
    .collect();

  for (i, (x, y, _)) in scaled.enumerate_pixels().enumerate() {
    let [r, g, b] = blended[i];
    output.put_pixel(placement.x + x, placement.y + y, Rgba([r, g, b, 255]));
  }

  Ok(output)
}
