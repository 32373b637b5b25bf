use crate::color::{Color, ColorInfo};
use crate::sample::{corner_points, sample};
use image::RgbaImage;

/// Corner pixels at or below this alpha are skipped; only mostly-opaque
/// corners vote. Stricter than the transparency detector's 128 on purpose.
const OPAQUE_ALPHA_THRESHOLD: u8 = 200;

/// Channel floor above which a color is treated as white-ish and rejected.
const NEAR_WHITE_FLOOR: u8 = 240;

/// Detect a solid background color by sampling the four corner pixels.
///
/// Corners with alpha <= 200 are discarded, the rest are grouped by exact
/// RGB triple, and the most common triple wins. Ties go to the corner
/// scanned first (top-left, top-right, bottom-left, bottom-right).
///
/// Returns `None` when fewer than two corners agree, or when the winning
/// color is near-white (all channels above 240) and therefore
/// indistinguishable from an unset background.
pub fn detect_background_color(img: &RgbaImage) -> Option<ColorInfo> {
  let (width, height) = img.dimensions();
  if width == 0 || height == 0 {
    return None;
  }

  // Insertion-ordered counts; a HashMap would randomize the tie-break.
  let mut color_counts: Vec<(Color, u32)> = Vec::with_capacity(4);

  for (x, y) in corner_points(width, height) {
    let pixel = sample(img, x, y);
    if pixel[3] <= OPAQUE_ALPHA_THRESHOLD {
      continue;
    }

    let color = [pixel[0], pixel[1], pixel[2]];
    match color_counts.iter_mut().find(|(c, _)| *c == color) {
      Some((_, count)) => *count += 1,
      None => color_counts.push((color, 1)),
    }
  }

  let mut dominant: Option<(Color, u32)> = None;
  for &(color, count) in &color_counts {
    // Strictly greater, so the first-scanned color keeps ties.
    if count > dominant.map_or(0, |(_, c)| c) {
      dominant = Some((color, count));
    }
  }

  let (color, count) = dominant?;
  if count < 2 {
    return None;
  }
  if color.iter().all(|&c| c > NEAR_WHITE_FLOOR) {
    return None;
  }

  Some(ColorInfo::from_rgb(color))
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{ImageBuffer, Rgba, RgbaImage};

  fn image_with_corners(corners: [Rgba<u8>; 4]) -> RgbaImage {
    let mut img = ImageBuffer::from_pixel(20, 10, Rgba([128, 128, 128, 255]));
    let [tl, tr, bl, br] = corners;
    img.put_pixel(0, 0, tl);
    img.put_pixel(19, 0, tr);
    img.put_pixel(0, 9, bl);
    img.put_pixel(19, 9, br);
    img
  }

  #[test]
  fn uniform_non_white_border_is_detected() {
    let img = ImageBuffer::from_pixel(12, 12, Rgba([30, 144, 255, 255]));
    let info = detect_background_color(&img).unwrap();
    assert_eq!(info.rgb(), [30, 144, 255]);
    assert_eq!(info.hex, "#1e90ff");
  }

  #[test]
  fn four_distinct_corners_have_no_consensus() {
    let img = image_with_corners([
      Rgba([255, 0, 0, 255]),
      Rgba([0, 255, 0, 255]),
      Rgba([0, 0, 255, 255]),
      Rgba([255, 255, 0, 255]),
    ]);
    assert_eq!(detect_background_color(&img), None);
  }

  #[test]
  fn near_white_background_is_rejected() {
    let img = ImageBuffer::from_pixel(8, 8, Rgba([250, 250, 250, 255]));
    assert_eq!(detect_background_color(&img), None);
  }

  #[test]
  fn exactly_240_is_not_near_white() {
    let img = ImageBuffer::from_pixel(8, 8, Rgba([240, 240, 240, 255]));
    let info = detect_background_color(&img).unwrap();
    assert_eq!(info.rgb(), [240, 240, 240]);
  }

  #[test]
  fn tie_goes_to_the_first_scanned_corner() {
    // Two red corners, two blue corners; top-left is red and is scanned
    // first, so red wins the 2-2 tie.
    let red = Rgba([200, 0, 0, 255]);
    let blue = Rgba([0, 0, 200, 255]);
    let img = image_with_corners([red, blue, blue, red]);
    let info = detect_background_color(&img).unwrap();
    assert_eq!(info.rgb(), [200, 0, 0]);
  }

  #[test]
  fn translucent_corners_do_not_vote() {
    // Three corners agree but sit at alpha 200, which is not strictly
    // opaque enough; the lone opaque corner cannot reach a count of 2.
    let img = image_with_corners([
      Rgba([10, 10, 10, 200]),
      Rgba([10, 10, 10, 200]),
      Rgba([10, 10, 10, 200]),
      Rgba([10, 10, 10, 255]),
    ]);
    assert_eq!(detect_background_color(&img), None);
  }

  #[test]
  fn two_agreeing_corners_are_enough() {
    let img = image_with_corners([
      Rgba([7, 7, 7, 255]),
      Rgba([7, 7, 7, 255]),
      Rgba([0, 0, 0, 0]),
      Rgba([0, 0, 0, 0]),
    ]);
    let info = detect_background_color(&img).unwrap();
    assert_eq!(info.rgb(), [7, 7, 7]);
  }

  #[test]
  fn degenerate_image_detects_nothing() {
    assert_eq!(detect_background_color(&RgbaImage::new(0, 4)), None);
  }
}
