use crate::sample::{border_probe_points, sample};
use image::RgbaImage;

/// Alpha values below this count as transparent, so semi-transparent
/// borders still register.
const TRANSPARENT_ALPHA_THRESHOLD: u8 = 128;

/// Decide whether an image has a transparent background by probing its
/// four corners and four edge midpoints.
///
/// Returns true iff strictly more than half of the 8 probes read an alpha
/// below 128. This is a border heuristic, not a full-image scan: interior
/// transparency is deliberately ignored.
pub fn is_transparent(img: &RgbaImage) -> bool {
  let (width, height) = img.dimensions();
  if width == 0 || height == 0 {
    return false;
  }

  let probes = border_probe_points(width, height);
  let transparent_pixels = probes
    .iter()
    .filter(|&&(x, y)| sample(img, x, y)[3] < TRANSPARENT_ALPHA_THRESHOLD)
    .count();

  transparent_pixels > probes.len() / 2
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{ImageBuffer, Rgba};

  /// Build a 9x9 opaque image, then force the given number of probe
  /// points (in probe order) to the given alpha.
  fn image_with_probe_alphas(count: usize, alpha: u8) -> RgbaImage {
    let mut img = ImageBuffer::from_pixel(9, 9, Rgba([10, 20, 30, 255]));
    for &(x, y) in border_probe_points(9, 9).iter().take(count) {
      img.put_pixel(x, y, Rgba([10, 20, 30, alpha]));
    }
    img
  }

  #[test]
  fn fully_transparent_border_is_transparent() {
    let img = ImageBuffer::from_pixel(16, 16, Rgba([0, 0, 0, 0]));
    assert!(is_transparent(&img));
  }

  #[test]
  fn opaque_image_is_not_transparent() {
    let img = ImageBuffer::from_pixel(16, 16, Rgba([200, 10, 10, 255]));
    assert!(!is_transparent(&img));
  }

  #[test]
  fn exactly_half_transparent_probes_lose_the_majority() {
    // 4 of 8 probes transparent: tie goes to "not transparent".
    let img = image_with_probe_alphas(4, 0);
    assert!(!is_transparent(&img));
  }

  #[test]
  fn five_of_eight_transparent_probes_win() {
    let img = image_with_probe_alphas(5, 0);
    assert!(is_transparent(&img));
  }

  #[test]
  fn semi_transparent_counts_below_128_only() {
    assert!(is_transparent(&image_with_probe_alphas(8, 127)));
    assert!(!is_transparent(&image_with_probe_alphas(8, 128)));
  }

  #[test]
  fn degenerate_image_reports_opaque() {
    let img = RgbaImage::new(0, 0);
    assert!(!is_transparent(&img));
  }
}
