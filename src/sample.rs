use image::{Rgba, RgbaImage};

/// The four extreme pixels in scan order: top-left, top-right, bottom-left,
/// bottom-right. The order is load-bearing: background detection breaks
/// count ties by whichever corner was scanned first.
pub fn corner_points(width: u32, height: u32) -> [(u32, u32); 4] {
  [
    (0, 0),
    (width - 1, 0),
    (0, height - 1),
    (width - 1, height - 1),
  ]
}

/// The corners plus the midpoint of each edge. Midpoints floor the
/// half-dimension, matching integer division.
pub fn border_probe_points(width: u32, height: u32) -> [(u32, u32); 8] {
  let [tl, tr, bl, br] = corner_points(width, height);
  [
    tl,
    tr,
    bl,
    br,
    (width / 2, 0),
    (width / 2, height - 1),
    (0, height / 2),
    (width - 1, height / 2),
  ]
}

/// Read one RGBA pixel. Callers only pass coordinates derived from the
/// image's own dimensions, so this never goes out of bounds.
pub fn sample(img: &RgbaImage, x: u32, y: u32) -> Rgba<u8> {
  *img.get_pixel(x, y)
}
