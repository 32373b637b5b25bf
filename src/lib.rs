#![deny(clippy::all)]

pub mod background;
pub mod color;
pub mod composite;
pub mod sample;
pub mod transparency;

use crate::background::detect_background_color as detect_bg;
use crate::color::{parse_hex_color, Color, ColorInfo};
use crate::composite::{composite, OUTPUT_SIZE};
use crate::transparency::is_transparent;
use image::{ImageFormat, RgbaImage};
use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::io::Cursor;

/// Fill used when nothing is detected and the caller picked nothing.
const DEFAULT_BACKGROUND: Color = [255, 255, 255];

#[napi(object)]
pub struct RgbColor {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

#[napi(object)]
pub struct ColorInfoJs {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  /// Lowercase "#rrggbb" form, accepted back as a background override
  pub hex: String,
}

impl From<ColorInfo> for ColorInfoJs {
  fn from(info: ColorInfo) -> Self {
    Self {
      r: info.r,
      g: info.g,
      b: info.b,
      hex: info.hex,
    }
  }
}

#[napi(object)]
pub struct AnalysisResult {
  /// Whether the image border is predominantly transparent
  pub transparent: bool,
  /// The detected solid background color, if the border is opaque and the
  /// corners agree on a non-white color
  pub background_color: Option<ColorInfoJs>,
}

#[napi(object)]
pub struct ProcessImageOptions {
  /// The input image buffer (PNG or JPEG)
  pub input: Buffer,
  /// The background color to fill with. If not specified, the detected
  /// background color is used, falling back to white.
  pub background_color: Option<String>,
}

pub struct AsyncProcessImage {
  options: ProcessImageOptions,
}

#[napi]
impl Task for AsyncProcessImage {
  type Output = Vec<u8>;
  type JsValue = Buffer;

  fn compute(&mut self) -> Result<Self::Output> {
    process_image_internal(&self.options)
  }

  fn resolve(&mut self, _env: Env, output: Self::Output) -> Result<Self::JsValue> {
    Ok(output.into())
  }
}

#[napi]
/// Process an image asynchronously into a 640x640 canvas
///
/// Centers the source on a solid background, scaled to fit within 85% of
/// the canvas. The background is the caller's override if given, otherwise
/// the auto-detected corner color, otherwise white.
///
/// # Arguments
/// * `options` - The options for the image processing
///
/// # Returns
/// A promise that resolves to the processed image buffer (PNG format)
pub fn process_image(options: ProcessImageOptions) -> AsyncTask<AsyncProcessImage> {
  AsyncTask::new(AsyncProcessImage { options })
}

#[napi]
/// Process an image synchronously into a 640x640 canvas
///
/// Same pipeline as `process_image`, on the calling thread.
///
/// # Arguments
/// * `options` - The options for the image processing
///
/// # Returns
/// The processed image buffer (PNG format)
pub fn process_image_sync(options: ProcessImageOptions) -> Result<Buffer> {
  let result = process_image_internal(&options)?;
  Ok(result.into())
}

#[napi]
/// Analyze an image without processing it
///
/// Runs transparency detection, and background color detection when the
/// border is opaque, so a UI can seed its color choice before processing.
///
/// # Arguments
/// * `input` - The input image buffer
///
/// # Returns
/// The analysis result
pub fn analyze_image(input: Buffer) -> Result<AnalysisResult> {
  let rgba = load_input(&input)?;
  let transparent = is_transparent(&rgba);
  let background_color = if transparent {
    None
  } else {
    detect_bg(&rgba).map(ColorInfoJs::from)
  };

  Ok(AnalysisResult {
    transparent,
    background_color,
  })
}

#[napi]
/// Check whether an image has a transparent background
///
/// Probes the four corners and four edge midpoints; true when more than
/// half of them are below 50% opacity.
///
/// # Arguments
/// * `input` - The input image buffer
///
/// # Returns
/// Whether the image border is predominantly transparent
pub fn is_image_transparent(input: Buffer) -> Result<bool> {
  let rgba = load_input(&input)?;
  Ok(is_transparent(&rgba))
}

#[napi]
/// Detect the background color of an image by sampling its corners
///
/// # Arguments
/// * `input` - The input image buffer
///
/// # Returns
/// The detected background color, or null when the corners do not agree
/// on a solid non-white color
pub fn detect_background_color(input: Buffer) -> Result<Option<ColorInfoJs>> {
  let rgba = load_input(&input)?;
  Ok(detect_bg(&rgba).map(ColorInfoJs::from))
}

#[napi]
/// Parse a hex color string into an RGB color
///
/// Supports formats: "#ff0000", "ff0000", "#f00", "f00"
///
/// # Arguments
/// * `hex` - The hex color string
///
/// # Returns
/// The parsed RGB color
pub fn parse_color(hex: String) -> Result<RgbColor> {
  let color = parse_hex_color(&hex)
    .map_err(|e| Error::new(Status::InvalidArg, format!("Invalid hex color: {}", e)))?;
  Ok(RgbColor {
    r: color[0],
    g: color[1],
    b: color[2],
  })
}

#[napi]
/// Get the side length of the output canvas
pub fn output_size() -> u32 {
  OUTPUT_SIZE
}

#[napi]
/// Get the suggested download filename for processed images
pub fn output_file_name() -> String {
  format!("resized-image-{size}x{size}.png", size = OUTPUT_SIZE)
}

/// Sniff and decode the input, accepting PNG and JPEG only.
fn load_input(input: &[u8]) -> Result<RgbaImage> {
  let format = image::guess_format(input).map_err(|e| {
    Error::new(
      Status::InvalidArg,
      format!("Failed to sniff image format: {}", e),
    )
  })?;

  if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
    return Err(Error::new(
      Status::InvalidArg,
      format!(
        "Unsupported image format {:?}: only PNG and JPEG are accepted",
        format
      ),
    ));
  }

  let img = image::load_from_memory_with_format(input, format)
    .map_err(|e| Error::new(Status::InvalidArg, format!("Failed to load image: {}", e)))?;

  Ok(img.to_rgba8())
}

fn process_image_internal(options: &ProcessImageOptions) -> Result<Vec<u8>> {
  let rgba = load_input(&options.input)?;

  // Resolve the background: override > detected > white. A transparent
  // border skips detection entirely.
  let background = if let Some(hex) = &options.background_color {
    parse_hex_color(hex).map_err(|e| {
      Error::new(
        Status::InvalidArg,
        format!("Invalid background color: {}", e),
      )
    })?
  } else if is_transparent(&rgba) {
    DEFAULT_BACKGROUND
  } else {
    detect_bg(&rgba).map_or(DEFAULT_BACKGROUND, |info| info.rgb())
  };

  let output = composite(&rgba, background)
    .map_err(|e| Error::new(Status::InvalidArg, format!("Failed to composite: {}", e)))?;

  let mut buffer = Cursor::new(Vec::new());
  output
    .write_to(&mut buffer, image::ImageFormat::Png)
    .map_err(|e| {
      Error::new(
        Status::GenericFailure,
        format!("Failed to write output image: {}", e),
      )
    })?;

  Ok(buffer.into_inner())
}
