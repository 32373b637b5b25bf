use anyhow::{Context, Result};

/// Multiplier to expand hex color shorthand (e.g., F -> FF)
const HEX_SHORTHAND_MULTIPLIER: u8 = 17;

/// RGB color represented as [R, G, B] with values 0-255
pub type Color = [u8; 3];

/// A detected background color: RGB channels plus the `#rrggbb` form
/// handed to the UI and accepted back by the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorInfo {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub hex: String,
}

impl ColorInfo {
  pub fn from_rgb(color: Color) -> Self {
    Self {
      r: color[0],
      g: color[1],
      b: color[2],
      hex: color_to_hex(color),
    }
  }

  pub fn rgb(&self) -> Color {
    [self.r, self.g, self.b]
  }
}

/// Format a color as a lowercase `#rrggbb` string (always 7 characters)
pub fn color_to_hex(color: Color) -> String {
  format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Parse a hex color string into RGB
/// Supports: "#ff0000", "ff0000", "#f00", "f00"
pub fn parse_hex_color(hex: &str) -> Result<Color> {
  let hex = hex.trim_start_matches('#');

  let (r, g, b) = match hex.len() {
    3 => {
      // Expand shorthand: "f00" -> "ff0000"
      let r = u8::from_str_radix(&hex[0..1], 16).context("Invalid red component")?;
      let g = u8::from_str_radix(&hex[1..2], 16).context("Invalid green component")?;
      let b = u8::from_str_radix(&hex[2..3], 16).context("Invalid blue component")?;
      (
        r * HEX_SHORTHAND_MULTIPLIER,
        g * HEX_SHORTHAND_MULTIPLIER,
        b * HEX_SHORTHAND_MULTIPLIER,
      )
    }
    6 => {
      // Full hex color
      let r = u8::from_str_radix(&hex[0..2], 16).context("Invalid red component")?;
      let g = u8::from_str_radix(&hex[2..4], 16).context("Invalid green component")?;
      let b = u8::from_str_radix(&hex[4..6], 16).context("Invalid blue component")?;
      (r, g, b)
    }
    _ => anyhow::bail!("Hex color must be 3 or 6 characters long (got: {})", hex),
  };

  Ok([r, g, b])
}
