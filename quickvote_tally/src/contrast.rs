//! WCAG luminance and contrast helpers.
//!
//! All the functions take colors as hex strings (`#rrggbb`, the `#` being
//! optional) because this is how the colors travel between the display
//! surfaces. A malformed string is reported as
//! [`ColorError::InvalidColorFormat`] and is never silently replaced.

use crate::config::{ColorError, TextColor};

/// A color with 8 bits per channel.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Lowercase `#rrggbb` notation.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses a `#rrggbb` or `rrggbb` color. Digits may be of either case.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidColorFormat(hex.to_string()));
    }
    let channel = |idx: usize| {
        u8::from_str_radix(&digits[idx..idx + 2], 16)
            .map_err(|_| ColorError::InvalidColorFormat(hex.to_string()))
    };
    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

pub fn rgb_to_hex(rgb: &Rgb) -> String {
    rgb.to_hex()
}

fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a color, between 0 (black) and 1 (white).
pub fn relative_luminance(hex: &str) -> Result<f64, ColorError> {
    let rgb = hex_to_rgb(hex)?;
    Ok(0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b))
}

/// The text color to use on top of the given background.
///
/// Backgrounds strictly brighter than half luminance get dark text.
pub fn text_color(background: &str) -> Result<TextColor, ColorError> {
    if relative_luminance(background)? > 0.5 {
        Ok(TextColor::Dark)
    } else {
        Ok(TextColor::Light)
    }
}

/// Contrast ratio between two colors, from 1 (identical) to 21 (black on white).
/// The order of the arguments does not matter.
pub fn contrast_ratio(hex1: &str, hex2: &str) -> Result<f64, ColorError> {
    let l1 = relative_luminance(hex1)?;
    let l2 = relative_luminance(hex2)?;
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    Ok((lighter + 0.05) / (darker + 0.05))
}
