//! Color parsing and luminance math.
//!
//! Palette entries are CSS color strings. This module parses the subset the
//! theme relies on (hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`) and implements
//! the WCAG relative luminance and contrast ratio formulas, plus
//! lightness-based [`lighten`] and [`darken`].
//!
//! ```
//! use neighbor_theme::color::{contrast_ratio, darken};
//!
//! let ratio = contrast_ratio("#000", "#fff").unwrap();
//! assert!((ratio - 21.0).abs() < 1e-9);
//! assert_eq!(darken("#fff", 0.5).unwrap(), "rgb(128, 128, 128)");
//! ```

use std::{fmt, str::FromStr};

use tracing::warn;

use crate::error::ThemeError;

/// An sRGB color with 8-bit channels and a straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color with an explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a CSS color literal.
    ///
    /// Supported forms are `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
    /// `rgb()`, `rgba()`, `hsl()` and `hsla()`. Named colors are rejected.
    pub fn parse(input: &str) -> Result<Self, ThemeError> {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(input, hex);
        }

        let Some(open) = trimmed.find('(') else {
            return Err(ThemeError::invalid_color(input, "unsupported color format"));
        };
        let Some(body) = trimmed[open + 1..].strip_suffix(')') else {
            return Err(ThemeError::invalid_color(input, "missing closing parenthesis"));
        };
        let function = trimmed[..open].trim().to_ascii_lowercase();
        let parts: Vec<&str> = body
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        match function.as_str() {
            "rgb" | "rgba" => parse_rgb(input, &parts),
            "hsl" | "hsla" => parse_hsl(input, &parts),
            _ => Err(ThemeError::invalid_color(input, "unsupported color format")),
        }
    }

    /// WCAG relative luminance in `[0, 1]`. Alpha is ignored.
    pub fn relative_luminance(self) -> f64 {
        let r = srgb_to_linear_channel(self.r);
        let g = srgb_to_linear_channel(self.g);
        let b = srgb_to_linear_channel(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG contrast ratio against `other`, in `[1, 21]`.
    pub fn contrast_ratio(self, other: Color) -> f64 {
        let la = self.relative_luminance();
        let lb = other.relative_luminance();
        let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Moves HSL lightness toward white by `coefficient`.
    pub fn lighten(self, coefficient: f64) -> Self {
        let coefficient = clamp_coefficient(coefficient);
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, l + (1.0 - l) * coefficient, self.a)
    }

    /// Moves HSL lightness toward black by `coefficient`.
    pub fn darken(self, coefficient: f64) -> Self {
        let coefficient = clamp_coefficient(coefficient);
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, l * (1.0 - coefficient), self.a)
    }

    /// Formats the color as `#rrggbb`, or `#rrggbbaa` when translucent.
    pub fn to_hex(self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (f64::from(self.a) * 255.0).round() as u8;
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, alpha
            )
        }
    }

    /// Hue in degrees, saturation and lightness in `[0, 1]`.
    pub fn to_hsl(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;
        if delta == 0.0 {
            return (0.0, 0.0, l);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        (h, s, l)
    }

    /// Builds a color from hue in degrees and saturation/lightness in
    /// `[0, 1]`.
    pub fn from_hsl(h: f64, s: f64, l: f64, a: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = h.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        Self {
            r: to_channel(r + m),
            g: to_channel(g + m),
            b: to_channel(b + m),
            a,
        }
    }
}

impl FromStr for Color {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Relative luminance of a CSS color string.
pub fn relative_luminance(color: &str) -> Result<f64, ThemeError> {
    Ok(Color::parse(color)?.relative_luminance())
}

/// Contrast ratio between two CSS color strings.
pub fn contrast_ratio(foreground: &str, background: &str) -> Result<f64, ThemeError> {
    Ok(Color::parse(foreground)?.contrast_ratio(Color::parse(background)?))
}

/// Lightens a CSS color string, returning an `rgb()`/`rgba()` literal.
pub fn lighten(color: &str, coefficient: f64) -> Result<String, ThemeError> {
    Ok(Color::parse(color)?.lighten(coefficient).to_string())
}

/// Darkens a CSS color string, returning an `rgb()`/`rgba()` literal.
pub fn darken(color: &str, coefficient: f64) -> Result<String, ThemeError> {
    Ok(Color::parse(color)?.darken(coefficient).to_string())
}

fn srgb_to_linear_channel(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn to_channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn clamp_coefficient(coefficient: f64) -> f64 {
    if !(0.0..=1.0).contains(&coefficient) {
        warn!("color coefficient {coefficient} is outside [0, 1] and was clamped");
    }
    coefficient.clamp(0.0, 1.0)
}

fn parse_hex(input: &str, hex: &str) -> Result<Color, ThemeError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ThemeError::invalid_color(input, "non-hex digit"));
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|d| d * 17);
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    let parsed = match hex.len() {
        3 => digit(0).and_then(|r| Ok(Color::rgb(r, digit(1)?, digit(2)?))),
        4 => digit(0).and_then(|r| {
            let a = f32::from(digit(3)?) / 255.0;
            Ok(Color::rgba(r, digit(1)?, digit(2)?, a))
        }),
        6 => pair(0).and_then(|r| Ok(Color::rgb(r, pair(2)?, pair(4)?))),
        8 => pair(0).and_then(|r| {
            let a = f32::from(pair(6)?) / 255.0;
            Ok(Color::rgba(r, pair(2)?, pair(4)?, a))
        }),
        _ => return Err(ThemeError::invalid_color(input, "hex colors need 3, 4, 6 or 8 digits")),
    };
    parsed.map_err(|_| ThemeError::invalid_color(input, "non-hex digit"))
}

fn parse_number(input: &str, part: &str) -> Result<f64, ThemeError> {
    part.parse::<f64>()
        .map_err(|_| ThemeError::invalid_color(input, "expected a number"))
}

fn parse_alpha(input: &str, parts: &[&str], index: usize) -> Result<f32, ThemeError> {
    let Some(part) = parts.get(index) else {
        return Ok(1.0);
    };
    let alpha = match part.strip_suffix('%') {
        Some(percent) => parse_number(input, percent)? / 100.0,
        None => parse_number(input, part)?,
    };
    Ok(alpha.clamp(0.0, 1.0) as f32)
}

fn parse_rgb(input: &str, parts: &[&str]) -> Result<Color, ThemeError> {
    if !(3..=4).contains(&parts.len()) {
        return Err(ThemeError::invalid_color(input, "rgb() takes 3 or 4 components"));
    }
    let mut channels = [0u8; 3];
    for (channel, part) in channels.iter_mut().zip(parts) {
        let value = match part.strip_suffix('%') {
            Some(percent) => parse_number(input, percent)? / 100.0 * 255.0,
            None => parse_number(input, part)?,
        };
        *channel = value.clamp(0.0, 255.0).round() as u8;
    }
    let [r, g, b] = channels;
    Ok(Color::rgba(r, g, b, parse_alpha(input, parts, 3)?))
}

fn parse_hsl(input: &str, parts: &[&str]) -> Result<Color, ThemeError> {
    if !(3..=4).contains(&parts.len()) {
        return Err(ThemeError::invalid_color(input, "hsl() takes 3 or 4 components"));
    }
    let hue = parse_number(input, parts[0].trim_end_matches("deg"))?;
    let percent = |part: &str| -> Result<f64, ThemeError> {
        let value = part
            .strip_suffix('%')
            .ok_or_else(|| ThemeError::invalid_color(input, "saturation and lightness need %"))?;
        Ok(parse_number(input, value)? / 100.0)
    };
    let saturation = percent(parts[1])?;
    let lightness = percent(parts[2])?;
    Ok(Color::from_hsl(
        hue,
        saturation,
        lightness,
        parse_alpha(input, parts, 3)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#0079E1").unwrap(), Color::rgb(0, 121, 225));
        assert_eq!(Color::parse("#00000080").unwrap().a, 128.0 / 255.0);
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#ggg").is_err());
    }

    #[test]
    fn test_parse_functional_forms() {
        assert_eq!(
            Color::parse("rgba(0, 0, 0, 0.87)").unwrap(),
            Color::rgba(0, 0, 0, 0.87)
        );
        assert_eq!(Color::parse("rgb(255 0 0)").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(
            Color::parse("hsl(0, 100%, 50%)").unwrap(),
            Color::rgb(255, 0, 0)
        );
        assert_eq!(
            Color::parse("hsl(120, 100%, 25%)").unwrap(),
            Color::rgb(0, 128, 0)
        );
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let err = Color::parse("rebeccapurple").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { .. }));
        assert!(relative_luminance("rgb(1, 2)").is_err());
        assert!(contrast_ratio("#fff", "nope").is_err());
    }

    #[test]
    fn test_luminance_bounds() {
        assert_eq!(relative_luminance("#000").unwrap(), 0.0);
        assert!((relative_luminance("#fff").unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_contrast_ratio_is_symmetric() {
        let a = contrast_ratio("#0079E1", "#fff").unwrap();
        let b = contrast_ratio("#fff", "#0079E1").unwrap();
        assert_eq!(a, b);
        assert!((a - 4.355).abs() < 0.01);
        assert_eq!(contrast_ratio("#777", "#777").unwrap(), 1.0);
    }

    #[test]
    fn test_lighten_and_darken() {
        assert_eq!(lighten("#000", 0.5).unwrap(), "rgb(128, 128, 128)");
        assert_eq!(lighten("#000", 1.0).unwrap(), "rgb(255, 255, 255)");
        assert_eq!(darken("#fff", 1.0).unwrap(), "rgb(0, 0, 0)");
        assert_eq!(darken("#fff", 0.0).unwrap(), "rgb(255, 255, 255)");
        assert_eq!(darken("rgba(255, 0, 0, 0.5)", 0.5).unwrap(), "rgba(128, 0, 0, 0.5)");
    }

    #[test]
    fn test_lighten_keeps_hue() {
        let base = Color::parse("#0079E1").unwrap();
        let (h0, _, l0) = base.to_hsl();
        let (h1, _, l1) = base.lighten(0.2).to_hsl();
        assert!((h0 - h1).abs() < 1.0);
        assert!(l1 > l0);
    }

    #[test]
    fn test_out_of_range_coefficient_is_clamped() {
        assert_eq!(lighten("#000", 3.0).unwrap(), "rgb(255, 255, 255)");
        assert_eq!(darken("#fff", -1.0).unwrap(), "rgb(255, 255, 255)");
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(Color::rgb(0, 121, 225).to_hex(), "#0079e1");
        assert_eq!(Color::rgba(0, 0, 0, 0.0).to_hex(), "#00000000");
    }
}
