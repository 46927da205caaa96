//! Color parsing, blending and conversion helpers.
//!
//! Colors are parsed once at the boundary into [`Color`]; every helper is
//! exhaustive over its variants and keeps the encoding of the base color, so
//! blending a hex color yields a hex color and blending an `rgb(...)` color
//! yields an `rgb(...)` color.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fraction used by [`darken`] when blending toward black.
pub const DEFAULT_DARKEN_AMOUNT: f64 = 0.15;

/// Fraction used by [`lighten`] when blending toward white.
pub const DEFAULT_LIGHTEN_AMOUNT: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("Invalid color format: '{input}'")]
    InvalidFormat { input: String },

    #[error("Alpha must be between 0 and 1, got {alpha}")]
    AlphaOutOfRange { alpha: f64 },
}

/// A literal color in one of the encodings style variables use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// `#RRGGBB` (or `#RGB` shorthand on input)
    Hex(u8, u8, u8),
    /// `rgb(r,g,b)`
    Rgb(u8, u8, u8),
    /// `rgba(r,g,b,a)` with alpha in `0.0..=1.0`
    Rgba(u8, u8, u8, f64),
}

impl Color {
    pub const BLACK: Color = Color::Hex(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::Hex(0xff, 0xff, 0xff);

    pub fn channels(&self) -> (u8, u8, u8) {
        match *self {
            Color::Hex(r, g, b) | Color::Rgb(r, g, b) | Color::Rgba(r, g, b, _) => (r, g, b),
        }
    }

    /// Replace the channels while keeping the encoding (and alpha).
    fn with_channels(self, r: u8, g: u8, b: u8) -> Color {
        match self {
            Color::Hex(..) => Color::Hex(r, g, b),
            Color::Rgb(..) => Color::Rgb(r, g, b),
            Color::Rgba(_, _, _, alpha) => Color::Rgba(r, g, b, alpha),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        parse_functional(&normalized)
            .or_else(|| parse_hex_digits(&normalized).map(|(r, g, b)| Color::Hex(r, g, b)))
            .ok_or_else(|| ColorError::InvalidFormat {
                input: input.to_string(),
            })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hex(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Color::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({r},{g},{b},{a})"),
        }
    }
}

/// Blend `base` toward `target` by `fraction`.
///
/// The magnitude of `fraction` is the blend amount. Without an explicit
/// target, a negative fraction blends toward black and a non-negative one
/// toward white.
pub fn blend(fraction: f64, base: Color, target: Option<Color>) -> Color {
    let amount = fraction.abs();
    let target = target.unwrap_or(if fraction < 0.0 {
        Color::BLACK
    } else {
        Color::WHITE
    });

    let (r, g, b) = base.channels();
    let (tr, tg, tb) = target.channels();
    base.with_channels(mix(r, tr, amount), mix(g, tg, amount), mix(b, tb, amount))
}

/// Darken by [`DEFAULT_DARKEN_AMOUNT`].
pub fn darken(color: Color) -> Color {
    darken_by(color, DEFAULT_DARKEN_AMOUNT)
}

pub fn darken_by(color: Color, amount: f64) -> Color {
    blend(-amount.abs(), color, None)
}

/// Lighten by [`DEFAULT_LIGHTEN_AMOUNT`].
pub fn lighten(color: Color) -> Color {
    lighten_by(color, DEFAULT_LIGHTEN_AMOUNT)
}

pub fn lighten_by(color: Color, amount: f64) -> Color {
    blend(amount.abs(), color, None)
}

/// Convert a 3- or 6-digit hex color, with or without `#`, to `rgba(...)`.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<Color, ColorError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ColorError::AlphaOutOfRange { alpha });
    }
    let (r, g, b) = parse_hex_digits(hex.trim()).ok_or_else(|| ColorError::InvalidFormat {
        input: hex.to_string(),
    })?;
    Ok(Color::Rgba(r, g, b, alpha))
}

// Rounds half up, matching how style sheets round channel offsets.
fn mix(from: u8, to: u8, amount: f64) -> u8 {
    let from = f64::from(from);
    let offset = ((f64::from(to) - from) * amount + 0.5).floor();
    (offset + from).clamp(0.0, 255.0) as u8
}

fn parse_hex_digits(input: &str) -> Option<(u8, u8, u8)> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some((
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ))
}

fn parse_functional(input: &str) -> Option<Color> {
    let (body, has_alpha) = if let Some(rest) = input.strip_prefix("rgba(") {
        (rest, true)
    } else if let Some(rest) = input.strip_prefix("rgb(") {
        (rest, false)
    } else {
        return None;
    };

    let body = body.strip_suffix(')')?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();

    match (has_alpha, parts.as_slice()) {
        (false, [r, g, b]) => Some(Color::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?)),
        (true, [r, g, b, a]) => {
            let alpha: f64 = a.parse().ok()?;
            if !(0.0..=1.0).contains(&alpha) {
                return None;
            }
            Some(Color::Rgba(
                r.parse().ok()?,
                g.parse().ok()?,
                b.parse().ok()?,
                alpha,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    #[test]
    fn test_parse_detects_encoding() {
        assert_eq!("#FB0206".parse::<Color>(), Ok(Color::Hex(0xfb, 0x02, 0x06)));
        assert_eq!("#fff".parse::<Color>(), Ok(Color::Hex(0xff, 0xff, 0xff)));
        assert_eq!(
            "rgb(52, 52, 52)".parse::<Color>(),
            Ok(Color::Rgb(52, 52, 52))
        );
        assert_eq!(
            "rgba(52,52,52,0.0)".parse::<Color>(),
            Ok(Color::Rgba(52, 52, 52, 0.0))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_err!("notacolor".parse::<Color>());
        assert_err!("#12345".parse::<Color>());
        assert_err!("rgb(1,2)".parse::<Color>());
        assert_err!("rgb(256,0,0)".parse::<Color>());
        assert_err!("rgba(0,0,0,2)".parse::<Color>());
    }

    #[test]
    fn test_hex_to_rgba_expands_shorthand() {
        let short = assert_ok!(hex_to_rgba("#FFF", 0.5));
        let long = assert_ok!(hex_to_rgba("#FFFFFF", 0.5));

        assert_eq!(short, long);
        assert_eq!(short.to_string(), "rgba(255,255,255,0.5)");
    }

    #[test]
    fn test_hex_to_rgba_accepts_missing_hash() {
        let color = assert_ok!(hex_to_rgba("086dd6", 1.0));
        assert_eq!(color.to_string(), "rgba(8,109,214,1)");
    }

    #[test]
    fn test_hex_to_rgba_rejects_invalid_input() {
        let error = assert_err!(hex_to_rgba("notacolor", 1.0));
        assert_eq!(
            error,
            ColorError::InvalidFormat {
                input: "notacolor".to_string()
            }
        );
        assert_err!(hex_to_rgba("", 1.0));
        assert_err!(hex_to_rgba("rgb(1,2,3)", 1.0));
    }

    #[test]
    fn test_hex_to_rgba_rejects_alpha_out_of_range() {
        assert_eq!(
            hex_to_rgba("#fff", 2.0),
            Err(ColorError::AlphaOutOfRange { alpha: 2.0 })
        );
        assert_err!(hex_to_rgba("#fff", -0.1));
        assert_err!(hex_to_rgba("#fff", f64::NAN));

        let opaque = assert_ok!(hex_to_rgba("#fff", 1.0));
        assert_eq!(assert_ok!(opaque.to_string().parse::<Color>()), opaque);
    }

    #[test]
    fn test_darken_and_lighten_defaults() {
        assert_eq!(darken(Color::WHITE).to_string(), "#d9d9d9");
        assert_eq!(lighten(Color::BLACK).to_string(), "#404040");
    }

    #[test]
    fn test_blend_keeps_base_encoding() {
        let mid = blend(0.5, Color::Rgb(0, 0, 0), Some(Color::WHITE));
        assert_eq!(mid, Color::Rgb(128, 128, 128));

        let faded = blend(-0.5, Color::Rgba(200, 100, 50, 0.4), None);
        assert_eq!(faded, Color::Rgba(100, 50, 25, 0.4));
    }

    #[test]
    fn test_blend_with_zero_fraction_is_identity() {
        let base = Color::Hex(0x12, 0x34, 0x56);
        assert_eq!(blend(0.0, base, None), base);
    }
}
