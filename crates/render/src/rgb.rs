//! Opaque 8-bit sRGB colors.
//!
//! Parsing accepts any CSS color string the `color` crate understands; the
//! alpha channel is dropped. Interpolation happens per channel in sRGB space
//! and rounds to the nearest integer, so `lerp` results are stable text.

use std::fmt;
use std::str::FromStr;

use color::{DynamicColor, Srgb};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    pub input: String,
    pub reason: String,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color `{}`: {}", self.input, self.reason)
    }
}

impl std::error::Error for ColorParseError {}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(css: &str) -> Result<Self, ColorParseError> {
        let dynamic = DynamicColor::from_str(css.trim()).map_err(|err| ColorParseError {
            input: css.to_string(),
            reason: err.to_string(),
        })?;
        let rgba = dynamic.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self::new(rgba.r, rgba.g, rgba.b))
    }

    /// Channel-wise interpolation; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self::new(mix(self.r, to.r), mix(self.g, to.g), mix(self.b, to.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Rgb> for svg::node::Value {
    fn from(color: Rgb) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Rgb;

    #[test]
    fn parses_hex_and_functional_notation() {
        assert_eq!(Rgb::parse("#B71C1C").unwrap(), Rgb::new(183, 28, 28));
        assert_eq!(Rgb::parse("rgb(243, 240, 225)").unwrap(), Rgb::new(243, 240, 225));
        assert_eq!(Rgb::parse(" #1d7d0a ").unwrap(), Rgb::new(29, 125, 10));
    }

    #[test]
    fn rejects_garbage() {
        let err = Rgb::parse("not-a-color").unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn lerp_rounds_and_clamps() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(255, 100, 3);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 50, 2));
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, f64::NAN), a);
    }

    #[test]
    fn formats_as_css() {
        let c = Rgb::new(223, 226, 232);
        assert_eq!(c.to_string(), "rgb(223, 226, 232)");
        assert_eq!(c.to_hex(), "#dfe2e8");
    }
}
