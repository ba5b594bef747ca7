//! HSV to RGB conversion.
//!
//! Uses the standard hexcone conversion. Each channel in `[0, 1]` is scaled
//! by 255 and truncated, so `1.0` maps to 255 and `0.7` maps to 178.

use std::fmt;

/// A hue/saturation/value triple, each component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in turns.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Value (brightness).
    pub v: f64,
}

impl Hsv {
    /// Convert to 8-bit RGB.
    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self.h, self.s, self.v)
    }
}

/// An 8-bit RGB color.
///
/// Serializes as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        [rgb.r, rgb.g, rgb.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Convert an HSV color with components in `[0, 1]` to RGB.
///
/// A hue of exactly `1.0` wraps to red, same as `0.0`.
///
/// Intermediate terms are rounded separately rather than fused, so channel
/// truncation agrees with the usual unfused formula.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    // `as` saturates, so out-of-range inputs clamp to [0, 255].
    let channel = |c: f64| (c * 255.0) as u8;
    Rgb::new(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0).g, 255);
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0).b, 255);
    }

    #[test]
    fn hue_one_wraps_to_red() {
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn zero_saturation_is_grey() {
        let grey = hsv_to_rgb(0.42, 0.0, 0.5);
        assert_eq!(grey, Rgb::new(127, 127, 127));
    }

    #[test]
    fn value_scales_and_truncates() {
        // 0.7 * 255 = 178.5 -> 178.
        let c = hsv_to_rgb(0.5, 1.0, 0.7);
        assert_eq!(c.r, 0);
        assert_eq!(c.g, 178);
        assert_eq!(c.b, 178);
    }

    #[test]
    fn unfused_rounding_truncates_exact_channels() {
        // Green is 0.5 * (1 - 0.9375 * 0.64) * 255, exactly 51.0 with
        // separate rounding and just under 51 with a fused multiply-add.
        assert_eq!(hsv_to_rgb(0.06, 0.9375, 0.5), Rgb::new(127, 51, 7));
    }

    #[test]
    fn black_at_zero_value() {
        assert_eq!(hsv_to_rgb(0.3, 0.8, 0.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn rgb_serializes_as_array() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).ok();
        assert_eq!(json.as_deref(), Some("[1,2,3]"));
        let back: Option<Rgb> = serde_json::from_str("[255,255,255]").ok();
        assert_eq!(back, Some(Rgb::WHITE));
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Rgb::new(255, 16, 0).to_string(), "#ff1000");
    }
}
