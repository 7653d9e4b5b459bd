use serde::{Deserialize, Serialize};

/// RGBA color. Constructors that take gamma-space input say so; everything
/// downstream of `to_linear` is linear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Gamma-space color from hue, saturation and value, all in `0..=1`.
    /// Hue wraps.
    pub fn hsv(h: f32, s: f32, v: f32) -> Self {
        let h = (h.fract() + 1.0).fract() * 6.0;
        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match i as i32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(r, g, b, 1.0)
    }

    /// sRGB to linear conversion, applied per color channel. Alpha passes
    /// through unchanged.
    pub fn to_linear(self) -> Self {
        Self {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: self.a,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_primary_red() {
        let c = Color::hsv(0.0, 1.0, 1.0);
        assert_eq!(c, Color::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn hsv_hue_wraps() {
        let a = Color::hsv(0.25, 0.5, 0.8);
        let b = Color::hsv(1.25, 0.5, 0.8);
        assert!((a.r - b.r).abs() < 1e-6);
        assert!((a.g - b.g).abs() < 1e-6);
        assert!((a.b - b.b).abs() < 1e-6);
    }

    #[test]
    fn to_linear_keeps_endpoints() {
        let black = Color::BLACK.to_linear();
        let white = Color::WHITE.to_linear();
        assert_eq!(black, Color::BLACK);
        assert!((white.r - 1.0).abs() < 1e-6);
        assert!((white.g - 1.0).abs() < 1e-6);
        assert!((white.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn to_linear_darkens_midtones() {
        let c = Color::new(0.5, 0.5, 0.5, 1.0).to_linear();
        assert!(c.r < 0.25);
        assert!(c.r > 0.2);
        assert_eq!(c.a, 1.0);
    }
}
