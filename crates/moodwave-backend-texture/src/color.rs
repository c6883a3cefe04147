//! Color utilities for cover compositing.

/// RGBA color with f64 components (0.0 to 1.0 range), straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black, the initial state of every layer.
    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Create a grayscale color.
    pub const fn gray(value: f64) -> Self {
        Self::rgb(value, value, value)
    }

    /// Create white.
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(&self, a: f64) -> Color {
        Color { a, ..*self }
    }

    /// Same color with an 8-bit alpha.
    pub fn with_alpha8(&self, a: u8) -> Color {
        self.with_alpha(a as f64 / 255.0)
    }

    /// Linearly interpolate between two colors (all four channels).
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Source-over: `self` drawn on top of `dst`.
    pub fn over(&self, dst: &Color) -> Color {
        let src_a = self.a;
        let dst_a = dst.a;
        let out_a = src_a + dst_a * (1.0 - src_a);

        if out_a < 0.0001 {
            return Color::transparent();
        }

        Color::rgba(
            (self.r * src_a + dst.r * dst_a * (1.0 - src_a)) / out_a,
            (self.g * src_a + dst.g * dst_a * (1.0 - src_a)) / out_a,
            (self.b * src_a + dst.b * dst_a * (1.0 - src_a)) / out_a,
            out_a,
        )
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Convert to 8-bit RGB, discarding alpha.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }

    /// Create from 8-bit RGB.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0] as f64 / 255.0,
            g: rgb[1] as f64 / 255.0,
            b: rgb[2] as f64 / 255.0,
            a: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::transparent()
    }
}
