//! RGBA layer buffers and the flattened RGB output image.

use crate::color::Color;

/// Side length of every cover image.
pub const COVER_SIZE: u32 = 800;

/// A 2D RGBA layer.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (straight alpha, row-major).
    pub data: Vec<Color>,
}

impl Canvas {
    /// Create a new canvas filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Create an empty, fully transparent canvas.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, Color::transparent())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[self.index(x, y)]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.data[idx] = color;
    }

    /// Set a pixel given signed coordinates; out-of-bounds writes are dropped.
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            self.set(x as u32, y as u32, color);
        }
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|c| c.a == 0.0)
    }

    /// Composite `layer` on top of this canvas (source-over).
    ///
    /// Both canvases must be the same size.
    pub fn composite_over(&mut self, layer: &Canvas) {
        debug_assert_eq!((self.width, self.height), (layer.width, layer.height));
        for (dst, src) in self.data.iter_mut().zip(&layer.data) {
            if src.a > 0.0 {
                *dst = src.over(dst);
            }
        }
    }

    /// Paste `patch` with its top-left corner at (`x`, `y`), using the
    /// patch's own alpha as the mask.
    ///
    /// Every channel, alpha included, moves toward the patch by the mask
    /// value: `dst = dst * (1 - m) + patch * m`. An opaque patch replaces the
    /// destination; a translucent patch over a transparent destination ends
    /// up with alpha `m * m`.
    pub fn paste_masked(&mut self, patch: &Canvas, x: i64, y: i64) {
        for py in 0..patch.height {
            let ty = y + py as i64;
            if ty < 0 || ty >= self.height as i64 {
                continue;
            }
            for px in 0..patch.width {
                let tx = x + px as i64;
                if tx < 0 || tx >= self.width as i64 {
                    continue;
                }
                let src = patch.get(px, py);
                if src.a <= 0.0 {
                    continue;
                }
                let dst = self.get(tx as u32, ty as u32);
                self.set(tx as u32, ty as u32, dst.lerp(&src, src.a));
            }
        }
    }

    /// Sample with bilinear interpolation at pixel-space coordinates,
    /// treating everything outside the canvas as transparent.
    pub fn sample_bilinear(&self, x: f64, y: f64) -> Color {
        let x = x - 0.5;
        let y = y - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let fetch = |ix: f64, iy: f64| -> [f64; 4] {
            if ix < 0.0 || iy < 0.0 || ix >= self.width as f64 || iy >= self.height as f64 {
                [0.0; 4]
            } else {
                let c = self.get(ix as u32, iy as u32);
                [c.r * c.a, c.g * c.a, c.b * c.a, c.a]
            }
        };

        // Interpolate premultiplied so transparent neighbours don't darken edges
        let c00 = fetch(x0, y0);
        let c10 = fetch(x0 + 1.0, y0);
        let c01 = fetch(x0, y0 + 1.0);
        let c11 = fetch(x0 + 1.0, y0 + 1.0);

        let mut out = [0.0; 4];
        for i in 0..4 {
            let top = c00[i] + (c10[i] - c00[i]) * fx;
            let bottom = c01[i] + (c11[i] - c01[i]) * fx;
            out[i] = top + (bottom - top) * fy;
        }

        if out[3] <= 1e-9 {
            return Color::transparent();
        }
        Color::rgba(out[0] / out[3], out[1] / out[3], out[2] / out[3], out[3])
    }

    /// Flatten to opaque 8-bit RGB, discarding alpha.
    pub fn flatten(&self) -> CoverImage {
        let mut data = Vec::with_capacity(self.data.len() * 3);
        for color in &self.data {
            data.extend_from_slice(&color.to_rgb8());
        }
        CoverImage {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Opaque 8-bit RGB raster, the final product of the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB bytes, `width * height * 3` long.
    pub data: Vec<u8>,
}

impl CoverImage {
    /// Number of channels per pixel.
    pub const CHANNELS: usize = 3;

    /// Get the RGB triple at the given coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * Self::CHANNELS;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}
