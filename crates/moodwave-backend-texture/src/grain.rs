//! Film grain: a monochrome Gaussian noise field at very low opacity.

use moodwave_spec::rng::gen_gaussian;
use rand::Rng;

use crate::canvas::Canvas;
use crate::color::Color;

/// Standard deviation of the noise around mid-gray, in 8-bit levels.
pub const GRAIN_SIGMA: f64 = 15.0;

/// Flat alpha applied to the whole grain layer.
pub const GRAIN_ALPHA: u8 = 15;

/// Fill a layer with gray noise centered on 128 at alpha [`GRAIN_ALPHA`].
pub fn grain_layer<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Canvas {
    let mut canvas = Canvas::transparent(width, height);
    let alpha = GRAIN_ALPHA as f64 / 255.0;

    for pixel in canvas.data.iter_mut() {
        let level = (128.0 + gen_gaussian(rng, GRAIN_SIGMA)).round().clamp(0.0, 255.0);
        *pixel = Color::gray(level / 255.0).with_alpha(alpha);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodwave_spec::seeded_rng;

    #[test]
    fn test_grain_is_gray_with_flat_alpha() {
        let layer = grain_layer(16, 16, &mut seeded_rng(3));
        for p in &layer.data {
            assert_eq!(p.r, p.g);
            assert_eq!(p.g, p.b);
            assert_eq!(p.to_rgba8()[3], GRAIN_ALPHA);
        }
    }

    #[test]
    fn test_grain_barely_moves_a_flat_color() {
        let mut base = Canvas::new(64, 64, Color::from_rgb8([200, 40, 90]));
        base.composite_over(&grain_layer(64, 64, &mut seeded_rng(9)));

        for p in &base.data {
            let [r, g, b] = p.to_rgb8();
            // 15/255 of the widest possible gap (0..255) is at most 13 levels
            assert!((r as i32 - 200).abs() <= 13);
            assert!((g as i32 - 40).abs() <= 13);
            assert!((b as i32 - 90).abs() <= 13);
        }
    }
}
