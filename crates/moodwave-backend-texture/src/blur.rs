//! Gaussian blur for whole layers.

use crate::canvas::Canvas;
use crate::color::Color;

/// Number of box passes used to approximate a Gaussian.
const BOX_PASSES: usize = 3;

/// Box radius whose `BOX_PASSES`-fold convolution has standard deviation
/// close to `sigma`.
pub fn box_radius_for_sigma(sigma: f64) -> usize {
    if sigma <= 0.0 {
        return 0;
    }
    let ideal_width = (12.0 * sigma * sigma / BOX_PASSES as f64 + 1.0).sqrt();
    ((ideal_width - 1.0) / 2.0).round().max(0.0) as usize
}

/// Blur a layer in place with a Gaussian of the given radius (sigma, in
/// pixels).
///
/// Color is blurred premultiplied so that transparent pixels contribute
/// coverage but not their (black) color.
pub fn gaussian_blur(canvas: &mut Canvas, sigma: f64) {
    let r = box_radius_for_sigma(sigma);
    if r == 0 || canvas.data.is_empty() {
        return;
    }

    let w = canvas.width as usize;
    let h = canvas.height as usize;
    let n = w * h;

    let mut planes: [Vec<f64>; 4] = [
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
    ];
    for c in &canvas.data {
        planes[0].push(c.r * c.a);
        planes[1].push(c.g * c.a);
        planes[2].push(c.b * c.a);
        planes[3].push(c.a);
    }

    let mut scratch = vec![0.0; n];
    for plane in planes.iter_mut() {
        for _ in 0..BOX_PASSES {
            box_blur_h(plane, &mut scratch, w, h, r);
            box_blur_v(&scratch, plane, w, h, r);
        }
    }

    for (i, out) in canvas.data.iter_mut().enumerate() {
        let a = planes[3][i];
        *out = if a <= 1e-9 {
            Color::transparent()
        } else {
            Color::rgba(planes[0][i] / a, planes[1][i] / a, planes[2][i] / a, a).clamp()
        };
    }
}

// Sliding-window box blur, edges clamped to the border pixel.
fn box_blur_h(src: &[f64], dst: &mut [f64], w: usize, h: usize, r: usize) {
    let d = (2 * r + 1) as f64;
    let last = w - 1;
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        let out = &mut dst[y * w..(y + 1) * w];

        let mut sum = 0.0;
        for k in 0..=(2 * r) {
            sum += row[k.saturating_sub(r).min(last)];
        }
        out[0] = sum / d;

        for x in 1..w {
            let leaving = (x as isize - r as isize - 1).max(0) as usize;
            let entering = (x + r).min(last);
            sum += row[entering] - row[leaving];
            out[x] = sum / d;
        }
    }
}

fn box_blur_v(src: &[f64], dst: &mut [f64], w: usize, h: usize, r: usize) {
    let d = (2 * r + 1) as f64;
    let last = h - 1;
    for x in 0..w {
        let mut sum = 0.0;
        for k in 0..=(2 * r) {
            sum += src[k.saturating_sub(r).min(last) * w + x];
        }
        dst[x] = sum / d;

        for y in 1..h {
            let leaving = (y as isize - r as isize - 1).max(0) as usize;
            let entering = (y + r).min(last);
            sum += src[entering * w + x] - src[leaving * w + x];
            dst[y * w + x] = sum / d;
        }
    }
}
