//! Shape rasterization.
//!
//! All shapes write their color straight into the target layer, replacing
//! whatever was there; blending happens later when the layer is composited.
//! Bounding boxes are inclusive on both ends and may lie partly off-canvas.

use crate::canvas::Canvas;
use crate::color::Color;

/// Fill the disc of radius `r` centered at (`cx`, `cy`).
pub fn fill_circle(canvas: &mut Canvas, cx: i64, cy: i64, r: i64, color: Color) {
    let r2 = r * r;
    let y_min = (cy - r).max(0);
    let y_max = (cy + r).min(canvas.height as i64 - 1);
    let x_min = (cx - r).max(0);
    let x_max = (cx + r).min(canvas.width as i64 - 1);

    for y in y_min..=y_max {
        let dy = y - cy;
        for x in x_min..=x_max {
            let dx = x - cx;
            if dx * dx + dy * dy <= r2 {
                canvas.set(x as u32, y as u32, color);
            }
        }
    }
}

/// Fill the axis-aligned rectangle `[x0, x1] × [y0, y1]`.
pub fn fill_rect(canvas: &mut Canvas, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
    let y_min = y0.max(0);
    let y_max = y1.min(canvas.height as i64 - 1);
    let x_min = x0.max(0);
    let x_max = x1.min(canvas.width as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            canvas.set(x as u32, y as u32, color);
        }
    }
}

/// Fill a rectangle whose corners are rounded with `radius`.
pub fn fill_rounded_rect(
    canvas: &mut Canvas,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    radius: i64,
    color: Color,
) {
    // Never let the corners overlap
    let radius = radius.min((x1 - x0) / 2).min((y1 - y0) / 2).max(0);
    let r2 = radius * radius;

    let y_min = y0.max(0);
    let y_max = y1.min(canvas.height as i64 - 1);
    let x_min = x0.max(0);
    let x_max = x1.min(canvas.width as i64 - 1);

    for y in y_min..=y_max {
        let ny = y.clamp(y0 + radius, y1 - radius);
        for x in x_min..=x_max {
            let nx = x.clamp(x0 + radius, x1 - radius);
            let dx = x - nx;
            let dy = y - ny;
            if dx * dx + dy * dy <= r2 {
                canvas.set(x as u32, y as u32, color);
            }
        }
    }
}

/// Stroke the outline of `[x0, x1] × [y0, y1]` with the given width.
///
/// The stroke grows inward from the bounding box, so the box stays the
/// outer edge regardless of width.
pub fn stroke_rect(
    canvas: &mut Canvas,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    width: i64,
    color: Color,
) {
    for i in 0..width.max(1) {
        let (l, t, r, b) = (x0 + i, y0 + i, x1 - i, y1 - i);
        if l > r || t > b {
            break;
        }
        fill_rect(canvas, l, t, r, t, color);
        fill_rect(canvas, l, b, r, b, color);
        fill_rect(canvas, l, t, l, b, color);
        fill_rect(canvas, r, t, r, b, color);
    }
}

/// Fill a simple polygon using even-odd scanlines sampled at integer rows.
pub fn fill_polygon(canvas: &mut Canvas, points: &[(i64, i64)], color: Color) {
    if points.len() < 3 {
        return;
    }

    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0).max(0);
    let y_max = points
        .iter()
        .map(|p| p.1)
        .max()
        .unwrap_or(0)
        .min(canvas.height as i64 - 1);

    let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
    for y in y_min..=y_max {
        crossings.clear();
        let fy = y as f64;

        for i in 0..points.len() {
            let (ax, ay) = points[i];
            let (bx, by) = points[(i + 1) % points.len()];
            if ay == by {
                continue;
            }
            let (top, bottom) = if ay < by { ((ax, ay), (bx, by)) } else { ((bx, by), (ax, ay)) };
            // Half-open in y; the last row closes only edges that end on it
            let in_span =
                fy >= top.1 as f64 && (fy < bottom.1 as f64 || (y == y_max && y == bottom.1));
            if !in_span {
                continue;
            }
            let t = (fy - top.1 as f64) / (bottom.1 - top.1) as f64;
            crossings.push(top.0 as f64 + t * (bottom.0 - top.0) as f64);
        }

        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let start = pair[0].ceil() as i64;
            let end = pair[1].floor() as i64;
            fill_rect(canvas, start, y, end, y, color);
        }
    }
}

/// Draw a one-pixel line (Bresenham).
pub fn draw_line(canvas: &mut Canvas, from: (i64, i64), to: (i64, i64), color: Color) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        canvas.put(x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Stroke a closed polygon outline with one-pixel lines.
pub fn stroke_polygon(canvas: &mut Canvas, points: &[(i64, i64)], color: Color) {
    for i in 0..points.len() {
        draw_line(canvas, points[i], points[(i + 1) % points.len()], color);
    }
}

/// Return `src` rotated counter-clockwise by `degrees` about its center,
/// keeping the same size. Corners that rotate out are cropped, uncovered
/// area is transparent. Resampling is bilinear so edges stay smooth.
pub fn rotate(src: &Canvas, degrees: f64) -> Canvas {
    let mut out = Canvas::transparent(src.width, src.height);
    let (sin, cos) = degrees.to_radians().sin_cos();
    let cx = src.width as f64 / 2.0;
    let cy = src.height as f64 / 2.0;

    for y in 0..src.height {
        for x in 0..src.width {
            // Map each output pixel center back into the source (y axis points down)
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let sx = cos * dx - sin * dy + cx;
            let sy = sin * dx + cos * dy + cy;
            let sample = src.sample_bilinear(sx, sy);
            if sample.a > 0.0 {
                out.set(x, y, sample);
            }
        }
    }

    out
}
