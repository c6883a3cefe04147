//! Cover layer stages.
//!
//! Each stage renders one full-canvas RGBA layer from the shared
//! [`LayerContext`]. The compositor stacks them in a fixed order; see
//! [`standard_layers`].

use moodwave_spec::{Genre, Mood};
use rand::{Rng, RngCore};

use crate::blur::gaussian_blur;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::grain::grain_layer;
use crate::palette::Palette;
use crate::raster::{
    fill_circle, fill_polygon, fill_rect, fill_rounded_rect, rotate, stroke_polygon, stroke_rect,
};

/// Everything a stage may read while rendering.
#[derive(Debug, Clone)]
pub struct LayerContext<'a> {
    pub width: u32,
    pub height: u32,
    pub palette: &'a Palette,
    pub mood: &'a Mood,
    pub genre: &'a Genre,
    pub tempo: u32,
}

/// One stage of the cover pipeline.
pub trait CoverLayer: Send + Sync {
    /// Short stage name for logs.
    fn name(&self) -> &'static str;

    /// Render this stage into a fresh layer of the context's size.
    fn render(&self, ctx: &LayerContext<'_>, rng: &mut dyn RngCore) -> Canvas;
}

/// The five stages in compositing order: background, bokeh, foreground,
/// frame, grain.
pub fn standard_layers() -> Vec<Box<dyn CoverLayer>> {
    vec![
        Box::new(Background),
        Box::new(Bokeh),
        Box::new(Foreground),
        Box::new(Frame),
        Box::new(Grain),
    ]
}

fn pick_accent(palette: &Palette, rng: &mut dyn RngCore) -> Color {
    palette.accent_color(rng.gen_range(0..palette.accents.len()))
}

// ============================================================================
// Background
// ============================================================================

/// Opaque vertical gradient from `bg_start` (top) to `bg_end` (bottom).
#[derive(Debug, Clone, Copy, Default)]
pub struct Background;

impl Background {
    /// 8-bit color for row `y`, truncated per channel.
    pub fn row_color(palette: &Palette, y: u32, height: u32) -> [u8; 3] {
        let ratio = y as f64 / height as f64;
        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let start = palette.bg_start[i] as f64;
            let end = palette.bg_end[i] as f64;
            *channel = (start * (1.0 - ratio) + end * ratio) as u8;
        }
        out
    }
}

impl CoverLayer for Background {
    fn name(&self) -> &'static str {
        "background"
    }

    fn render(&self, ctx: &LayerContext<'_>, _rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::transparent(ctx.width, ctx.height);
        for y in 0..ctx.height {
            let color = Color::from_rgb8(Self::row_color(ctx.palette, y, ctx.height));
            fill_rect(&mut canvas, 0, y as i64, ctx.width as i64 - 1, y as i64, color);
        }
        canvas
    }
}

// ============================================================================
// Bokeh
// ============================================================================

/// Large, faint accent circles, blurred as a whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bokeh;

impl Bokeh {
    pub const COUNT: usize = 15;
    /// How far past each edge a center may land.
    pub const OVERSCAN: i64 = 100;
    pub const MIN_RADIUS: i64 = 100;
    pub const MAX_RADIUS: i64 = 400;
    pub const ALPHA: u8 = 50;
    pub const BLUR_SIGMA: f64 = 60.0;
}

impl CoverLayer for Bokeh {
    fn name(&self) -> &'static str {
        "bokeh"
    }

    fn render(&self, ctx: &LayerContext<'_>, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::transparent(ctx.width, ctx.height);
        let (w, h) = (ctx.width as i64, ctx.height as i64);

        for _ in 0..Self::COUNT {
            let x = rng.gen_range(-Self::OVERSCAN..=w + Self::OVERSCAN);
            let y = rng.gen_range(-Self::OVERSCAN..=h + Self::OVERSCAN);
            let radius = rng.gen_range(Self::MIN_RADIUS..=Self::MAX_RADIUS);
            let color = pick_accent(ctx.palette, rng).with_alpha8(Self::ALPHA);
            fill_circle(&mut canvas, x, y, radius, color);
        }

        gaussian_blur(&mut canvas, Self::BLUR_SIGMA);
        canvas
    }
}

// ============================================================================
// Foreground
// ============================================================================

/// Shape family used for the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeFamily {
    /// Triangles and rotated squares, chosen 50/50 per shape.
    Shards,
    /// Filled circles.
    Circles,
    /// Rounded rectangles.
    RoundedRects,
}

impl ShapeFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeFamily::Shards => "shards",
            ShapeFamily::Circles => "circles",
            ShapeFamily::RoundedRects => "rounded_rects",
        }
    }

    /// Energetic, Rock, or Electronic → shards; Sad, Calm, or Jazz →
    /// circles; anything else → rounded rectangles.
    pub fn for_vibe(mood: &Mood, genre: &Genre) -> Self {
        if *mood == Mood::Energetic || matches!(genre, Genre::Rock | Genre::Electronic) {
            ShapeFamily::Shards
        } else if matches!(mood, Mood::Sad | Mood::Calm) || *genre == Genre::Jazz {
            ShapeFamily::Circles
        } else {
            ShapeFamily::RoundedRects
        }
    }
}

/// Faster music, more shapes: `floor(tempo / 15) + 3`.
pub fn shape_count(tempo: u32) -> usize {
    (tempo / 15) as usize + 3
}

/// Sharp, semi-opaque accent shapes. Not blurred.
#[derive(Debug, Clone, Copy, Default)]
pub struct Foreground;

impl Foreground {
    /// Minimum distance of a shape center from the canvas edge.
    pub const MARGIN: i64 = 50;
    pub const MIN_SIZE: i64 = 20;
    pub const MAX_SIZE: i64 = 150;
    pub const MIN_ALPHA: u8 = 100;
    pub const MAX_ALPHA: u8 = 220;
    pub const CORNER_RADIUS: i64 = 20;
    pub const MAX_ROTATION_DEGREES: u32 = 90;
    pub const OUTLINE_ALPHA: u8 = 50;
}

impl CoverLayer for Foreground {
    fn name(&self) -> &'static str {
        "foreground"
    }

    fn render(&self, ctx: &LayerContext<'_>, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::transparent(ctx.width, ctx.height);
        let family = ShapeFamily::for_vibe(ctx.mood, ctx.genre);
        let (w, h) = (ctx.width as i64, ctx.height as i64);

        // Keep the center range valid on canvases narrower than the margins
        let x_hi = (w - Self::MARGIN).max(Self::MARGIN);
        let y_hi = (h - Self::MARGIN).max(Self::MARGIN);

        for _ in 0..shape_count(ctx.tempo) {
            let cx = rng.gen_range(Self::MARGIN..=x_hi);
            let cy = rng.gen_range(Self::MARGIN..=y_hi);
            let size = rng.gen_range(Self::MIN_SIZE..=Self::MAX_SIZE);
            let alpha = rng.gen_range(Self::MIN_ALPHA..=Self::MAX_ALPHA);
            let fill = pick_accent(ctx.palette, rng).with_alpha8(alpha);

            match family {
                ShapeFamily::Shards => {
                    if rng.gen::<f64>() > 0.5 {
                        let points = [(cx, cy - size), (cx - size, cy + size), (cx + size, cy + size)];
                        fill_polygon(&mut canvas, &points, fill);
                        stroke_polygon(
                            &mut canvas,
                            &points,
                            Color::white().with_alpha8(Self::OUTLINE_ALPHA),
                        );
                    } else {
                        let degrees = rng.gen_range(0..=Self::MAX_ROTATION_DEGREES) as f64;
                        paste_rotated_square(&mut canvas, cx, cy, size, degrees, fill);
                    }
                }
                ShapeFamily::Circles => {
                    fill_circle(&mut canvas, cx, cy, size, fill);
                }
                ShapeFamily::RoundedRects => {
                    fill_rounded_rect(
                        &mut canvas,
                        cx - size,
                        cy - size,
                        cx + size,
                        cy + size,
                        Self::CORNER_RADIUS,
                        fill,
                    );
                }
            }
        }

        canvas
    }
}

/// Draw a square into its own transparent `2s × 2s` layer, rotate that
/// layer, then paste it centered on (`cx`, `cy`) with its alpha as mask.
///
/// Rotating the filled patch and resampling gives smooth edges that a
/// direct rotated-polygon fill would not.
pub fn paste_rotated_square(
    canvas: &mut Canvas,
    cx: i64,
    cy: i64,
    size: i64,
    degrees: f64,
    fill: Color,
) {
    let side = (size * 2).max(1) as u32;
    let patch = Canvas::new(side, side, fill);
    let rotated = rotate(&patch, degrees);
    canvas.paste_masked(&rotated, cx - size, cy - size);
}

// ============================================================================
// Frame
// ============================================================================

/// Two concentric white outlines around the canvas center.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame;

impl Frame {
    pub const SIZE: i64 = 300;
    pub const INSET: i64 = 10;
    pub const OUTER_ALPHA: u8 = 180;
    pub const OUTER_WIDTH: i64 = 3;
    pub const INNER_ALPHA: u8 = 80;
    pub const INNER_WIDTH: i64 = 1;

    /// Outer frame bounds `(x0, y0, x1, y1)` for a canvas size.
    pub fn outer_bounds(width: u32, height: u32) -> (i64, i64, i64, i64) {
        let cx = width as i64 / 2;
        let cy = height as i64 / 2;
        let half = Self::SIZE / 2;
        (cx - half, cy - half, cx + half, cy + half)
    }
}

impl CoverLayer for Frame {
    fn name(&self) -> &'static str {
        "frame"
    }

    fn render(&self, ctx: &LayerContext<'_>, _rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::transparent(ctx.width, ctx.height);
        let (x0, y0, x1, y1) = Self::outer_bounds(ctx.width, ctx.height);

        stroke_rect(
            &mut canvas,
            x0,
            y0,
            x1,
            y1,
            Self::OUTER_WIDTH,
            Color::white().with_alpha8(Self::OUTER_ALPHA),
        );
        stroke_rect(
            &mut canvas,
            x0 + Self::INSET,
            y0 + Self::INSET,
            x1 - Self::INSET,
            y1 - Self::INSET,
            Self::INNER_WIDTH,
            Color::white().with_alpha8(Self::INNER_ALPHA),
        );

        canvas
    }
}

// ============================================================================
// Grain
// ============================================================================

/// Low-opacity monochrome noise over everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grain;

impl CoverLayer for Grain {
    fn name(&self) -> &'static str {
        "grain"
    }

    fn render(&self, ctx: &LayerContext<'_>, rng: &mut dyn RngCore) -> Canvas {
        grain_layer(ctx.width, ctx.height, rng)
    }
}
