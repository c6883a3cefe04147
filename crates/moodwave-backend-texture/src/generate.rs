//! Main entry point for cover generation.
//!
//! Selects the palette, renders each layer stage in order, composites it
//! onto the accumulator, and flattens the result to RGB.

use std::path::Path;
use std::time::Instant;

use moodwave_spec::{GenerationParameters, Genre, Mood};
use rand::RngCore;
use thiserror::Error;
use tracing::debug;

use crate::canvas::{Canvas, CoverImage, COVER_SIZE};
use crate::color::Color;
use crate::layers::{standard_layers, CoverLayer, LayerContext};
use crate::palette::{select_palette, Palette};
use crate::png::PngError;

/// Errors from cover generation.
#[derive(Debug, Error)]
pub enum CoverError {
    #[error("PNG error: {0}")]
    Png(#[from] PngError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result of cover generation.
#[derive(Debug)]
pub struct CoverResult {
    /// The flattened image.
    pub image: CoverImage,
    /// PNG-encoded bytes.
    pub data: Vec<u8>,
    /// BLAKE3 hash of the PNG bytes.
    pub hash: String,
    /// File extension.
    pub extension: &'static str,
}

impl CoverResult {
    /// Write the PNG bytes to `path`.
    pub fn save(&self, path: &Path) -> Result<(), CoverError> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Render and composite the given layer stages over a transparent canvas.
///
/// Each stage gets a fresh layer; it is composited source-over onto the
/// accumulator and dropped before the next stage runs.
pub fn compose_layers(
    stages: &[Box<dyn CoverLayer>],
    ctx: &LayerContext<'_>,
    rng: &mut dyn RngCore,
) -> Result<Canvas, CoverError> {
    if ctx.width == 0 || ctx.height == 0 {
        return Err(CoverError::InvalidDimensions(format!(
            "canvas must be at least 1x1, got {}x{}",
            ctx.width, ctx.height
        )));
    }

    let mut base = Canvas::new(ctx.width, ctx.height, Color::transparent());
    for stage in stages {
        let start = Instant::now();
        let layer = stage.render(ctx, rng);
        if (layer.width, layer.height) != (ctx.width, ctx.height) {
            return Err(CoverError::InvalidDimensions(format!(
                "layer '{}' is {}x{}, expected {}x{}",
                stage.name(),
                layer.width,
                layer.height,
                ctx.width,
                ctx.height
            )));
        }
        base.composite_over(&layer);
        debug!(
            layer = stage.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "composited layer"
        );
    }

    Ok(base)
}

/// Render a cover with an explicit palette and size.
pub fn render_cover_with(
    palette: &Palette,
    mood: &Mood,
    genre: &Genre,
    tempo: u32,
    size: (u32, u32),
    rng: &mut dyn RngCore,
) -> Result<CoverImage, CoverError> {
    let ctx = LayerContext {
        width: size.0,
        height: size.1,
        palette,
        mood,
        genre,
        tempo,
    };
    let canvas = compose_layers(&standard_layers(), &ctx, rng)?;
    Ok(canvas.flatten())
}

/// Render the 800×800 cover for a mood, genre, and tempo.
///
/// Two calls with the same arguments share palette, shape family, and layer
/// order but differ in pixels unless they are given identically seeded
/// random sources.
pub fn render_cover(
    mood: &Mood,
    genre: &Genre,
    tempo: u32,
    rng: &mut dyn RngCore,
) -> Result<CoverImage, CoverError> {
    let palette = select_palette(mood, genre);
    debug!(mood = %mood, genre = %genre, palette = palette.kind.as_str(), "selected palette");
    render_cover_with(&palette, mood, genre, tempo, (COVER_SIZE, COVER_SIZE), rng)
}

/// Render a cover from generation parameters and encode it as PNG.
pub fn generate_cover(
    params: &GenerationParameters,
    rng: &mut dyn RngCore,
) -> Result<CoverResult, CoverError> {
    let image = render_cover(&params.mood, &params.genre, params.tempo, rng)?;
    let data = image.to_png_bytes()?;
    let hash = blake3::hash(&data).to_hex().to_string();

    debug!(bytes = data.len(), hash = %&hash[..16], "encoded cover");

    Ok(CoverResult {
        image,
        data,
        hash,
        extension: "png",
    })
}
