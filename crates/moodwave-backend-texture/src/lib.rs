//! Moodwave Cover Art Backend - Layered Procedural Compositor
//!
//! This crate renders an 800×800 album cover from a mood, a genre, and a
//! tempo by stacking five procedurally drawn RGBA layers and flattening the
//! result to RGB.
//!
//! # Layers
//!
//! Compositing order, bottom to top:
//!
//! 1. **Background**: vertical gradient between the palette's two background
//!    colors
//! 2. **Bokeh**: large faint accent circles under a heavy blur
//! 3. **Foreground**: tempo-scaled count of shards, circles, or rounded
//!    rectangles chosen by the mood/genre "vibe"
//! 4. **Frame**: two concentric white outlines around the center
//! 5. **Grain**: low-opacity gray noise
//!
//! Stages are values implementing [`layers::CoverLayer`], so callers can
//! drive [`generate::compose_layers`] with their own stage list.
//!
//! # Example
//!
//! ```
//! use moodwave_backend_texture::render_cover;
//! use moodwave_spec::{seeded_rng, Genre, Mood};
//!
//! let mut rng = seeded_rng(7);
//! let image = render_cover(&Mood::Calm, &Genre::Ambient, 80, &mut rng).unwrap();
//!
//! assert_eq!((image.width, image.height), (800, 800));
//! assert_eq!(image.data.len(), 800 * 800 * 3);
//! ```
//!
//! # Randomness
//!
//! All variation comes from the random source passed in. The same seed,
//! mood, genre, and tempo always produce the same pixels, and PNG encoding
//! uses fixed settings so the bytes match too.

pub mod blur;
pub mod canvas;
pub mod color;
pub mod generate;
pub mod grain;
pub mod layers;
pub mod palette;
pub mod png;
pub mod raster;

// Re-export main types
pub use canvas::{Canvas, CoverImage, COVER_SIZE};
pub use color::Color;
pub use generate::{compose_layers, generate_cover, render_cover, render_cover_with, CoverError, CoverResult};
pub use layers::{standard_layers, CoverLayer, LayerContext};
pub use palette::{select_palette, Palette, PaletteKind};

/// Crate version for backend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend identifier.
pub const BACKEND_ID: &str = "moodwave-backend-texture";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_id() {
        assert_eq!(BACKEND_ID, "moodwave-backend-texture");
        assert!(!VERSION.is_empty());
    }
}
