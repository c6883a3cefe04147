//! PNG writer for cover images.
//!
//! Uses fixed compression settings so the same pixels always encode to the
//! same bytes.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::canvas::CoverImage;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level.
    pub compression: Compression,
    /// Row filter.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            // Gradients and grain compress noticeably better with Paeth
            filter: FilterType::Paeth,
        }
    }
}

impl PngConfig {
    /// Create config optimized for speed (faster, but larger files).
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write a cover image to a PNG file.
pub fn write_rgb(image: &CoverImage, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);

    write_rgb_to_writer(image, writer, config)
}

/// Write a cover image to any writer.
pub fn write_rgb_to_writer<W: Write>(
    image: &CoverImage,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let expected = (image.width as usize) * (image.height as usize) * CoverImage::CHANNELS;
    if image.width == 0 || image.height == 0 || image.data.len() != expected {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{} image with {} bytes (expected {})",
            image.width,
            image.height,
            image.data.len(),
            expected
        )));
    }

    let mut encoder = Encoder::new(writer, image.width, image.height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&image.data)?;

    Ok(())
}

/// Encode a cover image to PNG bytes in memory.
pub fn encode_rgb(image: &CoverImage, config: &PngConfig) -> Result<Vec<u8>, PngError> {
    let mut buffer = Vec::new();
    write_rgb_to_writer(image, &mut buffer, config)?;
    Ok(buffer)
}

impl CoverImage {
    /// Encode with the default [`PngConfig`].
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, PngError> {
        encode_rgb(self, &PngConfig::default())
    }

    /// Write to `path` with the default [`PngConfig`].
    pub fn write_png(&self, path: &Path) -> Result<(), PngError> {
        write_rgb(self, path, &PngConfig::default())
    }
}
