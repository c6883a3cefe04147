//! Moodwave Music Backend - Melody Walk and Arrangement
//!
//! This crate turns a mood-derived scale, a style, a tempo, and an instrument
//! program into a three-track note-event score (lead, bass, percussion), and
//! encodes that score as a Standard MIDI File.
//!
//! # Pipeline
//!
//! 1. [`melody::melody_walk`] samples 32 pitches from the scale with a
//!    coin-flip walk (repeat the previous pitch or resample).
//! 2. [`arrange::style_for`] assigns each note a duration and velocity.
//! 3. [`arrange::assemble_tracks`] lays out lead notes and bass notes on
//!    even beats.
//! 4. [`drums::drum_track`] tiles a mood-specific pattern over the piece.
//!
//! # Randomness
//!
//! Every entry point takes the random source as a parameter. Seed one with
//! [`moodwave_spec::seeded_rng`] to reproduce a score exactly.
//!
//! # Example
//!
//! ```
//! use moodwave_backend_music::generate_music;
//! use moodwave_spec::{seeded_rng, GenerationParameters, Genre, Mood};
//!
//! let params = GenerationParameters::new(Mood::Happy, Genre::Pop);
//! let mut rng = seeded_rng(42);
//! let result = generate_music(&params, &[60, 62, 64, 67, 69], &mut rng).unwrap();
//!
//! assert_eq!(&result.data[0..4], b"MThd");
//! assert_eq!(result.extension, "mid");
//! ```
//!
//! # Module Structure
//!
//! - [`score`]: Note events and the score container
//! - [`melody`]: Melody walk
//! - [`arrange`]: Note styling and lead/bass assembly
//! - [`drums`]: Percussion patterns and tiling
//! - [`midi`]: Standard MIDI File encoding
//! - [`generate`]: Main generation entry point

pub mod arrange;
pub mod drums;
pub mod generate;
pub mod melody;
pub mod midi;
pub mod score;

// Re-export main types
pub use generate::{generate_music, generate_score, GenerateError, MusicResult};
pub use score::{NoteEvent, Score, BASS_CHANNEL, BASS_TRACK, DRUM_CHANNEL, DRUM_TRACK, LEAD_CHANNEL, LEAD_TRACK};

/// Crate version for backend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend identifier.
pub const BACKEND_ID: &str = "moodwave-backend-music";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_backend_id() {
        assert_eq!(BACKEND_ID, "moodwave-backend-music");
    }
}
