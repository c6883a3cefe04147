//! Main entry point for score generation.
//!
//! Runs the melody walk, styling, track assembly, and drum passes in order
//! and optionally encodes the result as a Standard MIDI File.

use moodwave_spec::GenerationParameters;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::arrange::{assemble_tracks, style_melody};
use crate::drums::drum_track;
use crate::melody::melody_walk;
use crate::score::Score;

/// Error type for music generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The scale has no pitches to sample from.
    #[error("scale is empty; every mood passed to the generator needs at least one pitch")]
    EmptyScale,

    /// IO error while encoding.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result of music generation.
pub struct MusicResult {
    /// The generated score.
    pub score: Score,
    /// Standard MIDI File bytes.
    pub data: Vec<u8>,
    /// BLAKE3 hash of the generated data.
    pub hash: String,
    /// File extension.
    pub extension: &'static str,
}

/// Generate a three-track score from parameters and a scale.
///
/// # Arguments
/// * `params` - Mood, style, tempo, and instrument program
/// * `scale` - Pitch pool for the melody; must not be empty
/// * `rng` - Random source for the melody walk
///
/// # Errors
/// [`GenerateError::EmptyScale`] if `scale` is empty.
pub fn generate_score<R: Rng + ?Sized>(
    params: &GenerationParameters,
    scale: &[u8],
    rng: &mut R,
) -> Result<Score, GenerateError> {
    if scale.is_empty() {
        return Err(GenerateError::EmptyScale);
    }

    let melody = melody_walk(scale, rng);
    let styled = style_melody(&melody, params.style, &params.mood);
    let (mut events, duration_beats) = assemble_tracks(&styled);
    let drums = drum_track(duration_beats, &params.mood);

    debug!(
        mood = %params.mood,
        style = %params.style,
        notes = melody.len(),
        melodic_events = events.len(),
        drum_events = drums.len(),
        duration_beats,
        "assembled score"
    );

    events.extend(drums);

    Ok(Score {
        tempo: params.tempo,
        program: params.instrument_program_id,
        duration_beats,
        events,
    })
}

/// Generate a score and encode it as a Standard MIDI File.
///
/// # Example
/// ```
/// use moodwave_backend_music::generate_music;
/// use moodwave_spec::{seeded_rng, GenerationParameters, Genre, Mood};
///
/// let params = GenerationParameters::new(Mood::Sad, Genre::Jazz).with_tempo(80);
/// let result = generate_music(&params, &[60, 62, 63, 67, 68], &mut seeded_rng(7)).unwrap();
/// assert_eq!(result.extension, "mid");
/// assert_eq!(&result.data[0..4], b"MThd");
/// ```
pub fn generate_music<R: Rng + ?Sized>(
    params: &GenerationParameters,
    scale: &[u8],
    rng: &mut R,
) -> Result<MusicResult, GenerateError> {
    let score = generate_score(params, scale, rng)?;
    let data = score.to_midi_bytes()?;
    let hash = blake3::hash(&data).to_hex().to_string();

    debug!(bytes = data.len(), hash = %&hash[..16], "encoded midi");

    Ok(MusicResult {
        score,
        data,
        hash,
        extension: "mid",
    })
}
