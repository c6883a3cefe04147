//! Fixed scale and instrument lookup tables.

use crate::error::SpecError;
use crate::params::{Genre, Mood};

const HAPPY_SCALE: [u8; 5] = [60, 62, 64, 67, 69];
const SAD_SCALE: [u8; 5] = [60, 62, 63, 67, 68];
const CALM_SCALE: [u8; 5] = [60, 62, 65, 67, 69];
const ENERGETIC_SCALE: [u8; 5] = [60, 64, 67, 69, 72];

/// Returns the pitch pool for a mood, or `None` if the mood has no scale.
pub fn scale_for(mood: &Mood) -> Option<&'static [u8]> {
    match mood {
        Mood::Happy => Some(&HAPPY_SCALE),
        Mood::Sad => Some(&SAD_SCALE),
        Mood::Calm => Some(&CALM_SCALE),
        Mood::Energetic => Some(&ENERGETIC_SCALE),
        _ => None,
    }
}

/// Like [`scale_for`], but a missing scale is an error.
pub fn resolve_scale(mood: &Mood) -> Result<&'static [u8], SpecError> {
    scale_for(mood).ok_or_else(|| SpecError::ScaleNotFound(mood.to_string()))
}

/// Returns the General MIDI program for a genre.
///
/// Genres without an entry fall back to program 0 (Acoustic Grand Piano).
pub fn instrument_for(genre: &Genre) -> u8 {
    match genre {
        Genre::Pop => 0,
        Genre::Rock => 29,
        Genre::Jazz => 26,
        Genre::Electronic => 81,
        _ => 0,
    }
}
