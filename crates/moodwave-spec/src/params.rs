//! Generation parameter types: mood, genre, style, and the parameter record.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::tables::instrument_for;
use crate::{DEFAULT_TEMPO, MAX_TEMPO, MIN_TEMPO};

/// Mood tag driving scale choice, palette, and shape family.
///
/// Names outside the known set are kept verbatim in [`Mood::Other`] so they
/// survive a round trip through the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    Happy,
    Sad,
    Calm,
    Energetic,
    Dark,
    Cyber,
    Other(String),
}

impl Mood {
    /// All moods with a canonical name.
    pub const KNOWN: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Calm,
        Mood::Energetic,
        Mood::Dark,
        Mood::Cyber,
    ];

    /// Returns the canonical name (or the verbatim name for `Other`).
    pub fn as_str(&self) -> &str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Calm => "Calm",
            Mood::Energetic => "Energetic",
            Mood::Dark => "Dark",
            Mood::Cyber => "Cyber",
            Mood::Other(name) => name,
        }
    }
}

impl From<&str> for Mood {
    fn from(name: &str) -> Self {
        let trimmed = name.trim();
        Mood::KNOWN
            .iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Mood::Other(trimmed.to_string()))
    }
}

impl From<String> for Mood {
    fn from(name: String) -> Self {
        Mood::from(name.as_str())
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        mood.as_str().to_string()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Genre tag driving instrument, palette, and shape family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Genre {
    Pop,
    Rock,
    Jazz,
    Electronic,
    Ambient,
    Other(String),
}

impl Genre {
    /// All genres with a canonical name.
    pub const KNOWN: [Genre; 5] = [
        Genre::Pop,
        Genre::Rock,
        Genre::Jazz,
        Genre::Electronic,
        Genre::Ambient,
    ];

    /// Returns the canonical name (or the verbatim name for `Other`).
    pub fn as_str(&self) -> &str {
        match self {
            Genre::Pop => "Pop",
            Genre::Rock => "Rock",
            Genre::Jazz => "Jazz",
            Genre::Electronic => "Electronic",
            Genre::Ambient => "Ambient",
            Genre::Other(name) => name,
        }
    }
}

impl From<&str> for Genre {
    fn from(name: &str) -> Self {
        let trimmed = name.trim();
        Genre::KNOWN
            .iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Genre::Other(trimmed.to_string()))
    }
}

impl From<String> for Genre {
    fn from(name: String) -> Self {
        Genre::from(name.as_str())
    }
}

impl From<Genre> for String {
    fn from(genre: Genre) -> Self {
        genre.as_str().to_string()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arrangement style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Every note one beat at velocity 100.
    #[default]
    Simple,
    /// Mood-dependent note length and velocity.
    Complex,
}

impl Style {
    /// Returns the lowercase style name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Simple => "simple",
            Style::Complex => "complex",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Style::Simple),
            "complex" => Ok(Style::Complex),
            other => Err(SpecError::InvalidParameter(format!(
                "unknown style '{}' (expected simple or complex)",
                other
            ))),
        }
    }
}

/// Input record shared by both generators.
///
/// Immutable for the duration of one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub mood: Mood,
    pub genre: Genre,
    /// Beats per minute.
    pub tempo: u32,
    pub style: Style,
    /// General MIDI program number (0-127).
    pub instrument_program_id: u8,
}

impl GenerationParameters {
    /// Creates parameters with the default tempo, simple style, and the
    /// genre's table instrument.
    pub fn new(mood: Mood, genre: Genre) -> Self {
        let instrument_program_id = instrument_for(&genre);
        Self {
            mood,
            genre,
            tempo: DEFAULT_TEMPO,
            style: Style::Simple,
            instrument_program_id,
        }
    }

    pub fn with_tempo(mut self, tempo: u32) -> Self {
        self.tempo = tempo;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_program(mut self, program: u8) -> Self {
        self.instrument_program_id = program;
        self
    }

    /// Checks tempo and program ranges.
    pub fn validate(&self) -> Result<(), SpecError> {
        if !(MIN_TEMPO..=MAX_TEMPO).contains(&self.tempo) {
            return Err(SpecError::InvalidParameter(format!(
                "tempo must be {}-{} bpm, got {}",
                MIN_TEMPO, MAX_TEMPO, self.tempo
            )));
        }
        if self.instrument_program_id > 127 {
            return Err(SpecError::InvalidParameter(format!(
                "instrument program must be 0-127, got {}",
                self.instrument_program_id
            )));
        }
        Ok(())
    }
}

/// On-disk parameter file.
///
/// Every field except `mood` and `genre` is optional; a missing program is
/// resolved from the genre's instrument table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterFile {
    pub mood: Option<Mood>,
    pub genre: Option<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_program_id: Option<u8>,
}

impl ParameterFile {
    /// Parses a parameter file from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a parameter file from disk.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Overlays `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(self, other: ParameterFile) -> ParameterFile {
        ParameterFile {
            mood: other.mood.or(self.mood),
            genre: other.genre.or(self.genre),
            tempo: other.tempo.or(self.tempo),
            style: other.style.or(self.style),
            instrument_program_id: other.instrument_program_id.or(self.instrument_program_id),
        }
    }

    /// Resolves into validated generation parameters.
    pub fn resolve(self) -> Result<GenerationParameters, SpecError> {
        let mood = self
            .mood
            .ok_or_else(|| SpecError::InvalidParameter("mood is required".to_string()))?;
        let genre = self
            .genre
            .ok_or_else(|| SpecError::InvalidParameter("genre is required".to_string()))?;

        let mut params = GenerationParameters::new(mood, genre)
            .with_tempo(self.tempo.unwrap_or(DEFAULT_TEMPO))
            .with_style(self.style.unwrap_or_default());
        if let Some(program) = self.instrument_program_id {
            params = params.with_program(program);
        }

        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mood_parse_is_case_insensitive() {
        assert_eq!(Mood::from("energetic"), Mood::Energetic);
        assert_eq!(Mood::from(" Sad "), Mood::Sad);
    }

    #[test]
    fn test_unknown_mood_is_kept_verbatim() {
        let mood = Mood::from("CyberNoir");
        assert_eq!(mood, Mood::Other("CyberNoir".to_string()));
        assert_eq!(mood.to_string(), "CyberNoir");
    }

    #[test]
    fn test_genre_serde_as_plain_string() {
        let json = serde_json::to_string(&Genre::Electronic).unwrap();
        assert_eq!(json, "\"Electronic\"");
        let back: Genre = serde_json::from_str("\"Shoegaze\"").unwrap();
        assert_eq!(back, Genre::Other("Shoegaze".to_string()));
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("Complex".parse::<Style>().unwrap(), Style::Complex);
        assert_eq!("simple".parse::<Style>().unwrap(), Style::Simple);
        assert!("baroque".parse::<Style>().is_err());
    }

    #[test]
    fn test_new_resolves_instrument_from_genre() {
        let params = GenerationParameters::new(Mood::Happy, Genre::Jazz);
        assert_eq!(params.instrument_program_id, 26);
        assert_eq!(params.tempo, DEFAULT_TEMPO);
        assert_eq!(params.style, Style::Simple);
    }

    #[test]
    fn test_validate_rejects_tempo_out_of_range() {
        let params = GenerationParameters::new(Mood::Happy, Genre::Pop).with_tempo(5);
        assert!(matches!(
            params.validate(),
            Err(SpecError::InvalidParameter(_))
        ));

        let params = GenerationParameters::new(Mood::Happy, Genre::Pop).with_tempo(301);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_program_above_127() {
        let params = GenerationParameters::new(Mood::Happy, Genre::Pop).with_program(128);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_parameter_file_resolve() {
        let file = ParameterFile::from_json(
            r#"{"mood": "Calm", "genre": "Ambient", "tempo": 72, "style": "complex"}"#,
        )
        .unwrap();
        let params = file.resolve().unwrap();
        assert_eq!(params.mood, Mood::Calm);
        assert_eq!(params.genre, Genre::Ambient);
        assert_eq!(params.tempo, 72);
        assert_eq!(params.style, Style::Complex);
        assert_eq!(params.instrument_program_id, 0);
    }

    #[test]
    fn test_parameter_file_requires_mood() {
        let file = ParameterFile::from_json(r#"{"genre": "Pop"}"#).unwrap();
        assert!(file.resolve().is_err());
    }

    #[test]
    fn test_parameter_file_rejects_unknown_fields() {
        assert!(ParameterFile::from_json(r#"{"mood": "Sad", "bpm": 90}"#).is_err());
    }

    #[test]
    fn test_merged_with_prefers_overrides() {
        let base = ParameterFile {
            mood: Some(Mood::Sad),
            genre: Some(Genre::Pop),
            tempo: Some(90),
            ..Default::default()
        };
        let overrides = ParameterFile {
            tempo: Some(150),
            instrument_program_id: Some(40),
            ..Default::default()
        };
        let params = base.merged_with(overrides).resolve().unwrap();
        assert_eq!(params.mood, Mood::Sad);
        assert_eq!(params.tempo, 150);
        assert_eq!(params.instrument_program_id, 40);
    }
}
