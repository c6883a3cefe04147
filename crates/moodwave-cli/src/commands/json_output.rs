//! JSON output types for machine-readable CLI output.
//!
//! Every command that accepts `--json` prints exactly one of these documents
//! to stdout, so scripts can parse the result without scraping colored text.

use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// Parameter file missing, unreadable, or malformed
    pub const PARAMS_FILE: &str = "CLI_001";
    /// Parameters failed validation (missing mood/genre, bad tempo, ...)
    pub const INVALID_PARAMS: &str = "CLI_002";
    /// Mood has no scale table entry
    pub const SCALE_NOT_FOUND: &str = "CLI_003";
    /// Music or cover generation failed
    pub const GENERATION_ERROR: &str = "CLI_004";
    /// Output files could not be written
    pub const WRITE_ERROR: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_003")
    pub code: String,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// One written artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactReport {
    pub path: String,
    /// BLAKE3 hash of the file contents (hex)
    pub hash: String,
    pub bytes: usize,
}

/// Result of a successful `generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateReport {
    pub mood: String,
    pub genre: String,
    pub tempo: u32,
    pub style: String,
    pub program: u8,
    /// Base seed, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub palette: String,
    pub midi: ArtifactReport,
    pub cover: ArtifactReport,
    /// Number of note events across all tracks
    pub notes: usize,
    pub duration_beats: f64,
}

/// Top-level `generate --json` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateOutput {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateReport>,
}

impl GenerateOutput {
    pub fn success(result: GenerateReport) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// `palette --json` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaletteReport {
    pub mood: String,
    pub genre: String,
    pub palette: String,
    pub bg_start: [u8; 3],
    pub bg_end: [u8; 3],
    pub accents: Vec<[u8; 3]>,
    pub shape_family: String,
}

/// A mood and its pitch pool (`None` when the mood has no scale).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScaleEntry {
    pub mood: String,
    pub pitches: Option<Vec<u8>>,
}

/// A genre and its General MIDI program.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstrumentEntry {
    pub genre: String,
    pub program: u8,
}

/// `scales --json` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScalesReport {
    pub scales: Vec<ScaleEntry>,
    pub instruments: Vec<InstrumentEntry>,
    /// Program used for genres not listed in `instruments`
    pub default_program: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_output_omits_result() {
        let output = GenerateOutput::failure(vec![JsonError::new(
            error_codes::SCALE_NOT_FOUND,
            "no scale for mood 'Dark'",
        )]);
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["errors"][0]["code"], "CLI_003");
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_success_output_omits_errors() {
        let report = GenerateReport {
            mood: "Happy".to_string(),
            genre: "Pop".to_string(),
            tempo: 120,
            style: "simple".to_string(),
            program: 0,
            seed: None,
            palette: "pop".to_string(),
            midi: ArtifactReport {
                path: "out/a.mid".to_string(),
                hash: "00".to_string(),
                bytes: 10,
            },
            cover: ArtifactReport {
                path: "out/a.png".to_string(),
                hash: "11".to_string(),
                bytes: 20,
            },
            notes: 60,
            duration_beats: 32.0,
        };
        let value = serde_json::to_value(GenerateOutput::success(report)).unwrap();

        assert_eq!(value["success"], true);
        assert!(value.get("errors").is_none());
        assert!(value["result"].get("seed").is_none());
        assert_eq!(value["result"]["midi"]["path"], "out/a.mid");
    }
}
