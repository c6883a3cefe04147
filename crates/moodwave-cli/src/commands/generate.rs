//! Generate command implementation
//!
//! Resolves parameters, renders the music and the cover on two threads, and
//! writes `<stem>.mid` and `<stem>.png` into the output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use moodwave_backend_music::generate_music;
use moodwave_backend_texture::generate_cover;
use moodwave_backend_texture::palette::palette_kind_for;
use moodwave_spec::{
    derive_stream_seed, entropy_rng, resolve_scale, seeded_rng, GenerationParameters, Genre, Mood,
    ParameterFile, SpecError, Style,
};
use tracing::info;

use super::json_output::{error_codes, ArtifactReport, GenerateOutput, GenerateReport, JsonError};

/// Stream label for the music generator's derived seed.
pub const MUSIC_STREAM: &str = "music";

/// Stream label for the cover generator's derived seed.
pub const COVER_STREAM: &str = "cover";

/// Options for one `generate` run.
///
/// Every parameter field overrides the same field from `params_file`.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub mood: Option<String>,
    pub genre: Option<String>,
    pub tempo: Option<u32>,
    pub style: Option<Style>,
    pub program: Option<u8>,
    pub params_file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub out_dir: Option<PathBuf>,
    pub name: Option<String>,
    pub json: bool,
}

/// Broad category of a failed run, which decides the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad or incomplete input (exit 1)
    Input,
    /// A generator or the output writer failed (exit 2)
    Generation,
}

impl FailureKind {
    pub fn exit_code(self) -> u8 {
        match self {
            FailureKind::Input => 1,
            FailureKind::Generation => 2,
        }
    }
}

/// A failed run: its category, a stable JSON error code, and the error chain.
#[derive(Debug)]
pub struct Failure {
    pub kind: FailureKind,
    pub code: &'static str,
    pub error: anyhow::Error,
}

impl Failure {
    fn new(kind: FailureKind, code: &'static str, error: anyhow::Error) -> Self {
        Self { kind, code, error }
    }

    fn generation(error: anyhow::Error) -> Self {
        Self::new(FailureKind::Generation, error_codes::GENERATION_ERROR, error)
    }

    fn write(error: anyhow::Error) -> Self {
        Self::new(FailureKind::Generation, error_codes::WRITE_ERROR, error)
    }
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 on success, 1 for input errors, 2 for generation errors
pub fn run(args: &GenerateArgs) -> Result<ExitCode> {
    let start = Instant::now();

    match execute(args) {
        Ok(report) => {
            if args.json {
                print_json(&GenerateOutput::success(report))?;
            } else {
                print_human(&report, start.elapsed().as_millis() as u64);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            if args.json {
                let error = JsonError::new(failure.code, format!("{:#}", failure.error));
                print_json(&GenerateOutput::failure(vec![error]))?;
            } else {
                eprintln!("{} {:#}", "error:".red().bold(), failure.error);
            }
            Ok(ExitCode::from(failure.kind.exit_code()))
        }
    }
}

/// Resolve parameters, generate both artifacts, and write them to disk.
pub fn execute(args: &GenerateArgs) -> std::result::Result<GenerateReport, Failure> {
    let params = resolve_params(args)?;
    let scale = resolve_scale(&params.mood).map_err(|e| {
        Failure::new(
            FailureKind::Input,
            error_codes::SCALE_NOT_FOUND,
            anyhow::Error::new(e),
        )
    })?;
    let stem = output_stem(args.name.as_deref())?;

    info!(
        mood = %params.mood,
        genre = %params.genre,
        tempo = params.tempo,
        style = %params.style,
        program = params.instrument_program_id,
        "resolved parameters"
    );

    let (mut music_rng, mut cover_rng) = match args.seed {
        Some(seed) => (
            seeded_rng(derive_stream_seed(seed, MUSIC_STREAM)),
            seeded_rng(derive_stream_seed(seed, COVER_STREAM)),
        ),
        None => (entropy_rng(), entropy_rng()),
    };

    // The generators share nothing but the parameters, so run them side by side
    let (music, cover) = thread::scope(|s| {
        let music = s.spawn(|| generate_music(&params, scale, &mut music_rng));
        let cover = s.spawn(|| generate_cover(&params, &mut cover_rng));
        (music.join(), cover.join())
    });

    let music = music
        .map_err(|_| Failure::generation(anyhow!("music generation thread panicked")))?
        .context("Music generation failed")
        .map_err(Failure::generation)?;
    let cover = cover
        .map_err(|_| Failure::generation(anyhow!("cover generation thread panicked")))?
        .context("Cover generation failed")
        .map_err(Failure::generation)?;

    let out_dir = args.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))
        .map_err(Failure::write)?;

    let midi_path = out_dir.join(format!("{}.{}", stem, music.extension));
    fs::write(&midi_path, &music.data)
        .with_context(|| format!("Failed to write MIDI file: {}", midi_path.display()))
        .map_err(Failure::write)?;

    let cover_path = out_dir.join(format!("{}.{}", stem, cover.extension));
    cover
        .save(&cover_path)
        .with_context(|| format!("Failed to write cover image: {}", cover_path.display()))
        .map_err(Failure::write)?;

    info!(midi = %midi_path.display(), cover = %cover_path.display(), "wrote artifacts");

    Ok(GenerateReport {
        mood: params.mood.to_string(),
        genre: params.genre.to_string(),
        tempo: params.tempo,
        style: params.style.as_str().to_string(),
        program: params.instrument_program_id,
        seed: args.seed,
        palette: palette_kind_for(&params.mood, &params.genre)
            .as_str()
            .to_string(),
        midi: ArtifactReport {
            path: display_path(&midi_path),
            hash: music.hash,
            bytes: music.data.len(),
        },
        cover: ArtifactReport {
            path: display_path(&cover_path),
            hash: cover.hash,
            bytes: cover.data.len(),
        },
        notes: music.score.len(),
        duration_beats: music.score.duration_beats,
    })
}

/// Merge the optional parameter file with command-line overrides.
pub fn resolve_params(args: &GenerateArgs) -> std::result::Result<GenerationParameters, Failure> {
    let file = match &args.params_file {
        Some(path) => ParameterFile::load(path)
            .with_context(|| format!("Failed to load parameter file: {}", path.display()))
            .map_err(|e| Failure::new(FailureKind::Input, error_codes::PARAMS_FILE, e))?,
        None => ParameterFile::default(),
    };

    let overrides = ParameterFile {
        mood: args.mood.as_deref().map(Mood::from),
        genre: args.genre.as_deref().map(Genre::from),
        tempo: args.tempo,
        style: args.style,
        instrument_program_id: args.program,
    };

    file.merged_with(overrides)
        .resolve()
        .context("Invalid generation parameters")
        .map_err(|e| Failure::new(FailureKind::Input, error_codes::INVALID_PARAMS, e))
}

/// Default file stem: `track_` plus a second-resolution timestamp.
pub fn default_stem(now: NaiveDateTime) -> String {
    format!("track_{}", now.format("%Y%m%d%H%M%S"))
}

fn output_stem(name: Option<&str>) -> std::result::Result<String, Failure> {
    match name {
        None => Ok(default_stem(Local::now().naive_local())),
        Some(name) if name.is_empty() || name.contains(['/', '\\']) || name == ".." => {
            Err(Failure::new(
                FailureKind::Input,
                error_codes::INVALID_PARAMS,
                anyhow::Error::new(SpecError::InvalidParameter(format!(
                    "output name must be a plain file stem, got '{}'",
                    name
                ))),
            ))
        }
        Some(name) => Ok(name.to_string()),
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn print_json(output: &GenerateOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

fn print_human(report: &GenerateReport, duration_ms: u64) {
    println!(
        "{} {} / {} at {} bpm ({} style, program {})",
        "Generated:".cyan().bold(),
        report.mood,
        report.genre,
        report.tempo,
        report.style,
        report.program
    );
    if let Some(seed) = report.seed {
        println!("{} {}", "Seed:".dimmed(), seed);
    }
    println!(
        "  {} {} ({} notes, {} beats) {}",
        "MIDI ".green(),
        report.midi.path,
        report.notes,
        report.duration_beats,
        report.midi.hash[..16].dimmed()
    );
    println!(
        "  {} {} ({} palette) {}",
        "Cover".green(),
        report.cover.path,
        report.palette,
        report.cover.hash[..16].dimmed()
    );
    println!("\n{} ({}ms)", "SUCCESS".green().bold(), duration_ms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_default_stem_format() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 2)
            .unwrap();
        assert_eq!(default_stem(now), "track_20240309070502");
    }

    #[test]
    fn test_output_stem_rejects_paths() {
        assert!(output_stem(Some("../escape")).is_err());
        assert!(output_stem(Some("")).is_err());
        assert_eq!(output_stem(Some("demo")).unwrap(), "demo");
        assert!(output_stem(None).unwrap().starts_with("track_"));
    }

    #[test]
    fn test_flags_are_required_without_file() {
        let args = GenerateArgs {
            mood: Some("Happy".to_string()),
            ..Default::default()
        };
        let failure = resolve_params(&args).unwrap_err();
        assert_eq!(failure.kind, FailureKind::Input);
        assert_eq!(failure.code, error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_flags_resolve_with_defaults() {
        let args = GenerateArgs {
            mood: Some("calm".to_string()),
            genre: Some("Jazz".to_string()),
            ..Default::default()
        };
        let params = resolve_params(&args).unwrap();
        assert_eq!(params.mood, Mood::Calm);
        assert_eq!(params.tempo, 120);
        assert_eq!(params.instrument_program_id, 26);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(FailureKind::Input.exit_code(), 1);
        assert_eq!(FailureKind::Generation.exit_code(), 2);
    }
}
