//! Moodwave CLI - turn a mood and genre into a MIDI sketch and a cover image
//!
//! This binary resolves generation parameters from flags and an optional
//! parameter file, then runs the music and cover generators.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use moodwave_spec::Style;

use moodwave_cli::commands;
use moodwave_cli::commands::generate::GenerateArgs;
use moodwave_cli::logging;

/// Moodwave - Procedural Music and Cover Art
#[derive(Parser)]
#[command(name = "moodwave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase diagnostic output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a MIDI file and a matching cover image
    Generate {
        /// Mood tag (Happy, Sad, Calm, Energetic, ...)
        #[arg(short, long)]
        mood: Option<String>,

        /// Genre tag (Pop, Rock, Jazz, Electronic, ...)
        #[arg(short, long)]
        genre: Option<String>,

        /// Tempo in beats per minute (default: 120)
        #[arg(short, long)]
        tempo: Option<u32>,

        /// Arrangement style (simple or complex)
        #[arg(long)]
        style: Option<Style>,

        /// General MIDI program for the lead (default: from genre)
        #[arg(long)]
        program: Option<u8>,

        /// JSON parameter file; flags override its fields
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Base seed for reproducible output (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output file stem (default: track_<timestamp>)
        #[arg(short, long)]
        name: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the palette and shape family for a mood and genre
    Palette {
        /// Mood tag
        #[arg(short, long)]
        mood: String,

        /// Genre tag
        #[arg(short, long)]
        genre: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the mood scales and genre instruments
    Scales {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            mood,
            genre,
            tempo,
            style,
            program,
            params,
            seed,
            out_dir,
            name,
            json,
        } => commands::generate::run(&GenerateArgs {
            mood,
            genre,
            tempo,
            style,
            program,
            params_file: params,
            seed,
            out_dir,
            name,
            json,
        }),
        Commands::Palette { mood, genre, json } => commands::palette::run(&mood, &genre, json),
        Commands::Scales { json } => commands::scales::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "moodwave", "-v", "generate", "--mood", "Sad", "--genre", "Jazz", "--tempo", "90",
            "--style", "complex", "--seed", "7",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Generate {
                mood,
                genre,
                tempo,
                style,
                seed,
                json,
                ..
            } => {
                assert_eq!(mood.as_deref(), Some("Sad"));
                assert_eq!(genre.as_deref(), Some("Jazz"));
                assert_eq!(tempo, Some(90));
                assert_eq!(style, Some(Style::Complex));
                assert_eq!(seed, Some(7));
                assert!(!json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_style() {
        let result = Cli::try_parse_from([
            "moodwave", "generate", "--mood", "Sad", "--genre", "Jazz", "--style", "baroque",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_palette_and_scales() {
        let cli =
            Cli::try_parse_from(["moodwave", "palette", "-m", "Calm", "-g", "Pop", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Palette { json: true, .. }));

        let cli = Cli::try_parse_from(["moodwave", "scales", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Scales { json: false }));
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
