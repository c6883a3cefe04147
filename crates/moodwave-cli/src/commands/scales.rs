//! Scales command implementation
//!
//! Prints the mood scale table and the genre instrument table.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use moodwave_spec::{instrument_for, scale_for, Genre, Mood};

use super::json_output::{InstrumentEntry, ScaleEntry, ScalesReport};

/// Run the scales command.
pub fn run(json_output: bool) -> Result<ExitCode> {
    let report = scales_report();

    if json_output {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize tables")?;
        println!("{}", json);
    } else {
        print_human(&report);
    }

    Ok(ExitCode::SUCCESS)
}

/// Collect both lookup tables over every known mood and genre.
pub fn scales_report() -> ScalesReport {
    let scales = Mood::KNOWN
        .iter()
        .map(|mood| ScaleEntry {
            mood: mood.to_string(),
            pitches: scale_for(mood).map(|s| s.to_vec()),
        })
        .collect();

    let instruments = Genre::KNOWN
        .iter()
        .map(|genre| InstrumentEntry {
            genre: genre.to_string(),
            program: instrument_for(genre),
        })
        .collect();

    ScalesReport {
        scales,
        instruments,
        default_program: instrument_for(&Genre::Other(String::new())),
    }
}

fn print_human(report: &ScalesReport) {
    println!("{}", "Scales (MIDI pitches):".cyan().bold());
    for entry in &report.scales {
        match &entry.pitches {
            Some(pitches) => {
                let list: Vec<String> = pitches.iter().map(|p| p.to_string()).collect();
                println!("  {:<10} {}", entry.mood, list.join(" "));
            }
            None => println!("  {:<10} {}", entry.mood, "no scale".yellow()),
        }
    }

    println!("\n{}", "Instruments (GM program):".cyan().bold());
    for entry in &report.instruments {
        println!("  {:<10} {}", entry.genre, entry.program);
    }
    println!(
        "  {:<10} {}",
        "other".dimmed(),
        report.default_program.to_string().dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scales_report_lists_every_known_mood() {
        let report = scales_report();
        assert_eq!(report.scales.len(), Mood::KNOWN.len());

        let happy = &report.scales[0];
        assert_eq!(happy.mood, "Happy");
        assert_eq!(happy.pitches, Some(vec![60, 62, 64, 67, 69]));

        let dark = report.scales.iter().find(|e| e.mood == "Dark").unwrap();
        assert_eq!(dark.pitches, None);
    }

    #[test]
    fn test_instrument_table() {
        let report = scales_report();
        let programs: Vec<(String, u8)> = report
            .instruments
            .into_iter()
            .map(|e| (e.genre, e.program))
            .collect();
        assert_eq!(
            programs,
            vec![
                ("Pop".to_string(), 0),
                ("Rock".to_string(), 29),
                ("Jazz".to_string(), 26),
                ("Electronic".to_string(), 81),
                ("Ambient".to_string(), 0),
            ]
        );
        assert_eq!(report.default_program, 0);
    }
}
