//! Palette command implementation
//!
//! Shows which palette and foreground shape family a mood/genre pair gets.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use moodwave_backend_texture::layers::ShapeFamily;
use moodwave_backend_texture::palette::{select_palette, Rgb8};
use moodwave_spec::{Genre, Mood};

use super::json_output::PaletteReport;

/// Run the palette command. Palette selection is total, so this always
/// succeeds.
pub fn run(mood: &str, genre: &str, json_output: bool) -> Result<ExitCode> {
    let report = palette_report(&Mood::from(mood), &Genre::from(genre));

    if json_output {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize palette")?;
        println!("{}", json);
    } else {
        print_human(&report);
    }

    Ok(ExitCode::SUCCESS)
}

/// Build the report for a mood and genre.
pub fn palette_report(mood: &Mood, genre: &Genre) -> PaletteReport {
    let palette = select_palette(mood, genre);
    PaletteReport {
        mood: mood.to_string(),
        genre: genre.to_string(),
        palette: palette.kind.as_str().to_string(),
        bg_start: palette.bg_start,
        bg_end: palette.bg_end,
        accents: palette.accents.to_vec(),
        shape_family: ShapeFamily::for_vibe(mood, genre).as_str().to_string(),
    }
}

fn hex(rgb: Rgb8) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

fn print_swatch(label: &str, rgb: Rgb8) {
    println!(
        "  {:<10} {} {}",
        label,
        "    ".on_truecolor(rgb[0], rgb[1], rgb[2]),
        hex(rgb)
    );
}

fn print_human(report: &PaletteReport) {
    println!(
        "{} {} {}",
        "Palette:".cyan().bold(),
        report.palette.bold(),
        format!("({} / {})", report.mood, report.genre).dimmed()
    );
    print_swatch("bg_start", report.bg_start);
    print_swatch("bg_end", report.bg_end);
    for (i, accent) in report.accents.iter().enumerate() {
        print_swatch(&format!("accent{}", i + 1), *accent);
    }
    println!("{} {}", "Foreground:".dimmed(), report.shape_family);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_palette_report_for_electronic() {
        let report = palette_report(&Mood::Happy, &Genre::Electronic);
        assert_eq!(report.palette, "cyber");
        assert_eq!(report.bg_start, [10, 10, 30]);
        assert_eq!(report.accents, vec![[0, 255, 255], [255, 0, 255], [50, 255, 50]]);
        assert_eq!(report.shape_family, "shards");
    }

    #[test]
    fn test_palette_report_for_unknown_tags() {
        let report = palette_report(&Mood::from("Wistful"), &Genre::from("Polka"));
        assert_eq!(report.palette, "pop");
        assert_eq!(report.mood, "Wistful");
        assert_eq!(report.shape_family, "rounded_rects");
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex([255, 100, 0]), "#ff6400");
    }
}
