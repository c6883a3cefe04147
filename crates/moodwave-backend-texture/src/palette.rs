//! Palette selection.
//!
//! A palette is two background colors (gradient top and bottom) plus three
//! accent colors. Selection is a first-match-wins rule list that always ends
//! in the pop palette, so every (mood, genre) pair gets one.

use moodwave_spec::{Genre, Mood};

use crate::color::Color;

/// 8-bit RGB triple.
pub type Rgb8 = [u8; 3];

/// Named palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKind {
    Cyber,
    Fire,
    Midnight,
    Earth,
    Pop,
}

impl PaletteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteKind::Cyber => "cyber",
            PaletteKind::Fire => "fire",
            PaletteKind::Midnight => "midnight",
            PaletteKind::Earth => "earth",
            PaletteKind::Pop => "pop",
        }
    }

    /// The fixed color table for this palette.
    pub fn palette(&self) -> Palette {
        let [bg_start, bg_end, a1, a2, a3] = match self {
            PaletteKind::Cyber => CYBER,
            PaletteKind::Fire => FIRE,
            PaletteKind::Midnight => MIDNIGHT,
            PaletteKind::Earth => EARTH,
            PaletteKind::Pop => POP,
        };
        Palette {
            kind: *self,
            bg_start,
            bg_end,
            accents: [a1, a2, a3],
        }
    }
}

// [bg_start, bg_end, accent1, accent2, accent3]
const CYBER: [Rgb8; 5] = [[10, 10, 30], [0, 0, 0], [0, 255, 255], [255, 0, 255], [50, 255, 50]];
const FIRE: [Rgb8; 5] = [[30, 0, 0], [0, 0, 0], [255, 50, 0], [255, 200, 0], [200, 0, 50]];
const MIDNIGHT: [Rgb8; 5] = [
    [20, 25, 40],
    [5, 5, 10],
    [80, 100, 160],
    [100, 120, 140],
    [200, 200, 255],
];
const EARTH: [Rgb8; 5] = [
    [255, 250, 240],
    [220, 240, 220],
    [100, 160, 120],
    [200, 180, 100],
    [140, 180, 160],
];
const POP: [Rgb8; 5] = [
    [255, 100, 150],
    [255, 200, 100],
    [255, 255, 0],
    [0, 255, 255],
    [255, 255, 255],
];

/// Five-color palette: gradient endpoints plus accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub kind: PaletteKind,
    pub bg_start: Rgb8,
    pub bg_end: Rgb8,
    pub accents: [Rgb8; 3],
}

impl Palette {
    /// Build a palette from raw colors, for callers that bypass selection.
    pub fn custom(bg_start: Rgb8, bg_end: Rgb8, accents: [Rgb8; 3]) -> Self {
        Self {
            kind: PaletteKind::Pop,
            bg_start,
            bg_end,
            accents,
        }
    }

    /// Accent as an opaque [`Color`].
    pub fn accent_color(&self, index: usize) -> Color {
        Color::from_rgb8(self.accents[index % self.accents.len()])
    }

    /// All five colors in table order.
    pub fn colors(&self) -> [Rgb8; 5] {
        [
            self.bg_start,
            self.bg_end,
            self.accents[0],
            self.accents[1],
            self.accents[2],
        ]
    }
}

/// Pick the palette for a mood and genre.
///
/// Rules, first match wins:
/// 1. Electronic genre, or a mood whose name contains "Cyber" → cyber
/// 2. Energetic mood or Rock genre → fire
/// 3. Sad or Dark mood → midnight
/// 4. Calm mood or Jazz genre → earth
/// 5. anything else → pop
pub fn select_palette(mood: &Mood, genre: &Genre) -> Palette {
    palette_kind_for(mood, genre).palette()
}

/// The rule list behind [`select_palette`].
pub fn palette_kind_for(mood: &Mood, genre: &Genre) -> PaletteKind {
    if *genre == Genre::Electronic || mood.as_str().contains("Cyber") {
        PaletteKind::Cyber
    } else if *mood == Mood::Energetic || *genre == Genre::Rock {
        PaletteKind::Fire
    } else if matches!(mood, Mood::Sad | Mood::Dark) {
        PaletteKind::Midnight
    } else if *mood == Mood::Calm || *genre == Genre::Jazz {
        PaletteKind::Earth
    } else {
        PaletteKind::Pop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_priority() {
        // Electronic beats Energetic
        assert_eq!(
            palette_kind_for(&Mood::Energetic, &Genre::Electronic),
            PaletteKind::Cyber
        );
        // Rock beats Sad
        assert_eq!(palette_kind_for(&Mood::Sad, &Genre::Rock), PaletteKind::Fire);
        // Sad beats Jazz
        assert_eq!(palette_kind_for(&Mood::Sad, &Genre::Jazz), PaletteKind::Midnight);
        assert_eq!(palette_kind_for(&Mood::Happy, &Genre::Jazz), PaletteKind::Earth);
        assert_eq!(palette_kind_for(&Mood::Happy, &Genre::Pop), PaletteKind::Pop);
    }

    #[test]
    fn test_cyber_substring_match() {
        let mood = Mood::Other("Cyberpunk Dreams".to_string());
        assert_eq!(palette_kind_for(&mood, &Genre::Jazz), PaletteKind::Cyber);
        assert_eq!(palette_kind_for(&Mood::Cyber, &Genre::Pop), PaletteKind::Cyber);
    }

    #[test]
    fn test_dark_is_midnight() {
        assert_eq!(palette_kind_for(&Mood::Dark, &Genre::Ambient), PaletteKind::Midnight);
    }

    #[test]
    fn test_unknown_falls_through_to_pop() {
        let mood = Mood::Other("Nostalgic".to_string());
        let genre = Genre::Other("Polka".to_string());
        let palette = select_palette(&mood, &genre);
        assert_eq!(palette.kind, PaletteKind::Pop);
        assert_eq!(palette.bg_start, [255, 100, 150]);
    }

    #[test]
    fn test_palette_tables() {
        let fire = PaletteKind::Fire.palette();
        assert_eq!(
            fire.colors(),
            [[30, 0, 0], [0, 0, 0], [255, 50, 0], [255, 200, 0], [200, 0, 50]]
        );
        assert_eq!(PaletteKind::Earth.palette().accents.len(), 3);
    }
}
