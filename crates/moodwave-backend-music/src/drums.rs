//! Percussion patterns and tiling.

use moodwave_spec::Mood;

use crate::score::{NoteEvent, DRUM_CHANNEL, DRUM_TRACK};

/// General MIDI acoustic bass drum.
pub const KICK: i32 = 35;
/// General MIDI acoustic snare.
pub const SNARE: i32 = 38;
/// General MIDI closed hi-hat.
pub const CLOSED_HAT: i32 = 42;

/// Length of one pattern tile in beats.
pub const TILE_BEATS: f64 = 2.0;
/// Every drum hit lasts half a beat.
pub const HIT_DURATION: f64 = 0.5;
/// Every drum hit is played at this velocity.
pub const HIT_VELOCITY: i32 = 100;

/// One onset within a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrumHit {
    pub pitch: i32,
    /// Beats from the start of the tile.
    pub offset: f64,
}

const fn hit(pitch: i32, offset: f64) -> DrumHit {
    DrumHit { pitch, offset }
}

const BACKBEAT: [DrumHit; 2] = [hit(KICK, 0.0), hit(SNARE, 1.0)];
const DRIVING: [DrumHit; 4] = [
    hit(KICK, 0.0),
    hit(CLOSED_HAT, 0.5),
    hit(SNARE, 1.0),
    hit(CLOSED_HAT, 1.5),
];
const SPARSE: [DrumHit; 1] = [hit(KICK, 0.0)];

/// Select the tile pattern for a mood.
pub fn pattern_for(mood: &Mood) -> &'static [DrumHit] {
    match mood {
        Mood::Energetic => &DRIVING,
        Mood::Sad => &SPARSE,
        _ => &BACKBEAT,
    }
}

/// Tile the mood's pattern every [`TILE_BEATS`] from 0 up to, but not
/// including, `total_beats`.
///
/// A tile that starts before the end is emitted whole, so the onset count
/// is always `ceil(total_beats / 2) * pattern.len()`.
pub fn drum_track(total_beats: f64, mood: &Mood) -> Vec<NoteEvent> {
    let pattern = pattern_for(mood);
    let mut events = Vec::new();
    let mut tile_start = 0.0_f64;

    while tile_start < total_beats {
        for h in pattern {
            events.push(NoteEvent {
                track: DRUM_TRACK,
                channel: DRUM_CHANNEL,
                pitch: h.pitch,
                start_beat: tile_start + h.offset,
                duration_beats: HIT_DURATION,
                velocity: HIT_VELOCITY,
            });
        }
        tile_start += TILE_BEATS;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sad_one_kick_per_tile() {
        let events = drum_track(32.0, &Mood::Sad);
        assert_eq!(events.len(), 16);
        assert!(events.iter().all(|e| e.pitch == KICK));
    }

    #[test]
    fn test_sad_partial_tile_counts() {
        // ceil(5 / 2) = 3
        assert_eq!(drum_track(5.0, &Mood::Sad).len(), 3);
    }

    #[test]
    fn test_energetic_four_per_tile() {
        let events = drum_track(16.0, &Mood::Energetic);
        assert_eq!(events.len(), 32);

        let first_tile: Vec<(i32, f64)> = events[..4]
            .iter()
            .map(|e| (e.pitch, e.start_beat))
            .collect();
        assert_eq!(
            first_tile,
            vec![(KICK, 0.0), (CLOSED_HAT, 0.5), (SNARE, 1.0), (CLOSED_HAT, 1.5)]
        );
    }

    #[test]
    fn test_default_backbeat() {
        let events = drum_track(4.0, &Mood::Happy);
        let onsets: Vec<(i32, f64)> = events.iter().map(|e| (e.pitch, e.start_beat)).collect();
        assert_eq!(
            onsets,
            vec![(KICK, 0.0), (SNARE, 1.0), (KICK, 2.0), (SNARE, 3.0)]
        );
    }

    #[test]
    fn test_fixed_channel_velocity_duration() {
        for e in drum_track(8.0, &Mood::Calm) {
            assert_eq!(e.track, DRUM_TRACK);
            assert_eq!(e.channel, DRUM_CHANNEL);
            assert_eq!(e.velocity, HIT_VELOCITY);
            assert_eq!(e.duration_beats, HIT_DURATION);
        }
    }

    #[test]
    fn test_zero_length_has_no_drums() {
        assert!(drum_track(0.0, &Mood::Energetic).is_empty());
    }
}
