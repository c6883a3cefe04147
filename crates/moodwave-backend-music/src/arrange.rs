//! Note styling and lead/bass assembly.

use moodwave_spec::{Mood, Style};

use crate::score::{NoteEvent, BASS_CHANNEL, BASS_TRACK, LEAD_CHANNEL, LEAD_TRACK};

/// Duration and velocity assigned to one melody note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteStyle {
    pub duration: f64,
    pub velocity: i32,
}

impl NoteStyle {
    pub const DEFAULT: NoteStyle = NoteStyle {
        duration: 1.0,
        velocity: 100,
    };
    pub const DRIVING: NoteStyle = NoteStyle {
        duration: 0.5,
        velocity: 120,
    };
    pub const SUSTAINED: NoteStyle = NoteStyle {
        duration: 2.0,
        velocity: 80,
    };
}

/// Bass notes always ring for two beats.
pub const BASS_DURATION: f64 = 2.0;
/// Bass sits one octave under the lead.
pub const BASS_OCTAVE_DROP: i32 = 12;
/// Bass is played softer than the lead.
pub const BASS_VELOCITY_DROP: i32 = 20;

/// Per-note style lookup.
///
/// Only complex style varies, and only for energetic and calm moods.
pub fn style_for(style: Style, mood: &Mood) -> NoteStyle {
    match (style, mood) {
        (Style::Complex, Mood::Energetic) => NoteStyle::DRIVING,
        (Style::Complex, Mood::Calm) => NoteStyle::SUSTAINED,
        _ => NoteStyle::DEFAULT,
    }
}

/// Pair every pitch with its style.
pub fn style_melody(melody: &[u8], style: Style, mood: &Mood) -> Vec<(u8, NoteStyle)> {
    melody
        .iter()
        .map(|&pitch| (pitch, style_for(style, mood)))
        .collect()
}

/// Lay out lead and bass events along a running beat cursor.
///
/// A bass note is added only when the cursor is exactly an even beat. The
/// test is a float equality on `cursor % 2.0`, so a cursor that drifts off
/// the integer grid never triggers a bass note again.
///
/// Returns the events and the final cursor position (total length in beats).
pub fn assemble_tracks(styled: &[(u8, NoteStyle)]) -> (Vec<NoteEvent>, f64) {
    let mut events = Vec::with_capacity(styled.len() * 2);
    let mut cursor = 0.0_f64;

    for &(pitch, note_style) in styled {
        let pitch = i32::from(pitch);

        events.push(NoteEvent {
            track: LEAD_TRACK,
            channel: LEAD_CHANNEL,
            pitch,
            start_beat: cursor,
            duration_beats: note_style.duration,
            velocity: note_style.velocity,
        });

        if cursor % 2.0 == 0.0 {
            events.push(NoteEvent {
                track: BASS_TRACK,
                channel: BASS_CHANNEL,
                pitch: pitch - BASS_OCTAVE_DROP,
                start_beat: cursor,
                duration_beats: BASS_DURATION,
                velocity: note_style.velocity - BASS_VELOCITY_DROP,
            });
        }

        cursor += note_style.duration;
    }

    (events, cursor)
}
