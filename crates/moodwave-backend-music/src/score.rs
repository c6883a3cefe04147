//! Note events and the score container.

use serde::{Deserialize, Serialize};

/// Lead melody track index.
pub const LEAD_TRACK: u8 = 0;
/// Lead melody MIDI channel.
pub const LEAD_CHANNEL: u8 = 0;
/// Bass track index.
pub const BASS_TRACK: u8 = 1;
/// Bass MIDI channel.
pub const BASS_CHANNEL: u8 = 1;
/// Percussion track index.
pub const DRUM_TRACK: u8 = 2;
/// General MIDI percussion channel (channel 10, zero-based 9).
pub const DRUM_CHANNEL: u8 = 9;

/// Number of logical tracks in every score.
pub const TRACK_COUNT: usize = 3;

/// A single timed note.
///
/// `pitch` and `velocity` are signed so that arithmetic such as `pitch - 12`
/// never wraps; they are clamped into 0-127 only when encoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub track: u8,
    pub channel: u8,
    pub pitch: i32,
    pub start_beat: f64,
    pub duration_beats: f64,
    pub velocity: i32,
}

impl NoteEvent {
    /// Beat at which the note stops sounding.
    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.duration_beats
    }
}

/// A complete arrangement: note events across lead, bass, and drum tracks.
///
/// Tempo and instrument program are recorded once for the head of the lead
/// track rather than per note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Beats per minute.
    pub tempo: u32,
    /// General MIDI program for the lead track.
    pub program: u8,
    /// Length of the lead line in beats.
    pub duration_beats: f64,
    /// All note events, in emission order.
    pub events: Vec<NoteEvent>,
}

impl Score {
    /// Events on the given track, in emission order.
    pub fn track(&self, track: u8) -> impl Iterator<Item = &NoteEvent> + '_ {
        self.events.iter().filter(move |e| e.track == track)
    }

    pub fn lead(&self) -> impl Iterator<Item = &NoteEvent> + '_ {
        self.track(LEAD_TRACK)
    }

    pub fn bass(&self) -> impl Iterator<Item = &NoteEvent> + '_ {
        self.track(BASS_TRACK)
    }

    pub fn drums(&self) -> impl Iterator<Item = &NoteEvent> + '_ {
        self.track(DRUM_TRACK)
    }

    /// Total number of note events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
