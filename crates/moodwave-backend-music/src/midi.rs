//! Standard MIDI File encoding.
//!
//! Writes a Format 1 (multi-track) SMF with one MIDI track per logical
//! score track. One beat maps to one quarter note. Tempo and the lead
//! program change are placed once at tick 0 of the lead track.

use std::io;
use std::path::Path;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

use crate::score::{NoteEvent, Score, LEAD_CHANNEL, TRACK_COUNT};

/// Ticks per quarter note (one beat).
pub const TICKS_PER_BEAT: u16 = 480;

const TRACK_NAMES: [&[u8]; TRACK_COUNT] = [b"Lead", b"Bass", b"Drums"];

/// Largest value a 24-bit tempo meta event can hold.
const MAX_TEMPO_MICROS: u32 = 0xFF_FFFF;

/// Events at the same tick are ordered setup first, then note-offs, then
/// note-ons, so a repeated pitch re-triggers instead of being cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Setup,
    Off,
    On,
}

impl Score {
    /// Encode the score as Standard MIDI File bytes.
    pub fn to_midi_bytes(&self) -> io::Result<Vec<u8>> {
        let smf = score_to_smf(self);
        let mut buf = Vec::new();
        smf.write_std(&mut buf)?;
        Ok(buf)
    }

    /// Encode the score and write it to a file.
    pub fn write_midi(&self, path: &Path) -> io::Result<()> {
        let bytes = self.to_midi_bytes()?;
        std::fs::write(path, bytes)
    }
}

/// Convert a beat position to MIDI ticks.
pub fn beats_to_ticks(beats: f64) -> u32 {
    (beats.max(0.0) * TICKS_PER_BEAT as f64).round() as u32
}

/// Microseconds per quarter note for a tempo in BPM.
pub fn tempo_micros(bpm: u32) -> u32 {
    (60_000_000 / bpm.max(1)).min(MAX_TEMPO_MICROS)
}

fn clamp7(value: i32) -> u7 {
    u7::new(value.clamp(0, 127) as u8)
}

// Velocity 0 on a note-on reads as a note-off
fn note_on_velocity(value: i32) -> u7 {
    u7::new(value.clamp(1, 127) as u8)
}

fn score_to_smf(score: &Score) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_BEAT)),
    ));

    for track_index in 0..TRACK_COUNT {
        let mut timed: Vec<(u32, Slot, TrackEventKind<'static>)> = Vec::new();

        timed.push((
            0,
            Slot::Setup,
            TrackEventKind::Meta(MetaMessage::TrackName(TRACK_NAMES[track_index])),
        ));

        if track_index == 0 {
            timed.push((
                0,
                Slot::Setup,
                TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_micros(score.tempo)))),
            ));
            timed.push((
                0,
                Slot::Setup,
                TrackEventKind::Midi {
                    channel: u4::new(LEAD_CHANNEL),
                    message: MidiMessage::ProgramChange {
                        program: u7::new(score.program.min(127)),
                    },
                },
            ));
        }

        for event in score.track(track_index as u8) {
            push_note(&mut timed, event);
        }

        // Stable sort keeps emission order within a slot
        timed.sort_by_key(|(tick, slot, _)| (*tick, *slot));

        let mut track: Track<'static> = Vec::with_capacity(timed.len() + 1);
        let mut last_tick = 0u32;
        for (tick, _, kind) in timed {
            track.push(TrackEvent {
                delta: u28::new(tick - last_tick),
                kind,
            });
            last_tick = tick;
        }
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });

        smf.tracks.push(track);
    }

    smf
}

fn push_note(timed: &mut Vec<(u32, Slot, TrackEventKind<'static>)>, event: &NoteEvent) {
    let channel = u4::new(event.channel.min(15));
    let key = clamp7(event.pitch);
    let start = beats_to_ticks(event.start_beat);
    // Zero-tick notes would vanish in most players
    let end = beats_to_ticks(event.end_beat()).max(start + 1);

    timed.push((
        start,
        Slot::On,
        TrackEventKind::Midi {
            channel,
            message: MidiMessage::NoteOn {
                key,
                vel: note_on_velocity(event.velocity),
            },
        },
    ));
    timed.push((
        end,
        Slot::Off,
        TrackEventKind::Midi {
            channel,
            message: MidiMessage::NoteOff { key, vel: u7::new(0) },
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{BASS_TRACK, DRUM_CHANNEL, DRUM_TRACK, LEAD_TRACK};

    fn tiny_score() -> Score {
        Score {
            tempo: 120,
            program: 29,
            duration_beats: 2.0,
            events: vec![
                NoteEvent {
                    track: LEAD_TRACK,
                    channel: 0,
                    pitch: 60,
                    start_beat: 0.0,
                    duration_beats: 1.0,
                    velocity: 100,
                },
                NoteEvent {
                    track: LEAD_TRACK,
                    channel: 0,
                    pitch: 60,
                    start_beat: 1.0,
                    duration_beats: 1.0,
                    velocity: 100,
                },
                NoteEvent {
                    track: BASS_TRACK,
                    channel: 1,
                    pitch: 48,
                    start_beat: 0.0,
                    duration_beats: 2.0,
                    velocity: 80,
                },
                NoteEvent {
                    track: DRUM_TRACK,
                    channel: DRUM_CHANNEL,
                    pitch: 35,
                    start_beat: 0.0,
                    duration_beats: 0.5,
                    velocity: 100,
                },
            ],
        }
    }

    #[test]
    fn test_tempo_micros() {
        assert_eq!(tempo_micros(120), 500_000);
        assert_eq!(tempo_micros(60), 1_000_000);
        assert_eq!(tempo_micros(0), MAX_TEMPO_MICROS);
    }

    #[test]
    fn test_beats_to_ticks() {
        assert_eq!(beats_to_ticks(0.0), 0);
        assert_eq!(beats_to_ticks(0.5), 240);
        assert_eq!(beats_to_ticks(2.0), 960);
    }

    #[test]
    fn test_header_and_track_count() {
        let bytes = tiny_score().to_midi_bytes().unwrap();
        assert_eq!(&bytes[0..4], b"MThd");

        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.header.format, Format::Parallel);
        assert_eq!(smf.tracks.len(), 3);
    }

    #[test]
    fn test_lead_track_starts_with_tempo_and_program() {
        let bytes = tiny_score().to_midi_bytes().unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        let lead = &smf.tracks[0];

        assert!(lead.iter().any(|e| matches!(
            e.kind,
            TrackEventKind::Meta(MetaMessage::Tempo(t)) if t.as_int() == 500_000
        )));
        assert!(lead.iter().any(|e| matches!(
            e.kind,
            TrackEventKind::Midi { message: MidiMessage::ProgramChange { program }, .. }
                if program.as_int() == 29
        )));

        // Only the lead track carries tempo
        for track in &smf.tracks[1..] {
            assert!(!track
                .iter()
                .any(|e| matches!(e.kind, TrackEventKind::Meta(MetaMessage::Tempo(_)))));
        }
    }

    #[test]
    fn test_repeated_pitch_off_precedes_on() {
        let bytes = tiny_score().to_midi_bytes().unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        let mut tick = 0u32;
        let mut at_480 = Vec::new();
        for e in &smf.tracks[0] {
            tick += e.delta.as_int();
            if tick == 480 {
                if let TrackEventKind::Midi { message, .. } = e.kind {
                    at_480.push(message);
                }
            }
        }

        assert!(matches!(at_480[0], MidiMessage::NoteOff { .. }));
        assert!(matches!(at_480[1], MidiMessage::NoteOn { .. }));
    }

    #[test]
    fn test_drums_on_channel_ten() {
        let bytes = tiny_score().to_midi_bytes().unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        for e in &smf.tracks[2] {
            if let TrackEventKind::Midi { channel, .. } = e.kind {
                assert_eq!(channel.as_int(), 9);
            }
        }
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let score = Score {
            tempo: 120,
            program: 0,
            duration_beats: 1.0,
            events: vec![NoteEvent {
                track: BASS_TRACK,
                channel: 1,
                pitch: -5,
                start_beat: 0.0,
                duration_beats: 1.0,
                velocity: 140,
            }],
        };
        let bytes = score.to_midi_bytes().unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        let on = smf.tracks[1]
            .iter()
            .find_map(|e| match e.kind {
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { key, vel },
                    ..
                } => Some((key.as_int(), vel.as_int())),
                _ => None,
            })
            .unwrap();
        assert_eq!(on, (0, 127));
    }

    #[test]
    fn test_low_velocity_stays_audible() {
        let mut score = tiny_score();
        for event in &mut score.events {
            event.velocity = -10;
        }
        score.events[1].velocity = 0;
        let bytes = score.to_midi_bytes().unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        let velocities: Vec<u8> = smf
            .tracks
            .iter()
            .flatten()
            .filter_map(|e| match e.kind {
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { vel, .. },
                    ..
                } => Some(vel.as_int()),
                _ => None,
            })
            .collect();
        assert_eq!(velocities.len(), score.events.len());
        assert!(velocities.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_write_midi_matches_in_memory_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mid");
        let score = tiny_score();
        score.write_midi(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), score.to_midi_bytes().unwrap());
    }
}
