// MIDI output via midly
//
// Serializes the note sequence as a Standard MIDI File, format 0: one
// track carrying the track name, the tempo, and note on/off pairs on
// channel 0. Beat positions map to ticks at 480 per quarter note.

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::path::Path;

use crate::error::PipelineError;
use crate::sequencer::NoteEvent;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

fn beats_to_ticks(beats: f32) -> u32 {
    (beats * TICKS_PER_QUARTER as f32).round() as u32
}

/// Write the note sequence to `path` as a standard MIDI file.
pub fn write_midi(
    events: &[NoteEvent],
    path: &Path,
    track_name: &str,
    tempo_bpm: u32,
) -> Result<(), PipelineError> {
    let smf = events_to_smf(events, track_name, tempo_bpm);
    smf.save(path).map_err(|source| PipelineError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the in-memory SMF.
pub fn events_to_smf<'a>(events: &[NoteEvent], track_name: &'a str, tempo_bpm: u32) -> Smf<'a> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let mut track: Track<'a> = Vec::new();

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(track_name.as_bytes())),
    });

    let tempo_microseconds = 60_000_000 / tempo_bpm.max(1);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });

    let channel = u4::new(0);
    let mut last_tick: u32 = 0;

    // Notes are contiguous and non-overlapping, so each note's on event
    // lands exactly where the previous note's off event did.
    for event in events {
        let on_tick = beats_to_ticks(event.start_beat);
        let off_tick = on_tick + beats_to_ticks(event.duration_beats);

        track.push(TrackEvent {
            delta: u28::new(on_tick.saturating_sub(last_tick)),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: u7::new(event.pitch),
                    vel: u7::new(event.velocity),
                },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(off_tick - on_tick),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: u7::new(event.pitch),
                    vel: u7::new(0),
                },
            },
        });

        last_tick = off_tick;
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    smf.tracks.push(track);
    smf
}
