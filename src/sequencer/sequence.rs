// Run-length note sequencing over color similarity

use super::mapper::hsv_to_midi_params;
use super::similarity::{colors_are_close, Thresholds};
use crate::sampler::Hsv;

/// A finished note. Times are in beats; durations are always a positive
/// multiple of the sequencer step.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    pub pitch: u8,
    pub velocity: u8,
    pub start_beat: f32,
    pub duration_beats: f32,
}

/// The note currently being accumulated.
#[derive(Debug, Clone)]
struct PendingNote {
    pitch: u8,
    velocity: u8,
    start_beat: f32,
    duration_beats: f32,
}

impl PendingNote {
    fn into_event(self) -> NoteEvent {
        NoteEvent {
            pitch: self.pitch,
            velocity: self.velocity,
            start_beat: self.start_beat,
            duration_beats: self.duration_beats,
        }
    }
}

/// Folds an ordered sample stream into note events.
///
/// Each sample advances the beat clock by one step. A sample whose raw
/// HSV is close to the previous sample's extends the open note instead
/// of starting a new one, so runs of similar color collapse into single
/// sustained notes. Similarity is only ever checked against the
/// immediately preceding sample, so a slow drift keeps extending one
/// note even after it has wandered far from the color the run started
/// on. A merged run also keeps the pitch and velocity mapped from its
/// first sample; later samples contribute duration only. Both behaviors
/// are deliberate and audible, not artifacts.
#[derive(Debug)]
pub struct NoteSequencer {
    step_beats: f32,
    thresholds: Thresholds,
    clock_beats: f32,
    prev_hsv: Option<Hsv>,
    pending: Option<PendingNote>,
    events: Vec<NoteEvent>,
}

impl NoteSequencer {
    pub fn new(step_beats: f32, thresholds: Thresholds) -> Self {
        Self {
            step_beats,
            thresholds,
            clock_beats: 0.0,
            prev_hsv: None,
            pending: None,
            events: Vec::new(),
        }
    }

    /// Consume one sample in traversal order.
    pub fn push(&mut self, hsv: Hsv) {
        let extend = self
            .prev_hsv
            .is_some_and(|prev| colors_are_close(hsv, prev, self.thresholds));

        if extend {
            // prev_hsv is only set once a note is open, so pending
            // is always Some here.
            if let Some(pending) = self.pending.as_mut() {
                pending.duration_beats += self.step_beats;
            }
        } else {
            if let Some(done) = self.pending.take() {
                self.events.push(done.into_event());
            }

            let (pitch, velocity) = hsv_to_midi_params(hsv);
            self.pending = Some(PendingNote {
                pitch,
                velocity,
                start_beat: self.clock_beats,
                duration_beats: self.step_beats,
            });
        }

        self.prev_hsv = Some(hsv);
        self.clock_beats += self.step_beats;
    }

    /// Flush the open note and return the finished sequence.
    pub fn finish(mut self) -> Vec<NoteEvent> {
        if let Some(done) = self.pending.take() {
            self.events.push(done.into_event());
        }
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsv(h: f32, s: f32, v: f32) -> Hsv {
        Hsv { h, s, v }
    }

    fn sequence(samples: &[Hsv]) -> Vec<NoteEvent> {
        let mut sequencer = NoteSequencer::new(0.5, Thresholds::default());
        for &sample in samples {
            sequencer.push(sample);
        }
        sequencer.finish()
    }

    #[test]
    fn empty_input_yields_no_events() {
        assert!(sequence(&[]).is_empty());
    }

    #[test]
    fn single_sample_yields_single_step_note() {
        let events = sequence(&[hsv(120.0, 80.0, 60.0)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_beat, 0.0);
        assert_eq!(events[0].duration_beats, 0.5);
    }

    #[test]
    fn similar_samples_merge() {
        let events = sequence(&[
            hsv(10.0, 50.0, 50.0),
            hsv(12.0, 52.0, 51.0),
            hsv(200.0, 50.0, 50.0),
        ]);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].start_beat, 0.0);
        assert_eq!(events[0].duration_beats, 1.0);
        assert_eq!(events[1].start_beat, 1.0);
        assert_eq!(events[1].duration_beats, 0.5);
    }

    #[test]
    fn dissimilar_samples_stay_separate() {
        let samples: Vec<Hsv> = (0..6).map(|i| hsv(i as f32 * 40.0, 50.0, 50.0)).collect();
        let events = sequence(&samples);
        assert_eq!(events.len(), 6);
        for event in &events {
            assert_eq!(event.duration_beats, 0.5);
        }
    }

    #[test]
    fn durations_always_sum_to_sample_count_times_step() {
        let samples = [
            hsv(10.0, 50.0, 50.0),
            hsv(11.0, 50.0, 50.0),
            hsv(100.0, 20.0, 80.0),
            hsv(102.0, 22.0, 78.0),
            hsv(103.0, 23.0, 79.0),
            hsv(300.0, 90.0, 10.0),
            hsv(12.0, 50.0, 50.0),
        ];
        let events = sequence(&samples);

        let total: f32 = events.iter().map(|e| e.duration_beats).sum();
        assert_eq!(total, samples.len() as f32 * 0.5);
    }

    #[test]
    fn events_are_contiguous_and_non_overlapping() {
        let samples = [
            hsv(10.0, 50.0, 50.0),
            hsv(12.0, 52.0, 51.0),
            hsv(200.0, 50.0, 50.0),
            hsv(201.0, 50.0, 50.0),
            hsv(30.0, 10.0, 90.0),
        ];
        let events = sequence(&samples);

        for pair in events.windows(2) {
            assert_eq!(pair[0].start_beat + pair[0].duration_beats, pair[1].start_beat);
        }
    }

    #[test]
    fn merged_run_keeps_its_first_samples_pitch_and_velocity() {
        let first = hsv(10.0, 40.0, 50.0);
        // Within thresholds of `first`, but maps to a different velocity.
        let second = hsv(12.0, 52.0, 51.0);
        let (expected_pitch, expected_velocity) = hsv_to_midi_params(first);
        assert_ne!(hsv_to_midi_params(second).1, expected_velocity);

        let events = sequence(&[first, second]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].pitch, expected_pitch);
        assert_eq!(events[0].velocity, expected_velocity);
    }

    #[test]
    fn drift_chains_through_neighbors() {
        // Each step is 14 degrees from its neighbor, but the last sample
        // is 42 degrees from the first. Chained comparison merges them
        // all anyway.
        let events = sequence(&[
            hsv(0.0, 50.0, 50.0),
            hsv(14.0, 50.0, 50.0),
            hsv(28.0, 50.0, 50.0),
            hsv(42.0, 50.0, 50.0),
        ]);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration_beats, 2.0);
    }

    #[test]
    fn clock_advances_even_while_merging() {
        // Two merged samples then a break: the third note starts at
        // 2 * step, not at 1 * step.
        let events = sequence(&[
            hsv(10.0, 50.0, 50.0),
            hsv(11.0, 50.0, 50.0),
            hsv(200.0, 50.0, 50.0),
        ]);
        assert_eq!(events[1].start_beat, 1.0);
    }
}
