// Chromatone - image to MIDI converter
// Main library entry point

pub mod config;
pub mod dialogs;
pub mod error;
pub mod midi;
pub mod sampler;
pub mod sequencer;

use std::path::{Path, PathBuf};

use config::Config;
use error::PipelineError;
use sequencer::NoteSequencer;

/// Result of a completed conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A MIDI file was written.
    Written {
        /// Note events in the file
        notes: usize,
        /// Total length in beats (one step per consumed sample)
        beats: f32,
    },
    /// No opaque samples survived the opacity filter; no file written.
    NothingToConvert,
}

/// Run the whole pipeline: sample the image, fold samples into notes,
/// and write the MIDI file. An image with no opaque pixels produces
/// `Outcome::NothingToConvert` and leaves no file behind.
pub fn convert(input: &Path, output: &Path, config: &Config) -> Result<Outcome, PipelineError> {
    let grid = sampler::sample_image(input, config)?;

    if grid.samples.is_empty() {
        return Ok(Outcome::NothingToConvert);
    }

    log::info!("Converting {} samples to notes", grid.samples.len());

    let mut sequencer = NoteSequencer::new(config.step_beats, config.similarity);
    for (i, sample) in grid.samples.iter().enumerate() {
        sequencer.push(sample.hsv);

        // Purely user feedback; carries no semantics.
        if (i + 1) % 1000 == 0 {
            log::info!("Processed {}/{} samples", i + 1, grid.samples.len());
        }
    }
    let notes = sequencer.finish();

    let beats = grid.samples.len() as f32 * config.step_beats;
    midi::write_midi(&notes, output, &config.track_name, config.tempo_bpm)?;

    Ok(Outcome::Written {
        notes: notes.len(),
        beats,
    })
}

/// Binary entry point: fill in missing paths via file dialogs, then
/// convert. A cancelled dialog is a normal exit, not an error.
pub fn run(input: Option<PathBuf>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load_or_default();

    let input = match input {
        Some(path) => path,
        None => match dialogs::select_image()? {
            Some(path) => path,
            None => {
                log::info!("No image selected, exiting");
                return Ok(());
            }
        },
    };

    log::info!("Selected: {}", input.display());

    let output = match output {
        Some(path) => path,
        None => match dialogs::save_midi_as()? {
            Some(path) => path,
            None => {
                log::info!("No output file selected, exiting");
                return Ok(());
            }
        },
    };

    match convert(&input, &output, &config)? {
        Outcome::Written { notes, beats } => {
            log::info!("MIDI file saved: {} ({} notes)", output.display(), notes);
            let seconds = beats * 60.0 / config.tempo_bpm.max(1) as f32;
            log::info!("Duration: {:.1} seconds ({} beats)", seconds, beats);
        }
        Outcome::NothingToConvert => {
            log::warn!("No opaque pixels to convert; no file written");
        }
    }

    Ok(())
}
