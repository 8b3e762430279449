// Pipeline error taxonomy

use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline failures. Anything not listed here (empty input, a
/// cancelled dialog) is a normal early exit, not an error.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source image could not be opened or decoded.
    #[error("failed to decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The MIDI file could not be written.
    #[error("failed to write MIDI file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
