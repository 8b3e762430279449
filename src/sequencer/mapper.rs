// HSV to MIDI parameter mapping

use crate::sampler::Hsv;

/// Lowest pitch produced: A0, the bottom of the 88-key piano range.
pub const MIN_PITCH: u8 = 21;
/// Highest pitch produced: C8, the top of the 88-key piano range.
pub const MAX_PITCH: u8 = 108;
/// Velocity floor, so fully desaturated colors are still audible.
pub const MIN_VELOCITY: u8 = 20;
/// Maximum MIDI velocity.
pub const MAX_VELOCITY: u8 = 127;

/// Map one HSV sample to a (pitch, velocity) pair.
///
/// Hue picks a position on the 12-step chromatic wheel, value picks the
/// octave (darker = bass, brighter = treble), and saturation drives
/// velocity. Pure and infallible; results are always inside the piano
/// range and the velocity floor.
pub fn hsv_to_midi_params(hsv: Hsv) -> (u8, u8) {
    let base_pitch = (hsv.h / 360.0) * 12.0;
    let octave_shift = (hsv.v / 100.0) * 7.0;

    let pitch = (MIN_PITCH as f32 + octave_shift * 12.0 + base_pitch) as i32;
    let pitch = pitch.clamp(MIN_PITCH as i32, MAX_PITCH as i32) as u8;

    let velocity = (MIN_VELOCITY as f32 + (hsv.s / 100.0) * 107.0) as i32;
    let velocity = velocity.clamp(MIN_VELOCITY as i32, MAX_VELOCITY as i32) as u8;

    (pitch, velocity)
}
