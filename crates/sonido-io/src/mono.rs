//! Mono downmix/upmix for the real-time I/O adapter.
//!
//! The processing engines in this crate run mono internally. These functions
//! are the boundary conversion between a host's interleaved multi-channel
//! buffer and the engine's mono scratch buffer.

/// Downmixes an interleaved, multi-channel buffer into `mono`.
///
/// `channels >= 2`: `mono[i] = 0.5 * (frame[0] + frame[1])`.
/// `channels == 1`: passthrough.
/// `channels == 0`: silence.
pub fn downmix_to_mono(interleaved: &[f32], channels: usize, mono: &mut [f32]) {
    match channels {
        0 => mono.fill(0.0),
        1 => {
            let n = mono.len().min(interleaved.len());
            mono[..n].copy_from_slice(&interleaved[..n]);
        }
        _ => {
            for (frame, out) in interleaved.chunks_exact(channels).zip(mono.iter_mut()) {
                *out = 0.5 * (frame[0] + frame[1]);
            }
        }
    }
}

/// Upmixes a mono buffer into an interleaved, multi-channel buffer.
///
/// `channels >= 2`: duplicates `mono` to channels 0 and 1, zeros the rest.
/// `channels == 1`: passthrough.
/// `channels == 0`: no-op.
pub fn upmix_from_mono(mono: &[f32], channels: usize, interleaved: &mut [f32]) {
    match channels {
        0 => {}
        1 => {
            let n = mono.len().min(interleaved.len());
            interleaved[..n].copy_from_slice(&mono[..n]);
        }
        _ => {
            for (frame, &sample) in interleaved.chunks_exact_mut(channels).zip(mono.iter()) {
                frame[0] = sample;
                frame[1] = sample;
                for ch in &mut frame[2..] {
                    *ch = 0.0;
                }
            }
        }
    }
}
